use crate::core::value::Value;
use crate::form::payload::ChangeTarget;
use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;
use crate::widgets::base::{BODY_INDENT, WidgetBase};
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};
use crate::widgets::validators::{Validator, run_validators};

/// Dropdown with a placeholder entry. Left and Right cycle through the
/// placeholder and every option; each step reports the new value.
pub struct SelectInput {
    base: WidgetBase,
    placeholder: String,
    options: Vec<String>,
    selected: Option<usize>,
    change_target: Option<ChangeTarget>,
    validators: Vec<Validator>,
}

impl SelectInput {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        placeholder: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            placeholder: placeholder.into(),
            options,
            selected: None,
            change_target: None,
            validators: Vec::new(),
        }
    }

    pub fn with_change_target(mut self, target: ChangeTarget) -> Self {
        self.change_target = Some(target);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Replaces the options and falls back to the placeholder.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.selected = None;
    }

    pub fn selected_value(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn display_text(&self) -> &str {
        match self.selected {
            Some(_) => self.selected_value(),
            None => &self.placeholder,
        }
    }

    /// Steps through `None, 0, 1, …, len - 1` and wraps.
    pub fn cycle(&mut self, forward: bool) -> bool {
        if self.options.is_empty() {
            return false;
        }
        self.selected = cycle_index(self.selected, self.options.len(), forward);
        true
    }

    fn reported(&self) -> InteractionResult {
        match &self.change_target {
            Some(target) => InteractionResult::with_action(WidgetAction::SectionChanged(
                target.change(self.selected_value()),
            )),
            None => InteractionResult::handled(),
        }
    }
}

/// Next position in a list with a leading placeholder slot.
pub(crate) fn cycle_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (current, forward) {
        (None, true) => Some(0),
        (None, false) => Some(len - 1),
        (Some(index), true) if index + 1 < len => Some(index + 1),
        (Some(_), true) => None,
        (Some(0), false) => None,
        (Some(index), false) => Some(index - 1),
    }
}

/// `‹ value ›` body line shared by every dropdown.
pub(crate) fn dropdown_line(text: &str, is_placeholder: bool, focused: bool) -> SpanLine {
    let style = if is_placeholder {
        theme::muted()
    } else {
        theme::label()
    };
    let arrows = if focused {
        theme::focused()
    } else {
        theme::muted()
    };
    vec![
        Span::new(" ".repeat(BODY_INDENT)),
        Span::styled("‹ ", arrows),
        Span::styled(text.to_string(), style),
        Span::styled(" ›", arrows),
    ]
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        DrawOutput {
            lines: vec![
                self.base.label_line(ctx, self.selected.is_some()),
                dropdown_line(self.display_text(), self.selected.is_none(), focused),
            ],
        }
    }
}

impl Interactive for SelectInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left => {
                if self.cycle(false) {
                    return self.reported();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if self.cycle(true) {
                    return self.reported();
                }
                InteractionResult::ignored()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.selected_value().to_string()))
    }

    fn validate(&self) -> Result<(), String> {
        run_validators(&self.validators, self.selected_value())
    }
}

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
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose stored value is its label.
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(label.clone(), label)
    }
}

/// Row of option buttons. Nothing is selected until the user picks one, and
/// picking reports the option value.
pub struct ChoiceInput {
    base: WidgetBase,
    options: Vec<ChoiceOption>,
    cursor: usize,
    selected: Option<usize>,
    change_target: Option<ChangeTarget>,
    validators: Vec<Validator>,
}

impl ChoiceInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            options,
            cursor: 0,
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

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.base.set_required(true);
        self.validators
            .push(crate::widgets::validators::required(message));
        self
    }

    pub fn selected_value(&self) -> &str {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    fn move_prev(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        self.cursor = (self.cursor + len - 1) % len;
        true
    }

    fn move_next(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        self.cursor = (self.cursor + 1) % self.options.len();
        true
    }

    fn jump_to_letter(&mut self, ch: char) -> bool {
        let needle = ch.to_ascii_lowercase();
        let len = self.options.len();
        // Start after the cursor so repeated presses walk through matches.
        let found = (1..=len)
            .map(|step| (self.cursor + step) % len)
            .find(|&index| {
                self.options[index]
                    .label
                    .chars()
                    .next()
                    .is_some_and(|c| c.to_ascii_lowercase() == needle)
            });
        match found {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => false,
        }
    }

    fn select_cursor(&mut self) -> InteractionResult {
        if self.options.is_empty() {
            return InteractionResult::ignored();
        }
        self.selected = Some(self.cursor);
        match &self.change_target {
            Some(target) => InteractionResult::with_action(WidgetAction::SectionChanged(
                target.change(self.selected_value()),
            )),
            None => InteractionResult::handled(),
        }
    }

    fn option_lines(&self, ctx: &RenderContext, focused: bool) -> Vec<SpanLine> {
        let width = ctx.content_width(BODY_INDENT);
        let mut lines = Vec::new();
        let mut line: SpanLine = vec![Span::new(" ".repeat(BODY_INDENT))];
        let mut used = 0usize;
        for (index, option) in self.options.iter().enumerate() {
            let chip = format!("[ {} ]", option.label);
            let chip_width = UnicodeWidthStr::width(chip.as_str());
            if used > 0 && used + 1 + chip_width > width {
                lines.push(std::mem::replace(
                    &mut line,
                    vec![Span::new(" ".repeat(BODY_INDENT))],
                ));
                used = 0;
            }
            if used > 0 {
                line.push(Span::new(" "));
                used += 1;
            }
            let mut style = if self.selected == Some(index) {
                theme::selected()
            } else {
                theme::muted()
            };
            if focused && index == self.cursor {
                style = style.underline();
            }
            line.push(Span::styled(chip, style));
            used += chip_width;
        }
        lines.push(line);
        lines
    }
}

impl Drawable for ChoiceInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let mut lines = vec![self.base.label_line(ctx, self.selected.is_some())];
        lines.extend(self.option_lines(ctx, focused));
        DrawOutput { lines }
    }
}

impl Interactive for ChoiceInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left | KeyCode::Up => {
                if self.move_prev() {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
            KeyCode::Right | KeyCode::Down => {
                if self.move_next() {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
            KeyCode::Char(' ') => self.select_cursor(),
            KeyCode::Char(ch) => {
                if self.jump_to_letter(ch) {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
            KeyCode::Enter => {
                let mut result = self.select_cursor();
                if result.handled {
                    result = result.and_action(WidgetAction::InputDone);
                }
                result
            }
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

#[cfg(test)]
mod tests {
    use super::{ChoiceInput, ChoiceOption};
    use crate::form::payload::{ChangeTarget, Section, SectionChange};
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::ui::span::line_text;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext};
    use std::collections::HashMap;

    fn bhk() -> ChoiceInput {
        let options = ["1", "2", "3", "4", "4+"]
            .into_iter()
            .map(ChoiceOption::plain)
            .collect();
        ChoiceInput::new("attr.bhk", "BHK", options)
            .with_change_target(ChangeTarget::field(Section::Attributes, "bhk"))
    }

    fn ctx(width: u16) -> RenderContext {
        RenderContext {
            focused_id: None,
            terminal_size: TerminalSize { width, height: 24 },
            visible_errors: HashMap::new(),
        }
    }

    #[test]
    fn nothing_is_selected_until_space() {
        let mut input = bhk();
        input.on_key(KeyEvent::plain(KeyCode::Right));
        assert_eq!(input.selected_value(), "");

        let result = input.on_key(KeyEvent::plain(KeyCode::Char(' ')));

        assert_eq!(input.selected_value(), "2");
        assert_eq!(
            result.actions,
            vec![WidgetAction::SectionChanged(SectionChange::field(
                Section::Attributes,
                "bhk",
                "2"
            ))]
        );
    }

    #[test]
    fn enter_selects_and_moves_on() {
        let mut input = bhk();
        input.on_key(KeyEvent::plain(KeyCode::Left));
        let result = input.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(input.selected_value(), "4+");
        assert_eq!(result.actions.len(), 2);
        assert_eq!(result.actions[1], WidgetAction::InputDone);
    }

    #[test]
    fn letters_cycle_through_matching_options() {
        let options = ["Builder", "Dealer", "Owner", "Broker"]
            .into_iter()
            .map(ChoiceOption::plain)
            .collect();
        let mut input = ChoiceInput::new("attr.listedBy", "Listed by", options);
        input.on_key(KeyEvent::plain(KeyCode::Char('b')));
        input.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(input.selected_value(), "Broker");
        input.on_key(KeyEvent::plain(KeyCode::Char('b')));
        input.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(input.selected_value(), "Builder");
    }

    #[test]
    fn options_wrap_on_narrow_terminals() {
        let input = bhk();
        let wide = input.draw(&ctx(80));
        let narrow = input.draw(&ctx(20));
        assert_eq!(wide.lines.len(), 2);
        assert!(narrow.lines.len() > 2);
        assert!(line_text(&wide.lines[1]).contains("[ 4+ ]"));
    }

    #[test]
    fn required_choice_fails_until_picked() {
        let mut input = bhk().required("pick one");
        assert_eq!(input.validate(), Err("pick one".to_string()));
        input.on_key(KeyEvent::plain(KeyCode::Char(' ')));
        assert_eq!(input.validate(), Ok(()));
    }
}

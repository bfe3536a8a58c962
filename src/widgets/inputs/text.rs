use super::text_edit;
use crate::core::value::Value;
use crate::form::payload::ChangeTarget;
use crate::runtime::event::WidgetAction;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::theme;
use crate::widgets::base::{BODY_INDENT, WidgetBase};
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext, TextEditState,
};
use crate::widgets::validators::{Validator, run_validators};
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Single-line text field. Every accepted edit is reported to its change
/// target; keystrokes that would break `max_len` or the accept pattern are
/// swallowed without a message.
pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
    prefix: Option<String>,
    max_len: Option<usize>,
    show_counter: bool,
    tip: Option<String>,
    accept: Option<&'static Regex>,
    change_target: Option<ChangeTarget>,
    validators: Vec<Validator>,
}

impl TextInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            value: String::new(),
            cursor: 0,
            placeholder: None,
            prefix: None,
            max_len: None,
            show_counter: false,
            tip: None,
            accept: None,
            change_target: None,
            validators: Vec::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        if let Some(max) = self.max_len {
            self.value = self.value.chars().take(max).collect();
        }
        self.cursor = text_edit::char_count(&self.value);
        self
    }

    /// Fixed text shown before the value, e.g. a currency sign.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Shows `n / max` under the field. Needs `with_max_len`.
    pub fn with_counter(mut self) -> Self {
        self.show_counter = true;
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// Only values matching `pattern` are ever stored.
    pub fn with_accept(mut self, pattern: &'static Regex) -> Self {
        self.accept = Some(pattern);
        self
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

    pub fn text(&self) -> &str {
        &self.value
    }

    fn edited_result(&self) -> InteractionResult {
        if let Some(target) = &self.change_target {
            return InteractionResult::with_action(WidgetAction::SectionChanged(
                target.change(self.value.clone()),
            ));
        }
        InteractionResult::handled()
    }

    fn try_insert(&mut self, ch: char) -> InteractionResult {
        if self
            .max_len
            .is_some_and(|max| text_edit::char_count(&self.value) >= max)
        {
            return InteractionResult::consumed();
        }
        let mut candidate = self.value.clone();
        let mut cursor = self.cursor;
        text_edit::insert_char(&mut candidate, &mut cursor, ch);
        if self
            .accept
            .is_some_and(|pattern| !pattern.is_match(&candidate))
        {
            return InteractionResult::consumed();
        }
        self.value = candidate;
        self.cursor = cursor;
        self.edited_result()
    }

    fn prefix_width(&self) -> usize {
        self.prefix.as_deref().map(UnicodeWidthStr::width).unwrap_or(0)
    }

    /// First visible character so that the cursor stays inside `width` columns.
    fn window_start(&self, width: usize) -> usize {
        let cursor = text_edit::clamp_cursor(self.cursor, &self.value);
        let widths: Vec<usize> = self
            .value
            .chars()
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .collect();
        let mut start = 0;
        while start < cursor && widths[start..cursor].iter().sum::<usize>() >= width {
            start += 1;
        }
        start
    }

    fn value_width(&self, ctx_width: usize) -> usize {
        ctx_width.saturating_sub(self.prefix_width()).max(1)
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let indent = " ".repeat(BODY_INDENT);
        let mut lines = vec![self.base.label_line(ctx, !self.value.is_empty())];

        let mut field = vec![Span::new(indent.clone())];
        if let Some(prefix) = &self.prefix {
            field.push(Span::styled(prefix.clone(), theme::muted()));
        }
        if self.value.is_empty() {
            if let Some(placeholder) = &self.placeholder {
                field.push(Span::styled(placeholder.clone(), theme::muted()));
            }
        } else {
            let width = self.value_width(ctx.content_width(BODY_INDENT));
            let start = if focused { self.window_start(width) } else { 0 };
            let visible: String = self.value.chars().skip(start).collect();
            field.push(Span::new(visible));
        }
        if ctx.error(self.base.id()).is_some() {
            for span in field.iter_mut().skip(1) {
                span.style = theme::error();
            }
        }
        lines.push(field);

        let counter = match (self.show_counter, self.max_len) {
            (true, Some(max)) => Some(format!(
                "{} / {}",
                text_edit::char_count(&self.value),
                max
            )),
            _ => None,
        };
        if counter.is_some() || self.tip.is_some() {
            let mut meta = vec![Span::new(indent)];
            if let Some(counter) = counter {
                meta.push(Span::styled(counter, theme::muted()));
            }
            if let Some(tip) = &self.tip {
                if meta.len() > 1 {
                    meta.push(Span::new("  "));
                }
                meta.push(Span::styled(tip.clone(), theme::muted()));
            }
            lines.push(meta);
        }

        DrawOutput { lines }
    }
}

impl Interactive for TextInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
        {
            return InteractionResult::ignored();
        }
        match key.code {
            KeyCode::Char(ch) => self.try_insert(ch),
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.value,
            cursor: &mut self.cursor,
        })
    }

    fn on_text_edited(&mut self) -> InteractionResult {
        self.edited_result()
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.value.clone()))
    }

    fn validate(&self) -> Result<(), String> {
        run_validators(&self.validators, &self.value)
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let cursor = text_edit::clamp_cursor(self.cursor, &self.value);
        // The window is unknown here; assume the common case of a field that fits.
        let value_width: usize = self
            .value
            .chars()
            .take(cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        let col = BODY_INDENT + self.prefix_width() + value_width;
        Some(CursorPos {
            col: col.min(u16::MAX as usize) as u16,
            row: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::form::payload::{ChangeTarget, Section, SectionChange};
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{Interactive, TextAction};
    use crate::widgets::validators::DIGITS_ONLY;

    fn type_text(input: &mut TextInput, text: &str) -> Vec<WidgetAction> {
        text.chars()
            .flat_map(|ch| input.on_key(KeyEvent::plain(KeyCode::Char(ch))).actions)
            .collect()
    }

    fn price() -> TextInput {
        TextInput::new("price", "Price")
            .with_prefix("₹ ")
            .with_accept(&DIGITS_ONLY)
            .with_change_target(ChangeTarget::whole(Section::Price))
    }

    #[test]
    fn price_swallows_non_digits_without_a_message() {
        let mut input = price();
        let actions = type_text(&mut input, "12");
        assert_eq!(actions.len(), 2);

        let result = input.on_key(KeyEvent::plain(KeyCode::Char('a')));

        assert!(result.handled);
        assert!(!result.request_render);
        assert!(result.actions.is_empty());
        assert_eq!(input.text(), "12");
        assert_eq!(
            actions.last(),
            Some(&WidgetAction::SectionChanged(SectionChange::whole(
                Section::Price,
                "12"
            )))
        );
    }

    #[test]
    fn max_len_caps_input() {
        let mut input = TextInput::new("title", "Ad title").with_max_len(3);
        type_text(&mut input, "abcd");
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn every_accepted_edit_reports_the_field() {
        let mut input = TextInput::new("title", "Ad title")
            .with_change_target(ChangeTarget::field(Section::Description, "title"));
        type_text(&mut input, "ab");
        let result = input.on_key(KeyEvent::plain(KeyCode::Backspace));
        assert_eq!(
            result.actions,
            vec![WidgetAction::SectionChanged(SectionChange::field(
                Section::Description,
                "title",
                "a"
            ))]
        );
    }

    #[test]
    fn word_deletion_reports_the_new_value() {
        let mut input = TextInput::new("title", "Ad title")
            .with_change_target(ChangeTarget::field(Section::Description, "title"));
        type_text(&mut input, "sunny flat");
        let result = input.on_text_action(TextAction::DeleteWordLeft);
        assert_eq!(input.text(), "sunny ");
        assert_eq!(result.actions.len(), 1);
    }

    #[test]
    fn required_fails_only_when_empty() {
        let mut input = TextInput::new("title", "Ad title").required("Title missing");
        assert_eq!(input.validate(), Err("Title missing".to_string()));
        type_text(&mut input, " ");
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn enter_signals_done() {
        let mut input = TextInput::new("name", "Name").with_default("forex011");
        let result = input.on_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(result.actions, vec![WidgetAction::InputDone]);
        assert_eq!(input.text(), "forex011");
    }
}

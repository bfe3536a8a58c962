use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::{BODY_INDENT, WidgetBase};
use crate::widgets::traits::{
    DrawOutput, Drawable, FocusMode, InteractionResult, Interactive, RenderContext,
};

/// Submit button. Pressing it asks the app to run the submit gate.
pub struct ButtonInput {
    base: WidgetBase,
    text: String,
}

impl ButtonInput {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            base: WidgetBase::new(id, text.clone()),
            text,
        }
    }
}

impl Drawable for ButtonInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let style = if focused {
            Style::new()
                .color(Color::White)
                .background(crate::ui::theme::INK)
                .bold()
        } else {
            Style::new().color(crate::ui::theme::INK).bold()
        };
        DrawOutput {
            lines: vec![vec![
                Span::new(" ".repeat(BODY_INDENT)),
                Span::styled(format!("[ {} ]", self.text), style),
            ]],
        }
    }
}

impl Interactive for ButtonInput {
    fn focus_mode(&self) -> FocusMode {
        FocusMode::Leaf
    }

    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::with_action(WidgetAction::SubmitRequested)
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ButtonInput;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    #[test]
    fn enter_and_space_request_submit() {
        let mut button = ButtonInput::new("submit", "POST NOW");
        for code in [KeyCode::Enter, KeyCode::Char(' ')] {
            let result = button.on_key(KeyEvent::plain(code));
            assert_eq!(result.actions, vec![WidgetAction::SubmitRequested]);
        }
        assert!(!button.on_key(KeyEvent::plain(KeyCode::Char('x'))).handled);
    }
}

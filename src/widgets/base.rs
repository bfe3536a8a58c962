use crate::ui::span::{Span, SpanLine};
use crate::ui::theme;
use crate::widgets::traits::RenderContext;

/// Columns every field body is indented by, under its label line.
pub const BODY_INDENT: usize = 2;

#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: String,
    label: String,
    required: bool,
}

impl WidgetBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.is_focused(&self.id)
    }

    pub fn focus_marker(&self, focused: bool) -> &'static str {
        if focused { "›" } else { " " }
    }

    /// `› Label *`, followed by a check mark once the field is filled and
    /// shows no error.
    pub fn label_line(&self, ctx: &RenderContext, filled: bool) -> SpanLine {
        let focused = self.is_focused(ctx);
        let label_style = if focused {
            theme::focused()
        } else {
            theme::label()
        };
        let mut line = vec![
            Span::styled(format!("{} ", self.focus_marker(focused)), theme::focused()),
            Span::styled(self.label.clone(), label_style),
        ];
        if self.required {
            line.push(Span::styled(" *", theme::error()));
        }
        if filled && ctx.error(&self.id).is_none() {
            line.push(Span::styled(" ✓", theme::success()));
        }
        line
    }
}

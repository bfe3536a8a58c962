use crate::ui::span::Span;
use crate::ui::style::Style;
use crate::widgets::traits::{DrawOutput, Drawable, OutputNode, RenderContext};

/// Static copy such as section tips.
pub struct Text {
    id: String,
    text: String,
    style: Style,
}

impl Text {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Drawable for Text {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        DrawOutput {
            lines: self
                .text
                .lines()
                .map(|line| vec![Span::styled(line.to_string(), self.style)])
                .collect(),
        }
    }
}

impl OutputNode for Text {}

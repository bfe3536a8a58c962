use crate::ui::style::{Color, Style};

/// Fixed marketplace palette: dark teal ink, cyan accents, red errors.
pub const INK: Color = Color::Rgb(0x00, 0x2f, 0x34);
pub const ACCENT: Color = Color::Rgb(0x23, 0xe5, 0xdb);
pub const MUTED: Color = Color::Rgb(0x88, 0x88, 0x88);
pub const ERROR: Color = Color::Red;
pub const SUCCESS: Color = Color::Rgb(0x00, 0x80, 0x00);

pub fn title() -> Style {
    Style::new().color(INK).background(Color::White).bold()
}

pub fn heading() -> Style {
    Style::new().bold()
}

pub fn label() -> Style {
    Style::new()
}

pub fn muted() -> Style {
    Style::new().color(MUTED)
}

pub fn error() -> Style {
    Style::new().color(ERROR)
}

pub fn success() -> Style {
    Style::new().color(SUCCESS)
}

pub fn focused() -> Style {
    Style::new().color(ACCENT).bold()
}

pub fn selected() -> Style {
    Style::new().color(Color::Black).background(ACCENT).bold()
}

pub fn banner() -> Style {
    Style::new().color(Color::White).background(ERROR).bold()
}

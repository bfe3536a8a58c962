pub mod renderer;
pub mod review;
pub mod span;
pub mod style;
pub mod theme;

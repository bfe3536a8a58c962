pub mod button;
pub mod choice;
pub mod select;
pub mod text;
pub mod text_edit;

pub mod base;
pub mod components;
pub mod inputs;
pub mod node;
pub mod outputs;
pub mod traits;
pub mod validators;

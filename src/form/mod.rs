pub mod aggregator;
pub mod attributes;
pub mod category;
pub mod location;
pub mod lookup;
pub mod payload;
pub mod photo;
pub mod preview;
pub mod submit;
pub mod validation;

pub mod location;
pub mod photo_uploader;

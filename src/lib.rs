pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use config::AppConfig;
pub use error::AppError;
pub use form::aggregator::PostForm;
pub use runtime::Runtime;
pub use state::app_state::AppState;

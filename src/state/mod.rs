pub mod ad_flow;
pub mod app_state;
pub mod flow;
pub mod focus;
pub mod step;
pub mod validation;

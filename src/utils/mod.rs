pub mod parameter_error_handler;

pub use parameter_error_handler::{json_config, json_error_handler};

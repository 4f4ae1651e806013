pub mod aggregate;
pub mod board_config;
pub mod dashboard;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod render;
pub mod requirements_import;
pub mod server;
pub mod source;

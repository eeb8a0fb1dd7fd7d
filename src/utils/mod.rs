// utils module - Contains the launcher configuration and logging setup

pub mod config;
pub mod logging;

// Re-export commonly used items for convenience
pub use config::{LaunchConfig, DEFAULT_CONFIG_PATH};
pub use logging::init_tracing;

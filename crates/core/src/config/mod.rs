//! Configuration management for testrun

mod settings;
pub mod resolve;
pub mod test_config;

// Re-export main types
pub use resolve::{ROOT_ENV_VAR, resolve_working_dir};
pub use settings::{CONFIG_FILE_NAMES, Config, LoadedConfig};
pub use test_config::TestConfig;

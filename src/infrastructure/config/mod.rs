//! Configuration loading adapters

mod file;

pub use file::{default_config_path, env_config, load_file_config};

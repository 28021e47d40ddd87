//! Configuration file parsing for podlog
//!
//! Supports:
//! - `.podlog/config.toml` - Render, filter and producer settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, load_settings_file, CONFIG_DIR, CONFIG_FILENAME};
pub use types::*;

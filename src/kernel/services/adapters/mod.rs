//! Service adapters: OS specific implementations (config files, platform paths).

pub mod config;
pub mod paths;

pub use config::{
    ensure_settings_file, load_settings, save_settings, ConfigError, ConfigService,
};
pub use paths::{app_data_dir, ensure_log_dir, log_dir, settings_path};

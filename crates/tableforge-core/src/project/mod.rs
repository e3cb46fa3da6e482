/// Scene configuration persisted between runs
pub mod config;

pub use config::{default_config_dir, ConfigError, SceneConfig, SessionConfig, TokenDefaultsConfig, CONFIG_FILE_NAME};

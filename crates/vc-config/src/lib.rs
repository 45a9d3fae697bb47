pub mod config;
mod manager;

pub use config::{Region, UserConfig};
pub use manager::{CONFIG_FILE_NAME, ConfigManager, ConfigManagerError};

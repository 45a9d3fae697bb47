use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::config::UserConfig;

pub const CONFIG_FILE_NAME: &str = "valocli_config.toml";

/// Reads and writes the user's config file inside one directory.
/// The session store lives in the same directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigManager {
    dir: PathBuf,
}

impl ConfigManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Use the platform config directory (e.g. `~/.config/valocli`)
    #[instrument(level = "debug")]
    pub fn from_project_dirs() -> Result<Self, ConfigManagerError> {
        let proj_dirs = ProjectDirs::from("com", "valocli", "valocli").ok_or_else(|| {
            error!("Failed to determine project directories - this usually indicates an unsupported OS or missing home directory");
            ConfigManagerError::ProjectDirectoriesUnavailable
        })?;

        let dir = proj_dirs.config_dir().to_path_buf();
        debug!("Config directory resolved to: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Load the saved config. `Ok(None)` when nothing has been saved yet.
    #[instrument(skip(self), level = "debug")]
    pub async fn load(&self) -> Result<Option<UserConfig>, ConfigManagerError> {
        let config_file = self.config_path();

        if tokio::fs::metadata(&config_file).await.is_err() {
            info!("No config file at {}", config_file.display());
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&config_file)
            .await
            .context("Failed to read config file")
            .map_err(|e| {
                error!("Failed to read config file {}: {}", config_file.display(), e);
                ConfigManagerError::ConfigFileReadFailed {
                    path: config_file.clone(),
                    source: e,
                }
            })?;

        let config: UserConfig = toml::from_str(&content)
            .context("Failed to parse config file")
            .map_err(|e| {
                warn!("Failed to parse config file {}: {}", config_file.display(), e);
                ConfigManagerError::ConfigParsingFailed {
                    path: config_file.clone(),
                    source: e,
                }
            })?;

        debug!("Loaded config for '{}'", config.username);
        Ok(Some(config))
    }

    #[instrument(skip(self, config), level = "debug")]
    pub async fn save(&self, config: &UserConfig) -> Result<(), ConfigManagerError> {
        self.ensure_dir().await?;

        let toml = toml::to_string_pretty(config)
            .context("Failed to serialize config to TOML")
            .map_err(|e| {
                error!("Failed to serialize config: {}", e);
                ConfigManagerError::ConfigSerializationFailed { source: e }
            })?;
        let file_path = self.config_path();

        tokio::fs::write(&file_path, toml)
            .await
            .context("Failed to write config file")
            .map_err(|e| {
                error!("Failed to write config file {}: {}", file_path.display(), e);
                ConfigManagerError::ConfigFileWriteFailed {
                    path: file_path.clone(),
                    source: e,
                }
            })?;

        // The file holds a password
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&file_path, std::fs::Permissions::from_mode(0o600))
                .context("Failed to restrict config file permissions")
                .map_err(|e| ConfigManagerError::ConfigFileWriteFailed {
                    path: file_path.clone(),
                    source: e,
                })?;
        }

        info!("Saved config at {}", file_path.display());
        Ok(())
    }

    async fn ensure_dir(&self) -> Result<(), ConfigManagerError> {
        if tokio::fs::metadata(&self.dir).await.is_ok() {
            return Ok(());
        }

        info!("Config directory doesn't exist, creating: {}", self.dir.display());
        tokio::fs::create_dir_all(&self.dir)
            .await
            .context("Failed to create config directory")
            .map_err(|e| {
                error!("Failed to create config directory {}: {}", self.dir.display(), e);
                ConfigManagerError::DirectoryCreationFailed {
                    path: self.dir.clone(),
                    source: e,
                }
            })
    }
}


#[derive(Debug, Error)]
pub enum ConfigManagerError {
    #[error(
        "Project directories are unavailable - this usually indicates an unsupported OS or missing home directory"
    )]
    ProjectDirectoriesUnavailable,

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigFileReadFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigFileWriteFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParsingFailed {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to serialize config: {source}")]
    ConfigSerializationFailed {
        #[source]
        source: anyhow::Error,
    },
}

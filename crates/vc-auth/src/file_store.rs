use std::path::{Path, PathBuf};

use fs2::FileExt;
use tokio::fs;
use tracing::{debug, error, warn};

use crate::errors::{Result, RiotAuthError};
use crate::session::Session;
use crate::store::SessionStore;

pub const SESSION_FILE_NAME: &str = "auth_session.json";

/// JSON file holding the last derived session.
///
/// The file is plain JSON; confidentiality rests on the file mode
/// (`0600`, directory `0700` on Unix).
///
/// # Directory Structure
/// ```text
/// ~/.config/valocli/
/// ├── auth_session.json   # Persisted session
/// └── auth_session.lock   # Advisory lock file
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    lock_file: PathBuf,
}

impl FileSessionStore {
    /// Create a store writing `auth_session.json` under `storage_dir`
    pub async fn new(storage_dir: impl AsRef<Path>) -> Result<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        fs::create_dir_all(&storage_dir).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&storage_dir, std::fs::Permissions::from_mode(0o700))?;
        }

        Ok(Self {
            path: storage_dir.join(SESSION_FILE_NAME),
            lock_file: storage_dir.join("auth_session.lock"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire an exclusive lock on the storage
    fn acquire_lock(&self) -> Result<std::fs::File> {
        let lock_file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_file)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| RiotAuthError::LockTimeout)?;

        Ok(lock_file)
    }

    async fn load_from_disk(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await?;
        let session: Session = serde_json::from_str(&content)?;

        if !session.is_complete() {
            warn!(path = %self.path.display(), "Stored session is missing derived fields");
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save_to_disk(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let file = std::fs::File::open(&temp_path)?;
        file.sync_all()?;

        fs::rename(&temp_path, &self.path).await?;
        debug!(path = %self.path.display(), "Session saved");

        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Option<Session> {
        match self.load_from_disk().await {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to load session from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let _lock = self.acquire_lock()?;
        self.save_to_disk(session).await
    }

    async fn clear(&self) -> Result<()> {
        let _lock = self.acquire_lock()?;

        if self.path.exists() {
            fs::remove_file(&self.path).await?;
        }

        Ok(())
    }
}

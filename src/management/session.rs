use std::{collections::BTreeMap, fmt, io, path::PathBuf};

use crate::config;

/// Key the vendor access token is stored under.
pub const SESSION_TOKEN_KEY: &str = "zaptec_access_token";

const SESSION_FILE: &str = "session.json";

#[derive(Debug)]
pub enum SessionError {
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::IoError(err)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::SerdeError(err)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IoError(e) => write!(f, "session storage: {}", e),
            SessionError::SerdeError(e) => write!(f, "session storage is corrupt: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Key/value session storage backed by a JSON file in the data directory.
///
/// Only [`SESSION_TOKEN_KEY`] is used today. Other keys found in the file are
/// kept untouched on write.
pub struct SessionManager {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SessionManager {
    /// An empty session stored at `path`. Nothing is read or written yet.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: BTreeMap::new(),
        }
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join(SESSION_FILE)
    }

    /// Reads the session at `path`. A missing file yields a logged-out session.
    pub async fn load(path: PathBuf) -> Result<Self, SessionError> {
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::new(path)),
            Err(e) => return Err(SessionError::IoError(e)),
        };

        let entries = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content)?
        };
        Ok(Self { path, entries })
    }

    /// Reads the session from [`SessionManager::default_path`].
    pub async fn load_default() -> Result<Self, SessionError> {
        Self::load(Self::default_path()).await
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.entries.get(SESSION_TOKEN_KEY).map(String::as_str)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Writes the access token to disk, then keeps it in memory.
    ///
    /// On a failed write the session is left as it was.
    pub async fn store(&mut self, token: String) -> Result<(), SessionError> {
        let mut entries = self.entries.clone();
        entries.insert(SESSION_TOKEN_KEY.to_string(), token);
        self.write(&entries).await?;
        self.entries = entries;
        Ok(())
    }

    /// Drops the access token. When nothing else is stored the file is removed.
    pub async fn clear(&mut self) -> Result<(), SessionError> {
        self.entries.remove(SESSION_TOKEN_KEY);
        if !self.entries.is_empty() {
            return self.persist().await;
        }

        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(SessionError::IoError(e)),
            _ => Ok(()),
        }
    }

    async fn persist(&self) -> Result<(), SessionError> {
        self.write(&self.entries).await
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

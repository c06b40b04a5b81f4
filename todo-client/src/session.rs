//! Persistence of the single session token.
//!
//! A [`Session`] owns one [`TokenStore`] and mirrors its value in memory, so
//! every authenticated request reads the token without touching storage.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use thiserror::Error;
use tracing::{debug, warn};

/// Storage failures for the session token.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading, writing or removing the token file failed.
    #[error("failed to {action} session token at {}: {source}", path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// Location of the token file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// Backing storage for the session token.
pub trait TokenStore {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    /// Returns a [`SessionError`] when the storage cannot be read.
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Persists `token`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [`SessionError`] when the storage cannot be written.
    fn save(&mut self, token: &str) -> Result<(), SessionError>;

    /// Deletes the stored token. Removing an absent token succeeds.
    ///
    /// # Errors
    /// Returns a [`SessionError`] when the storage cannot be modified.
    fn remove(&mut self) -> Result<(), SessionError>;
}

/// Keeps the token in a single file, readable only by its owner.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Stores the token at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stores the token at [`default_session_path`].
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(default_session_path())
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &'static str) -> impl FnOnce(std::io::Error) -> SessionError {
        let path = self.path.clone();
        move |source| SessionError::Io {
            action,
            path,
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(self.io_error("read"))?;
        let token = contents.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    fn save(&mut self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(self.io_error("create directory for"))?;
        }
        fs::write(&self.path, token.as_bytes()).map_err(self.io_error("write"))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(self.io_error("restrict permissions of"))?;
        }
        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(self.io_error("remove"))?;
            debug!(path = %self.path.display(), "session token removed");
        }
        Ok(())
    }
}

/// In-process token storage for tests and embedding front ends.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    /// Starts with `token` already stored.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<(), SessionError> {
        self.token = Some(token.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SessionError> {
        self.token = None;
        Ok(())
    }
}

/// The active session: at most one token, loaded once and written through.
pub struct Session<S> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// Opens the session stored in `store`.
    ///
    /// # Errors
    /// Returns a [`SessionError`] when the stored token cannot be read.
    pub fn init(store: S) -> Result<Self, SessionError> {
        let token = store.load()?.filter(|token| !token.trim().is_empty());
        Ok(Self { store, token })
    }

    /// Current token, or `None` when signed out.
    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    /// Stores `token`, overwriting the previous one. A blank token signs the
    /// session out, matching how a blank token file is read back.
    ///
    /// # Errors
    /// Returns a [`SessionError`] when the token cannot be persisted; the
    /// in-memory session is left unchanged in that case.
    pub fn set(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            self.clear();
            return Ok(());
        }
        self.store.save(&token)?;
        self.token = Some(token);
        Ok(())
    }

    /// Drops the token. Storage failures are logged; the in-memory session
    /// is cleared regardless.
    pub fn clear(&mut self) {
        self.token = None;
        if let Err(err) = self.store.remove() {
            warn!(error = %err, "failed to remove persisted session token");
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Platform location of the token file, e.g. `~/.config/todo-client/session.token`.
#[must_use]
pub fn default_session_path() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("todo-client").join("session.token"))
        .unwrap_or_else(|| PathBuf::from("./session.token"))
}

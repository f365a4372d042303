//! Persistence for the bearer token.
//!
//! The backend hands out one opaque token per login. It is stored under the
//! key `token`: in memory for tests and embedded use, or as a small JSON
//! file (`{"token": "..."}`) so a CLI stays signed in across runs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use crew_lounge_core::AuthToken;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::CredentialError;

/// Storage for the current bearer token.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// The stored token, if any.
    async fn get(&self) -> Result<Option<AuthToken>, CredentialError>;

    /// Replace the stored token.
    async fn set(&self, token: &AuthToken) -> Result<(), CredentialError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), CredentialError>;
}

/// Token held for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<AuthToken>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<AuthToken>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<AuthToken>, CredentialError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &AuthToken) -> Result<(), CredentialError> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[derive(Serialize)]
struct StoredRef<'a> {
    token: &'a str,
}

#[derive(Deserialize)]
struct Stored {
    token: Option<String>,
}

/// Token persisted in a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<AuthToken>, CredentialError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: Stored = serde_json::from_slice(&bytes)?;
        Ok(stored
            .token
            .map(AuthToken::from)
            .filter(|t| !t.is_blank()))
    }

    async fn set(&self, token: &AuthToken) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec(&StoredRef {
            token: token.expose(),
        })?;

        // Write then rename so a crash never leaves a half-written file.
        let tmp = self.temp_path();
        write_private(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), "stored credential");
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared credential");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Create `path` fresh and owner-only (on Unix) before any bytes land in it.
async fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    // A leftover temp file would keep its old mode, so start from scratch.
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.sync_all().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("crew-lounge-test-{}-{name}", std::process::id()))
            .join("credentials.json")
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().await.unwrap().is_none());

        store.set(&AuthToken::from("abc")).await.unwrap();
        assert_eq!(store.get().await.unwrap(), Some(AuthToken::from("abc")));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_persists_under_token_key() {
        let path = temp_file("persist");
        let store = FileCredentialStore::new(&path);

        assert!(store.get().await.unwrap().is_none());
        store.set(&AuthToken::from("abc")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");

        // A second handle on the same file sees the token.
        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get().await.unwrap(), Some(AuthToken::from("abc")));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(reopened.get().await.unwrap().is_none());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_file("perms");
        let store = FileCredentialStore::new(&path);
        store.set(&AuthToken::from("abc")).await.unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stale_temp_file_does_not_widen_mode() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_file("stale-tmp");
        let store = FileCredentialStore::new(&path);
        let tmp = store.temp_path();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&tmp, b"leftover").await.unwrap();
        tokio::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o644))
            .await
            .unwrap();

        store.set(&AuthToken::from("abc")).await.unwrap();

        let mode = tokio::fs::metadata(&path).await.unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get().await.unwrap(), Some(AuthToken::from("abc")));
        assert!(!tokio::fs::try_exists(&tmp).await.unwrap());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn test_corrupt_file_is_format_error() {
        let path = temp_file("corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(
            store.get().await,
            Err(CredentialError::Format(_))
        ));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }
}

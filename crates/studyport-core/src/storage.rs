//! File storage abstraction.
//!
//! Accepted uploads land here, keyed by the name derived in [`crate::upload`].
//! The trait keeps the backend swappable (local disk today, object storage
//! later) without touching the handlers.

use std::fmt;
use std::path::PathBuf;
use tokio::fs;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Persist file content under `key` and return the key.
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, StorageError>> + Send + 'a>>;

    /// Delete a file by key. Deleting a missing file is not an error.
    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), StorageError>> + Send + 'a>>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl From<StorageError> for crate::errors::AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "file storage operation failed");
        crate::errors::AppError::internal_error("Failed to store file")
    }
}

/// Local filesystem storage.
///
/// The base directory is created lazily before the first write; creation is
/// idempotent, so concurrent first writes are safe.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Keys are flat file names; anything that could escape the base
    /// directory is rejected.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.contains('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Key must be a plain file name".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(
        &'a self,
        key: &'a str,
        content: &'a [u8],
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, StorageError>> + Send + 'a>>
    {
        Box::pin(async move {
            Self::validate_key(key)?;

            fs::create_dir_all(&self.base_dir).await?;
            fs::write(self.base_dir.join(key), content).await?;

            Ok(key.to_string())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<(), StorageError>> + Send + 'a>>
    {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_derived_names() {
        assert!(LocalFileStorage::validate_key("u1_1000.png").is_ok());
        assert!(
            LocalFileStorage::validate_key("8d9f2c1a-aaaa-bbbb-cccc-000000000000_1700000000000.webp")
                .is_ok()
        );
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("..\\windows\\system32").is_err());
        assert!(LocalFileStorage::validate_key("nested/u1_1000.png").is_err());
    }

    #[test]
    fn test_validate_key_rejects_empty() {
        assert!(LocalFileStorage::validate_key("").is_err());
    }

    #[tokio::test]
    async fn test_save_creates_base_dir_and_writes() {
        let dir = std::env::temp_dir().join(format!("studyport-storage-{}", std::process::id()));
        let storage = LocalFileStorage::new(dir.clone());

        let key = storage.save("u1_1000.png", b"fake image bytes").await.unwrap();
        assert_eq!(key, "u1_1000.png");
        assert_eq!(std::fs::read(dir.join("u1_1000.png")).unwrap(), b"fake image bytes");

        storage.delete("u1_1000.png").await.unwrap();
        assert!(!dir.join("u1_1000.png").exists());

        // deleting again is a no-op
        storage.delete("u1_1000.png").await.unwrap();

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Upload acceptance policy.
//!
//! An [`UploadDescriptor`] carries the metadata of an incoming file: declared
//! MIME type, original filename, byte size. [`UploadPolicy::accept`] decides
//! from that metadata alone, before anything touches durable storage;
//! rejected descriptors never produce a filesystem artifact.
//!
//! Accepted files are stored under a name derived from the owning identity
//! and the acceptance timestamp ([`storage_file_name`]), keeping the original
//! extension. Client-supplied path components never survive into the key.
//!
//! # Example
//!
//! ```ignore
//! use studyport_core::upload::{UploadDescriptor, UploadPolicy};
//!
//! let policy = UploadPolicy::new(
//!     vec!["image/png".to_string(), "image/jpeg".to_string()],
//!     Some(5 * 1024 * 1024),
//! );
//!
//! let descriptor = UploadDescriptor {
//!     mime_type: "image/png".to_string(),
//!     original_name: "photo.png".to_string(),
//!     size: 120_000,
//! };
//!
//! policy.accept(&descriptor)?;
//! ```

use axum::http::StatusCode;
use std::fmt;
use std::path::Path;

use crate::errors::AppError;

/// Metadata about an uploaded file prior to acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    /// MIME type as declared by the client.
    pub mime_type: String,
    /// Original filename as supplied by the client. Only the extension is
    /// ever used.
    pub original_name: String,
    /// Size of the file body in bytes.
    pub size: usize,
}

/// Rejection reasons produced by [`UploadPolicy::accept`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Declared MIME type is not in the allow-list.
    UnsupportedType {
        received: String,
        allowed: Vec<String>,
    },

    /// File exceeds the configured maximum size.
    TooLarge { size: usize, max_bytes: usize },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { received, allowed } => {
                write!(
                    f,
                    "File type '{}' not allowed. Allowed types: {}",
                    received,
                    allowed.join(", ")
                )
            }
            Self::TooLarge { size, max_bytes } => {
                write!(
                    f,
                    "File of {} bytes exceeds maximum size of {} bytes",
                    size, max_bytes
                )
            }
        }
    }
}

impl std::error::Error for UploadError {}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        let status = match err {
            UploadError::UnsupportedType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        };
        AppError::new(status, err.to_string())
    }
}

/// Decides whether an upload may proceed, from metadata alone.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_mime_types: Vec<String>,
    max_file_size: Option<usize>,
}

impl UploadPolicy {
    /// An allow-list entry of the form `image/*` matches any subtype.
    pub fn new(allowed_mime_types: Vec<String>, max_file_size: Option<usize>) -> Self {
        Self {
            allowed_mime_types,
            max_file_size,
        }
    }

    pub fn accept(&self, descriptor: &UploadDescriptor) -> Result<(), UploadError> {
        if !self.allows_type(&descriptor.mime_type) {
            return Err(UploadError::UnsupportedType {
                received: descriptor.mime_type.clone(),
                allowed: self.allowed_mime_types.clone(),
            });
        }

        if let Some(max_bytes) = self.max_file_size {
            if descriptor.size > max_bytes {
                return Err(UploadError::TooLarge {
                    size: descriptor.size,
                    max_bytes,
                });
            }
        }

        Ok(())
    }

    fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|allowed| {
            match allowed.strip_suffix("/*") {
                Some(prefix) => mime_type
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/')),
                None => allowed == mime_type,
            }
        })
    }
}

/// Derive the storage name for an accepted upload:
/// `{owner}_{acceptedAtMillis}{originalExtension}`.
///
/// The name is deterministic and never re-derived later. Two uploads by the
/// same owner within the same millisecond collide (last write wins), an
/// accepted rarity. Only an alphanumeric extension is carried over from the
/// client-supplied name.
pub fn storage_file_name(owner: &str, accepted_at_millis: i64, original_name: &str) -> String {
    match original_extension(original_name) {
        Some(ext) => format!("{}_{}.{}", owner, accepted_at_millis, ext),
        None => format!("{}_{}", owner, accepted_at_millis),
    }
}

fn original_extension(name: &str) -> Option<&str> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_policy() -> UploadPolicy {
        UploadPolicy::new(
            vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
                "image/gif".to_string(),
            ],
            Some(5 * 1024 * 1024),
        )
    }

    fn descriptor(mime: &str, name: &str, size: usize) -> UploadDescriptor {
        UploadDescriptor {
            mime_type: mime.to_string(),
            original_name: name.to_string(),
            size,
        }
    }

    #[test]
    fn test_accepts_allowed_type() {
        let policy = image_policy();
        assert!(policy.accept(&descriptor("image/png", "photo.png", 1024)).is_ok());
    }

    #[test]
    fn test_rejects_pdf_against_image_allow_list() {
        let policy = image_policy();
        let err = policy
            .accept(&descriptor("application/pdf", "notes.pdf", 1024))
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn test_wildcard_accepts_any_image_subtype() {
        let policy = UploadPolicy::new(vec!["image/*".to_string()], None);
        assert!(policy.accept(&descriptor("image/png", "a.png", 10)).is_ok());
        assert!(policy.accept(&descriptor("image/tiff", "a.tiff", 10)).is_ok());
        assert!(
            policy
                .accept(&descriptor("application/pdf", "a.pdf", 10))
                .is_err()
        );
    }

    #[test]
    fn test_wildcard_does_not_match_bare_prefix() {
        let policy = UploadPolicy::new(vec!["image/*".to_string()], None);
        assert!(policy.accept(&descriptor("image", "a", 10)).is_err());
        assert!(policy.accept(&descriptor("imagery/png", "a.png", 10)).is_err());
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let policy = image_policy();
        let err = policy
            .accept(&descriptor("image/png", "big.png", 6 * 1024 * 1024))
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn test_size_at_limit_is_accepted() {
        let policy = UploadPolicy::new(vec!["image/png".to_string()], Some(100));
        assert!(policy.accept(&descriptor("image/png", "a.png", 100)).is_ok());
        assert!(policy.accept(&descriptor("image/png", "a.png", 101)).is_err());
    }

    #[test]
    fn test_no_size_limit_accepts_any_size() {
        let policy = UploadPolicy::new(vec!["image/png".to_string()], None);
        assert!(
            policy
                .accept(&descriptor("image/png", "a.png", usize::MAX))
                .is_ok()
        );
    }

    #[test]
    fn test_type_check_runs_before_size_check() {
        let policy = UploadPolicy::new(vec!["image/png".to_string()], Some(10));
        let err = policy
            .accept(&descriptor("application/pdf", "a.pdf", 1000))
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn test_storage_file_name_derivation() {
        assert_eq!(storage_file_name("u1", 1000, "photo.png"), "u1_1000.png");
    }

    #[test]
    fn test_storage_file_name_without_extension() {
        assert_eq!(storage_file_name("u1", 1000, "README"), "u1_1000");
    }

    #[test]
    fn test_storage_file_name_ignores_client_path() {
        assert_eq!(
            storage_file_name("u1", 1000, "../../etc/passwd.png"),
            "u1_1000.png"
        );
    }

    #[test]
    fn test_storage_file_name_drops_suspect_extension() {
        assert_eq!(storage_file_name("u1", 1000, "a.p~g"), "u1_1000");
    }

    #[test]
    fn test_error_message_names_constraint() {
        let policy = UploadPolicy::new(vec!["image/png".to_string()], Some(10));

        let type_err = policy
            .accept(&descriptor("application/pdf", "a.pdf", 5))
            .unwrap_err();
        assert!(type_err.to_string().contains("application/pdf"));

        let size_err = policy
            .accept(&descriptor("image/png", "a.png", 50))
            .unwrap_err();
        assert!(size_err.to_string().contains("maximum size of 10 bytes"));
    }
}

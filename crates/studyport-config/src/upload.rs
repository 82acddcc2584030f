use std::env;
use std::path::PathBuf;

/// File upload configuration.
///
/// `ALLOWED_UPLOAD_TYPES` is a comma-separated MIME allow-list; an entry of
/// `image/*` accepts any image subtype.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub upload_dir: PathBuf,
    pub allowed_mime_types: Vec<String>,
    pub max_file_size: usize,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("storage/uploads"));

        let allowed_mime_types = env::var("ALLOWED_UPLOAD_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/webp,image/gif".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5 * 1024 * 1024); // 5MB

        Self {
            upload_dir,
            allowed_mime_types,
            max_file_size,
        }
    }
}

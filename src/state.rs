use sqlx::PgPool;

use studyport_config::{CorsConfig, JwtConfig, UploadConfig};
use studyport_core::{LocalFileStorage, UploadPolicy};

use crate::db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub upload_config: UploadConfig,
    pub storage: LocalFileStorage,
}

impl AppState {
    /// Upload policy derived from the configured allow-list and size limit.
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(
            self.upload_config.allowed_mime_types.clone(),
            Some(self.upload_config.max_file_size),
        )
    }
}

pub async fn init_app_state() -> AppState {
    let upload_config = UploadConfig::from_env();

    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        storage: LocalFileStorage::new(upload_config.upload_dir.clone()),
        upload_config,
    }
}

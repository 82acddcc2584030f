use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use studyport_core::AppError;

use super::model::Material;

pub struct MaterialService;

pub struct NewMaterial<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub premium: bool,
    pub file_key: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub uploaded_by: Uuid,
}

impl MaterialService {
    #[instrument]
    pub async fn list(db: &PgPool, premium: bool) -> Result<Vec<Material>, AppError> {
        sqlx::query_as::<_, Material>(
            "SELECT id, title, description, file_key, content_type, size_bytes, premium,
                    uploaded_by, created_at
             FROM materials WHERE premium = $1 ORDER BY created_at DESC",
        )
        .bind(premium)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(new))]
    pub async fn create(db: &PgPool, new: NewMaterial<'_>) -> Result<Material, AppError> {
        sqlx::query_as::<_, Material>(
            "INSERT INTO materials (title, description, file_key, content_type, size_bytes,
                                    premium, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, title, description, file_key, content_type, size_bytes, premium,
                       uploaded_by, created_at",
        )
        .bind(new.title)
        .bind(new.description)
        .bind(new.file_key)
        .bind(new.content_type)
        .bind(new.size_bytes)
        .bind(new.premium)
        .bind(new.uploaded_by)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    /// Delete a material row and return its storage key so the caller can
    /// clean up the stored file.
    #[instrument]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM materials WHERE id = $1 RETURNING file_key",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Material not found"))
    }
}

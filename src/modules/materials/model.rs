use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A published study material.
///
/// `file_key` is the storage name derived at upload acceptance; it is never
/// renamed afterwards. `premium` materials sit behind the platinum gate,
/// everything else behind silver.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct Material {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_key: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub premium: bool,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

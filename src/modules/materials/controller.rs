use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use studyport_core::upload::{UploadDescriptor, storage_file_name};
use studyport_core::{AppError, FileStorage};

use super::model::Material;
use super::service::{MaterialService, NewMaterial};
use crate::middleware::role::RequireTeacher;
use crate::middleware::subscription::{PlatinumAccess, SilverAccess};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

/// List standard study materials (active silver subscription or better)
#[utoipa::path(
    get,
    path = "/api/materials",
    responses(
        (status = 200, description = "Standard study materials", body = Vec<Material>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Subscription missing, insufficient, or expired", body = ErrorResponse),
        (status = 404, description = "Token subject no longer resolves to an account", body = ErrorResponse),
        (status = 500, description = "Subscription check failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Materials"
)]
#[instrument(skip(state))]
pub async fn list_materials(
    State(state): State<AppState>,
    SilverAccess(_subscription): SilverAccess,
) -> Result<Json<Vec<Material>>, AppError> {
    let materials = MaterialService::list(&state.db, false).await?;
    Ok(Json(materials))
}

/// List premium study materials (active platinum subscription)
#[utoipa::path(
    get,
    path = "/api/materials/premium",
    responses(
        (status = 200, description = "Premium study materials", body = Vec<Material>),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Subscription missing, insufficient, or expired", body = ErrorResponse),
        (status = 404, description = "Token subject no longer resolves to an account", body = ErrorResponse),
        (status = 500, description = "Subscription check failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Materials"
)]
#[instrument(skip(state))]
pub async fn list_premium_materials(
    State(state): State<AppState>,
    PlatinumAccess(_subscription): PlatinumAccess,
) -> Result<Json<Vec<Material>>, AppError> {
    let materials = MaterialService::list(&state.db, true).await?;
    Ok(Json(materials))
}

/// Publish a study material with an attached file (teacher only)
///
/// Multipart fields: `title` (required), `description`, `premium`
/// (`true`/`false`), `file` (required).
#[utoipa::path(
    post,
    path = "/api/materials",
    responses(
        (status = 201, description = "Material published", body = Material),
        (status = 400, description = "Missing title or file", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 413, description = "File exceeds the configured size limit", body = ErrorResponse),
        (status = 415, description = "File type not in the allow-list", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Materials"
)]
#[instrument(skip(state, multipart))]
pub async fn upload_material(
    State(state): State<AppState>,
    RequireTeacher(auth_user): RequireTeacher,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Material>), AppError> {
    let uploaded_by = auth_user.user_id()?;

    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut premium = false;
    let mut file: Option<(UploadDescriptor, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                title = Some(read_text_field(field).await?);
            }
            Some("description") => {
                description = Some(read_text_field(field).await?);
            }
            Some("premium") => {
                premium = read_text_field(field).await?.trim() == "true";
            }
            Some("file") => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::bad_request("File field is missing a content type"))?;

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;

                let descriptor = UploadDescriptor {
                    mime_type,
                    original_name,
                    size: data.len(),
                };
                file = Some((descriptor, data));
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("Material title is required"))?;
    let (descriptor, data) = file.ok_or_else(|| AppError::bad_request("File upload is required"))?;

    // Decided from metadata alone; nothing is written on rejection.
    state.upload_policy().accept(&descriptor)?;

    let file_key = storage_file_name(
        &uploaded_by.to_string(),
        Utc::now().timestamp_millis(),
        &descriptor.original_name,
    );
    state.storage.save(&file_key, &data).await?;

    let material = MaterialService::create(
        &state.db,
        NewMaterial {
            title: &title,
            description: description.as_deref(),
            premium,
            file_key: &file_key,
            content_type: &descriptor.mime_type,
            size_bytes: descriptor.size as i64,
            uploaded_by,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

/// Remove a study material and its stored file (teacher only)
#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    params(
        ("id" = Uuid, Path, description = "Material ID")
    ),
    responses(
        (status = 204, description = "Material removed"),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - teacher role required", body = ErrorResponse),
        (status = 404, description = "Material not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Materials"
)]
#[instrument(skip(state))]
pub async fn delete_material(
    State(state): State<AppState>,
    RequireTeacher(_auth_user): RequireTeacher,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let file_key = MaterialService::delete(&state.db, id).await?;

    // The row is gone; a stale file on disk is not worth failing the request
    if let Err(err) = state.storage.delete(&file_key).await {
        tracing::warn!(file_key = %file_key, error = %err, "failed to delete stored file");
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_request(format!("Invalid multipart field: {}", e)))
}

//! Photo handlers: upload, list, get, delete.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use photoflow_core::error::AppError;
use photoflow_core::types::PhotoId;
use photoflow_entity::photo::{Photo, PhotoStatus};
use photoflow_service::UploadedFile;

use crate::dto::request::ListPhotosQuery;
use crate::dto::response::{MessageResponse, PhotoListResponse, UploadResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the uploaded files.
pub const UPLOAD_FIELD: &str = "photos";

/// POST /api/photos/upload
pub async fn upload_photos(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            return Err(AppError::validation(format!(
                "Unexpected field: {}",
                field.name().unwrap_or_default()
            ))
            .into());
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Failed to read upload: {e}")))?;

        files.push(UploadedFile {
            original_name,
            mimetype,
            data,
        });
    }

    let photos = state.upload_service.upload(files).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Photos uploaded successfully".to_string(),
            photos,
        }),
    ))
}

/// GET /api/photos
///
/// An unknown `status` value matches no photo.
pub async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<ListPhotosQuery>,
) -> Json<PhotoListResponse> {
    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<PhotoStatus>() {
            Ok(status) => Some(status),
            Err(_) => return Json(PhotoListResponse::from(Vec::new())),
        },
    };

    Json(state.photo_service.list(status).await.into())
}

/// GET /api/photos/{id}
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Photo>, ApiError> {
    let photo = state.photo_service.get(parse_photo_id(&id)?).await?;
    Ok(Json(photo))
}

/// DELETE /api/photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.photo_service.delete(parse_photo_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Photo deleted successfully")))
}

/// Ids that are not UUIDs cannot name a stored photo.
fn parse_photo_id(raw: &str) -> Result<PhotoId, AppError> {
    raw.parse()
        .map_err(|_| AppError::not_found("Photo not found"))
}

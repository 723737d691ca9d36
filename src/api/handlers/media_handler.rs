//! Media upload handler.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Router,
};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::MEDIA_FORM_FIELD;
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MediaCreatedResponse};

/// Multipart upload form
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct MediaUpload {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Create media routes
pub fn media_routes() -> Router<AppState> {
    Router::new().route("/", post(upload_media))
}

/// Upload a media file to attach to a tweet
#[utoipa::path(
    post,
    path = "/api/medias",
    tag = "Media",
    request_body(content = MediaUpload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media stored", body = MediaCreatedResponse),
        (status = 400, description = "No file in the form")
    )
)]
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Created<MediaCreatedResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        if field.name() != Some(MEDIA_FORM_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        tracing::info!("Received upload {:?} ({} bytes)", file_name, content.len());
        let media_id = state
            .media_service
            .upload(file_name, content.to_vec())
            .await?;

        return Ok(Created(MediaCreatedResponse::new(media_id)));
    }

    Err(AppError::bad_request(format!(
        "multipart field '{}' is required",
        MEDIA_FORM_FIELD
    )))
}

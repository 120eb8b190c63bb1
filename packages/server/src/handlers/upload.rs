use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::upload::{UPLOAD_BUCKETS, UploadResponse};
use crate::state::AppState;
use crate::utils::upload::SpooledImage;

#[utoipa::path(
    post,
    path = "/{bucket}",
    tag = "Uploads",
    operation_id = "uploadImage",
    summary = "Upload an image for a record",
    description = "Stores the multipart `file` field under `<bucket>/<uuid>.<ext>` and returns its key and public URL. \
        Buckets: `member-photos`, `blog-covers`, `gear-images`.",
    params(("bucket" = String, Path, description = "Upload bucket")),
    request_body(content_type = "multipart/form-data", description = "Image upload"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Unknown bucket (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Image too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart), fields(bucket = %bucket))]
pub async fn upload_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    if !UPLOAD_BUCKETS.contains(&bucket.as_str()) {
        return Err(AppError::NotFound(format!("Unknown upload bucket '{bucket}'")));
    }

    let mut image: Option<SpooledImage> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            image = Some(SpooledImage::from_field(field, state.config.storage.max_blob_size).await?);
        }
    }
    let image = image.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let key = image.store(&bucket, &*state.blob_store).await?;
    let url = state.config.storage.public_url(&key);

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            key: key.to_string(),
            url,
        }),
    ))
}

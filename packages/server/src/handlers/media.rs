use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::storage::BlobKey;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Stream a stored object. Keys are random per upload, so responses are
/// cacheable for a long time.
#[instrument(skip(state), fields(key = %key))]
pub async fn serve_media(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let key = BlobKey::parse(&key).map_err(|_| AppError::NotFound("Media not found".into()))?;

    let reader = state.blob_store.get_stream(&key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let mime = mime_guess::from_path(key.as_str()).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

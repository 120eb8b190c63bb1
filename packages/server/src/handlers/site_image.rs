use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::entity::site_image;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppQuery;
use crate::models::shared::trim_optional;
use crate::models::site_image::*;
use crate::state::AppState;
use crate::utils::cache::keys;
use crate::utils::upload::{SpooledImage, discard_stored};

/// Room for the multipart framing on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(storage: &StorageConfig) -> DefaultBodyLimit {
    let max = usize::try_from(storage.max_blob_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(max.saturating_add(MULTIPART_OVERHEAD))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Site Images",
    operation_id = "listSiteImages",
    summary = "List the images of a site section",
    description = "Images of `home` or `galeria`, ordered by `sort_order`, newest first within the same position.",
    params(SiteImageListQuery),
    responses(
        (status = 200, description = "Images", body = Vec<SiteImageResponse>),
        (status = 400, description = "Unknown section (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(section = %query.section))]
pub async fn list_site_images(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SiteImageListQuery>,
) -> Result<Json<Vec<SiteImageResponse>>, AppError> {
    let section = query.section.trim().to_string();
    if !SECTIONS.contains(&section.as_str()) {
        return Err(AppError::Validation(format!(
            "Unknown section '{section}': expected one of {}",
            SECTIONS.join(", ")
        )));
    }

    let images = state
        .cache
        .get_or_load(&keys::site_images(&section), || async {
            let rows = site_image::Entity::find()
                .filter(site_image::Column::Section.eq(&section))
                .order_by_asc(site_image::Column::SortOrder)
                .order_by_desc(site_image::Column::CreatedAt)
                .all(&state.db)
                .await?;
            Ok::<_, AppError>(rows.into_iter().map(SiteImageResponse::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(images))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Site Images",
    operation_id = "uploadSiteImage",
    summary = "Upload a site image",
    description = "Multipart form with `file` (jpg, jpeg, png, webp or gif), `section` (`home` | `galeria`), \
        `category` (required for `galeria`, ignored for `home`), optional `alt_text` and optional `sort_order`. \
        The section and category are checked before the image is stored.",
    request_body(content_type = "multipart/form-data", description = "Image upload"),
    responses(
        (status = 201, description = "Image stored", body = SiteImageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 413, description = "Image too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, multipart))]
pub async fn upload_site_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image: Option<SpooledImage> = None;
    let mut section: Option<String> = None;
    let mut category: Option<String> = None;
    let mut alt_text: Option<String> = None;
    let mut sort_order: i32 = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("file") => {
                image = Some(
                    SpooledImage::from_field(field, state.config.storage.max_blob_size).await?,
                );
            }
            Some(name @ ("section" | "category" | "alt_text" | "sort_order")) => {
                let name = name.to_string();
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read {name}: {e}")))?;
                match name.as_str() {
                    "section" => section = Some(text.trim().to_string()),
                    "category" => category = Some(text),
                    "alt_text" => alt_text = trim_optional(Some(text)),
                    _ => {
                        sort_order = text.trim().parse().map_err(|_| {
                            AppError::Validation("sort_order must be an integer".into())
                        })?;
                    }
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let section =
        section.ok_or_else(|| AppError::Validation("Missing 'section' field".into()))?;
    let category = resolve_section_category(&section, category.as_deref())?;
    if sort_order < 0 {
        return Err(AppError::Validation("Sort order must be >= 0".into()));
    }
    let image = image.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let key = image
        .store(&format!("site-images/{section}"), &*state.blob_store)
        .await?;
    let image_url = state.config.storage.public_url(&key);

    let new_image = site_image::ActiveModel {
        id: Set(Uuid::now_v7()),
        section: Set(section),
        category: Set(category),
        image_url: Set(image_url),
        alt_text: Set(alt_text),
        sort_order: Set(sort_order),
        created_at: Set(chrono::Utc::now()),
    };

    let model = match new_image.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            discard_stored(&*state.blob_store, &key).await;
            return Err(e.into());
        }
    };
    state.cache.invalidate_prefix(keys::SITE_IMAGES);

    Ok((StatusCode::CREATED, Json(SiteImageResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Site Images",
    operation_id = "deleteSiteImage",
    summary = "Delete a site image",
    description = "Removes the image record. The stored file is left in place.",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Image not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn delete_site_image(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = site_image::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Site image not found".into()));
    }

    state.cache.invalidate_prefix(keys::SITE_IMAGES);
    Ok(StatusCode::NO_CONTENT)
}

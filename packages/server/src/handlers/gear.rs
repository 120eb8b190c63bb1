use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::gear_product;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::gear::*;
use crate::state::AppState;
use crate::utils::cache::keys;

const ENTITY: &str = "gear product";

#[utoipa::path(
    get,
    path = "/",
    tag = "Gear",
    operation_id = "listGearProducts",
    summary = "List active gear products",
    description = "Active products ordered by `sort_order`, newest first within the same position.",
    responses(
        (status = 200, description = "Active products", body = Vec<GearProductResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_gear_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<GearProductResponse>>, AppError> {
    let products = state
        .cache
        .get_or_load(keys::GEAR_PRODUCTS, || async {
            let rows = gear_product::Entity::find()
                .filter(gear_product::Column::Active.eq(true))
                .order_by_asc(gear_product::Column::SortOrder)
                .order_by_desc(gear_product::Column::CreatedAt)
                .all(&state.db)
                .await?;
            Ok::<_, AppError>(
                rows.into_iter()
                    .map(GearProductResponse::from)
                    .collect::<Vec<_>>(),
            )
        })
        .await?;

    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Gear",
    operation_id = "getGearProduct",
    summary = "Get an active gear product by slug",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Gear product", body = GearProductResponse),
        (status = 404, description = "No active product with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug = %slug))]
pub async fn get_gear_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GearProductResponse>, AppError> {
    let model = gear_product::Entity::find()
        .filter(gear_product::Column::Slug.eq(&slug))
        .filter(gear_product::Column::Active.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Gear product not found".into()))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Gear",
    operation_id = "adminListGearProducts",
    summary = "List all gear products",
    responses(
        (status = 200, description = "All products", body = Vec<GearProductResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn admin_list_gear_products(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<GearProductResponse>>, AppError> {
    let rows = gear_product::Entity::find()
        .order_by_asc(gear_product::Column::SortOrder)
        .order_by_desc(gear_product::Column::UpdatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(GearProductResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Gear",
    operation_id = "adminGetGearProduct",
    summary = "Get a gear product for editing",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Gear product", body = GearProductResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn admin_get_gear_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GearProductResponse>, AppError> {
    let model = find_gear_product(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Gear",
    operation_id = "createGearProduct",
    summary = "Create a gear product",
    description = "The slug is derived from the name when omitted.",
    request_body = GearProductRequest,
    responses(
        (status = 201, description = "Product created", body = GearProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug already used (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(name = %payload.name))]
pub async fn create_gear_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<GearProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = validate_gear_product(payload)?;

    let now = chrono::Utc::now();
    let new_product = gear_product::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(draft.name),
        slug: Set(draft.slug),
        description: Set(draft.description),
        image_url: Set(draft.image_url),
        active: Set(draft.active),
        sort_order: Set(draft.sort_order),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_product
        .insert(&state.db)
        .await
        .map_err(|e| AppError::from_slug_write(e, ENTITY))?;
    state.cache.invalidate_prefix(keys::GEAR_PRODUCTS);

    Ok((StatusCode::CREATED, Json(GearProductResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Gear",
    operation_id = "updateGearProduct",
    summary = "Replace a gear product",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = GearProductRequest,
    responses(
        (status = 200, description = "Product updated", body = GearProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already used (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %id))]
pub async fn update_gear_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<GearProductRequest>,
) -> Result<Json<GearProductResponse>, AppError> {
    let draft = validate_gear_product(payload)?;

    let txn = state.db.begin().await?;

    let existing = find_gear_product(&txn, id).await?;
    let mut active: gear_product::ActiveModel = existing.into();
    active.name = Set(draft.name);
    active.slug = Set(draft.slug);
    active.description = Set(draft.description);
    active.image_url = Set(draft.image_url);
    active.active = Set(draft.active);
    active.sort_order = Set(draft.sort_order);
    active.updated_at = Set(chrono::Utc::now());

    let model = active
        .update(&txn)
        .await
        .map_err(|e| AppError::from_slug_write(e, ENTITY))?;
    txn.commit().await?;

    state.cache.invalidate_prefix(keys::GEAR_PRODUCTS);
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Gear",
    operation_id = "deleteGearProduct",
    summary = "Delete a gear product",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn delete_gear_product(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = gear_product::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Gear product not found".into()));
    }

    state.cache.invalidate_prefix(keys::GEAR_PRODUCTS);
    Ok(StatusCode::NO_CONTENT)
}

async fn find_gear_product<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<gear_product::Model, AppError> {
    gear_product::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Gear product not found".into()))
}

use axum::Json;
use axum::extract::{Path, State};
use common::whatsapp::{JOIN_MESSAGE, WHATSAPP_PHONE_KEY, join_link};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::site_setting;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::settings::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/settings/{key}",
    tag = "Settings",
    operation_id = "getSetting",
    summary = "Read a site setting",
    params(("key" = String, Path, description = "Setting key")),
    responses(
        (status = 200, description = "Setting", body = SettingResponse),
        (status = 404, description = "Setting not set (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(key = %key))]
pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SettingResponse>, AppError> {
    let model = find_setting(&state.db, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Setting '{key}' not found")))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/join-link",
    tag = "Settings",
    operation_id = "getJoinLink",
    summary = "WhatsApp link for prospective members",
    description = "Builds a `wa.me` link from the `whatsapp_phone` setting with a prefilled greeting.",
    responses(
        (status = 200, description = "Join link", body = JoinLinkResponse),
        (status = 404, description = "No usable phone number configured (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_join_link(State(state): State<AppState>) -> Result<Json<JoinLinkResponse>, AppError> {
    let url = find_setting(&state.db, WHATSAPP_PHONE_KEY)
        .await?
        .and_then(|setting| join_link(&setting.value, JOIN_MESSAGE))
        .ok_or_else(|| AppError::NotFound("No WhatsApp number configured".into()))?;
    Ok(Json(JoinLinkResponse { url }))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Settings",
    operation_id = "listSettings",
    summary = "List all site settings",
    responses(
        (status = 200, description = "Settings ordered by key", body = Vec<SettingResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_settings(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SettingResponse>>, AppError> {
    let rows = site_setting::Entity::find()
        .order_by_asc(site_setting::Column::Key)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(SettingResponse::from).collect()))
}

#[utoipa::path(
    put,
    path = "/{key}",
    tag = "Settings",
    operation_id = "putSetting",
    summary = "Write a site setting",
    description = "Creates the setting or overwrites its value.",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpdateSettingRequest,
    responses(
        (status = 200, description = "Setting stored", body = SettingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(key = %key))]
pub async fn put_setting(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
    AppJson(payload): AppJson<UpdateSettingRequest>,
) -> Result<Json<SettingResponse>, AppError> {
    validate_setting_key(&key)?;

    let model = site_setting::ActiveModel {
        key: Set(key.clone()),
        value: Set(payload.value.trim().to_string()),
        updated_at: Set(chrono::Utc::now()),
    };

    site_setting::Entity::insert(model)
        .on_conflict(
            OnConflict::column(site_setting::Column::Key)
                .update_columns([site_setting::Column::Value, site_setting::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await?;

    let saved = find_setting(&state.db, &key)
        .await?
        .ok_or_else(|| AppError::Internal("site_setting missing after upsert".into()))?;

    tracing::info!("Setting updated");
    Ok(Json(saved.into()))
}

async fn find_setting<C: ConnectionTrait>(
    db: &C,
    key: &str,
) -> Result<Option<site_setting::Model>, AppError> {
    Ok(site_setting::Entity::find_by_id(key.to_string()).one(db).await?)
}

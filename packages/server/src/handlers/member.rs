use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use serde_json::Value;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::member;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::member::{MemberInput, MemberProfile, parse_member_form};
use crate::state::AppState;
use crate::utils::cache::keys;

#[utoipa::path(
    get,
    path = "/",
    tag = "Members",
    operation_id = "listMembers",
    summary = "List all members",
    description = "Returns every member ordered by full name. Null columns are omitted from each profile.",
    responses(
        (status = 200, description = "Members", body = Vec<MemberProfile>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberProfile>>, AppError> {
    let members = state
        .cache
        .get_or_load(keys::MEMBERS, || async {
            let rows = member::Entity::find()
                .order_by_asc(member::Column::FullName)
                .all(&state.db)
                .await?;
            Ok::<_, AppError>(rows.into_iter().map(MemberProfile::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(members))
}

#[utoipa::path(
    get,
    path = "/legends",
    tag = "Members",
    operation_id = "listLegends",
    summary = "List the club legends",
    description = "Returns members flagged as legends, ordered by marathon count (most first) and then by marathon PR (fastest first).",
    responses(
        (status = 200, description = "Legends", body = Vec<MemberProfile>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_legends(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberProfile>>, AppError> {
    let legends = state
        .cache
        .get_or_load(keys::LEGENDS, || async {
            let rows = member::Entity::find()
                .filter(member::Column::IsLegend.eq(true))
                .order_by_desc(member::Column::TotalMarathons)
                .order_by_asc(member::Column::MarathonPr)
                .all(&state.db)
                .await?;
            Ok::<_, AppError>(rows.into_iter().map(MemberProfile::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(legends))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Members",
    operation_id = "getMember",
    summary = "Get a member by ID",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member profile", body = MemberProfile),
        (status = 404, description = "Member not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberProfile>, AppError> {
    let model = find_member(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Members",
    operation_id = "adminListMembers",
    summary = "List members for editing",
    description = "Uncached variant of the member list for the admin console.",
    responses(
        (status = 200, description = "Members", body = Vec<MemberProfile>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn admin_list_members(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberProfile>>, AppError> {
    let rows = member::Entity::find()
        .order_by_asc(member::Column::FullName)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(MemberProfile::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Members",
    operation_id = "adminGetMember",
    summary = "Get a member for editing",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member profile", body = MemberProfile),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Member not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn admin_get_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MemberProfile>, AppError> {
    let model = find_member(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Members",
    operation_id = "createMember",
    summary = "Create a member",
    description = "Accepts the member form either as typed JSON or with every value as a string. \
        Blank text becomes null, blank counts become 0, and `marathon_cities` may be a comma-separated string.",
    request_body = MemberInput,
    responses(
        (status = 201, description = "Member created", body = MemberProfile),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin = %admin.username))]
pub async fn create_member(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    let input = parse_member_form(&payload)?;

    let now = chrono::Utc::now();
    let mut new_member = member::ActiveModel {
        id: Set(Uuid::now_v7()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    input.apply(&mut new_member);

    let model = new_member.insert(&state.db).await?;
    state.cache.invalidate_prefix(keys::MEMBERS);

    tracing::info!(id = %model.id, "Member created");
    Ok((StatusCode::CREATED, Json(MemberProfile::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Members",
    operation_id = "updateMember",
    summary = "Replace a member",
    description = "Overwrites every editable field with the submitted form, using the same coercion rules as create.",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = MemberInput,
    responses(
        (status = 200, description = "Member updated", body = MemberProfile),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Member not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %id))]
pub async fn update_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<Value>,
) -> Result<Json<MemberProfile>, AppError> {
    let input = parse_member_form(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_member(&txn, id).await?;
    let mut active: member::ActiveModel = existing.into();
    input.apply(&mut active);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    state.cache.invalidate_prefix(keys::MEMBERS);
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Members",
    operation_id = "deleteMember",
    summary = "Delete a member",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Member not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn delete_member(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = member::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Member not found".into()));
    }

    state.cache.invalidate_prefix(keys::MEMBERS);
    Ok(StatusCode::NO_CONTENT)
}

async fn find_member<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<member::Model, AppError> {
    member::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Member not found".into()))
}

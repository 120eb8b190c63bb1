use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::blog_post;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::blog::*;
use crate::state::AppState;
use crate::utils::cache::keys;

const ENTITY: &str = "blog post";

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "listBlogPosts",
    summary = "List published blog posts",
    description = "Published posts, newest publication first.",
    responses(
        (status = 200, description = "Published posts", body = Vec<BlogPostResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_blog_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let posts = state
        .cache
        .get_or_load(keys::BLOG_POSTS, || async {
            let rows = blog_post::Entity::find()
                .filter(blog_post::Column::Published.eq(true))
                .order_by_desc(blog_post::Column::PublishedAt)
                .all(&state.db)
                .await?;
            Ok::<_, AppError>(rows.into_iter().map(BlogPostResponse::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(posts))
}

#[utoipa::path(
    get,
    path = "/{slug}",
    tag = "Blog",
    operation_id = "getBlogPost",
    summary = "Get a published blog post by slug",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogPostResponse),
        (status = 404, description = "No published post with this slug (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(slug = %slug))]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = blog_post::Entity::find()
        .filter(blog_post::Column::Slug.eq(&slug))
        .filter(blog_post::Column::Published.eq(true))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blog",
    operation_id = "adminListBlogPosts",
    summary = "List all blog posts",
    description = "Drafts and published posts, most recently edited first.",
    responses(
        (status = 200, description = "All posts", body = Vec<BlogPostResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn admin_list_blog_posts(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogPostResponse>>, AppError> {
    let rows = blog_post::Entity::find()
        .order_by_desc(blog_post::Column::UpdatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(BlogPostResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Blog",
    operation_id = "adminGetBlogPost",
    summary = "Get a blog post for editing",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Blog post", body = BlogPostResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn admin_get_blog_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let model = find_blog_post(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blog",
    operation_id = "createBlogPost",
    summary = "Create a blog post",
    description = "The slug is derived from the title when omitted. Creating a post as published stamps `published_at`.",
    request_body = BlogPostRequest,
    responses(
        (status = 201, description = "Post created", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 409, description = "Slug already used (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(title = %payload.title))]
pub async fn create_blog_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = validate_blog_post(payload)?;

    let now = chrono::Utc::now();
    let new_post = blog_post::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(draft.title),
        slug: Set(draft.slug),
        category: Set(draft.category),
        author: Set(draft.author),
        excerpt: Set(draft.excerpt),
        cover_image_url: Set(draft.cover_image_url),
        content: Set(draft.content),
        published: Set(draft.published),
        published_at: Set(next_published_at(None, draft.published, now)),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = new_post
        .insert(&state.db)
        .await
        .map_err(|e| AppError::from_slug_write(e, ENTITY))?;
    state.cache.invalidate_prefix(keys::BLOG_POSTS);

    Ok((StatusCode::CREATED, Json(BlogPostResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Blog",
    operation_id = "updateBlogPost",
    summary = "Replace a blog post",
    description = "Publishing a draft stamps `published_at`; re-saving a published post keeps it; unpublishing clears it.",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body = BlogPostRequest,
    responses(
        (status = 200, description = "Post updated", body = BlogPostResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Slug already used (SLUG_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, payload), fields(id = %id))]
pub async fn update_blog_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<BlogPostRequest>,
) -> Result<Json<BlogPostResponse>, AppError> {
    let draft = validate_blog_post(payload)?;

    let txn = state.db.begin().await?;

    let existing = find_blog_post(&txn, id).await?;
    let now = chrono::Utc::now();
    let published_at = next_published_at(Some(&existing), draft.published, now);

    let mut active: blog_post::ActiveModel = existing.into();
    active.title = Set(draft.title);
    active.slug = Set(draft.slug);
    active.category = Set(draft.category);
    active.author = Set(draft.author);
    active.excerpt = Set(draft.excerpt);
    active.cover_image_url = Set(draft.cover_image_url);
    active.content = Set(draft.content);
    active.published = Set(draft.published);
    active.published_at = Set(published_at);
    active.updated_at = Set(now);

    let model = active
        .update(&txn)
        .await
        .map_err(|e| AppError::from_slug_write(e, ENTITY))?;
    txn.commit().await?;

    state.cache.invalidate_prefix(keys::BLOG_POSTS);
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Blog",
    operation_id = "deleteBlogPost",
    summary = "Delete a blog post",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Post not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id = %id))]
pub async fn delete_blog_post(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let result = blog_post::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Blog post not found".into()));
    }

    state.cache.invalidate_prefix(keys::BLOG_POSTS);
    Ok(StatusCode::NO_CONTENT)
}

async fn find_blog_post<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<blog_post::Model, AppError> {
    blog_post::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".into()))
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::blog_post;
use crate::error::AppError;
use crate::models::shared::{resolve_slug, trim_optional, validate_required, validate_title};

/// Categories a post can be filed under.
pub const BLOG_CATEGORIES: &[&str] = &[
    "Experiencias",
    "Guias",
    "Entrenamiento",
    "Rituales",
    "Viajes",
    "Nutricion",
    "General",
];

pub const DEFAULT_CATEGORY: &str = "General";

/// Request body for creating or replacing a blog post.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct BlogPostRequest {
    #[schema(example = "Mi primer maratón de Boston")]
    pub title: String,
    /// Derived from the title when omitted.
    #[schema(example = "mi-primer-maraton-de-boston")]
    pub slug: Option<String>,
    /// Defaults to `General`.
    #[schema(example = "Experiencias")]
    pub category: Option<String>,
    #[schema(example = "Ana López")]
    pub author: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    /// Markdown body.
    pub content: String,
    #[serde(default)]
    pub published: bool,
}

/// A validated blog post ready to be written.
pub struct BlogPostDraft {
    pub title: String,
    pub slug: String,
    pub category: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub content: String,
    pub published: bool,
}

pub fn validate_blog_post(payload: BlogPostRequest) -> Result<BlogPostDraft, AppError> {
    validate_title(&payload.title)?;
    validate_required("Author", &payload.author, 128)?;
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }

    let category = match trim_optional(payload.category) {
        Some(c) if BLOG_CATEGORIES.contains(&c.as_str()) => c,
        Some(c) => {
            return Err(AppError::Validation(format!(
                "Unknown category '{c}': expected one of {}",
                BLOG_CATEGORIES.join(", ")
            )));
        }
        None => DEFAULT_CATEGORY.to_string(),
    };

    let title = payload.title.trim().to_string();
    let slug = resolve_slug(&title, payload.slug.as_deref())?;

    Ok(BlogPostDraft {
        title,
        slug,
        category,
        author: payload.author.trim().to_string(),
        excerpt: trim_optional(payload.excerpt),
        cover_image_url: trim_optional(payload.cover_image_url),
        content: payload.content,
        published: payload.published,
    })
}

/// Publication timestamp after a save.
///
/// Stamped with `now` when the post becomes published, kept while it stays
/// published, cleared when it is unpublished.
pub fn next_published_at(
    previous: Option<&blog_post::Model>,
    published: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if !published {
        return None;
    }
    match previous {
        Some(prev) if prev.published => prev.published_at.or(Some(now)),
        _ => Some(now),
    }
}

/// Blog post details.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct BlogPostResponse {
    pub id: Uuid,
    #[schema(example = "Mi primer maratón de Boston")]
    pub title: String,
    #[schema(example = "mi-primer-maraton-de-boston")]
    pub slug: String,
    #[schema(example = "Experiencias")]
    pub category: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    pub content: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(m: blog_post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            slug: m.slug,
            category: m.category,
            author: m.author,
            excerpt: m.excerpt,
            cover_image_url: m.cover_image_url,
            content: m.content,
            published: m.published,
            published_at: m.published_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

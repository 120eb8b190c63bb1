use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::gear_product;
use crate::error::AppError;
use crate::models::shared::{resolve_slug, trim_optional, validate_required, validate_sort_order};

fn default_active() -> bool {
    true
}

/// Request body for creating or replacing a gear product.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct GearProductRequest {
    #[schema(example = "Playera oficial 2025")]
    pub name: String,
    /// Derived from the name when omitted.
    #[schema(example = "playera-oficial-2025")]
    pub slug: Option<String>,
    pub description: String,
    pub image_url: Option<String>,
    /// Inactive products are hidden from the public catalogue. Default: true.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Position in the catalogue (>= 0). Default: 0.
    #[serde(default)]
    pub sort_order: i32,
}

/// A validated gear product ready to be written.
pub struct GearProductDraft {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub sort_order: i32,
}

pub fn validate_gear_product(payload: GearProductRequest) -> Result<GearProductDraft, AppError> {
    validate_required("Name", &payload.name, 256)?;
    if payload.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    validate_sort_order(payload.sort_order)?;

    let name = payload.name.trim().to_string();
    let slug = resolve_slug(&name, payload.slug.as_deref())?;

    Ok(GearProductDraft {
        name,
        slug,
        description: payload.description.trim().to_string(),
        image_url: trim_optional(payload.image_url),
        active: payload.active,
        sort_order: payload.sort_order,
    })
}

/// Gear product details.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct GearProductResponse {
    pub id: Uuid,
    #[schema(example = "Playera oficial 2025")]
    pub name: String,
    #[schema(example = "playera-oficial-2025")]
    pub slug: String,
    pub description: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<gear_product::Model> for GearProductResponse {
    fn from(m: gear_product::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            image_url: m.image_url,
            active: m.active,
            sort_order: m.sort_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

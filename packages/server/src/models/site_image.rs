use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::site_image;
use crate::error::AppError;

pub const SECTION_HOME: &str = "home";
pub const SECTION_GALLERY: &str = "galeria";
pub const SECTIONS: &[&str] = &[SECTION_HOME, SECTION_GALLERY];

/// Categories of the gallery section.
pub const GALLERY_CATEGORIES: &[&str] = &["entrenamientos", "carreras", "viajes", "convivios"];

/// Check the section and resolve the category that will be stored.
///
/// Gallery images need one of [`GALLERY_CATEGORIES`]; home images never
/// carry a category, so a provided one is dropped.
pub fn resolve_section_category(
    section: &str,
    category: Option<&str>,
) -> Result<Option<String>, AppError> {
    let category = category.map(str::trim).filter(|c| !c.is_empty());
    match section {
        SECTION_HOME => Ok(None),
        SECTION_GALLERY => match category {
            Some(c) if GALLERY_CATEGORIES.contains(&c) => Ok(Some(c.to_string())),
            Some(c) => Err(AppError::Validation(format!(
                "Unknown gallery category '{c}': expected one of {}",
                GALLERY_CATEGORIES.join(", ")
            ))),
            None => Err(AppError::Validation(
                "Gallery images require a category".into(),
            )),
        },
        other => Err(AppError::Validation(format!(
            "Unknown section '{other}': expected one of {}",
            SECTIONS.join(", ")
        ))),
    }
}

/// Query parameters for listing site images.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SiteImageListQuery {
    /// `home` or `galeria`.
    #[param(example = "galeria")]
    pub section: String,
}

/// Site image details.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SiteImageResponse {
    pub id: Uuid,
    #[schema(example = "galeria")]
    pub section: String,
    #[schema(example = "carreras")]
    pub category: Option<String>,
    #[schema(example = "/media/site-images/galeria/0192f3c1-7d2a-7c4e-9a51-3b1f0e2d4c6a.jpg")]
    pub image_url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<site_image::Model> for SiteImageResponse {
    fn from(m: site_image::Model) -> Self {
        Self {
            id: m.id,
            section: m.section,
            category: m.category,
            image_url: m.image_url,
            alt_text: m.alt_text,
            sort_order: m.sort_order,
            created_at: m.created_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::site_setting;
use crate::error::AppError;

/// Setting keys are short `snake_case` identifiers.
pub fn validate_setting_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() || key.len() > 64 {
        return Err(AppError::Validation(
            "Setting key must be 1-64 characters".into(),
        ));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(AppError::Validation(
            "Setting key must contain only lowercase letters, digits, and underscores".into(),
        ));
    }
    Ok(())
}

/// Request body for writing a setting.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateSettingRequest {
    #[schema(example = "+52 81 1234 5678")]
    pub value: String,
}

/// A stored setting.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SettingResponse {
    #[schema(example = "whatsapp_phone")]
    pub key: String,
    #[schema(example = "+52 81 1234 5678")]
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl From<site_setting::Model> for SettingResponse {
    fn from(m: site_setting::Model) -> Self {
        Self {
            key: m.key,
            value: m.value,
            updated_at: m.updated_at,
        }
    }
}

/// WhatsApp link that opens a chat with the club.
#[derive(Serialize, utoipa::ToSchema)]
pub struct JoinLinkResponse {
    #[schema(example = "https://wa.me/528112345678?text=%C2%A1Hola%21")]
    pub url: String,
}

use chrono::{DateTime, NaiveDate, Utc};
use common::form::{MEMBER_FORM_RULES, normalize};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::member;
use crate::error::AppError;

/// Member form as stored, after [`parse_member_form`] has coerced every field.
///
/// Form clients may send every value as a string; numbers, flags and the
/// city list are converted according to the member form rules.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MemberInput {
    #[schema(example = "Ana López")]
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    #[schema(example = 2016)]
    pub year_joined: Option<i32>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub strava: Option<String>,
    #[schema(example = 12)]
    pub total_marathons: i32,
    /// `HH:MM:SS`
    #[schema(example = "02:58:41")]
    pub marathon_pr: Option<String>,
    pub marathon_pr_year: Option<i32>,
    pub marathon_pr_city: Option<String>,
    pub boston_count: i32,
    /// `HH:MM:SS`
    pub half_marathon_pr: Option<String>,
    /// `MM:SS`
    pub ten_k_pr: Option<String>,
    pub sub3_marathons: i32,
    pub most_run_marathon: Option<String>,
    /// Gazetteer keys; a comma-separated string is also accepted.
    #[schema(example = json!(["Boston", "Chicago"]))]
    pub marathon_cities: Option<Vec<String>>,
    pub other_marathon_cities: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub photo_authorized: bool,
    pub has_placeholder_photo: bool,
    pub is_legend: bool,
}

/// Coerce a raw member form body into a typed [`MemberInput`].
pub fn parse_member_form(raw: &Value) -> Result<MemberInput, AppError> {
    let normalized = normalize(raw, MEMBER_FORM_RULES)?;
    let input: MemberInput = serde_json::from_value(Value::Object(normalized))
        .map_err(|e| AppError::Validation(format!("Invalid member form: {e}")))?;

    if input.full_name.chars().count() > 256 {
        return Err(AppError::Validation(
            "full_name must be at most 256 characters".into(),
        ));
    }
    Ok(input)
}

impl MemberInput {
    /// Overwrite every editable column of `model` with this form.
    pub fn apply(self, model: &mut member::ActiveModel) {
        model.full_name = Set(self.full_name);
        model.date_of_birth = Set(self.date_of_birth);
        model.year_joined = Set(self.year_joined);
        model.email = Set(self.email);
        model.phone = Set(self.phone);
        model.instagram = Set(self.instagram);
        model.strava = Set(self.strava);
        model.total_marathons = Set(self.total_marathons);
        model.marathon_pr = Set(self.marathon_pr);
        model.marathon_pr_year = Set(self.marathon_pr_year);
        model.marathon_pr_city = Set(self.marathon_pr_city);
        model.boston_count = Set(self.boston_count);
        model.half_marathon_pr = Set(self.half_marathon_pr);
        model.ten_k_pr = Set(self.ten_k_pr);
        model.sub3_marathons = Set(self.sub3_marathons);
        model.most_run_marathon = Set(self.most_run_marathon);
        model.marathon_cities = Set(self.marathon_cities);
        model.other_marathon_cities = Set(self.other_marathon_cities);
        model.bio = Set(self.bio);
        model.photo_url = Set(self.photo_url);
        model.photo_authorized = Set(self.photo_authorized);
        model.has_placeholder_photo = Set(self.has_placeholder_photo);
        model.is_legend = Set(self.is_legend);
    }
}

/// Member as shown on the site. Null columns are omitted.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub id: Uuid,
    #[schema(example = "Ana López")]
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_joined: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strava: Option<String>,
    pub total_marathons: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marathon_pr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marathon_pr_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marathon_pr_city: Option<String>,
    pub boston_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_marathon_pr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten_k_pr: Option<String>,
    pub sub3_marathons: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_run_marathon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marathon_cities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_marathon_cities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub photo_authorized: bool,
    pub has_placeholder_photo: bool,
    pub is_legend: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<member::Model> for MemberProfile {
    fn from(m: member::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            date_of_birth: m.date_of_birth,
            year_joined: m.year_joined,
            email: m.email,
            phone: m.phone,
            instagram: m.instagram,
            strava: m.strava,
            total_marathons: m.total_marathons,
            marathon_pr: m.marathon_pr,
            marathon_pr_year: m.marathon_pr_year,
            marathon_pr_city: m.marathon_pr_city,
            boston_count: m.boston_count,
            half_marathon_pr: m.half_marathon_pr,
            ten_k_pr: m.ten_k_pr,
            sub3_marathons: m.sub3_marathons,
            most_run_marathon: m.most_run_marathon,
            marathon_cities: m.marathon_cities,
            other_marathon_cities: m.other_marathon_cities,
            bio: m.bio,
            photo_url: m.photo_url,
            photo_authorized: m.photo_authorized,
            has_placeholder_photo: m.has_placeholder_photo,
            is_legend: m.is_legend,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

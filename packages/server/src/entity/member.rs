use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub year_joined: Option<i32>,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub strava: Option<String>,

    #[sea_orm(default_value = 0)]
    pub total_marathons: i32,
    pub marathon_pr: Option<String>, // HH:MM:SS
    pub marathon_pr_year: Option<i32>,
    pub marathon_pr_city: Option<String>,
    #[sea_orm(default_value = 0)]
    pub boston_count: i32,
    pub half_marathon_pr: Option<String>, // HH:MM:SS
    pub ten_k_pr: Option<String>,         // MM:SS
    #[sea_orm(default_value = 0)]
    pub sub3_marathons: i32,
    pub most_run_marathon: Option<String>,
    /// Gazetteer keys of the marathons this member has run.
    pub marathon_cities: Option<Vec<String>>,
    pub other_marathon_cities: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    #[sea_orm(default_value = false)]
    pub photo_authorized: bool,
    #[sea_orm(default_value = false)]
    pub has_placeholder_photo: bool,
    #[sea_orm(default_value = false)]
    pub is_legend: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

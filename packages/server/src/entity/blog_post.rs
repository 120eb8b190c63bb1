use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub category: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub cover_image_url: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String, // in Markdown

    #[sea_orm(default_value = false)]
    pub published: bool,
    pub published_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

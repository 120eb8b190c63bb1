use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::entity::{admin_user, blog_post, gear_product, site_image};
use crate::utils::hash;

/// Create the configured bootstrap admin when no admin account exists yet.
///
/// Returns whether an account was created.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<bool, DbErr> {
    let (Some(username), Some(password)) = (
        auth.bootstrap_username.as_deref().map(str::trim),
        auth.bootstrap_password.as_deref(),
    ) else {
        return Ok(false);
    };
    if username.is_empty() || password.is_empty() {
        tracing::warn!("Bootstrap admin credentials are blank, skipping");
        return Ok(false);
    }

    if admin_user::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    let model = admin_user::ActiveModel {
        id: Set(Uuid::now_v7()),
        username: Set(username.to_string()),
        password: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
    };

    let result = admin_user::Entity::insert(model)
        .on_conflict(
            sea_orm::sea_query::OnConflict::column(admin_user::Column::Username)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => Ok(false),
        Ok(_) => {
            info!(username, "Seeded bootstrap admin");
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Public site image lists: WHERE section = ? ORDER BY sort_order
    create_index(
        db,
        "idx_site_image_section_sort",
        Index::create()
            .table(site_image::Entity)
            .col(site_image::Column::Section)
            .col(site_image::Column::SortOrder)
            .to_owned(),
    )
    .await;

    // Public blog list: WHERE published ORDER BY published_at DESC
    create_index(
        db,
        "idx_blog_post_published_at",
        Index::create()
            .table(blog_post::Entity)
            .col(blog_post::Column::Published)
            .col(blog_post::Column::PublishedAt)
            .to_owned(),
    )
    .await;

    // Public catalogue: WHERE active ORDER BY sort_order
    create_index(
        db,
        "idx_gear_product_active_sort",
        Index::create()
            .table(gear_product::Entity)
            .col(gear_product::Column::Active)
            .col(gear_product::Column::SortOrder)
            .to_owned(),
    )
    .await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, mut stmt: IndexCreateStatement) {
    let sql = stmt
        .if_not_exists()
        .name(name)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&sql).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
    }
}

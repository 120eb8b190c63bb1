use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/members", member_routes())
        .nest("/blog-posts", blog_routes())
        .nest("/gear-products", gear_routes())
        .nest("/site-images", site_image_routes())
        .routes(routes!(handlers::stats::get_stats))
        .routes(routes!(handlers::stats::list_marathon_cities))
        .routes(routes!(handlers::stats::list_city_options))
        .routes(routes!(handlers::settings::get_setting))
        .routes(routes!(handlers::settings::get_join_link))
        .nest("/admin", admin_routes(config))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::member::list_members))
        .routes(routes!(handlers::member::list_legends))
        .routes(routes!(handlers::member::get_member))
}

fn blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::blog::list_blog_posts))
        .routes(routes!(handlers::blog::get_blog_post))
}

fn gear_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::gear::list_gear_products))
        .routes(routes!(handlers::gear::get_gear_product))
}

fn site_image_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::site_image::list_site_images))
}

fn admin_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/members", admin_member_routes())
        .nest("/blog-posts", admin_blog_routes())
        .nest("/gear-products", admin_gear_routes())
        .nest("/site-images", admin_site_image_routes(config))
        .nest("/uploads", admin_upload_routes(config))
        .nest("/settings", admin_setting_routes())
}

fn admin_member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::member::admin_list_members,
            handlers::member::create_member
        ))
        .routes(routes!(
            handlers::member::admin_get_member,
            handlers::member::update_member,
            handlers::member::delete_member
        ))
}

fn admin_blog_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::blog::admin_list_blog_posts,
            handlers::blog::create_blog_post
        ))
        .routes(routes!(
            handlers::blog::admin_get_blog_post,
            handlers::blog::update_blog_post,
            handlers::blog::delete_blog_post
        ))
}

fn admin_gear_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::gear::admin_list_gear_products,
            handlers::gear::create_gear_product
        ))
        .routes(routes!(
            handlers::gear::admin_get_gear_product,
            handlers::gear::update_gear_product,
            handlers::gear::delete_gear_product
        ))
}

fn admin_site_image_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::site_image::upload_site_image))
        .routes(routes!(handlers::site_image::delete_site_image))
        .layer(handlers::site_image::upload_body_limit(&config.storage))
}

fn admin_upload_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::upload::upload_image))
        .layer(handlers::site_image::upload_body_limit(&config.storage))
}

fn admin_setting_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::settings::list_settings))
        .routes(routes!(handlers::settings::put_setting))
}

pub mod admin_user;
pub mod blog_post;
pub mod gear_product;
pub mod member;
pub mod site_image;
pub mod site_setting;

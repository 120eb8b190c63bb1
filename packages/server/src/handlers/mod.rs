pub mod auth;
pub mod blog;
pub mod gear;
pub mod media;
pub mod member;
pub mod settings;
pub mod site_image;
pub mod stats;
pub mod upload;

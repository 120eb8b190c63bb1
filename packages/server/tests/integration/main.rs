mod common;

mod auth;
mod blog;
mod site_image;
mod stats;

pub mod cache;
pub mod hash;
pub mod jwt;
pub mod upload;

use std::sync::Arc;

use common::Gazetteer;
use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::utils::cache::QueryCache;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub blob_store: Arc<dyn BlobStore>,
    pub cache: Arc<QueryCache>,
    pub gazetteer: Arc<Gazetteer>,
}

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::Datastore;

/// Shared application state: immutable configuration plus the storage
/// collaborator. Cloned per request; nothing here is request-mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Datastore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Datastore>) -> Self {
        Self { config: Arc::new(config), store }
    }
}

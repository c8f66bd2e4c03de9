pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::query::types::{Document, FilterCriteria, SortPlan};

pub use memory::MemoryStore;

pub mod collections {
    pub const PROPERTIES: &str = "properties";
    pub const ROLES: &str = "roles";
    pub const ADMIN_ACCOUNTS: &str = "adminAccounts";
    pub const CLIENT_ACCOUNTS: &str = "clientAccounts";
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Storage collaborator. The engine only ever needs find/count-style reads
/// plus point writes for token bookkeeping and soft deletes; everything else
/// about persistence lives behind this trait.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Fetch matching documents: filter, apply the sort plan (projecting the
    /// derived field first for computed plans), then skip and limit.
    /// A skip or limit of 0 means no skip / no limit.
    async fn find(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
        plan: &SortPlan,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Count documents matching the criteria, ignoring sort and pagination.
    async fn count(&self, collection: &str, criteria: &FilterCriteria) -> Result<u64, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError>;

    /// Merge `set` into the first matching document. Returns whether a
    /// document was updated.
    async fn update_one(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
        set: Document,
    ) -> Result<bool, StoreError>;
}

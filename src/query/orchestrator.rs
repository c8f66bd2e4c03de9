use serde_json::json;

use crate::store::{Datastore, StoreError};

use super::pagination;
use super::types::{Clause, Document, FilterCriteria, PaginationState, Predicate, SortPlan};

/// Raw page parameters as the client sent them; parsing failures upstream
/// arrive here as `None` and fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub current_page: Option<i64>,
    pub page_size: Option<i64>,
}

/// One executed listing page.
#[derive(Debug)]
pub struct QueryPage {
    pub items: Vec<Document>,
    pub total_records: u64,
    pub pagination: PaginationState,
}

/// Composes criteria, sort plan and pagination into one read against the
/// storage collaborator.
///
/// Soft-deleted documents are filtered out here, not at call sites, so no
/// handler can forget it; `include_deleted` opts out explicitly. The total
/// count is taken with exactly the criteria used for the page fetch.
pub struct QueryOrchestrator<'a> {
    store: &'a dyn Datastore,
    collection: &'a str,
    default_limit: u64,
    include_deleted: bool,
}

impl<'a> QueryOrchestrator<'a> {
    pub fn new(store: &'a dyn Datastore, collection: &'a str, default_limit: u64) -> Self {
        Self { store, collection, default_limit, include_deleted: false }
    }

    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    pub async fn execute(
        &self,
        mut criteria: FilterCriteria,
        plan: &SortPlan,
        page: PageRequest,
    ) -> Result<QueryPage, StoreError> {
        if !self.include_deleted {
            criteria.push(not_deleted_clause());
        }

        let total_records = self.store.count(self.collection, &criteria).await?;
        let state = pagination::compute(
            page.current_page,
            page.page_size,
            total_records,
            self.default_limit,
        );
        let items = self
            .store
            .find(self.collection, &criteria, plan, state.skip, state.limit_items)
            .await?;

        Ok(QueryPage { items, total_records, pagination: state })
    }
}

/// Default clause excluding soft-deleted documents. A document with no
/// `deleted` flag counts as live.
pub fn not_deleted_clause() -> Clause {
    Clause::Field {
        path: "deleted".to_string(),
        predicate: Predicate::InSet(vec![json!(false), serde_json::Value::Null]),
    }
}

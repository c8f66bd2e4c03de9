use axum::extract::{Query, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::auth::permissions::keys;
use crate::handlers::ListingQuery;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::query::{CriteriaBuilder, QueryOrchestrator};
use crate::state::AppState;
use crate::store::collections;

/// GET /admin/accounts - administrator accounts, credentials stripped.
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Value> {
    principal.require(keys::ACCOUNTS_VIEW)?;

    let criteria = CriteriaBuilder::new()
        .equals("status", query.status.as_deref())
        .keyword(&["fullName", "email"], query.keyword.as_deref())
        .build();
    let orchestrator = QueryOrchestrator::new(
        state.store.as_ref(),
        collections::ADMIN_ACCOUNTS,
        state.config.pagination.default_limit,
    );
    let mut page = orchestrator
        .execute(criteria, &query.sort_plan(), query.page_request())
        .await?;

    for account in &mut page.items {
        account.remove("password");
    }

    Ok(ApiResponse::success(json!({
        "items": page.items,
        "totalRecords": page.total_records,
        "pagination": page.pagination,
        "permissions": principal.flags(keys::ACCOUNT_KEYS),
    })))
}

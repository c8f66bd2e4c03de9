use axum::extract::{Path, Query, State};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::ListingQuery;
use crate::middleware::{ApiResponse, ApiResult};
use crate::query::{CriteriaBuilder, QueryOrchestrator};
use crate::state::AppState;
use crate::store::collections;

/// GET /api/properties - public listing. The status filter is pinned to
/// `active` regardless of what the client sends.
pub async fn list(
    State(state): State<AppState>,
    Query(mut query): Query<ListingQuery>,
) -> ApiResult<Value> {
    query.status = Some("active".to_string());

    let orchestrator = QueryOrchestrator::new(
        state.store.as_ref(),
        collections::PROPERTIES,
        state.config.pagination.default_limit,
    );
    let page = orchestrator
        .execute(query.criteria(), &query.sort_plan(), query.page_request())
        .await?;

    Ok(ApiResponse::success(json!({
        "items": page.items,
        "totalRecords": page.total_records,
        "pagination": page.pagination,
    })))
}

/// GET /api/properties/:slug
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Value> {
    let criteria = CriteriaBuilder::new()
        .equals("slug", Some(&slug))
        .equals("status", Some("active"))
        .build();
    let property = state
        .store
        .find_one(collections::PROPERTIES, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false))
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    Ok(ApiResponse::success(json!({ "item": property })))
}

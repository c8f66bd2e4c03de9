use axum::extract::{Path, Query, State};
use axum::Extension;
use serde_json::{json, Value};

use crate::auth::permissions::keys;
use crate::auth::normalize;
use crate::error::ApiError;
use crate::handlers::ListingQuery;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::query::{CriteriaBuilder, QueryOrchestrator};
use crate::state::AppState;
use crate::store::collections;

/// GET /admin/roles
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Value> {
    principal.require(keys::ROLES_VIEW)?;

    let criteria = CriteriaBuilder::new()
        .keyword(&["title", "description"], query.keyword.as_deref())
        .build();
    let orchestrator = QueryOrchestrator::new(
        state.store.as_ref(),
        collections::ROLES,
        state.config.pagination.default_limit,
    );
    let page = orchestrator
        .execute(criteria, &query.sort_plan(), query.page_request())
        .await?;

    Ok(ApiResponse::success(json!({
        "items": page.items,
        "totalRecords": page.total_records,
        "pagination": page.pagination,
        "permissions": principal.flags(keys::ROLE_KEYS),
    })))
}

/// GET /admin/roles/:id - role detail with canonical permission keys
/// alongside the raw identifiers as stored.
pub async fn detail(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    principal.require(keys::ROLES_VIEW)?;

    let criteria = CriteriaBuilder::new().equals("id", Some(&id)).build();
    let role = state
        .store
        .find_one(collections::ROLES, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false))
        .ok_or_else(|| ApiError::not_found("Role not found"))?;

    let canonical: Vec<String> = role
        .get("permissions")
        .and_then(Value::as_array)
        .map(|raw| raw.iter().filter_map(Value::as_str).map(normalize).collect())
        .unwrap_or_default();

    Ok(ApiResponse::success(json!({
        "item": role,
        "canonicalPermissions": canonical,
    })))
}

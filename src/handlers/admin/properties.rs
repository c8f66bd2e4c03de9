use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::permissions::keys;
use crate::error::ApiError;
use crate::handlers::ListingQuery;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::query::{CriteriaBuilder, Document, QueryOrchestrator};
use crate::state::AppState;
use crate::store::collections;

/// GET /admin/properties - filtered, sorted, paginated listing with the
/// caller's permission flags echoed for the dashboard.
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListingQuery>,
) -> ApiResult<Value> {
    principal.require(keys::PROPERTIES_VIEW)?;

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
        "permissions": principal.flags(keys::PROPERTY_KEYS),
    })))
}

/// GET /admin/properties/:id
pub async fn detail(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    principal.require(keys::PROPERTIES_VIEW)?;
    let property = find_live(&state, &id).await?;
    Ok(ApiResponse::success(json!({
        "item": property,
        "permissions": principal.flags(keys::PROPERTY_KEYS),
    })))
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// PATCH /admin/properties/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<StatusChange>,
) -> ApiResult<Value> {
    principal.require(keys::PROPERTIES_EDIT)?;
    if !matches!(body.status.as_str(), "active" | "inactive") {
        return Err(ApiError::bad_request("Status must be active or inactive"));
    }

    find_live(&state, &id).await?;
    let criteria = CriteriaBuilder::new().equals("id", Some(&id)).build();
    let mut set = Document::new();
    set.insert("status".to_string(), json!(body.status));
    state.store.update_one(collections::PROPERTIES, &criteria, set).await?;

    Ok(ApiResponse::success(json!({ "id": id, "status": body.status })))
}

/// DELETE /admin/properties/:id - soft delete.
pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    principal.require(keys::PROPERTIES_DELETE)?;

    find_live(&state, &id).await?;
    let criteria = CriteriaBuilder::new().equals("id", Some(&id)).build();
    let mut set = Document::new();
    set.insert("deleted".to_string(), json!(true));
    set.insert("deletedAt".to_string(), json!(Utc::now()));
    state.store.update_one(collections::PROPERTIES, &criteria, set).await?;

    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}

async fn find_live(state: &AppState, id: &str) -> Result<Document, ApiError> {
    let criteria = CriteriaBuilder::new().equals("id", Some(id)).build();
    state
        .store
        .find_one(collections::PROPERTIES, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false))
        .ok_or_else(|| ApiError::not_found("Property not found"))
}

use axum::extract::State;
use axum::{Extension, Json};
use chrono::Duration;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::{self, password_digest};
use crate::config::ClientAuthConfig;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::query::{CriteriaBuilder, Document};
use crate::state::AppState;
use crate::store::collections;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// POST /api/auth/login - bearer access token plus a refresh token, which is
/// also recorded on the account for the refresh flow.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Value> {
    let criteria = CriteriaBuilder::new().equals("email", Some(&body.email)).build();
    let account = state
        .store
        .find_one(collections::CLIENT_ACCOUNTS, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false));

    let Some(account) = account else {
        return Err(ApiError::unauthorized("Invalid email or password"));
    };
    if account.get("password").and_then(Value::as_str)
        != Some(password_digest(&body.password).as_str())
    {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }
    if account.get("status").and_then(Value::as_str) != Some("active") {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    let id = account.get("id").and_then(Value::as_str).unwrap_or_default().to_string();
    let (token, refresh_token) = issue_pair(&state.config.client_auth, &id)?;
    record_refresh_token(&state, &id, &refresh_token).await?;

    Ok(ApiResponse::success(json!({
        "id": id,
        "token": token,
        "refreshToken": refresh_token,
    })))
}

/// POST /api/auth/refresh - rotate the token pair.
///
/// The refresh token's signature is validated with expiry tolerated, then
/// matched against the token recorded at login; both must hold.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<Value> {
    let cfg = &state.config.client_auth;
    let payload = auth::decode_ignoring_expiry(&body.refresh_token, &cfg.refresh_secret)
        .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?;
    let id = payload
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::unauthorized("Invalid refresh token"))?
        .to_string();

    let criteria = CriteriaBuilder::new().equals("id", Some(&id)).build();
    let account = state
        .store
        .find_one(collections::CLIENT_ACCOUNTS, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false))
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;

    if account.get("refreshToken").and_then(Value::as_str) != Some(body.refresh_token.as_str()) {
        return Err(ApiError::unauthorized("Refresh token has been superseded"));
    }

    let (token, refresh_token) = issue_pair(cfg, &id)?;
    record_refresh_token(&state, &id, &refresh_token).await?;

    Ok(ApiResponse::success(json!({
        "id": id,
        "token": token,
        "refreshToken": refresh_token,
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Value> {
    let criteria = CriteriaBuilder::new().equals("id", Some(&principal.account_id)).build();
    let mut account = state
        .store
        .find_one(collections::CLIENT_ACCOUNTS, &criteria)
        .await?
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;
    account.remove("password");
    account.remove("refreshToken");
    Ok(ApiResponse::success(json!({ "account": account })))
}

// A fresh jti keeps every issued token distinct, so rotation always
// invalidates the previous refresh token even within one clock second.
fn issue_pair(cfg: &ClientAuthConfig, id: &str) -> Result<(String, String), ApiError> {
    let token = auth::issue(
        json!({ "id": id, "jti": Uuid::new_v4() }),
        &cfg.access_secret,
        Duration::minutes(cfg.access_ttl_minutes),
    )?;
    let refresh_token = auth::issue(
        json!({ "id": id, "jti": Uuid::new_v4() }),
        &cfg.refresh_secret,
        Duration::days(cfg.refresh_ttl_days),
    )?;
    Ok((token, refresh_token))
}

async fn record_refresh_token(
    state: &AppState,
    id: &str,
    refresh_token: &str,
) -> Result<(), ApiError> {
    let criteria = CriteriaBuilder::new().equals("id", Some(id)).build();
    let mut set = Document::new();
    set.insert("refreshToken".to_string(), json!(refresh_token));
    state.store.update_one(collections::CLIENT_ACCOUNTS, &criteria, set).await?;
    Ok(())
}

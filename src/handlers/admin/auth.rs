use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Duration;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, password_digest};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, Principal};
use crate::query::CriteriaBuilder;
use crate::state::AppState;
use crate::store::collections;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /admin/auth/login - issue the administrator session cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let criteria = CriteriaBuilder::new().equals("email", Some(&body.email)).build();
    let account = state
        .store
        .find_one(collections::ADMIN_ACCOUNTS, &criteria)
        .await?
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false));

    let Some(account) = account else {
        return Err(ApiError::unauthorized("Invalid email or password"));
    };
    if account.get("password").and_then(Value::as_str) != Some(password_digest(&body.password).as_str()) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }
    if account.get("status").and_then(Value::as_str) != Some("active") {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    let cfg = &state.config.admin_auth;
    let id = account.get("id").and_then(Value::as_str).unwrap_or_default();
    let token = auth::issue(json!({ "id": id }), &cfg.token_secret, Duration::hours(cfg.token_ttl_hours))?;

    let mut response =
        ApiResponse::success(json!({ "id": id, "email": body.email })).into_response();
    let cookie = session_cookie(cfg, &token, cfg.token_ttl_hours * 3600);
    response.headers_mut().insert(
        SET_COOKIE,
        cookie.parse().map_err(|_| ApiError::internal_server_error("Malformed cookie"))?,
    );
    Ok(response)
}

/// DELETE /admin/auth/logout - expire the session cookie.
pub async fn logout(State(state): State<AppState>) -> Result<Response, ApiError> {
    let cfg = &state.config.admin_auth;
    let mut response = ApiResponse::success(json!({ "loggedOut": true })).into_response();
    let cookie = session_cookie(cfg, "", 0);
    response.headers_mut().insert(
        SET_COOKIE,
        cookie.parse().map_err(|_| ApiError::internal_server_error("Malformed cookie"))?,
    );
    Ok(response)
}

/// GET /admin/auth/me - echo the resolved principal.
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Value> {
    let criteria = CriteriaBuilder::new().equals("id", Some(&principal.account_id)).build();
    let mut account = state
        .store
        .find_one(collections::ADMIN_ACCOUNTS, &criteria)
        .await?
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;
    account.remove("password");

    let mut permissions: Vec<&String> = principal.permissions.iter().collect();
    permissions.sort();
    Ok(ApiResponse::success(json!({
        "account": account,
        "permissions": permissions,
    })))
}

fn session_cookie(cfg: &crate::config::AdminAuthConfig, token: &str, max_age_secs: i64) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        cfg.cookie_name, token, max_age_secs
    );
    if cfg.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

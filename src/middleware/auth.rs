use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::auth::{self, PermissionResolver};
use crate::error::ApiError;
use crate::query::CriteriaBuilder;
use crate::state::AppState;
use crate::store::collections;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    Administrator,
    Client,
}

/// Resolved caller identity for one request. Built by the gates, attached
/// to request extensions, dropped when the request ends.
#[derive(Clone, Debug)]
pub struct Principal {
    pub account_id: String,
    pub kind: AccountKind,
    /// Canonical permission keys. Always empty for clients.
    pub permissions: Arc<HashSet<String>>,
}

impl Principal {
    pub fn can(&self, key: &str) -> bool {
        self.permissions.contains(key)
    }

    /// Authorization check, distinct from authentication: the caller is
    /// known, it just may not hold the permission.
    pub fn require(&self, key: &str) -> Result<(), ApiError> {
        if self.can(key) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!("Missing permission: {key}")))
        }
    }

    /// Permission-flag map echoed in listing responses so the frontend can
    /// hide actions without a second round trip.
    pub fn flags(&self, keys: &[&str]) -> Value {
        let mut map = Map::new();
        for key in keys {
            map.insert((*key).to_string(), Value::Bool(self.can(key)));
        }
        Value::Object(map)
    }
}

/// Administrator gate: session token from an HTTP-only cookie, account
/// lookup, role resolution. Attaches a `Principal` or rejects.
pub async fn admin_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookie_value(request.headers(), &state.config.admin_auth.cookie_name)
        .ok_or_else(|| ApiError::unauthorized("Missing session cookie"))?;

    let payload = auth::verify(&token, &state.config.admin_auth.token_secret)?;
    let account_id = account_id_from(&payload)?;

    let account = load_account(&state, collections::ADMIN_ACCOUNTS, &account_id).await?;
    if account.get("status").and_then(Value::as_str) != Some("active") {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    let permissions = match account.get("roleId").and_then(Value::as_str) {
        Some(role_id) => PermissionResolver::new(state.store.as_ref()).resolve(role_id).await?,
        None => HashSet::new(),
    };

    request.extensions_mut().insert(Principal {
        account_id,
        kind: AccountKind::Administrator,
        permissions: Arc::new(permissions),
    });
    Ok(next.run(request).await)
}

/// Client gate: bearer token from the Authorization header. Clients carry
/// no permission set.
pub async fn client_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let payload = auth::verify(&token, &state.config.client_auth.access_secret)?;
    let account_id = account_id_from(&payload)?;

    let account = load_account(&state, collections::CLIENT_ACCOUNTS, &account_id).await?;
    if account.get("status").and_then(Value::as_str) != Some("active") {
        return Err(ApiError::forbidden("Account is inactive"));
    }

    request.extensions_mut().insert(Principal {
        account_id,
        kind: AccountKind::Client,
        permissions: Arc::new(HashSet::new()),
    });
    Ok(next.run(request).await)
}

fn account_id_from(payload: &Value) -> Result<String, ApiError> {
    payload
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ApiError::unauthorized("Token carries no account id"))
}

async fn load_account(
    state: &AppState,
    collection: &str,
    account_id: &str,
) -> Result<crate::query::Document, ApiError> {
    let criteria = CriteriaBuilder::new().equals("id", Some(account_id)).build();
    let account = state.store.find_one(collection, &criteria).await?;
    let account = account
        .filter(|doc| !doc.get("deleted").and_then(Value::as_bool).unwrap_or(false))
        .ok_or_else(|| ApiError::not_found("Account no longer exists"))?;
    Ok(account)
}

/// Extract one cookie value from the Cookie header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

/// Extract the token from a `Bearer` Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

use serde::{Deserialize, Serialize};

/// Administrator account. Authorization is role-based: `role_id` references
/// a [`super::Role`] whose permissions become the principal's set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    /// SHA-256 hex digest; stripped from every response.
    pub password: String,
    /// `active` | `inactive`.
    pub status: String,
    pub role_id: String,
    pub deleted: bool,
}

/// Client (public site) account. Clients carry no role; permission checks
/// are administrator-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub status: String,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(default)]
    pub posts: Vec<String>,
    /// Latest refresh token; rotated on every refresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub deleted: bool,
}

use serde::{Deserialize, Serialize};

/// Persisted role. `permissions` holds raw identifiers as entered by the
/// administrator (`properties-view`, `properties_edit`); they are normalized
/// to canonical keys at resolution time, never at rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub permissions: Vec<String>,
    pub deleted: bool,
}

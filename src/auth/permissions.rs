use std::collections::HashSet;

use crate::query::CriteriaBuilder;
use crate::store::{collections, Datastore, StoreError};

/// Canonical permission keys checked by the admin handlers. Role documents
/// store raw identifiers in `resource-action` / `resource_action` form;
/// `normalize` maps both onto these.
pub mod keys {
    pub const PROPERTIES_VIEW: &str = "propertiesView";
    pub const PROPERTIES_CREATE: &str = "propertiesCreate";
    pub const PROPERTIES_EDIT: &str = "propertiesEdit";
    pub const PROPERTIES_DELETE: &str = "propertiesDelete";
    pub const ROLES_VIEW: &str = "rolesView";
    pub const ACCOUNTS_VIEW: &str = "accountsView";

    pub const PROPERTY_KEYS: &[&str] =
        &[PROPERTIES_VIEW, PROPERTIES_CREATE, PROPERTIES_EDIT, PROPERTIES_DELETE];
    pub const ROLE_KEYS: &[&str] = &[ROLES_VIEW];
    pub const ACCOUNT_KEYS: &[&str] = &[ACCOUNTS_VIEW];
}

/// Collapse `-` and `_` separators into camelCase: `properties-view` and
/// `properties_view` both become `propertiesView`. Total over any input and
/// idempotent, since the output never contains a separator.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper_next = false;
    for ch in raw.chars() {
        if ch == '-' || ch == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Loads a role's permission set as canonical keys.
pub struct PermissionResolver<'a> {
    store: &'a dyn Datastore,
}

impl<'a> PermissionResolver<'a> {
    pub fn new(store: &'a dyn Datastore) -> Self {
        Self { store }
    }

    /// A missing or soft-deleted role resolves to the empty set; whether
    /// that is fatal is the caller's call.
    pub async fn resolve(&self, role_id: &str) -> Result<HashSet<String>, StoreError> {
        let criteria = CriteriaBuilder::new().equals("id", Some(role_id)).build();
        let Some(role) = self.store.find_one(collections::ROLES, &criteria).await? else {
            return Ok(HashSet::new());
        };
        if role.get("deleted").and_then(|v| v.as_bool()).unwrap_or(false) {
            return Ok(HashSet::new());
        }
        let permissions = role
            .get("permissions")
            .and_then(|v| v.as_array())
            .map(|raw| {
                raw.iter()
                    .filter_map(|v| v.as_str())
                    .map(normalize)
                    .collect::<HashSet<_>>()
            })
            .unwrap_or_default();
        Ok(permissions)
    }
}

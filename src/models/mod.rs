pub mod account;
pub mod property;
pub mod role;

pub use account::{AdminAccount, ClientAccount};
pub use property::{Property, PropertyDetails};
pub use role::Role;

use crate::query::Document;

/// Serialize a model into a stored document. Only used by seeding and
/// fixtures; our models always serialize to JSON objects.
pub fn to_document<T: serde::Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "model serialized to non-object JSON: {other}"
        ))),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A listed property as persisted. Field names match the wire vocabulary
/// used by the filter parameters (`listingType`, `propertyDetails.*`).
///
/// Room counts are stored as integers and compared numerically; the
/// `"bedrooms-<n>"` token grammar exists only at the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// `active` | `inactive`.
    pub status: String,
    /// `forSale` | `forRent`.
    pub listing_type: String,
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub property_details: PropertyDetails,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub property_category: String,
    pub house_direction: String,
    /// Metres; the listing area is `width * length`, never stored.
    pub width: f64,
    pub length: f64,
}

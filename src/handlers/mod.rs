pub mod admin;
pub mod client;

use serde::Deserialize;

use crate::query::orchestrator::PageRequest;
use crate::query::{sort, CriteriaBuilder, FilterCriteria, SortPlan};

/// Raw listing query parameters. Everything is optional text: malformed
/// values degrade to "no constraint" instead of rejecting the request, so
/// none of these fields parse eagerly.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub status: Option<String>,
    pub listing_type: Option<String>,
    pub direction: Option<String>,
    pub category: Option<String>,
    /// Token grammar: `bedrooms-<n>` or `bedrooms-gte-<n>`.
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    /// Comma-separated bounds: `500` or `500,2000`.
    pub price_range: Option<String>,
    pub area_range: Option<String>,
    pub keyword: Option<String>,
    pub sort_key: Option<String>,
    pub sort_value: Option<String>,
    pub current_page: Option<String>,
    pub page_size: Option<String>,
}

impl ListingQuery {
    pub fn criteria(&self) -> FilterCriteria {
        CriteriaBuilder::new()
            .equals("status", self.status.as_deref())
            .equals("listingType", self.listing_type.as_deref())
            .equals("propertyDetails.houseDirection", self.direction.as_deref())
            .equals("propertyDetails.propertyCategory", self.category.as_deref())
            .room_count("bedrooms", self.bedrooms.as_deref())
            .room_count("bathrooms", self.bathrooms.as_deref())
            .numeric_range("price", self.price_range.as_deref())
            .product_range(
                (sort::AREA_WIDTH_FIELD, sort::AREA_LENGTH_FIELD),
                self.area_range.as_deref(),
            )
            .keyword(&["title", "slug"], self.keyword.as_deref())
            .build()
    }

    pub fn sort_plan(&self) -> SortPlan {
        sort::select(self.sort_key.as_deref(), self.sort_value.as_deref())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            current_page: self.current_page.as_deref().and_then(|s| s.parse().ok()),
            page_size: self.page_size.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

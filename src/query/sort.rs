use super::types::{ComputedSort, SortDirection, SortPlan};

/// Sort key that cannot be served by a plain field sort: the listing area is
/// the product of two stored dimensions, so it needs a projection stage.
pub const AREA_SORT_KEY: &str = "area";

/// Derived field name the projection stage adds.
pub const AREA_OUTPUT_FIELD: &str = "area";

pub const AREA_LENGTH_FIELD: &str = "propertyDetails.length";
pub const AREA_WIDTH_FIELD: &str = "propertyDetails.width";

/// Pick the sort plan for a raw `sortKey`/`sortValue` pair. Either parameter
/// absent means "no explicit sort" and the storage default ordering applies.
pub fn select(sort_key: Option<&str>, sort_value: Option<&str>) -> SortPlan {
    let (Some(key), Some(value)) = (
        sort_key.map(str::trim).filter(|s| !s.is_empty()),
        sort_value.map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return SortPlan::Unsorted;
    };
    let direction = SortDirection::from_param(value);
    if key == AREA_SORT_KEY {
        SortPlan::Computed(ComputedSort {
            output: AREA_OUTPUT_FIELD.to_string(),
            factors: (AREA_WIDTH_FIELD.to_string(), AREA_LENGTH_FIELD.to_string()),
            direction,
        })
    } else {
        SortPlan::Field { field: key.to_string(), direction }
    }
}

use super::types::PaginationState;

/// Pure offset/limit/total-page arithmetic.
///
/// `current_page` falls back to 1 when absent or below 1; `limit_items`
/// falls back to the caller-configured default when absent or non-positive.
/// A default of 0 is a caller mistake but must not divide by zero: the
/// result degrades to `total_page = 0`.
pub fn compute(
    current_page: Option<i64>,
    limit_items: Option<i64>,
    total_records: u64,
    default_limit: u64,
) -> PaginationState {
    let current_page = match current_page {
        Some(page) if page >= 1 => page as u64,
        _ => 1,
    };
    let limit_items = match limit_items {
        Some(limit) if limit > 0 => limit as u64,
        _ => default_limit,
    };
    let total_page = if limit_items == 0 {
        0
    } else {
        total_records.div_ceil(limit_items)
    };
    PaginationState {
        current_page,
        limit_items,
        // current_page is raw client input; an absurd page must not overflow.
        skip: (current_page - 1).saturating_mul(limit_items),
        total_page,
    }
}

use serde_json::{json, Value};

use super::types::{Clause, FilterCriteria, Predicate};

/// Room-count filters match any entry up to this bound; preserved from the
/// original listing UI, which never offers more than double digits.
pub const ROOM_COUNT_CEILING: i64 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomFilter {
    Exact(i64),
    AtLeast(i64),
}

/// Parse a room-count token: `"bedrooms-3"` or `"bedrooms-gte-5"`. The field
/// prefix is carried by the UI for readability and ignored here; only the
/// trailing grammar matters. Anything unparseable yields no filter.
pub fn parse_room_token(raw: &str) -> Option<RoomFilter> {
    let mut parts = raw.rsplit('-');
    let count: i64 = parts.next()?.parse().ok()?;
    if count < 0 {
        return None;
    }
    match parts.next() {
        Some("gte") => Some(RoomFilter::AtLeast(count)),
        Some(_) => Some(RoomFilter::Exact(count)),
        None => None,
    }
}

/// Parse a 1- or 2-element numeric bound list ("500" or "500,2000").
/// One element is an open-ended lower bound; two are inclusive bounds.
pub fn parse_bounds(raw: &str) -> Option<(f64, Option<f64>)> {
    let mut parts = raw.split(',').map(str::trim).filter(|s| !s.is_empty());
    let lo: f64 = parts.next()?.parse().ok()?;
    let hi = match parts.next() {
        Some(s) => Some(s.parse().ok()?),
        None => None,
    };
    Some((lo, hi))
}

/// Incremental filter construction from raw, client-supplied parameters.
///
/// Every method degrades to "no clause" on absent or malformed input; the
/// listing UI relies on absent filters being no-ops. Nothing here errors.
#[derive(Debug, Default)]
pub struct CriteriaBuilder {
    criteria: FilterCriteria,
}

impl CriteriaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact string equality on one field.
    pub fn equals(mut self, path: &str, raw: Option<&str>) -> Self {
        if let Some(value) = raw.filter(|s| !s.trim().is_empty()) {
            self.criteria.push(Clause::Field {
                path: path.to_string(),
                predicate: Predicate::Equals(Value::String(value.trim().to_string())),
            });
        }
        self
    }

    /// Room-count token filter. Counts are stored as integers, so the
    /// greater-or-equal form is a numeric range `[n, 99]` rather than an
    /// enumerated set of tagged strings; match semantics are identical.
    pub fn room_count(mut self, path: &str, raw: Option<&str>) -> Self {
        if let Some(filter) = raw.and_then(parse_room_token) {
            let predicate = match filter {
                RoomFilter::Exact(n) => Predicate::Equals(json!(n)),
                RoomFilter::AtLeast(n) => Predicate::Range {
                    min: Some(n as f64),
                    max: Some(ROOM_COUNT_CEILING as f64),
                },
            };
            self.criteria.push(Clause::Field { path: path.to_string(), predicate });
        }
        self
    }

    /// Inclusive numeric range on one stored field (price and friends).
    pub fn numeric_range(mut self, path: &str, raw: Option<&str>) -> Self {
        if let Some((lo, hi)) = raw.and_then(parse_bounds) {
            self.criteria.push(Clause::Field {
                path: path.to_string(),
                predicate: Predicate::Range { min: Some(lo), max: hi },
            });
        }
        self
    }

    /// Range over the product of two stored fields (computed area).
    pub fn product_range(mut self, paths: (&str, &str), raw: Option<&str>) -> Self {
        if let Some((lo, hi)) = raw.and_then(parse_bounds) {
            self.criteria.push(Clause::ProductRange {
                paths: (paths.0.to_string(), paths.1.to_string()),
                min: Some(lo),
                max: hi,
            });
        }
        self
    }

    /// Free-text keyword search across the given fields.
    pub fn keyword(mut self, paths: &[&str], raw: Option<&str>) -> Self {
        if let Some(needle) = raw.map(str::trim).filter(|s| !s.is_empty()) {
            self.criteria.push(Clause::TextSearch {
                paths: paths.iter().map(|p| p.to_string()).collect(),
                needle: needle.to_string(),
            });
        }
        self
    }

    /// Membership filter, e.g. a fixed id set.
    pub fn in_set(mut self, path: &str, values: Option<Vec<Value>>) -> Self {
        if let Some(values) = values.filter(|v| !v.is_empty()) {
            self.criteria.push(Clause::Field {
                path: path.to_string(),
                predicate: Predicate::InSet(values),
            });
        }
        self
    }

    pub fn build(self) -> FilterCriteria {
        self.criteria
    }
}

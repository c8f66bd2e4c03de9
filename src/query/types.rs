use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored record as the storage collaborator hands it back.
pub type Document = serde_json::Map<String, Value>;

/// Resolve a dotted path like "propertyDetails.width" inside a document.
pub fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut value = doc.get(parts.next()?)?;
    for part in parts {
        value = value.as_object()?.get(part)?;
    }
    Some(value)
}

/// One constraint on a single stored field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Equals(Value),
    InSet(Vec<Value>),
    Range { min: Option<f64>, max: Option<f64> },
}

impl Predicate {
    /// Evaluate against a field value; `None` means the field is absent,
    /// which behaves like JSON null.
    pub fn matches(&self, value: Option<&Value>) -> bool {
        let value = value.unwrap_or(&Value::Null);
        match self {
            Predicate::Equals(expected) => value_eq(value, expected),
            Predicate::InSet(set) => set.iter().any(|candidate| value_eq(value, candidate)),
            Predicate::Range { min, max } => {
                let Some(n) = value.as_f64() else {
                    return false;
                };
                min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi)
            }
        }
    }
}

// JSON equality with 3 == 3.0; serde_json::Number keeps i64 and f64 distinct.
fn value_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// One clause of a filter. Clauses combine conjunctively; within a
/// `TextSearch` the paths combine disjunctively.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Field {
        path: String,
        predicate: Predicate,
    },
    /// Constrains the product of two stored numeric fields. No stored field
    /// holds the product, so this cannot be a plain field comparison.
    ProductRange {
        paths: (String, String),
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Case-insensitive substring match against any of the listed fields.
    TextSearch {
        paths: Vec<String>,
        needle: String,
    },
}

impl Clause {
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Clause::Field { path, predicate } => predicate.matches(lookup(doc, path)),
            Clause::ProductRange { paths, min, max } => {
                let lhs = lookup(doc, &paths.0).and_then(Value::as_f64);
                let rhs = lookup(doc, &paths.1).and_then(Value::as_f64);
                let (Some(lhs), Some(rhs)) = (lhs, rhs) else {
                    return false;
                };
                let product = lhs * rhs;
                min.map_or(true, |lo| product >= lo) && max.map_or(true, |hi| product <= hi)
            }
            Clause::TextSearch { paths, needle } => {
                let needle = needle.to_lowercase();
                paths.iter().any(|path| {
                    lookup(doc, path)
                        .and_then(Value::as_str)
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
                })
            }
        }
    }
}

/// Conjunction of clauses. An empty criteria set matches every document:
/// absent filters are no-ops, never "exclude everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    clauses: Vec<Clause>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, doc: &Document) -> bool {
        self.clauses.iter().all(|clause| clause.matches(doc))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// "asc" selects ascending; anything else descends.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }
}

/// Declarative sort plan. The computed variant is a two-stage pipeline:
/// project a derived field equal to the product of the factor fields, then
/// sort on that derived field. It runs against the already-filtered set.
#[derive(Debug, Clone, PartialEq)]
pub enum SortPlan {
    Unsorted,
    Field {
        field: String,
        direction: SortDirection,
    },
    Computed(ComputedSort),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedSort {
    /// Name of the derived field added by the projection stage.
    pub output: String,
    /// Stored fields whose product the projection computes.
    pub factors: (String, String),
    pub direction: SortDirection,
}

/// Pagination metadata returned alongside every listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u64,
    pub limit_items: u64,
    pub skip: u64,
    pub total_page: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().expect("object fixture")
    }

    #[test]
    fn lookup_resolves_nested_paths() {
        let d = doc(json!({ "propertyDetails": { "width": 5 } }));
        assert_eq!(lookup(&d, "propertyDetails.width"), Some(&json!(5)));
        assert_eq!(lookup(&d, "propertyDetails.length"), None);
        assert_eq!(lookup(&d, "missing.width"), None);
    }

    #[test]
    fn equals_treats_integer_and_float_alike() {
        let p = Predicate::Equals(json!(3));
        assert!(p.matches(Some(&json!(3.0))));
        assert!(!p.matches(Some(&json!(4))));
        assert!(!p.matches(None));
    }

    #[test]
    fn in_set_with_null_matches_missing_field() {
        let p = Predicate::InSet(vec![json!(false), Value::Null]);
        assert!(p.matches(Some(&json!(false))));
        assert!(p.matches(None));
        assert!(!p.matches(Some(&json!(true))));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let p = Predicate::Range { min: Some(500.0), max: Some(2000.0) };
        assert!(p.matches(Some(&json!(500))));
        assert!(p.matches(Some(&json!(2000))));
        assert!(!p.matches(Some(&json!(499.99))));
        assert!(!p.matches(Some(&json!(2000.01))));
        assert!(!p.matches(Some(&json!("2000"))));
    }

    #[test]
    fn open_ended_range_has_no_upper_bound() {
        let p = Predicate::Range { min: Some(500.0), max: None };
        assert!(p.matches(Some(&json!(1_000_000))));
        assert!(!p.matches(Some(&json!(499))));
    }

    #[test]
    fn product_range_boundary_at_exact_area() {
        let d = doc(json!({
            "propertyDetails": { "length": 10, "width": 5 }
        }));
        let paths = (
            "propertyDetails.length".to_string(),
            "propertyDetails.width".to_string(),
        );
        let excluded = Clause::ProductRange { paths: paths.clone(), min: Some(0.0), max: Some(49.0) };
        let included = Clause::ProductRange { paths, min: Some(0.0), max: Some(50.0) };
        assert!(!excluded.matches(&d));
        assert!(included.matches(&d));
    }

    #[test]
    fn product_range_requires_both_factors() {
        let d = doc(json!({ "propertyDetails": { "length": 10 } }));
        let clause = Clause::ProductRange {
            paths: (
                "propertyDetails.length".to_string(),
                "propertyDetails.width".to_string(),
            ),
            min: Some(0.0),
            max: None,
        };
        assert!(!clause.matches(&d));
    }

    #[test]
    fn text_search_is_case_insensitive_across_fields() {
        let d = doc(json!({ "title": "Sunny Villa", "slug": "sunny-villa" }));
        let clause = Clause::TextSearch {
            paths: vec!["title".to_string(), "slug".to_string()],
            needle: "VILLA".to_string(),
        };
        assert!(clause.matches(&d));
        let miss = Clause::TextSearch {
            paths: vec!["title".to_string(), "slug".to_string()],
            needle: "bungalow".to_string(),
        };
        assert!(!miss.matches(&d));
    }

    #[test]
    fn empty_criteria_matches_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.matches(&doc(json!({ "anything": 1 }))));
    }
}

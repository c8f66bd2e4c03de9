use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::query::types::{lookup, Document, FilterCriteria, SortDirection, SortPlan};

use super::{Datastore, StoreError};

/// In-memory document store. Backs the test fixtures and the demo binary;
/// production deployments plug a real backend into the same trait.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, docs: Vec<Document>) {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.entry(collection.to_string()).or_default().extend(docs);
    }

    fn matching(&self, collection: &str, criteria: &FilterCriteria) -> Vec<Document> {
        let guard = self.collections.read().unwrap_or_else(|e| e.into_inner());
        guard
            .get(collection)
            .map(|docs| docs.iter().filter(|d| criteria.matches(d)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn find(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
        plan: &SortPlan,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError> {
        let mut docs = self.matching(collection, criteria);

        match plan {
            SortPlan::Unsorted => {}
            SortPlan::Field { field, direction } => {
                docs.sort_by(|a, b| {
                    let ord = compare_values(lookup(a, field), lookup(b, field));
                    directed(ord, *direction)
                });
            }
            SortPlan::Computed(computed) => {
                // Projection stage: attach the derived product, then sort on it.
                for doc in &mut docs {
                    let product = product_of(doc, &computed.factors);
                    doc.insert(
                        computed.output.clone(),
                        product.map(Value::from).unwrap_or(Value::Null),
                    );
                }
                let output = computed.output.clone();
                let direction = computed.direction;
                docs.sort_by(|a, b| {
                    let ord = compare_values(a.get(&output), b.get(&output));
                    directed(ord, direction)
                });
            }
        }

        let skipped = docs.into_iter().skip(skip as usize);
        let page: Vec<Document> = if limit == 0 {
            skipped.collect()
        } else {
            skipped.take(limit as usize).collect()
        };
        Ok(page)
    }

    async fn count(&self, collection: &str, criteria: &FilterCriteria) -> Result<u64, StoreError> {
        Ok(self.matching(collection, criteria).len() as u64)
    }

    async fn find_one(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| criteria.matches(d)).cloned()))
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.entry(collection.to_string()).or_default().push(doc);
        Ok(())
    }

    async fn update_one(
        &self,
        collection: &str,
        criteria: &FilterCriteria,
        set: Document,
    ) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(false);
        };
        if let Some(doc) = docs.iter_mut().find(|d| criteria.matches(d)) {
            for (key, value) in set {
                doc.insert(key, value);
            }
            return Ok(true);
        }
        Ok(false)
    }
}

fn product_of(doc: &Document, factors: &(String, String)) -> Option<f64> {
    let lhs = lookup(doc, &factors.0)?.as_f64()?;
    let rhs = lookup(doc, &factors.1)?.as_f64()?;
    Some(lhs * rhs)
}

// Missing fields and nulls sort first ascending; mixed types keep their
// relative order.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (normalize(a), normalize(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(f64::NAN);
                let y = y.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => Ordering::Equal,
        },
    }
}

fn normalize(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        other => other,
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

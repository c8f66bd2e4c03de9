pub mod criteria;
pub mod orchestrator;
pub mod pagination;
pub mod sort;
pub mod types;

pub use criteria::CriteriaBuilder;
pub use orchestrator::{PageRequest, QueryOrchestrator, QueryPage};
pub use types::{Clause, Document, FilterCriteria, PaginationState, Predicate, SortDirection, SortPlan};

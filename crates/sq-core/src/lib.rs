//! # sq-core — The Engine of SALESQ
//!
//! Answers ad-hoc queries over an immutable slice of retail-transaction
//! records: free-text search, categorical, range and tag filters, single-field
//! sorting, and offset pagination with page metadata.
//!
//! ```text
//! records ─▶ search ─▶ filters ─▶ sort ─▶ paginate ─▶ QueryResult
//! ```
//!
//! The engine is pure. Malformed query input and malformed record data both
//! degrade to pass-through or exclusion; [`evaluate`] never fails.

pub mod engine;
pub mod field;
pub mod options;
pub mod paginate;
pub mod predicate;
pub mod record;
pub mod sort;
pub mod summary;

pub use engine::{evaluate, QueryResult};
pub use field::{Field, Fields};
pub use options::{QueryOptions, QueryParams, Sort, SortField, SortOrder};
pub use paginate::PageMeta;
pub use record::Record;
pub use summary::{summarize, PageSummary};

//! # Movie Catalog
//!
//! An in-memory movie record manager with validated fields, all-or-nothing
//! updates and forgiving CSV ingestion.
//!
//! ## Core Concepts
//!
//! - **Movies**: Built unchecked, validated on demand; every violation is
//!   reported at once
//! - **Setters**: Per-field, checked, and no-ops on rejection
//! - **Store**: Ordered collection keyed by case-insensitive id
//! - **Updates**: Several fields at once, rolled back on any failure
//! - **Bulk load**: Line-by-line CSV import that reports instead of failing
//!
//! ## Example
//!
//! ```
//! use movie_catalog::{Movie, MovieStore};
//!
//! let mut store = MovieStore::new();
//! let id = store.generate_id("Inception", 2010);
//! assert_eq!(id, "INC2010");
//!
//! assert!(store.add(Movie::new(id, "Inception", "Christopher Nolan", 2010, 148.0, "Sci-Fi", 8.8)));
//!
//! // Rating 11 is rejected, so the title change is rolled back too.
//! assert!(!store.update_fields("inc2010", [("title", "Dreams"), ("rating", "11")]));
//! assert_eq!(store.find_by_id("INC2010").unwrap().title(), "Inception");
//!
//! let report = store.load_from_reader("HEA1995,Heat,Michael Mann,1995,170,Crime,8.3\n".as_bytes());
//! assert_eq!(report.loaded, 1);
//! assert_eq!(store.average_duration(), Some(159.0));
//! ```

pub mod error;
pub mod ingest;
pub mod movie;
pub mod shared;
pub mod store;
pub mod types;

// Re-exports
pub use error::{CatalogError, Result};
pub use ingest::{LoadIssue, LoadReport, COLUMNS};
pub use movie::{max_allowed_year, Movie, MIN_YEAR};
pub use shared::SharedStore;
pub use store::{MovieStore, StoreConfig};
pub use types::{Field, Violation};

//! # EAMCET Core
//!
//! Deterministic lookup logic for the EAMCET college predictor.
//!
//! A request flows through two pure steps:
//!
//! ```text
//! PredictForm ──validate──► CutoffQuery ──evaluate──► Vec<CutoffRow> (Snapshot)
//! ```
//!
//! Nothing here performs I/O. Running a [`CutoffQuery`] against PostgreSQL
//! and reading fixture files are the application's job; the catalog enums
//! supply the only identifiers that statement ever contains.

pub mod catalog;
pub mod error;
pub mod request;
pub mod row;
pub mod snapshot;

pub use catalog::{
    catalog, Affiliation, Branch, Catalog, CatalogEntry, Category, Coed, CollegeType, Phase,
};
pub use error::{SnapshotError, UnknownCode, ValidationError};
pub use request::{CutoffQuery, PredictForm};
pub use row::{CutoffRecord, CutoffRow};
pub use snapshot::Snapshot;

//! # Store Module
//!
//! Where cutoff rows come from.
//!
//! - `postgres`: the hosted phase tables, queried with one parameterized
//!   statement per request (built in `plan`) through a sqlx connection pool.
//! - `fixture`: an immutable in-memory [`Snapshot`] loaded from JSON, for
//!   offline use and tests.

mod fixture;
mod plan;
mod postgres;

pub use fixture::{load_snapshot, FixtureStore};
pub use plan::build_query;
pub use postgres::{PgStore, PoolSettings};

use eamcet_core::{CutoffQuery, CutoffRow, SnapshotError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or querying a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to read fixture {path}: {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fixture(#[from] SnapshotError),
}

/// The configured row source.
#[derive(Debug, Clone)]
pub enum Store {
    Postgres(PgStore),
    Fixture(FixtureStore),
}

impl Store {
    /// Short backend name for health output and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Fixture(_) => "fixture",
        }
    }

    /// Run one lookup. No retries.
    pub async fn fetch(&self, query: &CutoffQuery) -> Result<Vec<CutoffRow>, StoreError> {
        match self {
            Self::Postgres(store) => store.fetch(query).await,
            Self::Fixture(store) => Ok(store.fetch(query)),
        }
    }
}

impl From<PgStore> for Store {
    fn from(store: PgStore) -> Self {
        Self::Postgres(store)
    }
}

impl From<FixtureStore> for Store {
    fn from(store: FixtureStore) -> Self {
        Self::Fixture(store)
    }
}

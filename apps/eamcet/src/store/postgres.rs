use super::plan::build_query;
use super::StoreError;
use eamcet_core::{CutoffQuery, CutoffRow};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;
use tracing::debug;

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a lazily connecting pool. Only the URL is checked here; the
    /// first request opens the first connection.
    pub fn connect_lazy(database_url: &str, settings: PoolSettings) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    pub(super) async fn fetch(&self, query: &CutoffQuery) -> Result<Vec<CutoffRow>, StoreError> {
        let mut builder = build_query(query);
        debug!(sql = builder.sql(), "executing cutoff query");

        let rows = builder.build().fetch_all(&self.pool).await?;
        let rows = rows.iter().map(decode_row).collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn decode_row(row: &PgRow) -> Result<CutoffRow, sqlx::Error> {
    Ok(CutoffRow {
        inst_code: row.try_get("inst_code")?,
        institute_name: row.try_get("institute_name")?,
        place: row.try_get("place")?,
        branch_name: row.try_get("branch_name")?,
        tuition_fee: row.try_get("tuition_fee")?,
        affiliated: row.try_get("affiliated")?,
        last_rank: row.try_get("last_rank")?,
    })
}

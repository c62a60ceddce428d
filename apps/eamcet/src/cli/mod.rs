//! # CLI Module
//!
//! Command-line entry points. Every command has a `cmd_*` function so
//! integration tests can drive it without spawning the binary.

use crate::api::{build_router, AppState};
use crate::store::{FixtureStore, PgStore, PoolSettings, Store, StoreError};
use clap::{Args, Parser, Subcommand};
use eamcet_core::{catalog, CatalogEntry, CutoffRow, PredictForm, ValidationError};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use crate::store::load_snapshot;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no store configured: pass --database-url or --fixture")]
    NoStore,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// ARGUMENTS
// =============================================================================

/// EAMCET college predictor.
#[derive(Debug, Parser)]
#[command(name = "eamcet", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),
    /// Run one lookup and print the rows.
    Predict(PredictArgs),
    /// Print the accepted values for every field.
    Options {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Where rows come from. The database wins when both are given.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// JSON snapshot used instead of a database.
    #[arg(long, env = "EAMCET_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Maximum pooled database connections.
    #[arg(long, env = "EAMCET_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection.
    #[arg(long, env = "EAMCET_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "EAMCET_BIND", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Allowed CORS origins, comma separated (`*` for any).
    #[arg(long = "cors-origin", env = "EAMCET_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    #[arg(long)]
    pub rank: String,

    /// Category code, e.g. OC_BOYS.
    #[arg(long)]
    pub category: String,

    /// Branch code, e.g. CSE.
    #[arg(long)]
    pub branch: String,

    /// Phase code, e.g. final_phase_2023.
    #[arg(long)]
    pub phase: String,

    #[arg(long = "type", default_value = "")]
    pub college_type: String,

    #[arg(long, default_value = "")]
    pub coed: String,

    #[arg(long, default_value = "")]
    pub affiliated: String,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl PredictArgs {
    /// The same form the HTTP endpoint would receive.
    pub fn to_form(&self) -> PredictForm {
        PredictForm {
            rank: self.rank.clone(),
            category: self.category.clone(),
            branch: self.branch.clone(),
            phase: self.phase.clone(),
            college_type: self.college_type.clone(),
            coed: self.coed.clone(),
            affiliated: self.affiliated.clone(),
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Serve(args) => cmd_serve(args).await,
        Commands::Predict(args) => cmd_predict(&args).await.map(|_| ()),
        Commands::Options { json } => cmd_options(json),
    }
}

/// Open the configured store.
pub fn open_store(args: &StoreArgs) -> Result<Store, CliError> {
    if let Some(url) = &args.database_url {
        if args.fixture.is_some() {
            warn!("both --database-url and --fixture given; using the database");
        }
        let settings = PoolSettings {
            max_connections: args.max_connections.max(1),
            acquire_timeout: Duration::from_secs(args.acquire_timeout_secs),
        };
        return Ok(PgStore::connect_lazy(url, settings)?.into());
    }

    match &args.fixture {
        Some(path) => Ok(FixtureStore::open(path)?.into()),
        None => Err(CliError::NoStore),
    }
}

pub async fn cmd_serve(args: ServeArgs) -> Result<(), CliError> {
    let store = open_store(&args.store)?;
    let kind = store.kind();
    let state = AppState::new(store).with_cors_origins(args.cors_origins);
    let app = build_router(state);

    let listener = TcpListener::bind(&args.bind).await?;
    info!(addr = %listener.local_addr()?, store = kind, "eamcet server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("eamcet server stopped");
    Ok(())
}

/// Validate, look up and print. Returns the rows for callers that want them.
pub async fn cmd_predict(args: &PredictArgs) -> Result<Vec<CutoffRow>, CliError> {
    let query = args.to_form().validate()?;
    let store = open_store(&args.store)?;
    let rows = store.fetch(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_rows(&rows));
    }
    Ok(rows)
}

pub fn cmd_options(json: bool) -> Result<(), CliError> {
    let catalog = catalog();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let sections: [(&str, &[CatalogEntry]); 6] = [
        ("Phase (lastRank)", &catalog.phases),
        ("Category", &catalog.categories),
        ("Branch", &catalog.branches),
        ("Type", &catalog.types),
        ("Co-Education (coed)", &catalog.coed),
        ("Affiliated", &catalog.affiliations),
    ];
    for (title, entries) in sections {
        println!("{title}:");
        for entry in entries {
            println!("  {:<20} {}", entry.code, entry.label);
        }
    }
    Ok(())
}

/// Plain-text table of result rows.
pub fn format_rows(rows: &[CutoffRow]) -> String {
    if rows.is_empty() {
        return "No matching colleges.\n".to_string();
    }

    let mut out = format!(
        "{:<10} {:<45} {:<15} {:<8} {:<10} {:>11}\n",
        "CODE", "INSTITUTE", "PLACE", "FEE", "AFFIL", "LAST RANK"
    );
    for row in rows {
        let fee = row
            .tuition_fee
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<10} {:<45} {:<15} {:<8} {:<10} {:>11}\n",
            row.inst_code.as_deref().unwrap_or("-"),
            truncate(row.institute_name.as_deref().unwrap_or("-"), 45),
            truncate(row.place.as_deref().unwrap_or("-"), 15),
            fee,
            truncate(row.affiliated.as_deref().unwrap_or("-"), 10),
            row.last_rank,
        ));
    }
    out.push_str(&format!("{} row(s)\n", rows.len()));
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
    t.push('…');
    t
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}

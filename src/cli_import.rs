//! One-shot dataset import.
//!
//! Clears and repopulates the review database from the external JSON files,
//! as a single transactional replace. Exits non-zero on any failure, leaving
//! previously imported data intact.

use anyhow::Result;
use clap::Parser;
use covervet_server::ingestion::run_import;
use covervet_server::SqliteReviewStore;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite review database file.
    pub review_db: PathBuf,

    /// Path to the reviewer list JSON file.
    pub users_file: PathBuf,

    /// Path to the song dataset JSON file.
    pub covers_file: PathBuf,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let store = SqliteReviewStore::new(&cli_args.review_db)?;
    let summary = run_import(&store, &cli_args.users_file, &cli_args.covers_file)?;

    info!(
        "Import complete: {} users, {} songs, {} candidates",
        summary.users, summary.songs, summary.candidates
    );
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use covervet_server::{
    run_server, RequestsLoggingLevel, ReviewStore, ServerConfig, SqliteReviewStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite review database file.
    #[clap(value_parser = parse_path)]
    pub review_db: PathBuf,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3000)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
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

    info!(
        "Opening SQLite review database at {:?}...",
        cli_args.review_db
    );
    let review_store = Arc::new(SqliteReviewStore::new(&cli_args.review_db)?);

    let counts = review_store.counts()?;
    info!(
        "Catalog holds {} songs with {} candidates, split among {} reviewers",
        counts.songs, counts.candidates, counts.users
    );

    info!("Ready to serve at port {}!", cli_args.port);
    run_server(
        review_store,
        ServerConfig {
            requests_logging_level: cli_args.logging_level,
            port: cli_args.port,
            frontend_dir_path: cli_args.frontend_dir_path,
        },
    )
    .await
}

//! lexio-cm - WordPress → Lexio content migration tool
//!
//! Offline batch job: parses a WXR export, writes the reconstructed
//! course hierarchy into the Lexio database, and logs a summary. Exits 0
//! when the run completes (recorded per-entity issues included), 1 on a
//! fatal parse or database failure.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lexio_cm::ContentMigration;

#[derive(Parser, Debug)]
#[command(name = "lexio-cm", version, about = "Migrate a WordPress LearnDash export into Lexio")]
struct Args {
    /// Path to the WXR export file
    #[arg(default_value = "wordpress-export.xml")]
    xml_path: PathBuf,

    /// Target database file (defaults to lexio.db in the resolved data folder)
    #[arg(long, env = "LEXIO_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    tracing::info!("Starting lexio-cm (Content Migration)");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args).await {
        tracing::error!("Migration failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let db_path = match args.database {
        Some(path) => path,
        None => {
            let data_folder = lexio_common::config::resolve_data_folder(None, "LEXIO_DATA_FOLDER")?;
            lexio_common::config::database_path(&data_folder)
        }
    };
    tracing::info!("Database: {}", db_path.display());

    let pool = lexio_cm::db::init_database_pool(&db_path).await?;

    let migration = ContentMigration::new(pool);
    let stats = migration.run(&args.xml_path).await?;

    if stats.issues.is_empty() {
        tracing::info!("Migration completed cleanly");
    } else {
        tracing::warn!("Migration completed with {} issue(s)", stats.issues.len());
    }

    Ok(())
}

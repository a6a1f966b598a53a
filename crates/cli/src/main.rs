//! `users-service` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   — start the API server.
//! - `migrate` — bootstrap the database schema.
//! - `check`   — probe the database connection.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use config::Settings;

#[derive(Parser)]
#[command(
    name = "users-service",
    about = "User account service: sign-up, Basic-auth login and profile updates",
    version
)]
struct Cli {
    /// Database connection string, overrides `DATABASE_URL`.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        /// Listen address, overrides `BIND_ADDR`.
        #[arg(long)]
        bind: Option<String>,
        /// Pool ceiling, overrides `DB_MAX_CONNECTIONS`.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_connections: Option<u32>,
        /// Apply pending migrations before serving.
        #[arg(long)]
        migrate: bool,
    },
    /// Run pending database migrations.
    Migrate,
    /// Check that the database answers; exits non-zero if it does not.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal outside development.
    let _ = dotenvy::dotenv();

    let mut settings = Settings::from_env().context("invalid configuration")?;
    telemetry::init_tracing(settings.log_format);

    let cli = Cli::parse();
    if let Some(url) = cli.database_url {
        settings.database_url = url;
    }
    info!(environment = %settings.environment, "Configuration loaded");

    match cli.command {
        Command::Serve { bind, max_connections, migrate } => {
            let bind = bind.unwrap_or(settings.bind_addr);
            let max_connections = max_connections.unwrap_or(settings.max_connections);

            let pool = db::pool::create_pool(&settings.database_url, max_connections)
                .await
                .context("failed to connect to database")?;
            if migrate {
                db::pool::run_migrations(&pool).await.context("migration failed")?;
            }

            info!("Starting API server on {bind}");
            api::serve(&bind, pool).await.context("API server failed")?;
        }
        Command::Migrate => {
            info!("Running migrations against {}", settings.database_url);
            let pool = db::pool::create_pool(&settings.database_url, 2)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("Migrations applied successfully");
        }
        Command::Check => {
            let pool = db::pool::create_pool(&settings.database_url, 1)
                .await
                .context("failed to connect to database")?;
            if !db::pool::check_connection(&pool).await {
                error!("Database check failed");
                std::process::exit(1);
            }
            println!("database reachable");
        }
    }

    Ok(())
}

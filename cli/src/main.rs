use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing_subscriber::EnvFilter;

use server::{ServerOpts, serve};

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the server with the specified configuration.
    Server(ServerOpts),

    /// Apply the user store migrations, creating the database file if it does not exist.
    Migrate {
        /// Example: `sqlite:///tmp/data/data.db` (or) `/tmp/data/data.db` (or) `./data.db`
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

async fn migrate(database_url: &str) -> anyhow::Result<()> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url :: {database_url}"))?
        .create_if_missing(true);

    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("connect database :: {database_url}"))?;

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .context("run migrations")?;

    tracing::info!("migrations applied :: {}", database_url);
    pool.close().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Args::parse().cmd {
        Command::Server(opts) => serve(opts).await.context("server")?,
        Command::Migrate { database_url } => migrate(&database_url).await?,
    }

    Ok(())
}

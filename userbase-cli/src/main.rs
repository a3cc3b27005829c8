//! userbase - CRUD HTTP API over the users table
//!
//! Resolves database configuration from the environment (DB_USERNAME,
//! DB_PASSWORD, DB_NAME, plus DB_INSTANCE or DB_HOST/DB_PORT depending on
//! the deployment profile), opens and verifies the pool, ensures the
//! schema, and serves until Ctrl+C/SIGTERM. Any startup failure exits
//! non-zero before traffic is accepted.

use std::net::{IpAddr, SocketAddr};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use userbase_server::config::DbConfig;
use userbase_server::db::{create_pool, schema};
use userbase_server::http::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "userbase",
    version,
    about = "Minimal user CRUD service backed by MySQL"
)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Database URL (skips DB_* environment resolution when set)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => DbConfig::from_env()
            .context("resolving database configuration")?
            .url(),
    };

    tracing::info!("starting userbase on {}:{}", cli.host, cli.port);

    let pool = create_pool(&database_url)
        .await
        .context("opening database connection")?;

    schema::ensure_schema(&pool)
        .await
        .context("ensuring users table")?;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(cli.host, cli.port),
    };

    run_server(pool, config).await.context("server error")?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triagecare_server::{create_app, ServerConfig, TriageCareServer};

/// TriageCare HTTP server
#[derive(Parser, Debug)]
#[command(name = "triagecare-server")]
#[command(about = "Patient triage API and ER dashboard backend")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8001", env = "TRIAGECARE_PORT")]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    info!("Starting TriageCare server");
    info!(version = env!("CARGO_PKG_VERSION"), "Build info");

    let config = ServerConfig::from_env();
    let server = TriageCareServer::new(config)
        .await
        .context("server initialization failed")?;
    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("Dashboard:  http://localhost:{}/", args.port);
    info!("API docs:   http://localhost:{}/docs", args.port);
    info!("Patient API: http://localhost:{}/api/v1/intake", args.port);

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "triagecare_server=debug,tower_http=debug,sqlx=warn"
    } else {
        "triagecare_server=info,tower_http=info,sqlx=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // JSON logs in production, human-readable otherwise.
    let is_development =
        std::env::var("TRIAGECARE_ENV").unwrap_or_else(|_| "development".to_string())
            == "development";

    if is_development {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    }
}

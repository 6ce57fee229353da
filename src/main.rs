//! Recipe gateway
//!
//! Session-authenticated front-end for a record-store service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 RECIPE GATEWAY                 │
//!                        │                                                │
//!   Client Request       │  ┌────────┐   ┌───────────┐   ┌────────────┐  │
//!   ─────────────────────┼─▶│  http  │──▶│ auth gate │──▶│  handlers  │  │
//!                        │  │ server │   │ (session/ │   │ proxy/avg  │  │
//!                        │  └────────┘   │  bearer)  │   └─────┬──────┘  │
//!                        │                └───────────┘         │         │
//!                        │                                      ▼         │
//!   Client Response      │  ┌──────────┐                 ┌────────────┐  │
//!   ◀────────────────────┼──│ sanitize │◀────────────────│  upstream  │◀─┼── Record
//!                        │  │ /average │                 │   client   │  │   store
//!                        │  └──────────┘                 └────────────┘  │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use recipe_gateway::lifecycle::{startup, Shutdown};
use recipe_gateway::observability::{logging, metrics};
use recipe_gateway::{validate_config, ConfigError, HttpServer};

#[derive(Parser)]
#[command(name = "recipe-gateway")]
#[command(about = "Session-authenticated gateway for recipes and ratings", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override upstream.base_url.
    #[arg(long)]
    upstream: Option<String>,

    /// Skip the startup reachability probe of the record-store.
    #[arg(long)]
    no_upstream_check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match startup::resolve_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("recipe-gateway: {e}");
            return Err(e.into());
        }
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream.base_url = upstream;
    }
    if cli.no_upstream_check {
        config.upstream.check_on_startup = false;
    }
    if let Err(errors) = validate_config(&config) {
        let e = ConfigError::Validation(errors);
        eprintln!("recipe-gateway: {e}");
        return Err(e.into());
    }

    logging::init_logging(&config.observability);
    tracing::info!("recipe-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        strategy = %config.auth.strategy,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let check_upstream = config.upstream.check_on_startup;
    let listener = startup::bind(&config).await?;
    let server = HttpServer::new(config)?;
    if check_upstream {
        startup::check_upstream(&server.state().upstream).await?;
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

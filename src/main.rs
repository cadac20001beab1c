//! Lottery Gateway
//!
//! ```text
//!   Frontend / lottery-cli
//!          │  GET  /api/lottery/{lottery}/{address}
//!          │  POST /api/lottery/{lottery}/start | close
//!          ▼
//!   ┌──────────────┐    ┌────────────────┐    ┌──────────────────┐
//!   │ http server  │───▶│ LotteryService │───▶│ JSON-RPC node     │
//!   │ (axum+tower) │    │ verify / read  │    │ (lottery contract)│
//!   └──────────────┘    │ / write        │    └──────────────────┘
//!                       └────────────────┘
//! ```

use clap::Parser;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;

use lottery_gateway::config::load_config;
use lottery_gateway::lifecycle::{signals, startup, Shutdown};
use lottery_gateway::net::load_tls_config;
use lottery_gateway::observability::{logging, metrics};
use lottery_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "lottery-gateway", version, about = "REST gateway for the lottery contract")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "LOTTERY_GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability.log_level);
    tracing::info!("lottery-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        chain = %config.blockchain.chain,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Validated at load time
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let service = startup::build_service(&config).await?;
    let server = HttpServer::new(config.clone(), service);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    match &config.listener.tls {
        Some(tls) => {
            let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
            let addr = config.listener.bind_address.parse()?;
            server.run_tls(addr, rustls, server_shutdown).await?;
        }
        None => {
            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            server.run(listener, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

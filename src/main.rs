//! Chat gateway (v1)
//!
//! Request-forwarding gateway in front of the bot and feedback services.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌────────────────────────────────────────────────────┐
//!                     │                    CHAT GATEWAY                    │
//!                     │                                                    │
//!   POST /chat        │  ┌──────────┐   ┌───────────┐   ┌──────────────┐  │
//!   POST /feedback ───┼─▶│   http   │──▶│  gateway  │──▶│   routing    │  │
//!                     │  │ handlers │   │           │   │ route table  │  │
//!                     │  └──────────┘   └─────┬─────┘   └──────────────┘  │
//!                     │                       │                            │
//!                     │                       ▼                            │
//!                     │                ┌─────────────┐                    │
//!                     │                │  transform  │ (feedback only)    │
//!                     │                └──────┬──────┘                    │
//!                     │                       ▼                            │
//!   Client Response   │  ┌──────────┐   ┌─────────────┐                   │
//!   ◀─────────────────┼──│ response │◀──│ downstream  │◀──────────────────┼── Bot / Feedback
//!                     │  │  mapper  │   │   client    │                   │   services
//!                     │  └──────────┘   └─────────────┘                   │
//!                     │                                                    │
//!                     │  config · lifecycle · observability               │
//!                     └────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use chat_gateway::config::load_or_default;
use chat_gateway::http::HttpServer;
use chat_gateway::lifecycle::{signals, Shutdown};
use chat_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "chat-gateway")]
#[command(about = "Request-forwarding gateway for the bot and feedback services", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("chat-gateway: {}", e);
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!("chat-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        feedback_shape = %config.routing.feedback_shape,
        downstream_timeout_ms = config.timeouts.downstream_ms,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Route table and client first: a bad topology must never accept traffic.
    let server = match HttpServer::new(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

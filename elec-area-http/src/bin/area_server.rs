use std::net::SocketAddr;

use clap::Parser;
use elec_core::Locale;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use elec_area_http::server;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Serves `POST /api/area-check` for the electricity bill simulation form.
#[derive(Debug, Parser)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Language of error messages in responses (`en` or `ja`).
    #[arg(long, default_value = "en")]
    locale: Locale,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` plus request traces.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::from("info,warp::filters::trace=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let (_, server) = server::bind(cli.bind, cli.locale, shutdown_signal())?;
    server.await;

    Ok(())
}

/// Resolves on ctrl-c. Never resolves when the handler cannot be installed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

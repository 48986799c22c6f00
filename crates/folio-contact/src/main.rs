use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use folio_contact::{router, AppState, MemoryStore};
use tracing_subscriber::EnvFilter;

/// Folio contact-form service.
#[derive(Parser, Debug)]
#[command(name = "folio-contact", version, about)]
struct Args {
    /// Port to listen on (defaults to `[contact] port` from the config).
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind (defaults to `[contact] host` from the config).
    #[arg(long)]
    host: Option<String>,

    /// Log level override (e.g. debug, folio_contact=trace).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("folio=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "folio=info".parse().unwrap()),
            ),
        )
        .init();

    let config = folio_config::load_config()
        .map(|c| c.contact)
        .unwrap_or_else(|e| {
            tracing::warn!("Config load failed, using defaults: {e}");
            folio_config::schema::ContactConfig::default()
        });
    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);

    let addr: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {host}:{port}: {e}");
            std::process::exit(2);
        }
    };

    let app = router(AppState::new(Arc::new(MemoryStore::new())));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Contact service listening on http://{addr}");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {e}");
    }
}

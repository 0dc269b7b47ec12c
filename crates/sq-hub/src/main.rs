use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sq_hub::{build_router, AppState, Config};
use sq_store::Store;

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser)]
#[command(name = "sq-hub", version, about = "SALESQ retail sales query hub")]
struct Args {
    /// Path to the sales CSV (overrides `data.path`)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Server bind address (overrides `server.bind`)
    #[arg(long)]
    bind: Option<String>,

    /// Path to config file
    #[arg(long, default_value = "sq-hub.toml")]
    config: PathBuf,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "sq_hub=info,sq_store=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config).with_overrides(args.bind, args.data);

    // Ingestion failure is fatal.
    let store = match Store::load(&config.data.path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to load dataset from {:?}: {}", config.data.path, e);
            std::process::exit(1);
        }
    };
    let records = store.len();

    let addr: SocketAddr = match config.server.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {:?}: {}", config.server.bind, e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(store));
    let app = build_router(state, &config.server);

    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    tracing::info!("  SALESQ v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("  API:      http://{}/api/sales", addr);
    tracing::info!("  Health:   http://{}/api/health", addr);
    tracing::info!("  Dataset:  {:?} ({} records)", config.data.path, records);
    tracing::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

#![forbid(unsafe_code)]

use mercata_server::{build_router, validate_startup_config, ApiConfig, AppState};
use mercata_store::{MemoryStore, ProductStore, SqliteStore};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    let ms = env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

fn open_store() -> Result<Arc<dyn ProductStore>, String> {
    match env::var("MERCATA_DB").ok().filter(|v| !v.is_empty()) {
        None => Ok(Arc::new(MemoryStore::new())),
        Some(path) if path == "memory" => Ok(Arc::new(MemoryStore::new())),
        Some(path) => {
            let store =
                SqliteStore::open(&path).map_err(|err| format!("open {path}: {err}"))?;
            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "server exited");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let defaults = ApiConfig::default();
    let api = ApiConfig {
        max_body_bytes: env_usize("MERCATA_MAX_BODY_BYTES", defaults.max_body_bytes),
        request_timeout: env_duration_ms(
            "MERCATA_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        ),
        top_rated_count: env_usize("MERCATA_TOP_RATED_COUNT", defaults.top_rated_count),
    };
    validate_startup_config(&api)?;

    let store = open_store()?;
    let app = build_router(AppState::new(store, api));

    let bind = env::var("MERCATA_BIND").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, "catalog server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

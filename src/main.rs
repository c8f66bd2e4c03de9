use std::sync::Arc;

use estate_api::config::AppConfig;
use estate_api::state::AppState;
use estate_api::store::MemoryStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up secrets and port overrides.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Estate API in {:?} mode", config.environment);

    let store = Arc::new(MemoryStore::new());
    if let Ok(path) = std::env::var("ESTATE_SEED_FILE") {
        match seed_from_file(&store, &path) {
            Ok(count) => tracing::info!("seeded {} documents from {}", count, path),
            Err(e) => tracing::warn!("could not seed from {}: {}", path, e),
        }
    }

    let port = config.server.port;
    let state = AppState::new(config, store);
    let app = estate_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Estate API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

/// Seed the in-memory store from a JSON file shaped as
/// `{ "<collection>": [ { ... }, ... ] }`.
fn seed_from_file(store: &MemoryStore, path: &str) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let collections = parsed
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("seed file must hold a JSON object"))?;

    let mut count = 0;
    for (collection, docs) in collections {
        let docs = docs
            .as_array()
            .ok_or_else(|| anyhow::anyhow!("collection {collection} must hold an array"))?;
        let docs: Vec<_> = docs.iter().filter_map(|d| d.as_object().cloned()).collect();
        count += docs.len();
        store.seed(collection, docs);
    }
    Ok(count)
}

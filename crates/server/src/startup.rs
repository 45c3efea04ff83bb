use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};
use service::{file::record_store::FileRecordStore, records::RecordStore, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router around any record store.
pub fn build_app(store: Arc<dyn RecordStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

/// Build the file-backed app from `cfg` and serve until the task is dropped.
pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.store.path).await?;

    let store = FileRecordStore::new(cfg.store.path.clone());
    let app = build_app(store);

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, store = %cfg.store.path.display(), "starting price desk server");
    axum::serve(listener, app).await?;
    Ok(())
}

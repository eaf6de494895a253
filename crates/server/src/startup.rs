use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;
use service::{
    booking::BookingRepository,
    file::JsonBookingStore,
    runtime,
    storage::memory::MemoryBookingStore,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Open the configured store and wrap it in the shared server state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let repo: Arc<dyn BookingRepository> = match cfg.storage.backend {
        StorageBackend::Json => JsonBookingStore::open(&cfg.storage.data_dir).await?,
        StorageBackend::Memory => {
            info!("using in-memory store; data is lost on restart");
            MemoryBookingStore::new()
        }
    };
    Ok(ServerState::new(repo, &cfg.booking.admin_emails))
}

pub fn build_app(cfg: &AppConfig, state: ServerState) -> Router {
    routes::build_router(state, build_cors(), &cfg.web.static_dir)
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            // no signal handler: run until the process is killed
            warn!(error = %e, "cannot listen for Ctrl+C; graceful shutdown disabled");
            std::future::pending::<()>().await
        }
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.storage.backend == StorageBackend::Json {
        runtime::ensure_env(&cfg.web.static_dir, &cfg.storage.data_dir).await?;
    }

    let state = build_state(&cfg).await?;
    let app = build_app(&cfg, state);

    let addr = bind_addr(&cfg)?;
    info!(%addr, admins = cfg.booking.admin_emails.len(), "starting booking server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

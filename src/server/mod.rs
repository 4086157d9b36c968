//! Pagination backend for the gallery.
//!
//! Serves a fixed color list page by page at `GET /colors`. Any origin may
//! call it.

pub mod pagination;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use pagination::ColorsPage;
use routes::colors_handler;

/// The color list served when none is supplied.
pub const DEFAULT_COLORS: [&str; 95] = [
    "#69d2e7", "#a7dbd8", "#e0e4cc", "#f38630", "#fa6900",
    "#fe4365", "#fc9d9a", "#f9cdad", "#c8c8a9", "#83af9b",
    "#ecd078", "#d95b43", "#c02942", "#542437", "#53777a",
    "#556270", "#4ecdc4", "#c7f464", "#ff6b6b", "#c44d58",
    "#774f38", "#e08e79", "#f1d4af", "#ece5ce", "#c5e0dc",
    "#e8ddcb", "#cdb380", "#036564", "#033649", "#031634",
    "#490a3d", "#bd1550", "#e97f02", "#f8ca00", "#8a9b0f",
    "#594f4f", "#547980", "#45ada8", "#9de0ad", "#e5fcc2",
    "#00a0b0", "#6a4a3c", "#cc333f", "#eb6841", "#edc951",
    "#e94e77", "#d68189", "#c6a49a", "#c6e5d9", "#f4ead5",
    "#3fb8af", "#7fc7af", "#dad8a7", "#ff9e9d", "#ff3d7f",
    "#d9ceb2", "#948c75", "#d5ded9", "#7a6a53", "#99b2b7",
    "#ffffff", "#cbe86b", "#f2e9e1", "#1c140d", "#cbe86b",
    "#efffcd", "#dce9be", "#555152", "#2e2633", "#99173c",
    "#343838", "#005f6b", "#008c9e", "#00b4cc", "#00dffc",
    "#413e4a", "#73626e", "#b38184", "#f0b49e", "#f7e4be",
    "#ff4e50", "#fc913a", "#f9d423", "#ede574", "#e1f5c4",
    "#99b898", "#fecea8", "#ff847c", "#e84a5f", "#2a363b",
    "#655643", "#80bca3", "#f6f7bd", "#e6ac27", "#bf4d28",
];

/// Shared, read-only state of the colors endpoint.
#[derive(Debug, Clone)]
pub struct ColorStore {
    pub colors: Arc<[String]>,
}

impl ColorStore {
    pub fn new(colors: Vec<String>) -> Self {
        Self {
            colors: colors.into(),
        }
    }
}

impl Default for ColorStore {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.iter().map(|c| c.to_string()).collect())
    }
}

pub fn router(store: ColorStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/colors", get(colors_handler))
        .layer(cors)
        .with_state(store)
}

/// Bind `0.0.0.0:{port}` and serve until Ctrl+C or SIGTERM.
pub async fn serve(port: u16, store: ColorStore) -> Result<()> {
    let address = format!("0.0.0.0:{port}");
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(items = store.colors.len(), "Server is running on port {port}");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! HTTP server for the catalog
//!
//! Routes:
//!
//! ```text
//! GET /components/{id}/markdown   text/markdown export of a component
//! GET /blocks/{id}/markdown       text/markdown export of a block
//! GET /api/{kind}                 JSON listing (?category=, ?q=)
//! GET /api/{kind}/{id}            JSON entry with prev/next
//! GET /llms.txt                   index of every markdown export
//! GET /healthz
//! ```
//!
//! All handlers read from one immutable `AppState`; no locking is involved.

mod error;
mod handlers;

pub use error::{ApiError, JsonError};
pub use handlers::{EntryDetail, EntrySummary, MARKDOWN_CONTENT_TYPE};

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::Registry;
use crate::config::SiteConfig;
use crate::markdown::MarkdownGenerator;

/// Read-only state shared by every request
#[derive(Debug)]
pub struct AppState {
    pub registry: Registry,
    pub generator: MarkdownGenerator,
    pub cache_control: String,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(registry: Registry, config: &SiteConfig) -> Self {
        Self {
            registry,
            generator: MarkdownGenerator::new(&config.base_url),
            cache_control: config.cache_control(),
        }
    }
}

/// Build the application router
pub fn router(state: SharedState) -> Router {
    let routes = Router::new()
        .route("/components/*tail", get(handlers::component_markdown))
        .route("/blocks/*tail", get(handlers::block_markdown))
        .route("/api/:kind", get(handlers::list_entries))
        .route("/api/:kind/:id", get(handlers::show_entry))
        .route("/llms.txt", get(handlers::llms_index))
        .route("/healthz", get(handlers::health));

    with_middleware(routes).with_state(state)
}

/// Panic recovery and request tracing for every route
fn with_middleware<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "Request handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

/// Load the registry, bind, and serve until Ctrl-C
pub async fn serve(config: SiteConfig) -> Result<()> {
    let registry = Registry::load(config.data_dir.as_deref()).context("Failed to load catalog")?;
    info!(
        components = registry.components().len(),
        blocks = registry.blocks().len(),
        "Catalog loaded"
    );

    let state = Arc::new(AppState::new(registry, &config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(
        "Serving catalog on http://{} (base URL {})",
        listener.local_addr()?,
        config.base_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

//! RepoLens Server Library
//!
//! Provides the HTTP gateway in front of the analysis engine and the GitHub
//! issue tracker.

pub mod error;
pub mod routes;
pub mod state;
pub mod validation;

use axum::{
    routing::{get, post},
    Router,
};
use repolens_core::{build_collaborators, AnalyzerHandle, GatewayConfig};
use std::net::SocketAddr;
use std::sync::Once;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber (only once)
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG").unwrap_or_else(|_| {
                    "repolens=info,repolens_server=info,repolens_core=info,tower_http=info".into()
                }),
            ))
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

/// Build the Axum router with all routes
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/health",
            get(routes::health_check).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/analyze-repo",
            post(routes::analyze_repository).fallback(routes::method_not_allowed),
        )
        .route(
            "/api/create-github-issue",
            post(routes::create_github_issue).fallback(routes::method_not_allowed),
        )
        .fallback(routes::not_found);

    with_middleware(api).with_state(state)
}

/// Wrap gateway routes in the shared middleware stack
pub fn with_middleware(router: Router<AppState>) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(routes::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Serve `state` on `addr` until Ctrl-C
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  POST /api/analyze-repo         - Analyze repository");
    tracing::info!("  POST /api/create-github-issue  - Create GitHub issue");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Initialize the analyzer and run the gateway.
///
/// A failed initialization does not stop the server: health reports
/// `analyzer_ready: false` and business endpoints answer 500 until restart.
pub async fn launch(config: GatewayConfig) -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting RepoLens gateway v{}...", repolens_core::version());

    let handle = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || {
            AnalyzerHandle::initialize(|| build_collaborators(&config))
        })
        .await?
    };

    if let Some(reason) = handle.failure() {
        tracing::warn!(
            reason,
            "Serving without an analyzer; check your configuration and restart"
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(handle, &config.server.service_name);

    run_server(addr, state).await
}

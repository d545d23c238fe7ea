//! Doctor Recommendation API Server
//!
//! Serves symptom-based doctor recommendations over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 DOCTOR RECOMMENDATION API                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────────────────────────┐    │
//! │  │  API      │  │  recommender-core                    │    │
//! │  │  Gateway  │─▶│  vectorize → cascade → department    │    │
//! │  │  (Axum)   │  │            → doctors                 │    │
//! │  └───────────┘  └──────────────────┬───────────────────┘    │
//! │                                    ▼                        │
//! │                       ┌─────────────────────────┐           │
//! │                       │  Artifacts (read-only)  │           │
//! │                       └─────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;


use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use recommender_core::Artifacts;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    init_tracing(&config);

    tracing::info!("Doctor Recommendation API starting...");
    tracing::info!("Environment: {}", config.environment);

    // Load artifacts; the server never listens without them
    let paths = config.artifact_paths();
    let artifacts = tokio::task::spawn_blocking(move || Artifacts::load(&paths))
        .await
        .context("artifact loading task failed")?
        .with_context(|| format!("failed to load artifacts from {}", config.data_dir.display()))?;
    tracing::info!(?artifacts, "Artifacts ready");

    // Build application state
    let state = AppState::new(config.clone(), Arc::new(artifacts));

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let default_filter = if config.is_production() {
        "doctor_recommendation_api=info,recommender_core=info,tower_http=info"
    } else {
        "doctor_recommendation_api=debug,recommender_core=info,tower_http=debug"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining requests");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` until artifacts are attached
    pub artifacts: Option<Arc<Artifacts>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, artifacts: Arc<Artifacts>) -> Self {
        Self {
            artifacts: Some(artifacts),
            config,
        }
    }

    /// State with nothing loaded; every model endpoint answers 500
    #[cfg(test)]
    pub fn unloaded(config: Config) -> Self {
        Self {
            artifacts: None,
            config,
        }
    }

    pub fn loaded(&self) -> AppResult<Arc<Artifacts>> {
        self.artifacts.clone().ok_or(AppError::NotReady)
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status::index))
        .route("/health", get(handlers::health::check))
        .route("/symptoms", get(handlers::symptoms::list))
        .route("/recommend", post(handlers::recommend::create))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

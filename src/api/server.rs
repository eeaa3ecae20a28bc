//! HTTP API server

use super::extract::ValidatedText;
use crate::error::TextLensError;
use crate::service::AnalysisService;
use crate::types::{AnalysisResult, LanguageResponse, SemanticMetrics};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Interval of the expired-cache-entry sweep
    pub sweep_interval: Duration,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// API server state
#[derive(Clone)]
struct AppState {
    /// Analysis operations and the shared cache
    service: Arc<AnalysisService>,
    /// Instance ID
    instance_id: String,
    /// Process start
    started_at: DateTime<Utc>,
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    service: Arc<AnalysisService>,
    instance_id: String,
    started_at: DateTime<Utc>,
    /// Shutdown signal for background tasks
    shutdown_tx: tokio::sync::broadcast::Sender<()>,
    /// Cache sweep task handle for cleanup
    sweeper_handle: Option<tokio::task::JoinHandle<()>>,
}

impl ApiServer {
    /// Create new API server around a service constructed once at startup
    pub fn new(config: ApiServerConfig, service: Arc<AnalysisService>) -> Self {
        let instance_id = uuid::Uuid::new_v4().to_string()[..8].to_string();
        let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);

        Self {
            config,
            service,
            instance_id,
            started_at: Utc::now(),
            shutdown_tx,
            sweeper_handle: None,
        }
    }

    /// Get instance ID
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Router with all routes, state and middleware
    pub fn router(&self) -> Router {
        Self::build_router(AppState {
            service: Arc::clone(&self.service),
            instance_id: self.instance_id.clone(),
            started_at: self.started_at,
        })
    }

    fn analysis_routes() -> Router<AppState> {
        Router::new()
            .route("/analyze/text", post(analyze_text_handler))
            .route("/detect/language", post(detect_language_handler))
            .route("/analyze/semantic", post(analyze_semantic_handler))
    }

    /// Build router
    fn build_router(state: AppState) -> Router {
        Router::new()
            .merge(Self::analysis_routes())
            // Prefix used by the web client
            .nest("/api/nlp", Self::analysis_routes())
            // Health check
            .route("/health", get(health_handler))
            // State
            .with_state(state)
            // Middleware
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Start serving until Ctrl-C
    pub async fn serve(mut self) -> anyhow::Result<()> {
        let router = self.router();

        // Spawn cache sweep task with shutdown support
        let service = Arc::clone(&self.service);
        let sweep_interval = self.config.sweep_interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let sweeper_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep_interval);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let purged = service.purge_expired();
                        if purged > 0 {
                            debug!("Purged {} expired cache entries", purged);
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Cache sweep task received shutdown signal");
                        break;
                    }
                }
            }
        });

        // Store sweeper handle for cleanup
        self.sweeper_handle = Some(sweeper_handle);

        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!(
            "API server [{}] listening on http://{}",
            self.instance_id, self.config.addr
        );

        let shutdown_tx = self.shutdown_tx.clone();
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                    std::future::pending::<()>().await;
                }
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(());
            })
            .await?;

        Ok(())
    }
}

/// Full analysis handler
async fn analyze_text_handler(
    State(state): State<AppState>,
    ValidatedText(request): ValidatedText,
) -> Result<Json<Arc<AnalysisResult>>, TextLensError> {
    let result = state.service.analyze_text(&request).await?;
    Ok(Json(result))
}

/// Language-only handler
async fn detect_language_handler(
    State(state): State<AppState>,
    ValidatedText(request): ValidatedText,
) -> Result<Json<LanguageResponse>, TextLensError> {
    let language = state.service.detect_language(&request).await?;
    Ok(Json(LanguageResponse { language }))
}

/// Semantic-only handler
async fn analyze_semantic_handler(
    State(state): State<AppState>,
    ValidatedText(request): ValidatedText,
) -> Result<Json<SemanticMetrics>, TextLensError> {
    let metrics = state.service.analyze_semantics(&request).await?;
    Ok(Json(metrics))
}

/// Health check handler
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub instance_id: String,
    pub uptime_secs: i64,
    pub cache_entries: usize,
    pub cache_capacity: usize,
    pub cache_utilization: f32,
    pub analyses_computed: u64,
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.service.cache_stats();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        instance_id: state.instance_id.clone(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        cache_entries: cache.size,
        cache_capacity: cache.capacity,
        cache_utilization: cache.utilization(),
        analyses_computed: state.service.analyses_computed(),
    })
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        // Send shutdown signal to background tasks
        let _ = self.shutdown_tx.send(());

        // Abort sweep task if it's still running
        if let Some(handle) = self.sweeper_handle.take() {
            handle.abort();
            debug!("ApiServer dropped - cache sweep task aborted");
        }
    }
}

//! HTTP transport module for the digital twin service
//!
//! Axum router exposing the scoring, simulation and recommendation
//! endpoints as plain JSON, with permissive CORS and per-request logging.

use axum::{
    Json, Router,
    body::Body,
    extract::{State, rejection::JsonRejection},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::clients::{CompletionService, GeminiClient, ScriptedCompletion};
use crate::config::Config;
use crate::error::Result;
use crate::recommend::Recommender;
use crate::routine::{AnalysisResult, RoutineSnapshot, SimulationRequest, SimulationResult};
use crate::scoring;

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub recommender: Recommender,
}

impl HttpState {
    pub fn new(config: Config, service: Arc<dyn CompletionService>) -> Self {
        Self {
            config: Arc::new(config),
            recommender: Recommender::new(service),
        }
    }

    /// Build the completion service named by `config.completion.provider`
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let service: Arc<dyn CompletionService> = match config.completion.provider.as_str() {
            "offline" => {
                tracing::info!("Using offline completion service; recommendations are canned");
                Arc::new(ScriptedCompletion::offline())
            }
            _ => {
                let client = GeminiClient::with_options(
                    config.runtime.gemini_api_key.clone(),
                    config.completion.model.clone(),
                    config.completion.base_url.clone(),
                    config.completion.timeout_ms,
                )?;
                if !client.has_key() {
                    tracing::warn!(
                        "GEMINI_API_KEY not set; /recommend will return the fallback message"
                    );
                }
                Arc::new(client)
            }
        };
        Ok(Self::new(config, service))
    }

    fn check_domain(&self, snapshot: &RoutineSnapshot) -> Result<()> {
        if self.config.validation.strict {
            snapshot.validate_domain()?;
        }
        Ok(())
    }
}

/// Root endpoint
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "Hello": "Digital Twin AI Service MVP" }))
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Score a routine and classify its burnout risk
pub async fn analyze_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<RoutineSnapshot>, JsonRejection>,
) -> Result<Json<AnalysisResult>> {
    let Json(snapshot) = payload?;
    state.check_domain(&snapshot)?;
    Ok(Json(AnalysisResult {
        productivity_score: scoring::score(&snapshot),
        burnout_risk: scoring::classify(&snapshot),
    }))
}

/// Compare a baseline routine with a hypothetical one
pub async fn simulate_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResult>> {
    let Json(req) = payload?;
    if state.config.validation.strict {
        req.validate_domain()?;
    }
    Ok(Json(scoring::simulate(&req.current, &req.changes)))
}

/// Generate recommendations; completion failures still answer 200
pub async fn recommend_handler(
    State(state): State<HttpState>,
    payload: std::result::Result<Json<RoutineSnapshot>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(snapshot) = payload?;
    state.check_domain(&snapshot)?;
    let recommendation = state.recommender.recommend(&snapshot).await;
    Ok(Json(json!({ "recommendations": recommendation.text })))
}

/// Log method, path, status and latency for every request
async fn log_requests(
    req: axum::http::Request<Body>,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = std::time::Instant::now();
    let resp = next.run(req).await;
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = resp.status();
    if status.is_server_error() {
        tracing::warn!("{} {} -> {} ({:.1}ms)", method, path, status.as_u16(), latency_ms);
    } else {
        tracing::info!("{} {} -> {} ({:.1}ms)", method, path, status.as_u16(), latency_ms);
    }
    resp
}

/// Build the application router
pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/simulate", post(simulate_handler))
        .route("/recommend", post(recommend_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(state: HttpState) -> anyhow::Result<()> {
    let bind = state.config.server.http_bind;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener on {}: {}", bind, e))?;

    tracing::info!("Starting HTTP server on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

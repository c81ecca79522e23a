//! HTTP API.
//!
//! - `GET /`: liveness check
//! - `POST /chat`: `{ "message": "..." }` -> `{ "reply": "..." }`
//!
//! Browser access is restricted to the configured CORS allow-list.

mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{AnswerError, Result};
use crate::pipeline::ResolutionPipeline;

pub use error::ApiError;

/// Liveness message for `GET /`.
pub const HEALTH_MESSAGE: &str = "Backend is live and working!";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ResolutionPipeline>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Build the router with CORS and request tracing.
pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handle_health))
        .route("/chat", post(handle_chat))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A `*` entry allows every origin. Browsers reject credentialed requests
/// against a wildcard, so credentials are only allowed for an explicit list.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin.trim() == "*") {
        warn!("CORS allow-list contains '*'; allowing any origin without credentials");
        return base.allow_origin(AllowOrigin::any());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim_end_matches('/').parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

async fn handle_health() -> &'static str {
    HEALTH_MESSAGE
}

async fn handle_chat(
    State(state): State<AppState>,
    payload: Option<Json<ChatRequest>>,
) -> std::result::Result<Json<ChatResponse>, ApiError> {
    let message = payload
        .and_then(|Json(request)| request.message)
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::MissingMessage)?;

    let span = info_span!("chat", request_id = %Uuid::new_v4());
    let pipeline = Arc::clone(&state.pipeline);

    let outcome = std::panic::AssertUnwindSafe(
        async move {
            info!(message = %message, "User asked");
            pipeline.resolve(&message).await
        }
        .instrument(span),
    )
    .catch_unwind()
    .await;

    match outcome {
        Ok(resolution) => Ok(Json(ChatResponse {
            reply: resolution.answer,
        })),
        Err(_) => {
            error!("Resolution panicked");
            Err(ApiError::Internal)
        }
    }
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &ServerConfig, pipeline: ResolutionPipeline) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AnswerError::Config(format!("Invalid listen address: {}", e)))?;

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };
    let app = router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

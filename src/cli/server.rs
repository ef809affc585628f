//! HTTP server mode for REST API access to discovery and composition

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{EngineConfig, GraphFormat};
use crate::engine::Pipeline;
use crate::error::{Error, Result};
use crate::loader::{digest_params, resolve_manifest, Manifest};
use crate::output::encode;
use crate::schema::ConceptGraph;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Engine settings applied to every request
    pub engine: EngineConfig,
}

/// App state shared across handlers
struct AppState {
    pipeline: Pipeline,
}

/// Query string of the composer endpoint
#[derive(Debug, Default, Deserialize)]
struct ComposerQuery {
    /// Overrides the configured output format
    #[serde(default)]
    format: Option<GraphFormat>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the application router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState {
        pipeline: Pipeline::new(config.engine),
    };

    // Allow all origins, the composer is called from browser front ends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/composer", post(composer))
        .route("/discover", post(discover))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    config.engine.validate()?;
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Compose the groups carried in `sources[...]` form parameters
async fn composer(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ComposerQuery>,
    Form(params): Form<Vec<(String, String)>>,
) -> Response {
    let output = &state.pipeline.config().output;
    let format = query.format.unwrap_or(output.format);
    let pretty = output.pretty;

    match compose_params(&state.pipeline, params, format, pretty).await {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, format.content_type())],
            text,
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Discover the concept graph of each group in a JSON manifest
async fn discover(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Manifest>, JsonRejection>,
) -> Response {
    let Json(manifest) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let error = Error::invalid_param("body", rejection.body_text());
            return error_response(&error);
        }
    };

    match discover_manifest(&state.pipeline, manifest).await {
        Ok(graphs) => {
            let graphs: Vec<Value> = graphs.iter().map(|g| g.to_json()).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(json!({
                    "type": "GRAPHS",
                    "graphs": graphs
                }))),
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}

async fn compose_params(
    pipeline: &Pipeline,
    params: Vec<(String, String)>,
    format: GraphFormat,
    pretty: bool,
) -> Result<String> {
    let groups = digest_params(params)?;
    let composed = pipeline.run(groups).await?;
    encode(&composed, format, pretty)
}

async fn discover_manifest(pipeline: &Pipeline, manifest: Manifest) -> Result<Vec<ConceptGraph>> {
    let groups = resolve_manifest(manifest, None)?;
    pipeline.discover_all(groups).await
}

fn error_response(error: &Error) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        tracing::error!(error = %error, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ApiResponse::<()>::error(error.to_string()))).into_response()
}

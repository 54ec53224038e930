//! GenAI Hub Backend
//!
//! A REST API server exposing generative-AI capabilities (text, image, and
//! audio generation, content analysis) and multi-step workflows composed
//! over them.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use genai_hub_backend::api::{self, ServerState};
use genai_hub_backend::config::Config;
use genai_hub_backend::gateway::{HfInferenceClient, InferenceGateway};
use genai_hub_backend::state::{persistence::AgentRegistry, AppState};
use genai_hub_backend::workflow::{
    PlaceholderTaskExecutor, UuidIdGenerator, WorkflowEngine, WorkflowStore,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

#[derive(Serialize)]
struct HelloResponse {
    message: String,
    status: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    message: String,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Initialize the agent registry
    let app_state = Arc::new(RwLock::new(AppState::new()));

    // Try to load agents from the default path
    let registry_path = AgentRegistry::default_path();
    if registry_path.exists() {
        match app_state.write().await.load_agents(&registry_path) {
            Ok(count) => info!("Loaded {} agents from {}", count, registry_path.display()),
            Err(e) => tracing::warn!("Failed to load agents: {}", e),
        }
    }

    // Wire the engine to its collaborators
    let gateway: Arc<dyn InferenceGateway> = Arc::new(HfInferenceClient::new(&config.inference)?);
    let store = Arc::new(WorkflowStore::new());
    let engine = Arc::new(WorkflowEngine::new(
        gateway.clone(),
        store.clone(),
        Arc::new(PlaceholderTaskExecutor),
        Arc::new(UuidIdGenerator),
    ));

    let state = ServerState {
        app: app_state,
        engine,
        gateway,
        store,
        registry_path: Some(registry_path),
    };

    // Build our application with routes
    let app = Router::new()
        // Health check and hello world
        .route("/", get(hello_world))
        .route("/api/health", get(health_check))
        // Direct inference capability API
        .route("/api/text/generate", post(api::inference::generate_text))
        .route("/api/image/generate", post(api::inference::generate_image))
        .route(
            "/api/audio/synthesize",
            post(api::inference::synthesize_audio),
        )
        .route("/api/image/analyze", post(api::inference::analyze_image))
        // Agent registry API
        .route("/api/agents", get(api::agents::list_agents))
        .route("/api/agents/create", post(api::agents::create_agent))
        // Workflow API
        .route(
            "/api/workflows/multimodal",
            post(api::workflows::multimodal_content),
        )
        .route(
            "/api/workflows/analyze",
            post(api::workflows::analyze_content),
        )
        .route(
            "/api/workflows/create-agent",
            post(api::workflows::create_agent),
        )
        .route(
            "/api/workflows/orchestrate",
            post(api::workflows::orchestrate),
        )
        .route("/api/workflows", get(api::workflows::list_workflows))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for development
        .with_state(state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

async fn hello_world() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "GenAI Hub backend is running".to_string(),
        status: "ok".to_string(),
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}

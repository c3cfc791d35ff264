//! Export server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path as UrlPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use blockpage_export::{ExportError, Exporter};
use blockpage_model::{Canvas, CanvasEdit, CanvasError, Component, ComponentKind, Style};

/// Configuration for the export server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Open browser on start
    pub open: bool,

    /// Directory holding the editor UI, served at `/`
    pub ui_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            open: false,
            ui_dir: None,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("Server error: {0}")]
    Serve(String),
}

/// Errors returned to API callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Unknown component type: {0}")]
    UnknownKind(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Canvas(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownKind(_) => StatusCode::NOT_FOUND,
            ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// Shared server state.
pub struct AppState {
    exporter: Exporter,
}

impl AppState {
    pub fn new(exporter: Exporter) -> Self {
        Self { exporter }
    }
}

/// Defaults handed to the editor when it places a new block.
#[derive(Debug, Serialize)]
struct KindDefaults {
    kind: ComponentKind,
    content: &'static str,
    style: Style,
}

/// Request body for a canvas edit.
#[derive(Debug, Deserialize)]
struct EditRequest {
    components: Vec<Component>,
    edit: CanvasEdit,
}

/// Largest export request accepted. Canvases carry uploaded photos as base64 data URIs.
pub const EXPORT_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Build the API router. When `ui_dir` is given, unmatched paths are served from it.
pub fn router(state: Arc<AppState>, ui_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/export",
            post(export_handler).layer(DefaultBodyLimit::max(EXPORT_BODY_LIMIT)),
        )
        .route("/api/canvas/edit", post(edit_handler))
        .route("/api/components/{kind}/defaults", get(defaults_handler))
        .with_state(state)
        .layer(CorsLayer::permissive());

    match ui_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    }
}

/// Export server.
pub struct ExportServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ExportServer {
    /// Create a new export server.
    pub fn new(config: ServerConfig, exporter: Exporter) -> Self {
        Self {
            config,
            state: Arc::new(AppState::new(exporter)),
        }
    }

    /// Start serving until the process is stopped.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::InvalidAddress(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let app = router(self.state, self.config.ui_dir.as_deref());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!("Export server listening at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Export the posted component list and answer with the archive as a download.
async fn export_handler(
    State(state): State<Arc<AppState>>,
    Json(components): Json<Vec<Component>>,
) -> Result<Response, ApiError> {
    let canvas = Canvas::from_components(components)?;
    tracing::info!("Export requested for {} components", canvas.len());

    let archive = state.exporter.export_canvas(&canvas).await?;
    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response())
}

/// Apply one edit to the posted canvas and return the new component list.
async fn edit_handler(Json(request): Json<EditRequest>) -> Result<Json<Canvas>, ApiError> {
    let canvas = Canvas::from_components(request.components)?;
    let edited = canvas.apply(&request.edit)?;
    Ok(Json(edited))
}

async fn defaults_handler(UrlPath(kind): UrlPath<String>) -> Result<Json<KindDefaults>, ApiError> {
    let kind: ComponentKind = kind.parse().map_err(|_| ApiError::UnknownKind(kind.clone()))?;

    Ok(Json(KindDefaults {
        kind,
        content: kind.default_content(),
        style: kind.default_style(),
    }))
}

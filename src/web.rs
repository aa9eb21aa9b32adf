use crate::{
    app::{App, AppError},
    playlist::{PlaylistDocument, PlaylistSummary},
    store::StoreError,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;

#[derive(Clone)]
struct SharedState {
    app: Arc<App>,
}

pub fn start_daemon(app: App) {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async { start_app(app).await });
}

async fn start_app(app: App) {
    let listen_addr = app.config.listen_addr.clone();

    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    let router = router(Arc::new(app));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await.unwrap();
    log::info!("listening on {listen_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

pub(crate) fn router(app: Arc<App>) -> Router {
    let www_dir = app.config.www_dir.clone();
    let shared_state = Arc::new(SharedState { app });

    Router::new()
        .route("/api/playlists", get(list_playlists))
        .route("/api/load-playlist", post(load_playlist))
        .route("/api/fetch-playlist", post(fetch_playlist))
        .fallback_service(tower_http::services::ServeDir::new(www_dir))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

// Wraps `AppError` so axum can turn it into the uniform
// `{success: false, message}` body.
#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            AppError::InvalidUrl => axum::http::StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotCached(_)) => axum::http::StatusCode::NOT_FOUND,
            AppError::Api(_) | AppError::Store(_) => {
                log::error!("{:?}", self.0);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(json!({ "success": false, "message": self.0.to_string() })),
        )
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, AppError>` (and
// anything convertible into it) inside handlers.
impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistUrlRequest {
    /// Absent and empty urls are both rejected as invalid.
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub success: bool,
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDataResponse {
    pub success: bool,
    pub playlist_data: PlaylistDocument,
    pub saved_file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn list_playlists(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<PlaylistsResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let playlists = app.list_saved()?;
        Ok(Json(PlaylistsResponse {
            success: true,
            playlists,
        }))
    })
}

async fn load_playlist(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<PlaylistUrlRequest>,
) -> Result<Json<PlaylistDataResponse>, HttpError> {
    log::debug!("payload: {payload:?}");

    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let (document, path) = app.load_cached(&payload.url)?;
        Ok(Json(PlaylistDataResponse {
            success: true,
            playlist_data: document,
            saved_file_path: path.display().to_string(),
            message: None,
        }))
    })
}

async fn fetch_playlist(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<PlaylistUrlRequest>,
) -> Result<Json<PlaylistDataResponse>, HttpError> {
    log::debug!("payload: {payload:?}");

    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let (document, path) = app.fetch_and_save(&payload.url)?;
        Ok(Json(PlaylistDataResponse {
            success: true,
            playlist_data: document,
            saved_file_path: path.display().to_string(),
            message: Some("Data fetched and saved successfully.".to_string()),
        }))
    })
}

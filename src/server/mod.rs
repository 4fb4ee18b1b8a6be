//! HTTP server for the emotion companion.
//!
//! ## Routes
//!
//! - `GET  /` redirects to the intake form
//! - `GET  /intake`, `POST /analyze` intake questionnaire and its summary
//! - `GET  /video` live session page
//! - `POST /analyze_emotion` webcam snapshot → face emotion
//! - `POST /analyze_voice` audio clip → transcript, emotion, suggestion
//! - `GET  /get_suggestion` suggestion from the recent emotion log
//! - `GET  /emotion_log`, `GET /transcript_log` HTML log views
//! - `GET  /api/emotion_log` log entries as JSON
//! - `GET|POST /getreport` session report page
//! - `GET  /health`
//!
//! The emotion log lives in [`AppState`] and is shared by all handlers.

mod error;
mod pages;
mod routes;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::detectors::{FaceDetector, Transcriber};
use crate::emotion_log::EmotionLog;

pub use error::ApiError;
pub use pages::SAMPLE_REPORT;
pub use routes::{VoiceAnalysis, NO_FACE_DETECTED};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub emotion_log: Arc<Mutex<EmotionLog>>,
    pub face_detector: Arc<dyn FaceDetector>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(face_detector: Arc<dyn FaceDetector>, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            emotion_log: Arc::new(Mutex::new(EmotionLog::new())),
            face_detector,
            transcriber,
        }
    }

    /// Lock the emotion log. Never hold the guard across an `.await`.
    pub fn lock_log(&self) -> Result<MutexGuard<'_, EmotionLog>, ApiError> {
        self.emotion_log
            .lock()
            .map_err(|_| ApiError::Internal("Emotion log is unavailable".to_string()))
    }
}

/// Build the router with all routes, body limit and CORS
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/intake", get(routes::intake_page))
        .route("/analyze", post(routes::analyze_intake))
        .route("/video", get(routes::video_page))
        .route("/analyze_emotion", post(routes::analyze_emotion))
        .route("/analyze_voice", post(routes::analyze_voice))
        .route("/get_suggestion", get(routes::get_suggestion))
        .route("/emotion_log", get(routes::emotion_log_page))
        .route("/transcript_log", get(routes::transcript_log_page))
        .route("/api/emotion_log", get(routes::emotion_log_json))
        .route(
            "/getreport",
            get(routes::report_form).post(routes::report_generate),
        )
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = build_router(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down..."),
                Err(e) => {
                    error!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .context("Server error")
}

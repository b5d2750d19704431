// HTTP API for the masal text-to-speech gateway

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use masal_spk::{SpeechError, SpeechSynthesizer, SynthesisRequest, VoiceSummary};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

// API state
#[derive(Clone)]
pub struct ApiState {
    pub synthesizer: Arc<SpeechSynthesizer>,
}

impl ApiState {
    pub fn new(synthesizer: Arc<SpeechSynthesizer>) -> Self {
        Self { synthesizer }
    }
}

/// Create HTTP router with all API routes
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/docs", get(docs_handler))
        .route("/voices", get(list_voices_handler))
        .route("/tts", post(tts_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub status: String,
    pub docs: String,
    pub voices: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Errors surfaced by handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body could not be parsed into a request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body exceeded the extractor's size limit
    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidBody(rejection.body_text())
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::InvalidBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Speech(e) if !e.is_client_error() => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Speech(SpeechError::UnknownVoice(_)) => (StatusCode::BAD_REQUEST, "UNKNOWN_VOICE"),
            ApiError::Speech(SpeechError::IncompatibleParameters(_)) => {
                (StatusCode::BAD_REQUEST, "INCOMPATIBLE_PARAMETERS")
            }
            ApiError::Speech(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Model, storage and config failures are logged in full but never echoed to clients
        let message = if status.is_server_error() {
            error!("Speech synthesis failed: {}", self);
            "Speech synthesis failed".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        status: "ok".to_string(),
        docs: "/docs".to_string(),
        voices: "/voices".to_string(),
    })
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Machine readable description of the routes
async fn docs_handler(State(state): State<ApiState>) -> Json<Value> {
    let registry = state.synthesizer.registry();
    Json(json!({
        "title": "masal TTS",
        "version": env!("CARGO_PKG_VERSION"),
        "routes": [
            { "method": "GET", "path": "/", "description": "Service status and links" },
            { "method": "GET", "path": "/health", "description": "Liveness check" },
            { "method": "GET", "path": "/voices", "description": "List voice presets as {id, name}" },
            {
                "method": "POST",
                "path": "/tts",
                "description": "Synthesize text into a WAV file named speech.wav",
                "request": {
                    "text": "string, required, at least 1 character",
                    "voice_id": format!("string, optional, default \"{}\"", registry.default_voice()),
                    "cfg_weight": "number, optional, 0.0..=2.0",
                    "exaggeration": "number, optional, 0.0..=2.0"
                },
                "response": "audio/wav"
            }
        ],
        "voices": registry.list_all(),
    }))
}

async fn list_voices_handler(State(state): State<ApiState>) -> Json<Vec<VoiceSummary>> {
    Json(state.synthesizer.list_voices())
}

async fn tts_handler(
    State(state): State<ApiState>,
    payload: Result<Json<SynthesisRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    let speech = state.synthesizer.synthesize(&request).await?;
    let audio = tokio::fs::read(&speech.path).await.map_err(SpeechError::Io)?;

    info!(
        "Serving {} ({} bytes, voice {})",
        speech.file_name,
        audio.len(),
        speech.voice_id
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", speech.download_name),
        )
        .body(Body::from(Bytes::from(audio)))
        .map_err(|e| ApiError::Speech(SpeechError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))))
}

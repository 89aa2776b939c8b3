//! HTTP routes over the pipeline.

use crate::encode_wav;
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Json},
    routing::{get, post},
};
use base64::Engine;
use scrivano_core::{GenerationRequest, RequestId};
use scrivano_error::ScrivanoErrorKind;
use scrivano_pipeline::{AudioFetch, Intake, Retrieval, Suggest};
use serde::Deserialize;
use serde_json::json;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    intake: Intake,
    retrieval: Retrieval,
    suggest: Suggest,
}

impl AppState {
    /// Bundle the pipeline handles for the router.
    pub fn new(intake: Intake, retrieval: Retrieval, suggest: Suggest) -> Self {
        Self {
            intake,
            retrieval,
            suggest,
        }
    }
}

/// Build the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate-content", post(generate_content))
        .route("/api/suggest-blog-metadata", post(suggest_metadata))
        .route("/api/content/:id", get(get_content))
        .route("/api/audio/:id", get(get_audio))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Accept a generation request: 202 with the polling id, 400 on validation
/// failure, 503 when the pipeline is saturated.
///
/// Body problems (malformed JSON, unknown tone or style values) surface as
/// the same 400 shape as semantic validation failures.
#[tracing::instrument(skip(state, payload))]
async fn generate_content(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return validation_failed(&rejection.body_text()),
    };

    match state.intake.submit(request).await {
        Ok(ack) => (StatusCode::ACCEPTED, Json(json!(ack))),
        Err(e) => match e.kind() {
            ScrivanoErrorKind::Validation(v) => validation_failed(&v.to_string()),
            ScrivanoErrorKind::Pipeline(p) => {
                tracing::warn!(error = %p, "Pipeline unavailable for intake");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "error": "Server Busy",
                        "message": "The pipeline cannot accept requests right now. Retry shortly.",
                    })),
                )
            }
            _ => {
                tracing::error!(error = %e, "Intake failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal Error",
                        "message": "Failed to accept the request",
                    })),
                )
            }
        },
    }
}

#[derive(Debug, Deserialize)]
struct SuggestBody {
    topic: String,
}

/// Suggest keywords, audience, and context for a bare topic.
#[tracing::instrument(skip(state, payload))]
async fn suggest_metadata(
    State(state): State<AppState>,
    payload: Result<Json<SuggestBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return validation_failed(&rejection.body_text()),
    };

    match state.suggest.suggest(&body.topic).await {
        Ok(suggestion) => (StatusCode::OK, Json(json!(suggestion))),
        Err(e) => match e.kind() {
            ScrivanoErrorKind::Validation(v) => validation_failed(&v.to_string()),
            _ => {
                tracing::error!(error = %e, "Metadata suggestion failed");
                internal_error()
            }
        },
    }
}

/// Fetch the generated article (with audio merged in once available).
#[tracing::instrument(skip(state))]
async fn get_content(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    let Some(id) = RequestId::parse(&id) else {
        return not_found(&id);
    };

    match state.retrieval.fetch_content(&id).await {
        Ok(Some(payload)) => (StatusCode::OK, Json(payload)),
        Ok(None) => not_found(&id.to_string()),
        Err(e) => {
            tracing::error!(id = %id, error = %e, "Content retrieval failed");
            internal_error()
        }
    }
}

/// Download the synthesized audio as a WAV file.
#[tracing::instrument(skip(state))]
async fn get_audio(State(state): State<AppState>, Path(id): Path<String>) -> axum::response::Response {
    let Some(request_id) = RequestId::parse(&id) else {
        return audio_not_found(&id).into_response();
    };

    let fetch = match state.retrieval.fetch_audio(&request_id).await {
        Ok(fetch) => fetch,
        Err(e) => {
            tracing::error!(id = %id, error = %e, "Audio retrieval failed");
            return internal_error().into_response();
        }
    };

    match fetch {
        AudioFetch::Absent => audio_not_found(&id).into_response(),
        AudioFetch::Failed(failure) => {
            tracing::error!(id = %id, error = %failure.error, "Audio generation failed for this request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "TTS Generation Failed",
                    "message": format!("Audio generation failed: {}", failure.error),
                })),
            )
                .into_response()
        }
        AudioFetch::Ready(clip) => {
            let pcm = match base64::engine::general_purpose::STANDARD.decode(&clip.audio_data) {
                Ok(pcm) => pcm,
                Err(e) => {
                    tracing::error!(id = %id, error = %e, "Stored audio payload undecodable");
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "error": "Invalid Data",
                            "message": "Audio data is missing or corrupted.",
                        })),
                    )
                        .into_response();
                }
            };

            let wav = encode_wav(&pcm, clip.sample_rate, clip.channels);
            tracing::info!(
                id = %id,
                pcm_size = pcm.len(),
                wav_size = wav.len(),
                "Audio prepared for download"
            );

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
            if let Ok(value) =
                HeaderValue::from_str(&format!("attachment; filename=\"blog-audio-{}.wav\"", id))
            {
                headers.insert(header::CONTENT_DISPOSITION, value);
            }
            headers.insert("X-Audio-Format", HeaderValue::from_static("wav"));
            if let Ok(value) = HeaderValue::from_str(&clip.sample_rate.to_string()) {
                headers.insert("X-Audio-Sample-Rate", value);
            }
            if let Ok(value) = HeaderValue::from_str(&clip.channels.to_string()) {
                headers.insert("X-Audio-Channels", value);
            }
            if let Ok(value) = HeaderValue::from_str(&clip.article_title) {
                headers.insert("X-Article-Title", value);
            }

            (StatusCode::OK, headers, wav).into_response()
        }
    }
}

fn validation_failed(message: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Validation Failed",
            "message": message,
        })),
    )
}

fn not_found(id: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!(
                "Content not found for request ID: {}. Generation may still be in progress.",
                id
            ),
        })),
    )
}

fn audio_not_found(id: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "message": format!(
                "No TTS audio found for request ID: {}. The audio may still be generating, or the ID is invalid.",
                id
            ),
        })),
    )
}

fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal Error",
            "message": "Failed to read stored state",
        })),
    )
}

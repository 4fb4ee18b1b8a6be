//! Route handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

use super::error::ApiError;
use super::pages;
use super::AppState;
use crate::activity_log;
use crate::detectors::decode_image_payload;
use crate::emotion::{infer_emotion, Emotion};
use crate::emotion_log::LogEntry;
use crate::intake::{self, IntakeForm};
use crate::suggestion::{suggest_from_log, suggest_from_text};

/// Reply when the snapshot contains no face
pub const NO_FACE_DETECTED: &str = "No face detected";

const NO_AUDIO_PROVIDED: &str = "No audio file provided";
const DEFAULT_AUDIO_FILENAME: &str = "audio.wav";

pub async fn root() -> Redirect {
    Redirect::to("/intake")
}

pub async fn intake_page() -> Html<String> {
    Html(pages::intake_page())
}

pub async fn video_page() -> Html<String> {
    Html(pages::video_page())
}

/// POST /analyze - intake form submission
pub async fn analyze_intake(Form(form): Form<IntakeForm>) -> Html<String> {
    let summary = intake::summarize(&form);
    activity_log::log_intake_analyzed(
        form.therapy == "yes",
        intake::is_known_animal(&form.animal),
    );
    Html(pages::analysis_page(&summary))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeEmotionRequest {
    #[serde(default)]
    pub image: Option<String>,
}

/// POST /analyze_emotion - webcam snapshot
pub async fn analyze_emotion(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeEmotionRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    let payload = req
        .image
        .ok_or_else(|| ApiError::BadRequest("No image provided".to_string()))?;
    let image = decode_image_payload(&payload)?;

    let detected = state.face_detector.detect(&image).await.map_err(|e| {
        activity_log::log_detector_error("face", &e.to_string());
        ApiError::from(e)
    })?;

    match detected {
        Some(face) => {
            activity_log::log_face_detection(image.len(), Some(&face.label), Some(face.confidence));
            state
                .lock_log()?
                .append_face(Emotion::from_label(&face.label), Some(face.confidence));
            Ok(Json(json!({ "emotion": face.label })))
        }
        None => {
            activity_log::log_face_detection(image.len(), None, None);
            Ok(Json(json!({ "emotion": NO_FACE_DETECTED })))
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceAnalysis {
    pub transcript: String,
    pub emotion: Emotion,
    pub suggestion: String,
}

/// POST /analyze_voice - multipart upload with an `audio` file field
pub async fn analyze_voice(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VoiceAnalysis>, ApiError> {
    // A body that is not multipart cannot carry the audio field
    let mut multipart = multipart.map_err(|e| {
        debug!("Rejected voice upload: {}", e);
        ApiError::BadRequest(NO_AUDIO_PROVIDED.to_string())
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_AUDIO_FILENAME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read audio upload: {}", e)))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, audio) =
        upload.ok_or_else(|| ApiError::BadRequest(NO_AUDIO_PROVIDED.to_string()))?;
    let audio_bytes = audio.len();
    debug!("Received {} byte audio upload", audio_bytes);

    let started = Instant::now();
    let transcript = state
        .transcriber
        .transcribe(audio, &filename)
        .await
        .map_err(|e| {
            activity_log::log_detector_error("transcription", &e.to_string());
            ApiError::from(e)
        })?;

    let text = transcript.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Could not understand audio".to_string()));
    }

    let emotion = infer_emotion(text);
    let suggestion = suggest_from_text(text);
    activity_log::log_voice_analysis(
        audio_bytes,
        text.chars().count(),
        emotion.as_str(),
        started.elapsed().as_millis() as u64,
    );

    state.lock_log()?.append_voice(emotion.clone(), text.to_string());

    Ok(Json(VoiceAnalysis {
        transcript: text.to_string(),
        emotion,
        suggestion: suggestion.to_string(),
    }))
}

/// GET /get_suggestion - suggestion from the recent log window
pub async fn get_suggestion(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let suggestion = suggest_from_log(&*state.lock_log()?);
    Ok(Json(json!({ "suggestion": suggestion })))
}

/// GET /emotion_log - every entry as HTML
pub async fn emotion_log_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let lines: Vec<String> = state
        .lock_log()?
        .entries()
        .iter()
        .map(LogEntry::display_line)
        .collect();
    Ok(Html(pages::log_list_page(
        "Emotion Log",
        "Logged Emotions During Video Session",
        &lines,
    )))
}

/// GET /transcript_log - voice entries only
pub async fn transcript_log_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let lines: Vec<String> = state
        .lock_log()?
        .voice_entries()
        .map(LogEntry::display_line)
        .collect();
    Ok(Html(pages::log_list_page(
        "Transcript Log",
        "Transcript Log (Voice to Text)",
        &lines,
    )))
}

/// GET /api/emotion_log - entries as JSON
pub async fn emotion_log_json(State(state): State<AppState>) -> Result<Json<Vec<LogEntry>>, ApiError> {
    Ok(Json(state.lock_log()?.entries().to_vec()))
}

pub async fn report_form() -> Html<String> {
    Html(pages::report_page(None))
}

pub async fn report_generate() -> Html<String> {
    Html(pages::report_page(Some(pages::SAMPLE_REPORT)))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let entries = state.emotion_log.lock().map(|log| log.len()).ok();
    Json(json!({
        "healthy": entries.is_some(),
        "entries": entries.unwrap_or(0),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

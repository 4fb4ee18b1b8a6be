//! Activity Logging Module
//!
//! Structured logging for auditing and debugging.
//! IMPORTANT: this module must never log what the user said or wrote.
//!
//! What IS logged:
//! - Emotion labels, detector confidences
//! - Payload sizes and counts
//! - Durations and outcomes (success/failure)
//! - Error messages
//!
//! What is NOT logged:
//! - Transcript text
//! - Intake answers
//! - Image or audio content

use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Guard that must be held for the duration of the application
/// to ensure logs are flushed before exit
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn console_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the activity logging system
///
/// Sets up dual logging:
/// - Console output (human-readable, filtered by `RUST_LOG`)
/// - File output (JSON, daily rotation) under `~/.emotioncompanion/logs/`
///
/// Falls back to console-only output if the log directory is unusable.
pub fn init_logging(default_level: &str) {
    let log_dir = match prepare_log_directory() {
        Ok(dir) => dir,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(console_filter(default_level))
                .init();
            warn!("File logging disabled: {}", e);
            return;
        }
    };

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "activity.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    LOG_GUARD.set(guard).ok();

    let file_layer = fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_filter(console_filter(default_level));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    info!(
        event = "logging_initialized",
        log_dir = %log_dir.display(),
        "Activity logging system initialized"
    );
}

fn prepare_log_directory() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let home = dirs::home_dir().ok_or("Could not determine home directory")?;
    let dir = home.join(".emotioncompanion").join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

// ============================================================================
// Service Events
// ============================================================================

/// Log server start
pub fn log_server_start(addr: &str, face_enabled: bool, voice_enabled: bool) {
    info!(
        event = "server_start",
        addr = %addr,
        face_enabled = face_enabled,
        voice_enabled = voice_enabled,
        "Emotion companion listening"
    );
}

/// Log a face snapshot analysis. `label` is `None` when no face was found.
pub fn log_face_detection(image_bytes: usize, label: Option<&str>, confidence: Option<f32>) {
    info!(
        event = "face_detection",
        image_bytes = image_bytes,
        face_found = label.is_some(),
        emotion = label,
        confidence = confidence,
        "Face snapshot analyzed"
    );
}

/// Log a voice clip analysis (the transcript itself is not logged)
pub fn log_voice_analysis(audio_bytes: usize, transcript_chars: usize, emotion: &str, duration_ms: u64) {
    info!(
        event = "voice_analysis",
        audio_bytes = audio_bytes,
        transcript_chars = transcript_chars,
        emotion = %emotion,
        duration_ms = duration_ms,
        "Voice clip analyzed"
    );
}

/// Log an intake form analysis (answers are not logged)
pub fn log_intake_analyzed(therapy_before: bool, animal_known: bool) {
    info!(
        event = "intake_analyzed",
        therapy_before = therapy_before,
        animal_known = animal_known,
        "Intake form analyzed"
    );
}

/// Log a failure from an external detector
pub fn log_detector_error(detector: &str, error_message: &str) {
    error!(
        event = "detector_error",
        detector = %detector,
        error = %error_message,
        "External detector failed"
    );
}

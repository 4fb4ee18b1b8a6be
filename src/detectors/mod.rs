//! Clients for the external face and speech services.
//!
//! Both collaborators sit behind traits so the HTTP layer can be exercised
//! with stubs. An empty URL in the config selects a disabled stand-in that
//! reports "not configured" on every call.

mod face;
mod transcription;

#[cfg(test)]
mod stub_server;

use std::sync::Arc;
use std::time::Duration;

pub use face::{
    decode_image_payload, DisabledFaceDetector, FaceDetectionError, FaceDetector, FaceEmotion,
    HttpFaceDetector, ImageDecodeError,
};
pub use transcription::{DisabledTranscriber, SttServerClient, Transcriber, TranscriptionError};

use crate::config::Config;

/// Build the face detector selected by the config
pub fn face_detector_from_config(
    config: &Config,
) -> Result<Arc<dyn FaceDetector>, FaceDetectionError> {
    if config.face_detector_url.trim().is_empty() {
        tracing::warn!("No face detector URL configured; face analysis is disabled");
        return Ok(Arc::new(DisabledFaceDetector));
    }
    let detector = HttpFaceDetector::new(
        config.face_detector_url.trim(),
        Duration::from_secs(config.face_detector_timeout_secs),
    )?;
    Ok(Arc::new(detector))
}

/// Build the transcriber selected by the config
pub fn transcriber_from_config(config: &Config) -> Result<Arc<dyn Transcriber>, TranscriptionError> {
    if config.stt_server_url.trim().is_empty() {
        tracing::warn!("No STT server URL configured; voice analysis is disabled");
        return Ok(Arc::new(DisabledTranscriber));
    }
    let client = SttServerClient::new(
        config.stt_server_url.trim(),
        &config.stt_model,
        config.stt_api_key.clone(),
        Duration::from_secs(config.stt_timeout_secs),
    )?;
    Ok(Arc::new(client))
}

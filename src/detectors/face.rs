//! Face emotion detection via an external HTTP service.
//!
//! The service receives a base64 image and answers with the top emotion, or
//! a null emotion when no face is found.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

const DATA_URL_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Errors that can occur during face detection
#[derive(Debug, Error)]
pub enum FaceDetectionError {
    #[error("Face detector is not configured")]
    NotConfigured,

    #[error("Invalid face detector URL: {0}")]
    InvalidUrl(String),

    #[error("Face detector request failed: {0}")]
    Request(String),

    #[error("Face detector returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid face detector response: {0}")]
    InvalidResponse(String),
}

/// Errors from decoding a snapshot payload
#[derive(Debug, Error, PartialEq)]
pub enum ImageDecodeError {
    #[error("Image payload is empty")]
    Empty,

    #[error("Image payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Top emotion reported for a detected face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceEmotion {
    /// Detector-native label, e.g. "happy" or "surprise"
    pub label: String,
    pub confidence: f32,
}

#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Detect the dominant emotion in an encoded image.
    /// `Ok(None)` means no face was found.
    async fn detect(&self, image: &[u8]) -> Result<Option<FaceEmotion>, FaceDetectionError>;
}

/// Decode a webcam snapshot sent as a data URL (`data:image/png;base64,...`)
/// or as bare base64.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let payload = payload.trim();
    let encoded = match payload.strip_prefix(DATA_URL_PREFIX) {
        // The media type must be non-empty
        Some(rest) => match rest.rfind(BASE64_MARKER) {
            Some(idx) if idx > 0 => &rest[idx + BASE64_MARKER.len()..],
            _ => payload,
        },
        None => payload,
    };

    if encoded.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    BASE64
        .decode(encoded)
        .map_err(|e| ImageDecodeError::InvalidBase64(e.to_string()))
}

#[derive(Serialize)]
struct DetectRequest {
    image: String,
}

#[derive(Deserialize)]
struct DetectResponse {
    emotion: Option<String>,
    confidence: Option<f32>,
}

impl DetectResponse {
    fn into_face_emotion(self) -> Option<FaceEmotion> {
        let label = self.emotion?.trim().to_string();
        if label.is_empty() {
            return None;
        }
        Some(FaceEmotion {
            label,
            confidence: self.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
        })
    }
}

/// Face detector backed by a remote HTTP endpoint
#[derive(Debug)]
pub struct HttpFaceDetector {
    client: reqwest::Client,
    url: String,
}

impl HttpFaceDetector {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FaceDetectionError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| FaceDetectionError::InvalidUrl(format!("'{}': {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FaceDetectionError::InvalidUrl(format!(
                "scheme must be http or https, got: {}",
                parsed.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FaceDetectionError::Request(format!("Failed to create HTTP client: {}", e)))?;

        info!("HttpFaceDetector created for {}", url);

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl FaceDetector for HttpFaceDetector {
    async fn detect(&self, image: &[u8]) -> Result<Option<FaceEmotion>, FaceDetectionError> {
        debug!("Sending {} byte image to face detector", image.len());

        let request = DetectRequest {
            image: BASE64.encode(image),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| FaceDetectionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let truncated: String = body.chars().take(200).collect();
            return Err(FaceDetectionError::Status {
                status: status.as_u16(),
                body: truncated,
            });
        }

        let parsed: DetectResponse = response
            .json()
            .await
            .map_err(|e| FaceDetectionError::InvalidResponse(e.to_string()))?;

        Ok(parsed.into_face_emotion())
    }
}

/// Placeholder used when no detector URL is configured
pub struct DisabledFaceDetector;

#[async_trait]
impl FaceDetector for DisabledFaceDetector {
    async fn detect(&self, _image: &[u8]) -> Result<Option<FaceEmotion>, FaceDetectionError> {
        Err(FaceDetectionError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::stub_server;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_image_payload("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");

        let jpeg = decode_image_payload("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(jpeg, b"hello");
    }

    #[test]
    fn test_decode_bare_base64() {
        assert_eq!(decode_image_payload("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode_image_payload("  aGVsbG8=\n").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_image_payload(""), Err(ImageDecodeError::Empty));
        assert_eq!(
            decode_image_payload("data:image/png;base64,"),
            Err(ImageDecodeError::Empty)
        );
        assert!(matches!(
            decode_image_payload("not base64!!"),
            Err(ImageDecodeError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_response_mapping() {
        let found: DetectResponse =
            serde_json::from_value(serde_json::json!({"emotion": "happy", "confidence": 0.5}))
                .unwrap();
        assert_eq!(
            found.into_face_emotion(),
            Some(FaceEmotion {
                label: "happy".to_string(),
                confidence: 0.5
            })
        );

        let none: DetectResponse =
            serde_json::from_value(serde_json::json!({"emotion": null})).unwrap();
        assert_eq!(none.into_face_emotion(), None);

        let blank: DetectResponse =
            serde_json::from_value(serde_json::json!({"emotion": " ", "confidence": 0.4}))
                .unwrap();
        assert_eq!(blank.into_face_emotion(), None);
    }

    #[test]
    fn test_new_rejects_bad_urls() {
        assert!(HttpFaceDetector::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpFaceDetector::new("ftp://host/detect", Duration::from_secs(1)).is_err());
        assert!(HttpFaceDetector::new("http://localhost:5001/detect", Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_detect_over_http() {
        let (url, hits) = stub_server::spawn(
            "/detect",
            vec![
                (200, json!({"emotion": "happy", "confidence": 0.5})),
                (200, json!({"emotion": null})),
            ],
        )
        .await;
        let detector =
            HttpFaceDetector::new(&format!("{}/detect", url), Duration::from_secs(5)).unwrap();

        assert_eq!(
            detector.detect(b"img").await.unwrap(),
            Some(FaceEmotion {
                label: "happy".to_string(),
                confidence: 0.5
            })
        );
        assert_eq!(detector.detect(b"img").await.unwrap(), None);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let (url, hits) =
            stub_server::spawn("/detect", vec![(500, json!({"error": "model crashed"}))]).await;
        let detector =
            HttpFaceDetector::new(&format!("{}/detect", url), Duration::from_secs(5)).unwrap();

        match detector.detect(b"img").await {
            Err(FaceDetectionError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("model crashed"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_detector() {
        let result = DisabledFaceDetector.detect(b"img").await;
        assert!(matches!(result, Err(FaceDetectionError::NotConfigured)));
    }
}

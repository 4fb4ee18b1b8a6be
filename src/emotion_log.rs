//! Append-only log of face and voice detection events.
//!
//! Entries are only ever pushed to the end, so insertion order is also time
//! order. Readers that want "the latest" scan from the back.

use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

use crate::emotion::{Emotion, Source};

/// Timestamp layout used in the log view
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single detection event
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Local>,
    pub source: Source,
    pub emotion: Emotion,
    /// Transcript text (voice entries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Detector confidence (face entries only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl LogEntry {
    /// Render as a log line, e.g. `2024-05-01 10:00:00 - Voice: sad - "hi"`
    pub fn display_line(&self) -> String {
        let time = self.timestamp.format(DISPLAY_TIME_FORMAT);
        match &self.transcript {
            Some(text) => format!(
                "{} - {}: {} - \"{}\"",
                time,
                self.source.display_name(),
                self.emotion,
                text
            ),
            None => format!("{} - {}: {}", time, self.source.display_name(), self.emotion),
        }
    }
}

/// In-memory emotion log owned by the application state
#[derive(Debug, Default)]
pub struct EmotionLog {
    entries: Vec<LogEntry>,
}

impl EmotionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a face detection
    pub fn append_face(&mut self, emotion: Emotion, confidence: Option<f32>) -> &LogEntry {
        self.append(Source::Face, emotion, None, confidence)
    }

    /// Record a voice analysis together with its transcript
    pub fn append_voice(&mut self, emotion: Emotion, transcript: String) -> &LogEntry {
        self.append(Source::Voice, emotion, Some(transcript), None)
    }

    fn append(
        &mut self,
        source: Source,
        emotion: Emotion,
        transcript: Option<String>,
        confidence: Option<f32>,
    ) -> &LogEntry {
        // Never let a wall-clock step backwards break time ordering
        let now = Local::now();
        let timestamp = match self.entries.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };

        self.entries.push(LogEntry {
            id: Uuid::new_v4(),
            timestamp,
            source,
            emotion,
            transcript,
            confidence,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `n` entries (fewer if the log is shorter), oldest first
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Voice entries only, in insertion order
    pub fn voice_entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(|e| e.source == Source::Voice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Most recent emotion from `source` within `window`
pub fn latest_from(window: &[LogEntry], source: Source) -> Option<&Emotion> {
    window
        .iter()
        .rev()
        .find(|e| e.source == source)
        .map(|e| &e.emotion)
}

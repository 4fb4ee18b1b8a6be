//! Emotion labels and detection sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion label attached to a detection event.
///
/// The six named variants form the closed set produced by the text
/// classifier. Face detectors report their own vocabulary (`fear`,
/// `surprise`, `disgust`, ...) which is kept verbatim in [`Emotion::Other`]
/// rather than normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Angry,
    Sad,
    Happy,
    Anxious,
    Calm,
    Neutral,
    Other(String),
}

impl Emotion {
    /// Map a label string onto the closed set. Matching is exact, so
    /// `"Sad"` stays a detector-native label.
    pub fn from_label(label: &str) -> Self {
        match label {
            "angry" => Self::Angry,
            "sad" => Self::Sad,
            "happy" => Self::Happy,
            "anxious" => Self::Anxious,
            "calm" => Self::Calm,
            "neutral" => Self::Neutral,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Anxious => "anxious",
            Self::Calm => "calm",
            Self::Neutral => "neutral",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Emotion {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        emotion.as_str().to_string()
    }
}

/// Where a detection event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Face,
    Voice,
}

impl Source {
    /// Name as shown in the log view ("Face" / "Voice")
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Face => "Face",
            Self::Voice => "Voice",
        }
    }
}

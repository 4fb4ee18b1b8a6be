//! Emotion labels and the text-based classifier.
//!
//! Face emotions come from an external detector (see [`crate::detectors`]);
//! voice emotions are inferred here from the transcript using a fixed
//! keyword priority table.

mod classifier;
mod label;

pub use classifier::{infer_emotion, EMOTION_KEYWORDS};
pub use label::{Emotion, Source};

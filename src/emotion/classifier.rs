//! Keyword-based emotion classifier for transcribed speech.
//!
//! The classifier walks a fixed priority table and returns the label of the
//! first row whose keywords appear anywhere in the lower-cased text. Matching
//! is plain substring containment, so "madam" hits the `mad` keyword.

use super::Emotion;

/// Priority table: earlier rows win when several match
pub const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (Emotion::Angry, &["angry", "mad", "furious", "annoyed"]),
    (Emotion::Sad, &["sad", "down", "upset", "depressed"]),
    (Emotion::Happy, &["happy", "joyful", "excited", "glad"]),
    (Emotion::Anxious, &["anxious", "nervous", "worried", "stressed"]),
    (Emotion::Calm, &["okay", "fine", "calm"]),
];

/// Infer an emotion label from free text. Falls back to `Neutral`.
pub fn infer_emotion(text: &str) -> Emotion {
    let text = text.to_lowercase();

    EMOTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(emotion, _)| emotion.clone())
        .unwrap_or(Emotion::Neutral)
}

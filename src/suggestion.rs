//! Canned conversational suggestions.
//!
//! Two independent rule sets live here:
//! - [`suggest_from_text`] reacts to phrases in a single transcript.
//! - [`suggest_from_log`] looks at the most recent face and voice emotions in
//!   the session log.
//!
//! The text rules use their own phrase groups and do not go through
//! [`crate::emotion::infer_emotion`], so the two can disagree on the same input.

use crate::emotion::{Emotion, Source};
use crate::emotion_log::{latest_from, EmotionLog};

/// Number of trailing log entries considered by [`suggest_from_log`]
pub const RECENT_WINDOW: usize = 5;

pub const NO_EMOTIONS_YET: &str = "No emotions recorded yet. Please start analyzing.";

const TEXT_FALLBACK: &str = "Thank you for sharing. Feel free to talk more—I’m here to listen.";
const LOG_FALLBACK: &str = "Keep going. Feel free to express anything on your mind.";

/// Phrase groups for transcript suggestions, checked in order
pub const TEXT_SUGGESTIONS: &[(&[&str], &str)] = &[
    (
        &["anxious", "overwhelmed"],
        "It sounds like you're feeling anxious. Would breathing exercises help right now?",
    ),
    (
        &["lonely", "alone"],
        "You mentioned feeling lonely. Let’s explore ways to feel more connected.",
    ),
    (
        &["angry", "frustrated"],
        "Frustration is valid. Want to talk about what’s triggering it?",
    ),
    (
        &["happy", "excited"],
        "You seem happy! That’s great. Want to share what’s going well?",
    ),
];

/// Emotion priority for log suggestions, checked in order
pub const LOG_SUGGESTIONS: &[(Emotion, &str)] = &[
    (
        Emotion::Sad,
        "You seem down. Want to talk about what’s bothering you?",
    ),
    (
        Emotion::Angry,
        "It might help to slow down and take a deep breath. I'm here to listen.",
    ),
    (Emotion::Happy, "You seem happy! Let’s build on that feeling."),
    (
        Emotion::Anxious,
        "You seem anxious. A few deep breaths or journaling might help.",
    ),
];

/// Pick a suggestion from the phrases in a transcript
pub fn suggest_from_text(text: &str) -> &'static str {
    let text = text.to_lowercase();

    TEXT_SUGGESTIONS
        .iter()
        .find(|(phrases, _)| phrases.iter().any(|p| text.contains(p)))
        .map(|(_, suggestion)| *suggestion)
        .unwrap_or(TEXT_FALLBACK)
}

/// Pick a suggestion from the last [`RECENT_WINDOW`] log entries.
///
/// Face and voice are OR'd per emotion: the first emotion in priority order
/// that either source shows wins, regardless of which source it came from.
pub fn suggest_from_log(log: &EmotionLog) -> &'static str {
    if log.is_empty() {
        return NO_EMOTIONS_YET;
    }

    let window = log.recent(RECENT_WINDOW);
    let face = latest_from(window, Source::Face);
    let voice = latest_from(window, Source::Voice);

    LOG_SUGGESTIONS
        .iter()
        .find(|(emotion, _)| face == Some(emotion) || voice == Some(emotion))
        .map(|(_, suggestion)| *suggestion)
        .unwrap_or(LOG_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_anxious_group() {
        assert_eq!(
            suggest_from_text("I feel anxious and overwhelmed"),
            TEXT_SUGGESTIONS[0].1
        );
    }

    #[test]
    fn test_text_priority_and_case() {
        // anxious group is checked before the angry group
        assert_eq!(
            suggest_from_text("ANGRY and Overwhelmed"),
            TEXT_SUGGESTIONS[0].1
        );
        assert_eq!(suggest_from_text("home alone, happy"), TEXT_SUGGESTIONS[1].1);
        assert_eq!(suggest_from_text("so frustrated"), TEXT_SUGGESTIONS[2].1);
        assert_eq!(suggest_from_text("I'm excited!"), TEXT_SUGGESTIONS[3].1);
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(suggest_from_text("just a regular day"), TEXT_FALLBACK);
        assert_eq!(suggest_from_text(""), TEXT_FALLBACK);
    }

    #[test]
    fn test_text_and_classifier_can_disagree() {
        // "nervous" is an anxious keyword for the classifier but not a
        // suggestion phrase
        let text = "a little nervous";
        assert_eq!(crate::emotion::infer_emotion(text), Emotion::Anxious);
        assert_eq!(suggest_from_text(text), TEXT_FALLBACK);
    }

    #[test]
    fn test_log_empty() {
        assert_eq!(suggest_from_log(&EmotionLog::new()), NO_EMOTIONS_YET);
    }

    #[test]
    fn test_log_sad_beats_happy() {
        let mut log = EmotionLog::new();
        log.append_face(Emotion::Sad, Some(0.7));
        log.append_voice(Emotion::Happy, "so happy today".to_string());

        assert_eq!(suggest_from_log(&log), LOG_SUGGESTIONS[0].1);
    }

    #[test]
    fn test_log_uses_latest_per_source() {
        let mut log = EmotionLog::new();
        log.append_face(Emotion::Sad, None);
        log.append_face(Emotion::Happy, None);

        // The earlier sad face is superseded by the later happy one
        assert_eq!(suggest_from_log(&log), LOG_SUGGESTIONS[2].1);
    }

    #[test]
    fn test_log_window_is_last_five() {
        let mut log = EmotionLog::new();
        log.append_voice(Emotion::Angry, "so mad".to_string());
        for _ in 0..RECENT_WINDOW {
            log.append_face(Emotion::Anxious, None);
        }

        // The angry voice entry has fallen out of the window
        assert_eq!(suggest_from_log(&log), LOG_SUGGESTIONS[3].1);
    }

    #[test]
    fn test_log_unmatched_emotions_fall_back() {
        let mut log = EmotionLog::new();
        log.append_face(Emotion::Other("surprise".to_string()), Some(0.6));
        log.append_voice(Emotion::Calm, "I'm fine".to_string());

        assert_eq!(suggest_from_log(&log), LOG_FALLBACK);
    }

    #[test]
    fn test_log_is_idempotent() {
        let mut log = EmotionLog::new();
        log.append_voice(Emotion::Angry, "furious".to_string());
        let first = suggest_from_log(&log);
        assert_eq!(first, suggest_from_log(&log));
        assert_eq!(log.len(), 1);
    }
}

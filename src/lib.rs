//! Emotion companion: reads face and voice emotion during a session and
//! replies with canned conversational suggestions.

pub mod activity_log;
pub mod config;
pub mod detectors;
pub mod emotion;
pub mod emotion_log;
pub mod intake;
pub mod server;
pub mod suggestion;

pub use config::Config;
pub use emotion::{infer_emotion, Emotion, Source};
pub use emotion_log::{EmotionLog, LogEntry};
pub use intake::{summarize, IntakeForm};
pub use server::{build_router, AppState};
pub use suggestion::{suggest_from_log, suggest_from_text};

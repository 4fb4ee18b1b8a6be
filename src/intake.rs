//! Intake questionnaire summary.

use serde::{Deserialize, Serialize};

/// Symbolic traits for the "favourite animal" question
const ANIMAL_TRAITS: &[(&str, &str)] = &[
    ("lion", "bold and dominant"),
    ("dolphin", "empathetic and joyful"),
    ("owl", "wise and observant"),
    ("dog", "loyal and grounded"),
    ("cat", "independent and curious"),
    ("elephant", "deeply emotional and thoughtful"),
];

const UNKNOWN_ANIMAL_TRAIT: &str = "unique";

/// Answers from the intake form. Missing fields take the form's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeForm {
    #[serde(default = "default_mood")]
    pub mood: String,
    #[serde(default = "default_therapy")]
    pub therapy: String,
    #[serde(default)]
    pub animal: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub struggles: String,
    #[serde(default)]
    pub symptoms: String,
}

fn default_mood() -> String {
    "unknown".to_string()
}

fn default_therapy() -> String {
    "no".to_string()
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self {
            mood: default_mood(),
            therapy: default_therapy(),
            animal: String::new(),
            reason: String::new(),
            struggles: String::new(),
            symptoms: String::new(),
        }
    }
}

/// Trait phrase for an animal (case-insensitive), "unique" if unknown
pub fn animal_trait(animal: &str) -> &'static str {
    let animal = animal.to_lowercase();
    ANIMAL_TRAITS
        .iter()
        .find(|(name, _)| *name == animal)
        .map(|(_, description)| *description)
        .unwrap_or(UNKNOWN_ANIMAL_TRAIT)
}

/// Whether the animal has a trait of its own in the lookup table
pub fn is_known_animal(animal: &str) -> bool {
    animal_trait(animal) != UNKNOWN_ANIMAL_TRAIT
}

fn mood_sentence(mood: &str) -> String {
    let note = match mood {
        "anxious" | "sad" | "confused" => " This might indicate emotional stress or uncertainty.",
        "happy" => " That's a positive sign — maintain it!",
        "angry" => " Suggests underlying frustration that should be explored.",
        _ => "",
    };
    format!("Current mood appears to be '{}'.{}", mood, note)
}

fn therapy_sentence(therapy: &str) -> &'static str {
    if therapy == "yes" {
        "You have been in therapy before."
    } else {
        "This may be your first experience with therapy."
    }
}

/// Compose the plain-text initial analysis for an intake form
pub fn summarize(form: &IntakeForm) -> String {
    let animal = form.animal.to_lowercase();

    format!(
        "{}\nYou chose {}, which often represents being {}.\n{}\n\n\
         Reason for session: {}\n\
         Current struggles: {}\n\
         Reported symptoms: {}",
        mood_sentence(&form.mood),
        animal,
        animal_trait(&animal),
        therapy_sentence(&form.therapy),
        form.reason,
        form.struggles,
        form.symptoms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(mood: &str, animal: &str, therapy: &str) -> IntakeForm {
        IntakeForm {
            mood: mood.to_string(),
            therapy: therapy.to_string(),
            animal: animal.to_string(),
            reason: "work stress".to_string(),
            struggles: "sleep".to_string(),
            symptoms: "fatigue".to_string(),
        }
    }

    #[test]
    fn test_known_and_unknown_animals() {
        let owl = summarize(&form("calm", "owl", "no"));
        assert!(owl.contains("You chose owl, which often represents being wise and observant."));

        let fox = summarize(&form("calm", "fox", "no"));
        assert!(fox.contains("which often represents being unique."));
    }

    #[test]
    fn test_is_known_animal() {
        assert!(is_known_animal("Dolphin"));
        assert!(!is_known_animal("fox"));
        assert!(!is_known_animal(""));
    }

    #[test]
    fn test_animal_is_lowercased() {
        let summary = summarize(&form("calm", "Elephant", "no"));
        assert!(summary.contains("You chose elephant"));
        assert!(summary.contains("deeply emotional and thoughtful"));
    }

    #[test]
    fn test_mood_clauses() {
        let angry = summarize(&form("angry", "dog", "no"));
        assert!(angry.starts_with(
            "Current mood appears to be 'angry'. Suggests underlying frustration that should be explored."
        ));

        for mood in ["anxious", "sad", "confused"] {
            let s = summarize(&form(mood, "dog", "no"));
            assert!(s.contains("This might indicate emotional stress or uncertainty."));
        }

        let happy = summarize(&form("happy", "dog", "no"));
        assert!(happy.contains("That's a positive sign — maintain it!"));

        let plain = summarize(&form("tired", "dog", "no"));
        assert!(plain.starts_with("Current mood appears to be 'tired'.\n"));
    }

    #[test]
    fn test_mood_match_is_exact() {
        let s = summarize(&form("Angry", "dog", "no"));
        assert!(!s.contains("frustration"));
    }

    #[test]
    fn test_therapy_sentence() {
        assert!(summarize(&form("calm", "cat", "yes")).contains("You have been in therapy before."));
        assert!(summarize(&form("calm", "cat", "Yes"))
            .contains("This may be your first experience with therapy."));
    }

    #[test]
    fn test_full_layout() {
        let summary = summarize(&form("sad", "lion", "yes"));
        let expected = "Current mood appears to be 'sad'. This might indicate emotional stress or uncertainty.\n\
                        You chose lion, which often represents being bold and dominant.\n\
                        You have been in therapy before.\n\
                        \n\
                        Reason for session: work stress\n\
                        Current struggles: sleep\n\
                        Reported symptoms: fatigue";
        assert_eq!(summary, expected);
        assert_eq!(summary, summarize(&form("sad", "lion", "yes")));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: IntakeForm = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.mood, "unknown");
        assert_eq!(parsed.therapy, "no");
        assert!(parsed.animal.is_empty());

        let summary = summarize(&parsed);
        assert!(summary.starts_with("Current mood appears to be 'unknown'.\n"));
        assert!(summary.contains("You chose , which often represents being unique."));
    }
}

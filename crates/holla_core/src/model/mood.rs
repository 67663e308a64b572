//! Mood feedback derivation.
//!
//! # Responsibility
//! - Map a completion percentage to the mascot's mood and message.
//!
//! # Invariants
//! - Pure and stateless; recomputed after every progress change.
//! - Band boundaries are inclusive as listed; ties resolve to the higher
//!   band (exactly 70 is proud, not encouraging).

use serde::{Deserialize, Serialize};

/// The mascot's fixed mood set.
///
/// `Worried` is part of the rendering contract but is not produced by the
/// percentage bands; `Neutral` is the logged-out idle mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Excited,
    Proud,
    Encouraging,
    Neutral,
    Worried,
}

/// Mood plus the human-readable message shown next to the mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodFeedback {
    pub mood: Mood,
    pub message: &'static str,
}

impl MoodFeedback {
    /// Feedback shown when no user is authenticated.
    pub fn idle() -> Self {
        Self {
            mood: Mood::Neutral,
            message: "Log in to start tracking today's habits.",
        }
    }
}

/// Derives mood feedback from a completion percentage.
pub fn mood_for(percentage: u8) -> MoodFeedback {
    match percentage {
        100.. => MoodFeedback {
            mood: Mood::Excited,
            message: "Amazing! All habits completed today!",
        },
        70..=99 => MoodFeedback {
            mood: Mood::Proud,
            message: "You're doing fantastic! Keep it up!",
        },
        40..=69 => MoodFeedback {
            mood: Mood::Encouraging,
            message: "Great progress! Keep the momentum going!",
        },
        1..=39 => MoodFeedback {
            mood: Mood::Happy,
            message: "Nice start! Every habit counts.",
        },
        0 => MoodFeedback {
            mood: Mood::Encouraging,
            message: "Ready for a fresh start? You've got this!",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{mood_for, Mood};

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(mood_for(100).mood, Mood::Excited);
        assert_eq!(mood_for(99).mood, Mood::Proud);
        assert_eq!(mood_for(70).mood, Mood::Proud);
        assert_eq!(mood_for(69).mood, Mood::Encouraging);
        assert_eq!(mood_for(40).mood, Mood::Encouraging);
        assert_eq!(mood_for(39).mood, Mood::Happy);
        assert_eq!(mood_for(1).mood, Mood::Happy);
    }

    #[test]
    fn zero_percent_is_encouraging_start_of_day() {
        let feedback = mood_for(0);
        assert_eq!(feedback.mood, Mood::Encouraging);
        assert!(feedback.message.contains("fresh start"));
    }

    #[test]
    fn proud_tier_uses_the_fantastic_text() {
        assert!(mood_for(70).message.contains("fantastic"));
    }
}

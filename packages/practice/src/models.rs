//! # Domain models for exercises, badges and progress
//!
//! These types cross the server/client boundary through Dioxus server
//! functions, so all of them are `Serialize + Deserialize`.
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Exercise`] | A practice exercise: what it trains ([`ExerciseKind`]), how hard it is ([`Difficulty`]), which devices it needs, and its ordered [`ExerciseStep`]s. |
//! | [`ExerciseStep`] | One word to pronounce. `correct` scripts the simulated recognition result for that word. |
//! | [`Badge`] / [`EarnedBadge`] | A reward and, for a given child, the day it was earned (if it was). |
//! | [`ExerciseProgress`] | An exercise paired with a child's progress percentage on it. |
//! | [`ProgressEntry`] | One completed run through an exercise. Created on the client, uploaded to the server, and keyed by a client-generated id so uploads can be replayed safely. |

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an exercise trains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Pronunciation,
    Articulation,
}

impl ExerciseKind {
    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::Pronunciation => "Pronunciation",
            ExerciseKind::Articulation => "Articulation",
        }
    }
}

/// Exercise difficulty. Harder exercises are worth more points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded for each completion of an exercise at this difficulty.
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A single word to practice within an exercise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseStep {
    pub word: String,
    /// Picture shown above the word, if any.
    pub image: Option<String>,
    /// Simulated recognition outcome for this word.
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ExerciseKind,
    pub difficulty: Difficulty,
    pub requires_camera: bool,
    pub requires_microphone: bool,
    pub steps: Vec<ExerciseStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Emoji rendered as the badge picture.
    pub image: String,
}

/// A badge as seen by one child.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EarnedBadge {
    pub badge: Badge,
    pub earned_on: Option<NaiveDate>,
}

impl EarnedBadge {
    pub fn is_earned(&self) -> bool {
        self.earned_on.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub exercise: Exercise,
    /// 0..=100
    pub progress: u8,
}

impl ExerciseProgress {
    pub fn is_mastered(&self) -> bool {
        self.progress >= 100
    }
}

/// One finished run through an exercise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Client-generated id; the server ignores an id it has already stored.
    pub id: Uuid,
    pub child_id: String,
    pub exercise_id: String,
    pub correct_steps: u32,
    pub total_steps: u32,
    pub completed_at: DateTime<Utc>,
}

impl ProgressEntry {
    pub fn completed_on(&self) -> NaiveDate {
        self.completed_at.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_points_increase() {
        assert!(Difficulty::Easy.points() < Difficulty::Medium.points());
        assert!(Difficulty::Medium.points() < Difficulty::Hard.points());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ExerciseKind::Articulation).unwrap();
        assert_eq!(json, "\"articulation\"");
        let back: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(back, Difficulty::Hard);
    }
}

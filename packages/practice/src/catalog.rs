//! Built-in exercises and badges.

use crate::models::{Badge, Difficulty, Exercise, ExerciseKind, ExerciseStep};

pub const FIRST_EXERCISE: &str = "first-exercise";
pub const PRACTICE_STREAK: &str = "practice-streak";
pub const SOUND_MASTER: &str = "sound-master";

/// Which exercises an exercise list shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExerciseFilter {
    #[default]
    All,
    Kind(ExerciseKind),
}

impl ExerciseFilter {
    pub fn matches(self, exercise: &Exercise) -> bool {
        match self {
            ExerciseFilter::All => true,
            ExerciseFilter::Kind(kind) => exercise.kind == kind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseFilter::All => "All",
            ExerciseFilter::Kind(kind) => kind.label(),
        }
    }

    /// Filters in the order the exercise list shows them as tabs.
    pub fn tabs() -> [ExerciseFilter; 3] {
        [
            ExerciseFilter::All,
            ExerciseFilter::Kind(ExerciseKind::Pronunciation),
            ExerciseFilter::Kind(ExerciseKind::Articulation),
        ]
    }
}

pub fn filter(exercises: &[Exercise], by: ExerciseFilter) -> Vec<Exercise> {
    exercises.iter().filter(|e| by.matches(e)).cloned().collect()
}

fn step(word: &str, image: Option<&str>, correct: bool) -> ExerciseStep {
    ExerciseStep {
        word: word.to_string(),
        image: image.map(str::to_string),
        correct,
    }
}

pub fn exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: "s-sound".to_string(),
            title: "S Sound Practice".to_string(),
            description: "Practice making the \"S\" sound at the beginning of words".to_string(),
            kind: ExerciseKind::Pronunciation,
            difficulty: Difficulty::Easy,
            requires_camera: false,
            requires_microphone: true,
            steps: vec![
                step("Sun", Some("https://images.unsplash.com/photo-1575881875475-31023242e3f9?w=400&q=80"), true),
                step("Snake", Some("https://images.unsplash.com/photo-1531386151447-fd76ad50012f?w=400&q=80"), true),
                step("Star", Some("https://images.unsplash.com/photo-1444703686981-a3abbc4d4fe3?w=400&q=80"), false),
                step("Smile", Some("https://images.unsplash.com/photo-1600880292203-757bb62b4baf?w=400&q=80"), true),
                step("Soup", Some("https://images.unsplash.com/photo-1547592180-85f173990554?w=400&q=80"), true),
            ],
        },
        Exercise {
            id: "r-sound".to_string(),
            title: "R Sound Practice".to_string(),
            description: "Practice making the \"R\" sound in the middle of words".to_string(),
            kind: ExerciseKind::Pronunciation,
            difficulty: Difficulty::Medium,
            requires_camera: false,
            requires_microphone: true,
            steps: vec![
                step("Carrot", None, true),
                step("Parrot", None, false),
                step("Mirror", None, true),
                step("Arrow", None, true),
                step("Berry", None, true),
            ],
        },
        Exercise {
            id: "tongue-placement".to_string(),
            title: "Tongue Placement".to_string(),
            description: "Practice correct tongue placement for difficult sounds".to_string(),
            kind: ExerciseKind::Articulation,
            difficulty: Difficulty::Hard,
            requires_camera: true,
            requires_microphone: false,
            steps: vec![
                step("La", None, true),
                step("Ta", None, true),
                step("Tha", None, false),
                step("Ka", None, true),
                step("Lolly", None, true),
            ],
        },
    ]
}

pub fn exercise(id: &str) -> Option<Exercise> {
    exercises().into_iter().find(|e| e.id == id)
}

pub fn badges() -> Vec<Badge> {
    vec![
        Badge {
            id: FIRST_EXERCISE.to_string(),
            name: "First Exercise".to_string(),
            description: "Completed your first exercise".to_string(),
            image: "🏆".to_string(),
        },
        Badge {
            id: PRACTICE_STREAK.to_string(),
            name: "Practice Streak".to_string(),
            description: "Practiced for 3 days in a row".to_string(),
            image: "🔥".to_string(),
        },
        Badge {
            id: SOUND_MASTER.to_string(),
            name: "Sound Master".to_string(),
            description: "Mastered a difficult sound".to_string(),
            image: "🌟".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_kind() {
        let all = exercises();
        assert_eq!(filter(&all, ExerciseFilter::All).len(), 3);

        let pronunciation = filter(&all, ExerciseFilter::Kind(ExerciseKind::Pronunciation));
        assert_eq!(pronunciation.len(), 2);
        assert!(pronunciation.iter().all(|e| e.kind == ExerciseKind::Pronunciation));

        let articulation = filter(&all, ExerciseFilter::Kind(ExerciseKind::Articulation));
        assert_eq!(articulation.len(), 1);
        assert_eq!(articulation[0].title, "Tongue Placement");
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(exercise("r-sound").unwrap().difficulty, Difficulty::Medium);
        assert!(exercise("nope").is_none());
    }

    #[test]
    fn test_every_exercise_has_steps() {
        for e in exercises() {
            assert!(!e.steps.is_empty(), "{} has no steps", e.id);
        }
    }

    #[test]
    fn test_tab_labels() {
        let labels: Vec<_> = ExerciseFilter::tabs().iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["All", "Pronunciation", "Articulation"]);
    }
}

//! # Exercise player
//!
//! [`PracticeSession`] walks a child through the steps of one [`Exercise`].
//! Recognition is simulated: each step carries the outcome it will report.
//!
//! ```text
//!   Ready ──start_recording──► Recording ──finish_recording──► Feedback(Correct)
//!     ▲                                                       │        │
//!     │                                  Feedback(Incorrect) ◄┘        │ next_step
//!     │                                    │ retry                     ▼
//!     └── next_step (more steps)           └──► Recording        Finished (last step)
//! ```
//!
//! Out-of-order calls are ignored and return `false`, so a stray double click
//! can never skip a step.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Exercise, ExerciseStep, ProgressEntry};

/// How long the UI pretends to record before asking for feedback.
pub const RECORDING_SECS: u64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Ready,
    Recording,
    Feedback(Feedback),
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PracticeSession {
    exercise: Exercise,
    current: usize,
    state: PlayerState,
    attempts: u32,
    /// Steps answered correctly without a retry.
    first_try: u32,
    retried_current: bool,
    /// Id of the completion this run produces. Fixed at creation so every
    /// `to_entry` call yields the same record.
    entry_id: Uuid,
}

impl PracticeSession {
    pub fn new(exercise: Exercise) -> Self {
        let state = if exercise.steps.is_empty() {
            PlayerState::Finished
        } else {
            PlayerState::Ready
        };
        Self {
            exercise,
            current: 0,
            state,
            attempts: 0,
            first_try: 0,
            retried_current: false,
            entry_id: Uuid::new_v4(),
        }
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> Option<&ExerciseStep> {
        self.exercise.steps.get(self.current)
    }

    pub fn is_last_step(&self) -> bool {
        self.current + 1 >= self.exercise.steps.len()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn correct_first_try(&self) -> u32 {
        self.first_try
    }

    /// Percentage of steps already passed, rounded.
    pub fn progress_percent(&self) -> u8 {
        let total = self.exercise.steps.len();
        if total == 0 {
            return 100;
        }
        let done = if self.state == PlayerState::Finished { total } else { self.current };
        ((done as f64 / total as f64) * 100.0).round() as u8
    }

    pub fn start_recording(&mut self) -> bool {
        if self.state != PlayerState::Ready {
            return false;
        }
        self.begin_recording();
        true
    }

    fn begin_recording(&mut self) {
        self.attempts += 1;
        self.state = PlayerState::Recording;
    }

    pub fn finish_recording(&mut self) -> Option<Feedback> {
        if self.state != PlayerState::Recording {
            return None;
        }
        let step = self.current_step()?;
        let feedback = if step.correct {
            if !self.retried_current {
                self.first_try += 1;
            }
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.state = PlayerState::Feedback(feedback);
        Some(feedback)
    }

    /// Retry a step whose scripted outcome is incorrect. The simulated
    /// recognizer accepts the second attempt.
    fn accept_retry(&mut self) {
        if let Some(step) = self.exercise.steps.get_mut(self.current) {
            step.correct = true;
        }
    }

    pub fn next_step(&mut self) -> bool {
        if self.state != PlayerState::Feedback(Feedback::Correct) {
            return false;
        }
        if self.is_last_step() {
            self.state = PlayerState::Finished;
        } else {
            self.current += 1;
            self.retried_current = false;
            self.state = PlayerState::Ready;
        }
        true
    }

    /// Called by "Try Again": records again and lets the step pass.
    pub fn retry(&mut self) -> bool {
        if self.state != PlayerState::Feedback(Feedback::Incorrect) {
            return false;
        }
        self.accept_retry();
        self.retried_current = true;
        self.begin_recording();
        true
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayerState::Finished
    }

    /// Build the completion record for a finished session. Repeated calls
    /// return the same id, so the server keeps one row per run.
    pub fn to_entry(&self, child_id: &str, now: DateTime<Utc>) -> Option<ProgressEntry> {
        if !self.is_finished() {
            return None;
        }
        Some(ProgressEntry {
            id: self.entry_id,
            child_id: child_id.to_string(),
            exercise_id: self.exercise.id.clone(),
            correct_steps: self.first_try,
            total_steps: self.exercise.steps.len() as u32,
            completed_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn answer(session: &mut PracticeSession) -> Feedback {
        assert!(session.start_recording() || session.retry());
        session.finish_recording().unwrap()
    }

    #[test]
    fn test_walks_all_steps() {
        let mut session = PracticeSession::new(catalog::exercise("s-sound").unwrap());
        assert_eq!(session.state(), PlayerState::Ready);
        assert_eq!(session.progress_percent(), 0);

        // Sun, Snake
        assert_eq!(answer(&mut session), Feedback::Correct);
        assert!(session.next_step());
        assert_eq!(session.progress_percent(), 20);
        assert_eq!(answer(&mut session), Feedback::Correct);
        assert!(session.next_step());

        // Star is scripted as incorrect the first time
        assert_eq!(answer(&mut session), Feedback::Incorrect);
        assert!(!session.next_step());
        assert!(session.retry());
        assert_eq!(session.finish_recording(), Some(Feedback::Correct));
        assert!(session.next_step());

        // Smile, Soup
        assert_eq!(answer(&mut session), Feedback::Correct);
        assert!(session.next_step());
        assert_eq!(session.progress_percent(), 80);
        assert_eq!(answer(&mut session), Feedback::Correct);
        assert!(session.next_step());

        assert!(session.is_finished());
        assert_eq!(session.progress_percent(), 100);
        assert_eq!(session.attempts(), 6);
        assert_eq!(session.correct_first_try(), 4);
    }

    #[test]
    fn test_out_of_order_calls_are_ignored() {
        let mut session = PracticeSession::new(catalog::exercise("r-sound").unwrap());
        assert!(!session.next_step());
        assert_eq!(session.finish_recording(), None);
        assert!(session.start_recording());
        assert!(!session.start_recording());
        assert_eq!(session.state(), PlayerState::Recording);
    }

    #[test]
    fn test_entry_only_when_finished() {
        let mut session = PracticeSession::new(catalog::exercise("s-sound").unwrap());
        let now = Utc::now();
        assert!(session.to_entry("child-1", now).is_none());

        while !session.is_finished() {
            if answer(&mut session) == Feedback::Correct {
                session.next_step();
            }
        }

        let entry = session.to_entry("child-1", now).unwrap();
        assert_eq!(entry.exercise_id, "s-sound");
        assert_eq!(entry.child_id, "child-1");
        assert_eq!(entry.total_steps, 5);
        assert_eq!(entry.correct_steps, 4);
        assert_eq!(entry.completed_at, now);
    }

    #[test]
    fn test_finished_session_yields_one_entry_id() {
        let mut session = PracticeSession::new(catalog::exercise("r-sound").unwrap());
        while !session.is_finished() {
            if answer(&mut session) == Feedback::Correct {
                session.next_step();
            }
        }

        // A second "Next Word" after the last step changes nothing
        assert!(!session.next_step());
        let now = Utc::now();
        let first = session.to_entry("child-1", now).unwrap();
        let second = session.to_entry("child-1", now).unwrap();
        assert_eq!(first.id, second.id);

        let other = PracticeSession::new(catalog::exercise("r-sound").unwrap());
        assert_ne!(other.entry_id, first.id);
    }

    #[test]
    fn test_empty_exercise_is_finished() {
        let mut exercise = catalog::exercise("s-sound").unwrap();
        exercise.steps.clear();
        let session = PracticeSession::new(exercise);
        assert!(session.is_finished());
        assert_eq!(session.progress_percent(), 100);
    }
}

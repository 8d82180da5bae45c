//! # Progress scoring
//!
//! Turns a child's completion history into what the dashboards display:
//! per-exercise progress, points, badges and weekly activity. Everything here
//! is a pure function of the completions and "today", so the server can score
//! on request and the tests can pin the calendar.
//!
//! | Figure | Rule |
//! |--------|------|
//! | exercise progress | 25% per completion, capped at 100% |
//! | points | sum of [`Difficulty::points`] over all completions |
//! | "First Exercise" | day of the first completion |
//! | "Practice Streak" | first day closing a run of [`STREAK_DAYS`] consecutive practice days |
//! | "Sound Master" | day of the first completion of a hard exercise |
//! | weekly progress | practice days among the 7 days ending today |

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, FIRST_EXERCISE, PRACTICE_STREAK, SOUND_MASTER};
use crate::models::{
    Difficulty, EarnedBadge, Exercise, ExerciseProgress, ProgressEntry,
};

pub const PROGRESS_PER_COMPLETION: u8 = 25;
pub const STREAK_DAYS: usize = 3;
pub const WEEK_DAYS: u8 = 7;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub days_practiced: u8,
    pub percent: u8,
}

/// Everything the dashboards show about one child.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildProgress {
    pub child_id: String,
    pub points: u32,
    pub exercises: Vec<ExerciseProgress>,
    pub badges: Vec<EarnedBadge>,
    pub weekly: WeeklyProgress,
    pub last_practiced: Option<NaiveDate>,
    /// Number of completions, i.e. practice sessions.
    pub sessions: usize,
}

impl ChildProgress {
    pub fn badges_earned(&self) -> usize {
        self.badges.iter().filter(|b| b.is_earned()).count()
    }

    /// Mean progress over all exercises, used as the child's overall figure.
    pub fn overall(&self) -> u8 {
        let values: Vec<u8> = self.exercises.iter().map(|e| e.progress).collect();
        average_progress(&values)
    }
}

pub fn exercise_progress(completions: usize) -> u8 {
    let raw = completions.saturating_mul(PROGRESS_PER_COMPLETION as usize);
    raw.min(100) as u8
}

/// Rounded mean; 0 for no values.
pub fn average_progress(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u32 = values.iter().map(|v| *v as u32).sum();
    (sum as f64 / values.len() as f64).round() as u8
}

fn difficulty_of(exercises: &[Exercise], id: &str) -> Option<Difficulty> {
    exercises.iter().find(|e| e.id == id).map(|e| e.difficulty)
}

pub fn points(entries: &[ProgressEntry], exercises: &[Exercise]) -> u32 {
    entries
        .iter()
        .filter_map(|e| difficulty_of(exercises, &e.exercise_id))
        .map(Difficulty::points)
        .sum()
}

/// First day that closes a run of `len` consecutive days.
pub fn streak_day(days: &BTreeSet<NaiveDate>, len: usize) -> Option<NaiveDate> {
    if len == 0 {
        return None;
    }
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for day in days {
        run = match prev {
            Some(p) if *day - p == Duration::days(1) => run + 1,
            _ => 1,
        };
        if run >= len {
            return Some(*day);
        }
        prev = Some(*day);
    }
    None
}

pub fn weekly_progress(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> WeeklyProgress {
    let start = today - Duration::days(WEEK_DAYS as i64 - 1);
    let days_practiced = days.range(start..=today).count() as u8;
    let percent = ((days_practiced as f64 / WEEK_DAYS as f64) * 100.0).round() as u8;
    WeeklyProgress {
        days_practiced,
        percent,
    }
}

pub fn earned_badges(entries: &[ProgressEntry], exercises: &[Exercise]) -> Vec<EarnedBadge> {
    let mut sorted: Vec<&ProgressEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.completed_at);

    let days: BTreeSet<NaiveDate> = sorted.iter().map(|e| e.completed_on()).collect();
    let first = sorted.first().map(|e| e.completed_on());
    let hard = sorted
        .iter()
        .find(|e| difficulty_of(exercises, &e.exercise_id) == Some(Difficulty::Hard))
        .map(|e| e.completed_on());
    let streak = streak_day(&days, STREAK_DAYS);

    catalog::badges()
        .into_iter()
        .map(|badge| {
            let earned_on = match badge.id.as_str() {
                FIRST_EXERCISE => first,
                PRACTICE_STREAK => streak,
                SOUND_MASTER => hard,
                _ => None,
            };
            EarnedBadge { badge, earned_on }
        })
        .collect()
}

/// Score a child's completions against an exercise catalog.
pub fn score(
    child_id: &str,
    entries: &[ProgressEntry],
    exercises: &[Exercise],
    today: NaiveDate,
) -> ChildProgress {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.exercise_id.as_str()).or_default() += 1;
    }

    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.completed_on()).collect();

    ChildProgress {
        child_id: child_id.to_string(),
        points: points(entries, exercises),
        exercises: exercises
            .iter()
            .map(|exercise| ExerciseProgress {
                exercise: exercise.clone(),
                progress: exercise_progress(counts.get(exercise.id.as_str()).copied().unwrap_or(0)),
            })
            .collect(),
        badges: earned_badges(entries, exercises),
        weekly: weekly_progress(&days, today),
        last_practiced: days.last().copied(),
        sessions: entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn entry(exercise_id: &str, d: u32) -> ProgressEntry {
        ProgressEntry {
            id: Uuid::new_v4(),
            child_id: "child-1".to_string(),
            exercise_id: exercise_id.to_string(),
            correct_steps: 5,
            total_steps: 5,
            completed_at: Utc.with_ymd_and_hms(2024, 6, d, 16, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_exercise_progress_caps_at_100() {
        assert_eq!(exercise_progress(0), 0);
        assert_eq!(exercise_progress(1), 25);
        assert_eq!(exercise_progress(4), 100);
        assert_eq!(exercise_progress(9), 100);
    }

    #[test]
    fn test_average_progress() {
        assert_eq!(average_progress(&[]), 0);
        assert_eq!(average_progress(&[65, 42, 78]), 62);
        assert_eq!(average_progress(&[1, 2]), 2);
    }

    #[test]
    fn test_streak_detection() {
        let days: BTreeSet<_> = [day(1), day(3), day(4), day(5), day(6)].into_iter().collect();
        assert_eq!(streak_day(&days, 3), Some(day(5)));
        assert_eq!(streak_day(&days, 5), None);

        let gaps: BTreeSet<_> = [day(1), day(3), day(5)].into_iter().collect();
        assert_eq!(streak_day(&gaps, 3), None);
    }

    #[test]
    fn test_weekly_progress_window() {
        let days: BTreeSet<_> = [day(1), day(9), day(10), day(14), day(15)].into_iter().collect();
        let weekly = weekly_progress(&days, day(15));
        // window is 9..=15
        assert_eq!(weekly.days_practiced, 4);
        assert_eq!(weekly.percent, 57);
    }

    #[test]
    fn test_badges() {
        let exercises = catalog::exercises();
        let entries = vec![
            entry("s-sound", 10),
            entry("r-sound", 11),
            entry("s-sound", 12),
            entry("tongue-placement", 14),
        ];
        let badges = earned_badges(&entries, &exercises);
        let by_id = |id: &str| badges.iter().find(|b| b.badge.id == id).unwrap().earned_on;

        assert_eq!(by_id(FIRST_EXERCISE), Some(day(10)));
        assert_eq!(by_id(PRACTICE_STREAK), Some(day(12)));
        assert_eq!(by_id(SOUND_MASTER), Some(day(14)));
    }

    #[test]
    fn test_score_without_history() {
        let progress = score("child-1", &[], &catalog::exercises(), day(15));
        assert_eq!(progress.points, 0);
        assert_eq!(progress.badges_earned(), 0);
        assert_eq!(progress.overall(), 0);
        assert!(progress.last_practiced.is_none());
        assert_eq!(progress.sessions, 0);
        assert_eq!(progress.exercises.len(), 3);
    }

    #[test]
    fn test_score() {
        let exercises = catalog::exercises();
        let entries = vec![
            entry("s-sound", 13),
            entry("s-sound", 14),
            entry("r-sound", 15),
        ];
        let progress = score("child-1", &entries, &exercises, day(15));

        assert_eq!(progress.points, 10 + 10 + 20);
        assert_eq!(progress.weekly.days_practiced, 3);
        assert_eq!(progress.badges_earned(), 2);
        assert_eq!(progress.last_practiced, Some(day(15)));
        assert_eq!(progress.sessions, 3);

        let s = progress.exercises.iter().find(|e| e.exercise.id == "s-sound").unwrap();
        assert_eq!(s.progress, 50);
        let tongue = progress
            .exercises
            .iter()
            .find(|e| e.exercise.id == "tongue-placement")
            .unwrap();
        assert_eq!(tongue.progress, 0);
    }
}

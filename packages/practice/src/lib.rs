pub mod catalog;
pub mod config;
pub mod journal;
pub mod models;
pub mod player;
pub mod progress;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod idb;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use idb::IdbStore;

pub use catalog::ExerciseFilter;
pub use config::CompanionConfig;
pub use journal::{Journal, JournalStore};
pub use models::{
    Badge, Difficulty, EarnedBadge, Exercise, ExerciseKind, ExerciseProgress, ExerciseStep,
    ProgressEntry,
};
pub use player::{Feedback, PlayerState, PracticeSession};
pub use progress::{ChildProgress, WeeklyProgress};

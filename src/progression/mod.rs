//! Persistent player progression: XP, levels and the battle stats derived
//! from them.

pub mod error;
pub mod record;
pub mod rewards;
pub mod store;
pub mod tracker;

pub use error::{ProgressionError, ProgressionResult};
pub use record::{
    player_stats_for_level, xp_for_next_level, LevelProgress, ProgressionRecord, XpGain,
};
pub use rewards::battle_xp_reward;
pub use store::{FileStore, MemoryStore, ProgressionStore};
pub use tracker::{EncounterOutcome, PlayerProgression};

//! Contract violations raised by the encounter engine.
//!
//! These signal a caller bug, never a gameplay outcome. Misses, failed
//! escapes and exhausted PP are ordinary log entries.

use thiserror::Error;

use super::types::{EncounterResult, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncounterError {
    #[error("encounter already ended with result `{result}`")]
    EncounterOver { result: EncounterResult },

    #[error("no move in slot {slot}")]
    UnknownMove { slot: usize },

    #[error("move `{name}` has no PP left")]
    NoPpRemaining { name: String },

    #[error("Struggle is only allowed once every move is out of PP")]
    StruggleNotAllowed,

    #[error("{side:?} max HP must be greater than 0")]
    InvalidMaxHp { side: Side },
}

pub type CombatResult<T> = Result<T, EncounterError>;

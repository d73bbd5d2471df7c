//! Structured battle log.
//!
//! Entries carry a type tag, numeric payloads and referenced names only. Turning
//! them into display text is left to whatever front end consumes the log.

use serde::{Deserialize, Serialize};

use super::type_chart::Effectiveness;
use super::types::{EncounterResult, Side, Stat, StatusCondition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEntry {
    EncounterStarted {
        creature: String,
        level: u32,
    },
    MoveUsed {
        side: Side,
        move_name: String,
    },
    MoveMissed {
        side: Side,
        move_name: String,
    },
    DamageDealt {
        attacker: Side,
        target: Side,
        amount: u32,
        remaining_hp: u32,
    },
    /// Only logged when the multiplier is not neutral.
    Effectiveness {
        target: Side,
        effectiveness: Effectiveness,
    },
    Recoil {
        side: Side,
        amount: u32,
        remaining_hp: u32,
    },
    StatusInflicted {
        target: Side,
        status: StatusCondition,
    },
    StatusDamage {
        target: Side,
        status: StatusCondition,
        amount: u32,
        remaining_hp: u32,
    },
    StatChanged {
        target: Side,
        stat: Stat,
        stages: i8,
        turns: u8,
    },
    StatModifierExpired {
        target: Side,
        stat: Stat,
    },
    OutOfPp {
        side: Side,
        move_name: String,
    },
    Defended {
        stages: i8,
        turns: u8,
    },
    FleeSucceeded {
        chance: u32,
    },
    FleeFailed {
        chance: u32,
    },
    Fainted {
        side: Side,
    },
    EncounterEnded {
        result: EncounterResult,
    },
}

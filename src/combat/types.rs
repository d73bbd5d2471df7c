use serde::{Deserialize, Serialize};
use std::fmt;

use super::log::LogEntry;
use crate::core::constants::*;

/// Elemental type of a creature or a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Fire,
    Water,
    Grass,
    Beast,
    Flying,
    Bug,
    Aquatic,
    Normal,
}

impl ElementType {
    pub fn all() -> [ElementType; 8] {
        [
            ElementType::Fire,
            ElementType::Water,
            ElementType::Grass,
            ElementType::Beast,
            ElementType::Flying,
            ElementType::Bug,
            ElementType::Aquatic,
            ElementType::Normal,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Fire => "Fire",
            ElementType::Water => "Water",
            ElementType::Grass => "Grass",
            ElementType::Beast => "Beast",
            ElementType::Flying => "Flying",
            ElementType::Bug => "Bug",
            ElementType::Aquatic => "Aquatic",
            ElementType::Normal => "Normal",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stats that can be temporarily raised or lowered during an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Attack,
    Defense,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    /// The battler using the move.
    User,
    /// The battler on the receiving end.
    Opponent,
}

/// Secondary effect applied after a move's damage resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveEffect {
    /// Percent chance to burn the opponent.
    Burn { chance: u8 },
    /// Raise or lower `stat` on `target` by `stages` for `turns` of the target's actions.
    StatChange {
        target: EffectTarget,
        stat: Stat,
        stages: i8,
        turns: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub element: ElementType,
    /// 0 for pure status moves.
    pub power: u32,
    /// Hit chance in percent. 100 never rolls.
    pub accuracy: u8,
    pub max_pp: u32,
    pub pp: u32,
    /// Presentation tag. Passed through untouched.
    pub animation: String,
    #[serde(default)]
    pub effect: Option<MoveEffect>,
}

impl Move {
    pub fn new(
        name: &str,
        element: ElementType,
        power: u32,
        accuracy: u8,
        max_pp: u32,
        animation: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            element,
            power,
            accuracy: accuracy.clamp(1, 100),
            max_pp,
            pp: max_pp,
            animation: animation.to_string(),
            effect: None,
        }
    }

    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_usable(&self) -> bool {
        self.pp > 0
    }

    pub fn is_status(&self) -> bool {
        self.power == 0
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.max_pp;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
        }
    }
}

/// An opponent definition, as handed to `create_encounter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub element: ElementType,
    pub level: u32,
    pub stats: BaseStats,
    pub moves: Vec<Move>,
    pub sprite: String,
}

/// Battle-ready player stats derived from the progression record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBattleStats {
    pub level: u32,
    pub stats: BaseStats,
    pub moves: Vec<Move>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCondition {
    Burn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: Stat,
    pub stages: i8,
    /// Ticks down at the end of each later action by the owner; removed at 0.
    pub turns_remaining: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Creature,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Creature,
            Side::Creature => Side::Player,
        }
    }
}

/// One side of an encounter with its live HP, PP and modifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battler {
    pub name: String,
    /// `None` for the player, who has no elemental type.
    pub element: Option<ElementType>,
    pub level: u32,
    pub stats: BaseStats,
    pub current_hp: u32,
    pub moves: Vec<Move>,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
}

impl Battler {
    pub fn from_creature(creature: &Creature) -> Self {
        Self {
            name: creature.name.clone(),
            element: Some(creature.element),
            level: creature.level,
            stats: creature.stats,
            current_hp: creature.stats.max_hp,
            moves: fresh_moves(&creature.moves),
            modifiers: Vec::new(),
            status: None,
        }
    }

    pub fn from_player(player: &PlayerBattleStats) -> Self {
        Self {
            name: "Player".to_string(),
            element: None,
            level: player.level,
            stats: player.stats,
            current_hp: player.stats.max_hp,
            moves: fresh_moves(&player.moves),
            modifiers: Vec::new(),
            status: None,
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtracts `amount` from HP, never going below 0.
    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = self.current_hp.saturating_sub(amount);
    }

    /// Sum of active modifiers for `stat`, clamped to the stage limits.
    pub fn stage(&self, stat: Stat) -> i8 {
        let total: i32 = self
            .modifiers
            .iter()
            .filter(|m| m.stat == stat)
            .map(|m| m.stages as i32)
            .sum();
        total.clamp(-(MAX_STAT_STAGE as i32), MAX_STAT_STAGE as i32) as i8
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(Move::is_usable)
    }

    pub fn usable_move_slots(&self) -> Vec<usize> {
        self.moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_usable())
            .map(|(slot, _)| slot)
            .collect()
    }
}

fn fresh_moves(moves: &[Move]) -> Vec<Move> {
    moves
        .iter()
        .cloned()
        .map(|mut m| {
            m.restore_pp();
            m
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterResult {
    Win,
    Lose,
    Flee,
}

impl fmt::Display for EncounterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EncounterResult::Win => "win",
            EncounterResult::Lose => "lose",
            EncounterResult::Flee => "flee",
        };
        f.write_str(label)
    }
}

/// The aggregate threaded through every turn. Replaced, never mutated in place,
/// by the `execute_*` functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterState {
    pub creature: Battler,
    pub creature_sprite: String,
    pub player: Battler,
    /// Append-only for the lifetime of the encounter.
    pub battle_log: Vec<LogEntry>,
    pub result: Option<EncounterResult>,
    /// Set by the last player move so the caller can sequence animations.
    pub creature_goes_first: bool,
    /// Number of actions resolved so far, across both sides.
    pub turn: u32,
    pub flee_attempts: u32,
}

impl EncounterState {
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn battler(&self, side: Side) -> &Battler {
        match side {
            Side::Player => &self.player,
            Side::Creature => &self.creature,
        }
    }

    pub fn battler_mut(&mut self, side: Side) -> &mut Battler {
        match side {
            Side::Player => &mut self.player,
            Side::Creature => &mut self.creature,
        }
    }

    pub fn push_log(&mut self, entry: LogEntry) {
        self.battle_log.push(entry);
    }

    /// Log entries appended after `previous_len`, for animating one step.
    pub fn log_since(&self, previous_len: usize) -> &[LogEntry] {
        &self.battle_log[previous_len.min(self.battle_log.len())..]
    }
}

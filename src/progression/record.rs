use serde::{Deserialize, Serialize};

use crate::combat::moves::player_moves_for_level;
use crate::combat::types::{BaseStats, PlayerBattleStats};
use crate::core::constants::*;

/// Calculates the XP required to go from `level` to `level + 1`.
///
/// Grows polynomially: `XP_CURVE_BASE * level^XP_CURVE_EXPONENT`.
pub fn xp_for_next_level(level: u32) -> u64 {
    ((XP_CURVE_BASE * f64::powf(level.max(1) as f64, XP_CURVE_EXPONENT)) as u64).max(1)
}

/// Level -> stat curve. The only place battle stats come from.
pub fn player_stats_for_level(level: u32) -> BaseStats {
    BaseStats {
        max_hp: PLAYER_BASE_HP + PLAYER_HP_PER_LEVEL * level,
        attack: PLAYER_BASE_ATTACK + PLAYER_ATTACK_PER_LEVEL * level,
        defense: PLAYER_BASE_DEFENSE + PLAYER_DEFENSE_PER_LEVEL * level,
        speed: PLAYER_BASE_SPEED + PLAYER_SPEED_PER_LEVEL * level,
    }
}

/// Outcome of crediting XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub leveled_up: bool,
    pub new_level: u32,
    pub levels_gained: u32,
    pub xp_added: u64,
}

/// Read-only view of XP within the current level, for progress bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u64,
    pub xp_to_next: u64,
    /// 0.0 - 100.0
    pub percent: f64,
}

/// Persistent player progression. Only grows: level and total XP never
/// decrease and the counters only increment.
///
/// IMPORTANT: When adding new fields, use `#[serde(default)]` so older save
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    pub profile_id: String,
    pub level: u32,
    /// XP accumulated into the current level.
    pub xp: u64,
    /// Lifetime XP.
    pub total_xp: u64,
    pub wins: u32,
    pub losses: u32,
    pub flees: u32,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ProgressionRecord {
    pub fn new(created_at: i64) -> Self {
        Self {
            profile_id: uuid::Uuid::new_v4().to_string(),
            level: STARTING_LEVEL,
            xp: 0,
            total_xp: 0,
            wins: 0,
            losses: 0,
            flees: 0,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn xp_to_next(&self) -> u64 {
        xp_for_next_level(self.level)
    }

    /// Credits `amount` XP and processes any number of level-ups.
    pub fn apply_xp(&mut self, amount: u64) -> XpGain {
        self.total_xp = self.total_xp.saturating_add(amount);
        self.xp = self.xp.saturating_add(amount);

        let mut levels_gained = 0;
        loop {
            let xp_needed = xp_for_next_level(self.level);
            if self.xp >= xp_needed {
                self.xp -= xp_needed;
                self.level += 1;
                levels_gained += 1;
            } else {
                break;
            }
        }

        XpGain {
            leveled_up: levels_gained > 0,
            new_level: self.level,
            levels_gained,
            xp_added: amount,
        }
    }

    pub fn battle_stats(&self) -> PlayerBattleStats {
        PlayerBattleStats {
            level: self.level,
            stats: player_stats_for_level(self.level),
            moves: player_moves_for_level(self.level),
        }
    }

    pub fn level_progress(&self) -> LevelProgress {
        let xp_to_next = self.xp_to_next();
        LevelProgress {
            level: self.level,
            xp: self.xp,
            xp_to_next,
            percent: (self.xp as f64 / xp_to_next as f64 * 100.0).clamp(0.0, 100.0),
        }
    }

    pub fn total_encounters(&self) -> u32 {
        self.wins + self.losses + self.flees
    }
}

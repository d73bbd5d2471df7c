use crate::core::constants::{UNDERDOG_XP_MULTIPLIER, WIN_XP_BASE, WIN_XP_PER_CREATURE_LEVEL};

/// XP credited for defeating a creature.
///
/// Flat base plus a per-level amount; beating a higher-level creature pays
/// `UNDERDOG_XP_MULTIPLIER` on top.
pub fn battle_xp_reward(creature_level: u32, player_level: u32) -> u64 {
    let base = WIN_XP_BASE + WIN_XP_PER_CREATURE_LEVEL * creature_level as u64;
    if creature_level > player_level {
        (base as f64 * UNDERDOG_XP_MULTIPLIER) as u64
    } else {
        base
    }
}

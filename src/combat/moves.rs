//! Move data table and learnsets.

use super::types::{EffectTarget, ElementType, Move, MoveEffect, Stat};
use crate::core::constants::{MAX_KNOWN_MOVES, STRUGGLE_POWER};

pub const STRUGGLE_NAME: &str = "Struggle";

/// The fallback move used once every known move is out of PP.
pub fn struggle() -> Move {
    Move::new(
        STRUGGLE_NAME,
        ElementType::Normal,
        STRUGGLE_POWER,
        100,
        0,
        "struggle",
    )
}

fn stat_change(target: EffectTarget, stat: Stat, stages: i8, turns: u8) -> MoveEffect {
    MoveEffect::StatChange {
        target,
        stat,
        stages,
        turns,
    }
}

/// Looks up a move by name with full PP.
pub fn move_data(name: &str) -> Option<Move> {
    use ElementType::*;
    let m = match name {
        // Normal
        "Tackle" => Move::new(name, Normal, 40, 100, 35, "tackle"),
        "Scratch" => Move::new(name, Normal, 40, 100, 35, "slash"),
        "Growl" => Move::new(name, Normal, 0, 100, 20, "roar")
            .with_effect(stat_change(EffectTarget::Opponent, Stat::Attack, -1, 3)),
        "Harden" => Move::new(name, Normal, 0, 100, 20, "shield")
            .with_effect(stat_change(EffectTarget::User, Stat::Defense, 1, 3)),
        "Focus Up" => Move::new(name, Normal, 0, 100, 15, "glow")
            .with_effect(stat_change(EffectTarget::User, Stat::Attack, 1, 3)),
        "Power Strike" => Move::new(name, Normal, 120, 80, 5, "impact"),
        // Fire
        "Ember" => Move::new(name, Fire, 40, 100, 25, "flame")
            .with_effect(MoveEffect::Burn { chance: 10 }),
        "Ember Swipe" => Move::new(name, Fire, 45, 95, 25, "flame")
            .with_effect(MoveEffect::Burn { chance: 10 }),
        "Flame Wheel" => Move::new(name, Fire, 60, 95, 15, "flame")
            .with_effect(MoveEffect::Burn { chance: 20 }),
        "Flame Burst" => Move::new(name, Fire, 80, 90, 10, "explosion")
            .with_effect(MoveEffect::Burn { chance: 30 }),
        // Water
        "Water Gun" => Move::new(name, Water, 40, 100, 25, "splash"),
        "Bubble" => Move::new(name, Water, 30, 100, 30, "bubbles")
            .with_effect(stat_change(EffectTarget::Opponent, Stat::Speed, -1, 2)),
        "Bubble Jet" => Move::new(name, Water, 50, 100, 25, "splash"),
        "Tidal Crash" => Move::new(name, Water, 90, 85, 10, "wave"),
        // Grass
        "Vine Whip" => Move::new(name, Grass, 45, 100, 25, "vines"),
        "Vine Lash" => Move::new(name, Grass, 55, 95, 20, "vines"),
        "Razor Leaf" => Move::new(name, Grass, 55, 95, 20, "leaves"),
        // Beast
        "Bite" => Move::new(name, Beast, 60, 100, 25, "bite"),
        "Pounce" => Move::new(name, Beast, 70, 90, 15, "dash"),
        // Flying
        "Peck" => Move::new(name, Flying, 35, 100, 35, "peck"),
        "Wing Attack" => Move::new(name, Flying, 60, 100, 35, "wind"),
        "Gust Slash" => Move::new(name, Flying, 60, 95, 20, "wind"),
        // Bug
        "Bug Bite" => Move::new(name, Bug, 60, 100, 20, "bite"),
        "String Shot" => Move::new(name, Bug, 0, 95, 40, "web")
            .with_effect(stat_change(EffectTarget::Opponent, Stat::Speed, -1, 3)),
        // Aquatic
        "Aqua Jet" => Move::new(name, Aquatic, 40, 100, 20, "dash"),
        "Tail Slap" => Move::new(name, Aquatic, 55, 95, 20, "splash"),
        _ => return None,
    };
    Some(m)
}

/// (unlock level, move name), in unlock order.
pub const PLAYER_LEARNSET: &[(u32, &str)] = &[
    (1, "Tackle"),
    (1, "Growl"),
    (3, "Ember Swipe"),
    (5, "Bubble Jet"),
    (8, "Vine Lash"),
    (11, "Focus Up"),
    (14, "Gust Slash"),
    (18, "Flame Burst"),
    (22, "Tidal Crash"),
    (27, "Power Strike"),
];

/// The player's known moves at `level`: the most recently unlocked ones,
/// up to `MAX_KNOWN_MOVES`, in unlock order.
pub fn player_moves_for_level(level: u32) -> Vec<Move> {
    let unlocked: Vec<&str> = PLAYER_LEARNSET
        .iter()
        .filter(|(unlock, _)| *unlock <= level)
        .map(|(_, name)| *name)
        .collect();
    let skip = unlocked.len().saturating_sub(MAX_KNOWN_MOVES);
    unlocked[skip..]
        .iter()
        .filter_map(|name| move_data(name))
        .collect()
}

/// Signature moves for creatures of a given element, weakest first.
pub fn creature_move_pool(element: ElementType) -> &'static [&'static str] {
    match element {
        ElementType::Fire => &["Scratch", "Ember", "Growl", "Flame Wheel"],
        ElementType::Water => &["Tackle", "Water Gun", "Bubble", "Tidal Crash"],
        ElementType::Grass => &["Tackle", "Vine Whip", "Harden", "Razor Leaf"],
        ElementType::Beast => &["Scratch", "Growl", "Bite", "Pounce"],
        ElementType::Flying => &["Peck", "Growl", "Wing Attack", "Gust Slash"],
        ElementType::Bug => &["Tackle", "String Shot", "Bug Bite", "Harden"],
        ElementType::Aquatic => &["Tackle", "Aqua Jet", "Harden", "Tail Slap"],
        ElementType::Normal => &["Tackle", "Growl", "Scratch", "Power Strike"],
    }
}

/// Creature moves at `level`: one move from the pool per 5 levels, starting
/// with two, capped at `MAX_KNOWN_MOVES`.
pub fn creature_moves_for(element: ElementType, level: u32) -> Vec<Move> {
    let count = (2 + level as usize / 5).min(MAX_KNOWN_MOVES);
    creature_move_pool(element)
        .iter()
        .take(count)
        .filter_map(|name| move_data(name))
        .collect()
}

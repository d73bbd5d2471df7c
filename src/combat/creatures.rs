//! Creature roster for BagsWorld encounters.

use rand::Rng;

use super::moves::creature_moves_for;
use super::types::{BaseStats, Creature, ElementType};
use crate::core::constants::SPAWN_LEVEL_SPREAD;

/// A creature species: level-1 stats plus per-level growth.
#[derive(Debug, Clone, Copy)]
pub struct Species {
    pub name: &'static str,
    pub element: ElementType,
    pub base: BaseStats,
    pub growth: BaseStats,
    pub sprite: &'static str,
}

const fn stats(max_hp: u32, attack: u32, defense: u32, speed: u32) -> BaseStats {
    BaseStats {
        max_hp,
        attack,
        defense,
        speed,
    }
}

pub const SPECIES: &[Species] = &[
    Species {
        name: "Emberpup",
        element: ElementType::Fire,
        base: stats(28, 11, 8, 12),
        growth: stats(5, 2, 1, 2),
        sprite: "/sprites/creatures/emberpup.png",
    },
    Species {
        name: "Tidecrab",
        element: ElementType::Water,
        base: stats(30, 10, 12, 7),
        growth: stats(5, 2, 2, 1),
        sprite: "/sprites/creatures/tidecrab.png",
    },
    Species {
        name: "Sproutling",
        element: ElementType::Grass,
        base: stats(29, 9, 11, 8),
        growth: stats(6, 2, 2, 1),
        sprite: "/sprites/creatures/sproutling.png",
    },
    Species {
        name: "Bagsy Boar",
        element: ElementType::Beast,
        base: stats(32, 12, 9, 9),
        growth: stats(6, 3, 1, 1),
        sprite: "/sprites/creatures/bagsy_boar.png",
    },
    Species {
        name: "Pixel Finch",
        element: ElementType::Flying,
        base: stats(24, 10, 7, 14),
        growth: stats(4, 2, 1, 3),
        sprite: "/sprites/creatures/pixel_finch.png",
    },
    Species {
        name: "Byte Beetle",
        element: ElementType::Bug,
        base: stats(26, 10, 12, 8),
        growth: stats(5, 2, 2, 1),
        sprite: "/sprites/creatures/byte_beetle.png",
    },
    Species {
        name: "Coral Eel",
        element: ElementType::Aquatic,
        base: stats(28, 11, 9, 11),
        growth: stats(5, 2, 1, 2),
        sprite: "/sprites/creatures/coral_eel.png",
    },
    Species {
        name: "Ledger Rat",
        element: ElementType::Normal,
        base: stats(27, 10, 9, 10),
        growth: stats(5, 2, 1, 2),
        sprite: "/sprites/creatures/ledger_rat.png",
    },
];

impl Species {
    /// Builds a creature of this species at `level` (min 1).
    pub fn at_level(&self, level: u32) -> Creature {
        let level = level.max(1);
        let steps = level - 1;
        Creature {
            name: self.name.to_string(),
            element: self.element,
            level,
            stats: BaseStats {
                max_hp: self.base.max_hp + self.growth.max_hp * steps,
                attack: self.base.attack + self.growth.attack * steps,
                defense: self.base.defense + self.growth.defense * steps,
                speed: self.base.speed + self.growth.speed * steps,
            },
            moves: creature_moves_for(self.element, level),
            sprite: self.sprite.to_string(),
        }
    }
}

pub fn species_by_name(name: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

pub fn creature_by_name(name: &str, level: u32) -> Option<Creature> {
    species_by_name(name).map(|s| s.at_level(level))
}

/// Spawns a random species within `SPAWN_LEVEL_SPREAD` levels of the player.
pub fn spawn_creature(player_level: u32, rng: &mut impl Rng) -> Creature {
    let species = &SPECIES[rng.gen_range(0..SPECIES.len())];
    let low = player_level.saturating_sub(SPAWN_LEVEL_SPREAD).max(1);
    let high = player_level + SPAWN_LEVEL_SPREAD;
    species.at_level(rng.gen_range(low..=high))
}

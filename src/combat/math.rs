//! Pure combat math shared by the encounter engine and the simulator.
//!
//! These functions calculate combat outcomes without side effects. Every roll
//! draws uniform floats from the caller's RNG, so a seeded RNG reproduces a
//! fight exactly and a constant RNG forces a branch.

use rand::Rng;

use super::type_chart::{effectiveness, Effectiveness};
use super::types::{Battler, Move, Side, Stat};
use crate::core::constants::*;

/// Result of a damage calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    /// Final damage after every multiplier and the minimum floor.
    pub damage: u32,
    pub effectiveness: Effectiveness,
    /// Variance percent that was applied (85-100).
    pub variance_percent: u32,
}

/// Multiplier for a stat stage: `(2 + s) / 2` when raised, `2 / (2 - s)` when lowered.
pub fn stage_multiplier(stage: i8) -> f64 {
    let s = stage.clamp(-MAX_STAT_STAGE, MAX_STAT_STAGE) as f64;
    if s >= 0.0 {
        (2.0 + s) / 2.0
    } else {
        2.0 / (2.0 - s)
    }
}

/// Base stat adjusted by the battler's active modifiers. Never below 1.
pub fn effective_stat(battler: &Battler, stat: Stat) -> u32 {
    let base = battler.stats.get(stat) as f64;
    ((base * stage_multiplier(battler.stage(stat))) as u32).max(1)
}

/// Which side acts first this round. Speed ties go to the player.
pub fn first_to_act(player: &Battler, creature: &Battler) -> Side {
    if effective_stat(creature, Stat::Speed) > effective_stat(player, Stat::Speed) {
        Side::Creature
    } else {
        Side::Player
    }
}

/// Uniform float in `[0, 100)`.
fn roll_percent(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>() * 100.0
}

/// Roll a `percent` chance. 0 never succeeds and 100+ always does without
/// consuming randomness.
pub fn roll_chance(percent: u32, rng: &mut impl Rng) -> bool {
    if percent == 0 {
        return false;
    }
    if percent >= 100 {
        return true;
    }
    roll_percent(rng) < percent as f64
}

/// Accuracy check. Moves at 100 accuracy never roll.
pub fn roll_hit(accuracy: u8, rng: &mut impl Rng) -> bool {
    roll_chance(accuracy as u32, rng)
}

/// Random damage band, inclusive on both ends.
pub fn roll_variance(rng: &mut impl Rng) -> u32 {
    let span = DAMAGE_VARIANCE_MAX_PERCENT - DAMAGE_VARIANCE_MIN_PERCENT + 1;
    let offset = (rng.gen::<f64>() * span as f64) as u32;
    DAMAGE_VARIANCE_MIN_PERCENT + offset.min(span - 1)
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub fn pick_index(len: usize, rng: &mut impl Rng) -> usize {
    debug_assert!(len > 0);
    ((rng.gen::<f64>() * len as f64) as usize).min(len.saturating_sub(1))
}

/// Nominal damage before variance:
/// `((2 * level / 5 + 2) * power * atk / def) / 50 + 2`, then same-type bonus
/// and effectiveness.
pub fn nominal_damage(
    level: u32,
    power: u32,
    attack: u32,
    defense: u32,
    same_type: bool,
    effectiveness: Effectiveness,
) -> f64 {
    let level_factor = (2 * level / LEVEL_FACTOR_DIVISOR + 2) as f64;
    let base = (level_factor * power as f64 * attack as f64 / defense.max(1) as f64)
        / DAMAGE_DIVISOR as f64
        + DAMAGE_FLAT_BONUS as f64;
    let stab = if same_type { SAME_TYPE_BONUS } else { 1.0 };
    base * stab * effectiveness.multiplier()
}

/// Damage of `mv` used by `attacker` against `defender`, with the variance roll.
///
/// Only meaningful for moves with power > 0. The result is floored at
/// `MIN_DAMAGE`.
pub fn calculate_damage(
    attacker: &Battler,
    defender: &Battler,
    mv: &Move,
    rng: &mut impl Rng,
) -> DamageRoll {
    let eff = effectiveness(mv.element, defender.element);
    let nominal = nominal_damage(
        attacker.level,
        mv.power,
        effective_stat(attacker, Stat::Attack),
        effective_stat(defender, Stat::Defense),
        attacker.element == Some(mv.element),
        eff,
    );
    let variance_percent = roll_variance(rng);
    let damage = ((nominal * variance_percent as f64 / 100.0) as u32).max(MIN_DAMAGE);

    DamageRoll {
        damage,
        effectiveness: eff,
        variance_percent,
    }
}

/// Expected damage ignoring variance and accuracy misses weighted in.
/// Used by the auto-pilot to rank moves.
pub fn expected_damage(attacker: &Battler, defender: &Battler, mv: &Move) -> f64 {
    if mv.is_status() {
        return 0.0;
    }
    let eff = effectiveness(mv.element, defender.element);
    let nominal = nominal_damage(
        attacker.level,
        mv.power,
        effective_stat(attacker, Stat::Attack),
        effective_stat(defender, Stat::Defense),
        attacker.element == Some(mv.element),
        eff,
    );
    let mid_variance =
        (DAMAGE_VARIANCE_MIN_PERCENT + DAMAGE_VARIANCE_MAX_PERCENT) as f64 / 200.0;
    nominal * mid_variance * mv.accuracy as f64 / 100.0
}

/// Recoil taken by a Struggling battler.
pub fn struggle_recoil(max_hp: u32) -> u32 {
    (max_hp / STRUGGLE_RECOIL_DIVISOR).max(1)
}

/// Burn chip damage per turn for a battler with `max_hp`.
pub fn burn_damage(max_hp: u32) -> u32 {
    (max_hp / BURN_DAMAGE_DIVISOR).max(1)
}

/// Escape chance in percent. Faster players escape more reliably and every
/// failed attempt makes the next one easier.
pub fn flee_chance(player_speed: u32, creature_speed: u32, failed_attempts: u32) -> u32 {
    let ratio =
        player_speed as u64 * FLEE_BASE_CHANCE_PERCENT as u64 / creature_speed.max(1) as u64;
    let bonus = failed_attempts as u64 * FLEE_CHANCE_PER_ATTEMPT as u64;
    (ratio + bonus).clamp(
        FLEE_MIN_CHANCE_PERCENT as u64,
        FLEE_MAX_CHANCE_PERCENT as u64,
    ) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::types::{BaseStats, ElementType, StatModifier};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn battler(
        element: Option<ElementType>,
        level: u32,
        attack: u32,
        defense: u32,
        speed: u32,
    ) -> Battler {
        Battler {
            name: "Tester".to_string(),
            element,
            level,
            stats: BaseStats {
                max_hp: 100,
                attack,
                defense,
                speed,
            },
            current_hp: 100,
            moves: Vec::new(),
            modifiers: Vec::new(),
            status: None,
        }
    }

    #[test]
    fn test_stage_multiplier() {
        assert_eq!(stage_multiplier(0), 1.0);
        assert_eq!(stage_multiplier(2), 2.0);
        assert_eq!(stage_multiplier(-2), 0.5);
        assert_eq!(stage_multiplier(6), 4.0);
        assert_eq!(stage_multiplier(12), 4.0);
    }

    #[test]
    fn test_effective_stat_applies_modifiers() {
        let mut b = battler(None, 5, 20, 20, 20);
        assert_eq!(effective_stat(&b, Stat::Defense), 20);
        b.modifiers.push(StatModifier {
            stat: Stat::Defense,
            stages: 2,
            turns_remaining: 2,
        });
        assert_eq!(effective_stat(&b, Stat::Defense), 40);
        assert_eq!(effective_stat(&b, Stat::Attack), 20);
    }

    #[test]
    fn test_first_to_act_tie_goes_to_player() {
        let player = battler(None, 5, 10, 10, 15);
        let creature = battler(Some(ElementType::Beast), 5, 10, 10, 15);
        assert_eq!(first_to_act(&player, &creature), Side::Player);

        let fast = battler(Some(ElementType::Beast), 5, 10, 10, 16);
        assert_eq!(first_to_act(&player, &fast), Side::Creature);
    }

    #[test]
    fn test_roll_chance_extremes() {
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);
        assert!(roll_chance(1, &mut low));
        assert!(!roll_chance(99, &mut high));
        assert!(!roll_chance(0, &mut low));
        assert!(roll_chance(100, &mut high));
    }

    #[test]
    fn test_roll_variance_bounds() {
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(roll_variance(&mut low), DAMAGE_VARIANCE_MIN_PERCENT);
        assert_eq!(roll_variance(&mut high), DAMAGE_VARIANCE_MAX_PERCENT);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = roll_variance(&mut rng);
            assert!((DAMAGE_VARIANCE_MIN_PERCENT..=DAMAGE_VARIANCE_MAX_PERCENT).contains(&v));
        }
    }

    #[test]
    fn test_pick_index_in_range() {
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(pick_index(4, &mut high), 3);
        let mut low = StepRng::new(0, 0);
        assert_eq!(pick_index(4, &mut low), 0);
    }

    #[test]
    fn test_damage_monotonic_in_power_and_attack() {
        let weak = nominal_damage(10, 40, 20, 20, false, Effectiveness::Neutral);
        let strong = nominal_damage(10, 80, 20, 20, false, Effectiveness::Neutral);
        let stronger = nominal_damage(10, 80, 40, 20, false, Effectiveness::Neutral);
        let tanky = nominal_damage(10, 80, 40, 80, false, Effectiveness::Neutral);
        assert!(strong > weak);
        assert!(stronger > strong);
        assert!(tanky < stronger);
    }

    #[test]
    fn test_damage_floor_is_one() {
        let attacker = battler(None, 1, 1, 1, 1);
        let defender = battler(Some(ElementType::Fire), 1, 1, 999, 1);
        let mv = Move::new("Ember", ElementType::Fire, 1, 100, 10, "flame");
        let mut rng = StepRng::new(0, 0);
        let roll = calculate_damage(&attacker, &defender, &mv, &mut rng);
        assert_eq!(roll.damage, MIN_DAMAGE);
        assert_eq!(roll.effectiveness, Effectiveness::NotVeryEffective);
    }

    #[test]
    fn test_effectiveness_scales_damage() {
        let attacker = battler(None, 20, 40, 40, 10);
        let fire = battler(Some(ElementType::Fire), 20, 40, 40, 10);
        let grass = battler(Some(ElementType::Grass), 20, 40, 40, 10);
        let mv = Move::new("Water Gun", ElementType::Water, 40, 100, 25, "splash");

        let mut rng = StepRng::new(u64::MAX, 0);
        let vs_fire = calculate_damage(&attacker, &fire, &mv, &mut rng);
        let vs_grass = calculate_damage(&attacker, &grass, &mv, &mut rng);
        assert_eq!(vs_fire.effectiveness, Effectiveness::SuperEffective);
        assert_eq!(vs_grass.effectiveness, Effectiveness::NotVeryEffective);
        assert!(vs_fire.damage > vs_grass.damage * 3);
    }

    #[test]
    fn test_struggle_recoil_and_burn_damage() {
        assert_eq!(struggle_recoil(100), 25);
        assert_eq!(struggle_recoil(2), 1);
        assert_eq!(burn_damage(160), 10);
        assert_eq!(burn_damage(5), 1);
    }

    #[test]
    fn test_flee_chance_scales_with_speed() {
        assert_eq!(flee_chance(20, 20, 0), 50);
        assert!(flee_chance(40, 20, 0) > flee_chance(20, 20, 0));
        assert_eq!(flee_chance(1, 100, 0), FLEE_MIN_CHANCE_PERCENT);
        assert_eq!(flee_chance(500, 10, 0), FLEE_MAX_CHANCE_PERCENT);
        assert_eq!(flee_chance(20, 20, 2), 70);
    }
}

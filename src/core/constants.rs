//! Balance constants shared by the combat core, progression and simulator.
//!
//! All core balance numbers are defined here. Change once, test everywhere.

// =============================================================================
// DAMAGE FORMULA
// =============================================================================

/// Divisor applied to the attacker's level in the level factor `2 * L / 5 + 2`.
pub const LEVEL_FACTOR_DIVISOR: u32 = 5;

/// Divisor applied to `level_factor * power * atk / def`.
pub const DAMAGE_DIVISOR: u32 = 50;

/// Flat damage added after the divisor.
pub const DAMAGE_FLAT_BONUS: u32 = 2;

/// Lower bound of the random damage band, in percent of the nominal roll.
pub const DAMAGE_VARIANCE_MIN_PERCENT: u32 = 85;

/// Upper bound (inclusive) of the random damage band.
pub const DAMAGE_VARIANCE_MAX_PERCENT: u32 = 100;

/// Multiplier when the attacker shares the move's element.
pub const SAME_TYPE_BONUS: f64 = 1.5;

/// Minimum damage of any connecting attack.
pub const MIN_DAMAGE: u32 = 1;

// =============================================================================
// STAT STAGES
// =============================================================================

/// Stat stages are clamped to `[-MAX_STAT_STAGE, MAX_STAT_STAGE]`.
pub const MAX_STAT_STAGE: i8 = 6;

// =============================================================================
// STRUGGLE
// =============================================================================

pub const STRUGGLE_POWER: u32 = 50;

/// Recoil taken by the user: `max_hp / STRUGGLE_RECOIL_DIVISOR` (min 1).
pub const STRUGGLE_RECOIL_DIVISOR: u32 = 4;

// =============================================================================
// STATUS
// =============================================================================

/// Burn chip damage per turn: `max_hp / BURN_DAMAGE_DIVISOR` (min 1).
pub const BURN_DAMAGE_DIVISOR: u32 = 16;

// =============================================================================
// DEFEND
// =============================================================================

pub const DEFEND_STAGES: i8 = 2;

/// Number of the player's own subsequent actions the boost stays active for.
pub const DEFEND_DURATION_TURNS: u8 = 2;

// =============================================================================
// FLEE
// =============================================================================

/// Escape chance at equal speed.
pub const FLEE_BASE_CHANCE_PERCENT: u32 = 50;

/// Added to the escape chance for every failed attempt in the same encounter.
pub const FLEE_CHANCE_PER_ATTEMPT: u32 = 10;

pub const FLEE_MIN_CHANCE_PERCENT: u32 = 10;
pub const FLEE_MAX_CHANCE_PERCENT: u32 = 95;

// =============================================================================
// LEVELING & PROGRESSION
// =============================================================================

/// XP to next level = XP_CURVE_BASE * level^XP_CURVE_EXPONENT.
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

pub const STARTING_LEVEL: u32 = 1;

/// Player stat curve: stat = BASE + PER_LEVEL * level.
pub const PLAYER_BASE_HP: u32 = 40;
pub const PLAYER_HP_PER_LEVEL: u32 = 8;
pub const PLAYER_BASE_ATTACK: u32 = 10;
pub const PLAYER_ATTACK_PER_LEVEL: u32 = 3;
pub const PLAYER_BASE_DEFENSE: u32 = 8;
pub const PLAYER_DEFENSE_PER_LEVEL: u32 = 2;
pub const PLAYER_BASE_SPEED: u32 = 10;
pub const PLAYER_SPEED_PER_LEVEL: u32 = 2;

/// Maximum number of moves a battler carries into an encounter.
pub const MAX_KNOWN_MOVES: usize = 4;

// =============================================================================
// REWARDS
// =============================================================================

pub const WIN_XP_BASE: u64 = 20;
pub const WIN_XP_PER_CREATURE_LEVEL: u64 = 12;

/// Bonus multiplier when the defeated creature out-levels the player.
pub const UNDERDOG_XP_MULTIPLIER: f64 = 1.25;

// =============================================================================
// CREATURE SPAWNING
// =============================================================================

/// Spawned creatures land within +/- this many levels of the player.
pub const SPAWN_LEVEL_SPREAD: u32 = 2;

// =============================================================================
// SAVE FILE
// =============================================================================

/// Magic header of the progression save file ("BAGSPROG" + version byte).
pub const SAVE_VERSION_MAGIC: u64 = 0x4241_4753_5052_4F01;

// =============================================================================
// SIMULATOR
// =============================================================================

/// The auto-pilot considers fleeing below this share of max HP.
pub const AUTOPILOT_FLEE_HP_PERCENT: u32 = 20;

/// ...but only against creatures at least this many levels above the player.
pub const AUTOPILOT_FLEE_LEVEL_GAP: u32 = 3;

/// Actions after which a simulated encounter is abandoned as stalled.
pub const SIM_MAX_ACTIONS_PER_ENCOUNTER: u32 = 500;

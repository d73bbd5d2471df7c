//! Scripted player decisions for simulated encounters.

use crate::combat::logic::{must_struggle, MoveSelection, TurnAction};
use crate::combat::math::expected_damage;
use crate::combat::types::EncounterState;
use crate::core::constants::{AUTOPILOT_FLEE_HP_PERCENT, AUTOPILOT_FLEE_LEVEL_GAP};

/// Picks the player's action for the next round.
///
/// Flees when badly hurt against a much stronger creature, otherwise uses
/// the usable move with the highest expected damage. Struggles when forced.
pub fn choose_action(state: &EncounterState) -> TurnAction {
    let player = &state.player;
    let creature = &state.creature;

    let low_hp = player.current_hp * 100 < player.max_hp() * AUTOPILOT_FLEE_HP_PERCENT;
    let outmatched = creature.level >= player.level + AUTOPILOT_FLEE_LEVEL_GAP;
    if low_hp && outmatched {
        return TurnAction::Flee;
    }

    if must_struggle(state) {
        return TurnAction::UseMove(MoveSelection::Struggle);
    }

    // Ties keep the earliest slot.
    let mut best: Option<(usize, f64)> = None;
    for slot in player.usable_move_slots() {
        let score = expected_damage(player, creature, &player.moves[slot]);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((slot, score));
        }
    }

    match best {
        Some((slot, _)) => TurnAction::UseMove(MoveSelection::Known(slot)),
        None => TurnAction::UseMove(MoveSelection::Struggle),
    }
}

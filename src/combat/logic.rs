use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{CombatResult, EncounterError};
use super::log::LogEntry;
use super::math::{
    calculate_damage, burn_damage, effective_stat, first_to_act, flee_chance, pick_index,
    roll_chance, roll_hit, struggle_recoil,
};
use super::moves::struggle;
use super::types::*;
use crate::core::constants::{DEFEND_DURATION_TURNS, DEFEND_STAGES};

/// Which move the acting side uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveSelection {
    /// Index into the battler's move list.
    Known(usize),
    /// Only legal when every known move is at 0 PP.
    Struggle,
}

/// A full player decision for one round, resolved by `resolve_turn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAction {
    UseMove(MoveSelection),
    Defend,
    Flee,
}

/// Starts an encounter: full HP and PP on both sides, empty modifiers.
pub fn create_encounter(
    creature: &Creature,
    player: &PlayerBattleStats,
) -> CombatResult<EncounterState> {
    if creature.stats.max_hp == 0 {
        return Err(EncounterError::InvalidMaxHp {
            side: Side::Creature,
        });
    }
    if player.stats.max_hp == 0 {
        return Err(EncounterError::InvalidMaxHp { side: Side::Player });
    }

    let mut state = EncounterState {
        creature: Battler::from_creature(creature),
        creature_sprite: creature.sprite.clone(),
        player: Battler::from_player(player),
        battle_log: Vec::new(),
        result: None,
        creature_goes_first: false,
        turn: 0,
        flee_attempts: 0,
    };
    state.creature_goes_first = first_to_act(&state.player, &state.creature) == Side::Creature;
    state.push_log(LogEntry::EncounterStarted {
        creature: creature.name.clone(),
        level: creature.level,
    });

    debug!(
        creature = %creature.name,
        creature_level = creature.level,
        player_level = player.level,
        "encounter created"
    );
    Ok(state)
}

/// Resolves the player's move. Does not run the creature's turn; the caller
/// reads `creature_goes_first` to sequence the two.
pub fn execute_player_move(
    state: &EncounterState,
    selection: MoveSelection,
    rng: &mut impl Rng,
) -> CombatResult<EncounterState> {
    ensure_active(state)?;
    let slot = resolve_selection(&state.player, selection)?;

    let mut next = state.clone();
    next.creature_goes_first = first_to_act(&next.player, &next.creature) == Side::Creature;
    perform_move(&mut next, Side::Player, slot, rng);
    Ok(next)
}

/// Resolves one creature action. The creature picks uniformly at random among
/// its moves with PP left, or Struggles when none remain.
pub fn execute_creature_turn(
    state: &EncounterState,
    rng: &mut impl Rng,
) -> CombatResult<EncounterState> {
    ensure_active(state)?;

    let mut next = state.clone();
    let slot = choose_creature_move(&next.creature, rng);
    perform_move(&mut next, Side::Creature, slot, rng);
    Ok(next)
}

/// Raises the player's defense for a few turns. Costs no PP.
pub fn execute_player_defend(state: &EncounterState) -> CombatResult<EncounterState> {
    ensure_active(state)?;

    let mut next = state.clone();
    next.turn += 1;
    let existing = next.player.modifiers.len();
    next.player.modifiers.push(StatModifier {
        stat: Stat::Defense,
        stages: DEFEND_STAGES,
        turns_remaining: DEFEND_DURATION_TURNS,
    });
    next.push_log(LogEntry::Defended {
        stages: DEFEND_STAGES,
        turns: DEFEND_DURATION_TURNS,
    });
    debug!(turn = next.turn, "player defends");

    end_action(&mut next, Side::Player, existing);
    resolve_result(&mut next, Side::Player);
    Ok(next)
}

/// Attempts to escape. On failure the encounter continues and the creature
/// gets a free turn, composed by the caller.
pub fn execute_player_flee(
    state: &EncounterState,
    rng: &mut impl Rng,
) -> CombatResult<EncounterState> {
    ensure_active(state)?;

    let mut next = state.clone();
    next.turn += 1;
    let chance = flee_chance(
        effective_stat(&next.player, Stat::Speed),
        effective_stat(&next.creature, Stat::Speed),
        next.flee_attempts,
    );

    if roll_chance(chance, rng) {
        next.push_log(LogEntry::FleeSucceeded { chance });
        finish(&mut next, EncounterResult::Flee);
    } else {
        next.flee_attempts += 1;
        next.push_log(LogEntry::FleeFailed { chance });
        debug!(chance, attempts = next.flee_attempts, "flee failed");
        let existing = next.player.modifiers.len();
        end_action(&mut next, Side::Player, existing);
        resolve_result(&mut next, Side::Player);
    }
    Ok(next)
}

/// Resolves a whole round: the player's decision plus the creature's reply, in
/// the right order. Defend and Flee always go before the creature; moves are
/// ordered by speed. Stops as soon as the encounter ends.
pub fn resolve_turn(
    state: &EncounterState,
    action: TurnAction,
    rng: &mut impl Rng,
) -> CombatResult<EncounterState> {
    ensure_active(state)?;

    match action {
        TurnAction::Defend => {
            let next = execute_player_defend(state)?;
            creature_reply(next, rng)
        }
        TurnAction::Flee => {
            let next = execute_player_flee(state, rng)?;
            creature_reply(next, rng)
        }
        TurnAction::UseMove(selection) => {
            resolve_selection(&state.player, selection)?;
            let creature_first = first_to_act(&state.player, &state.creature) == Side::Creature;

            let mut next = if creature_first {
                let after_creature = execute_creature_turn(state, rng)?;
                if after_creature.is_over() {
                    after_creature
                } else {
                    execute_player_move(&after_creature, selection, rng)?
                }
            } else {
                creature_reply(execute_player_move(state, selection, rng)?, rng)?
            };
            next.creature_goes_first = creature_first;
            Ok(next)
        }
    }
}

/// Slots of the player's moves that still have PP.
pub fn available_moves(state: &EncounterState) -> Vec<usize> {
    state.player.usable_move_slots()
}

/// True when Struggle is the only legal attack left.
pub fn must_struggle(state: &EncounterState) -> bool {
    !state.player.has_usable_move()
}

/// The creature's move policy: uniform among usable moves, `None` = Struggle.
pub fn choose_creature_move(creature: &Battler, rng: &mut impl Rng) -> Option<usize> {
    let usable = creature.usable_move_slots();
    if usable.is_empty() {
        None
    } else {
        Some(usable[pick_index(usable.len(), rng)])
    }
}

fn creature_reply(state: EncounterState, rng: &mut impl Rng) -> CombatResult<EncounterState> {
    if state.is_over() {
        Ok(state)
    } else {
        execute_creature_turn(&state, rng)
    }
}

fn ensure_active(state: &EncounterState) -> CombatResult<()> {
    match state.result {
        Some(result) => Err(EncounterError::EncounterOver { result }),
        None => Ok(()),
    }
}

/// Validates a selection against the battler's moves. `None` means Struggle.
fn resolve_selection(battler: &Battler, selection: MoveSelection) -> CombatResult<Option<usize>> {
    match selection {
        MoveSelection::Known(slot) => {
            let mv = battler
                .moves
                .get(slot)
                .ok_or(EncounterError::UnknownMove { slot })?;
            if !mv.is_usable() {
                return Err(EncounterError::NoPpRemaining {
                    name: mv.name.clone(),
                });
            }
            Ok(Some(slot))
        }
        MoveSelection::Struggle => {
            if battler.has_usable_move() {
                return Err(EncounterError::StruggleNotAllowed);
            }
            Ok(None)
        }
    }
}

/// One attack by `side`. `slot` is pre-validated; `None` is Struggle.
fn perform_move(state: &mut EncounterState, side: Side, slot: Option<usize>, rng: &mut impl Rng) {
    state.turn += 1;
    let target = side.opponent();
    let existing = state.battler(side).modifiers.len();

    let mv = match slot {
        Some(slot) => {
            let known = &mut state.battler_mut(side).moves[slot];
            known.pp = known.pp.saturating_sub(1);
            known.clone()
        }
        None => struggle(),
    };
    state.push_log(LogEntry::MoveUsed {
        side,
        move_name: mv.name.clone(),
    });

    if !roll_hit(mv.accuracy, rng) {
        debug!(?side, move_name = %mv.name, "move missed");
        state.push_log(LogEntry::MoveMissed {
            side,
            move_name: mv.name.clone(),
        });
    } else {
        if !mv.is_status() {
            let roll = calculate_damage(state.battler(side), state.battler(target), &mv, rng);
            let defender = state.battler_mut(target);
            defender.take_damage(roll.damage);
            let remaining_hp = defender.current_hp;
            debug!(
                ?side,
                move_name = %mv.name,
                damage = roll.damage,
                remaining_hp,
                "move hit"
            );
            state.push_log(LogEntry::DamageDealt {
                attacker: side,
                target,
                amount: roll.damage,
                remaining_hp,
            });
            if !roll.effectiveness.is_neutral() {
                state.push_log(LogEntry::Effectiveness {
                    target,
                    effectiveness: roll.effectiveness,
                });
            }
        }

        if let Some(effect) = mv.effect {
            apply_effect(state, side, effect, rng);
        }

        if slot.is_none() {
            let user = state.battler_mut(side);
            let recoil = struggle_recoil(user.max_hp());
            user.take_damage(recoil);
            let remaining_hp = user.current_hp;
            state.push_log(LogEntry::Recoil {
                side,
                amount: recoil,
                remaining_hp,
            });
        }
    }

    if slot.is_some() && mv.pp == 0 {
        state.push_log(LogEntry::OutOfPp {
            side,
            move_name: mv.name.clone(),
        });
    }

    end_action(state, side, existing);
    resolve_result(state, side);
}

fn apply_effect(state: &mut EncounterState, user: Side, effect: MoveEffect, rng: &mut impl Rng) {
    match effect {
        MoveEffect::Burn { chance } => {
            let target = user.opponent();
            let defender = state.battler(target);
            if defender.is_fainted() || defender.status.is_some() {
                return;
            }
            if roll_chance(chance as u32, rng) {
                state.battler_mut(target).status = Some(StatusCondition::Burn);
                debug!(?target, "burn inflicted");
                state.push_log(LogEntry::StatusInflicted {
                    target,
                    status: StatusCondition::Burn,
                });
            }
        }
        MoveEffect::StatChange {
            target,
            stat,
            stages,
            turns,
        } => {
            let target = match target {
                EffectTarget::User => user,
                EffectTarget::Opponent => user.opponent(),
            };
            if state.battler(target).is_fainted() {
                return;
            }
            state.battler_mut(target).modifiers.push(StatModifier {
                stat,
                stages,
                turns_remaining: turns,
            });
            state.push_log(LogEntry::StatChanged {
                target,
                stat,
                stages,
                turns,
            });
        }
    }
}

/// End-of-action upkeep for the side that just acted: modifiers that existed
/// before this action tick down, then burn chips away. Skipped once anyone has
/// fainted.
fn end_action(state: &mut EncounterState, side: Side, existing: usize) {
    if state.player.is_fainted() || state.creature.is_fainted() {
        return;
    }

    let battler = state.battler_mut(side);
    let mut expired = Vec::new();
    let mut kept = Vec::with_capacity(battler.modifiers.len());
    for (i, mut modifier) in battler.modifiers.drain(..).enumerate() {
        if i < existing {
            modifier.turns_remaining = modifier.turns_remaining.saturating_sub(1);
            if modifier.turns_remaining == 0 {
                expired.push(modifier.stat);
                continue;
            }
        }
        kept.push(modifier);
    }
    battler.modifiers = kept;
    for stat in expired {
        state.push_log(LogEntry::StatModifierExpired { target: side, stat });
    }

    let battler = state.battler_mut(side);
    if battler.status == Some(StatusCondition::Burn) {
        let amount = burn_damage(battler.max_hp());
        battler.take_damage(amount);
        let remaining_hp = battler.current_hp;
        debug!(?side, amount, remaining_hp, "burn damage");
        state.push_log(LogEntry::StatusDamage {
            target: side,
            status: StatusCondition::Burn,
            amount,
            remaining_hp,
        });
    }
}

/// Checks for a knockout after `actor`'s action. The actor's target is checked
/// first, so an attack that lands a KO wins even if recoil downs the user.
fn resolve_result(state: &mut EncounterState, actor: Side) {
    debug_assert!(state.player.current_hp <= state.player.max_hp());
    debug_assert!(state.creature.current_hp <= state.creature.max_hp());

    for side in [actor.opponent(), actor] {
        if state.battler(side).is_fainted() {
            state.push_log(LogEntry::Fainted { side });
            let result = match side {
                Side::Creature => EncounterResult::Win,
                Side::Player => EncounterResult::Lose,
            };
            finish(state, result);
            return;
        }
    }
}

fn finish(state: &mut EncounterState, result: EncounterResult) {
    state.result = Some(result);
    state.push_log(LogEntry::EncounterEnded { result });
    info!(
        %result,
        turns = state.turn,
        creature = %state.creature.name,
        "encounter ended"
    );
}

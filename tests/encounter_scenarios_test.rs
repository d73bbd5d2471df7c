//! Integration test: Encounter scenarios
//!
//! Drives whole encounters through the public API and checks the rules that
//! must hold for every fight: knockouts, Struggle, fleeing, burn and the
//! finality of a finished encounter.

use encounter::combat::logic::{
    create_encounter, execute_creature_turn, execute_player_defend, execute_player_flee,
    execute_player_move, resolve_turn, MoveSelection, TurnAction,
};
use encounter::combat::moves::{move_data, STRUGGLE_NAME};
use encounter::combat::{
    BaseStats, Creature, ElementType, EncounterError, EncounterResult, EncounterState, LogEntry,
    Move, MoveEffect, PlayerBattleStats, Side, StatusCondition,
};
use encounter::simulator::choose_action;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Every chance below 100 fails.
fn unlucky() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn stats(max_hp: u32, attack: u32, defense: u32, speed: u32) -> BaseStats {
    BaseStats {
        max_hp,
        attack,
        defense,
        speed,
    }
}

fn creature(level: u32, base: BaseStats, moves: Vec<Move>) -> Creature {
    Creature {
        name: "Test Critter".to_string(),
        element: ElementType::Grass,
        level,
        stats: base,
        moves,
        sprite: "/sprites/test.png".to_string(),
    }
}

fn player(level: u32, base: BaseStats, moves: Vec<Move>) -> PlayerBattleStats {
    PlayerBattleStats {
        level,
        stats: base,
        moves,
    }
}

fn harden_only() -> Vec<Move> {
    vec![move_data("Harden").unwrap()]
}

// =============================================================================
// Knockouts
// =============================================================================

#[test]
fn test_guaranteed_win_against_weak_creature() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let finisher = Move::new("Meteor Fist", ElementType::Normal, 250, 100, 5, "impact");
    let state = create_encounter(
        &creature(1, stats(10, 5, 5, 5), harden_only()),
        &player(50, stats(440, 160, 108, 110), vec![finisher]),
    )
    .unwrap();

    let next = resolve_turn(
        &state,
        TurnAction::UseMove(MoveSelection::Known(0)),
        &mut rng,
    )
    .unwrap();

    assert_eq!(next.result, Some(EncounterResult::Win));
    assert_eq!(next.creature.current_hp, 0);
    assert!(!next.creature_goes_first);
    assert!(next.battle_log.contains(&LogEntry::Fainted {
        side: Side::Creature
    }));
    assert_eq!(
        next.battle_log.last(),
        Some(&LogEntry::EncounterEnded {
            result: EncounterResult::Win
        })
    );
    // The creature never got to act.
    assert!(!next
        .battle_log
        .iter()
        .any(|e| matches!(e, LogEntry::MoveUsed { side: Side::Creature, .. })));
}

#[test]
fn test_overkill_damage_clamps_hp_at_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let finisher = Move::new("Meteor Fist", ElementType::Normal, 250, 100, 5, "impact");
    let state = create_encounter(
        &creature(1, stats(1, 5, 1, 5), harden_only()),
        &player(50, stats(440, 500, 108, 110), vec![finisher]),
    )
    .unwrap();

    let next = execute_player_move(&state, MoveSelection::Known(0), &mut rng).unwrap();
    assert_eq!(next.creature.current_hp, 0);
    let dealt = next.battle_log.iter().find_map(|e| match e {
        LogEntry::DamageDealt {
            amount,
            remaining_hp,
            ..
        } => Some((*amount, *remaining_hp)),
        _ => None,
    });
    let (amount, remaining_hp) = dealt.expect("damage should be logged");
    assert!(amount > 1);
    assert_eq!(remaining_hp, 0);
}

// =============================================================================
// Struggle
// =============================================================================

#[test]
fn test_struggle_fallback_when_out_of_pp() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut state = create_encounter(
        &creature(5, stats(500, 5, 50, 5), harden_only()),
        &player(5, stats(80, 25, 18, 20), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();
    state.player.moves[0].pp = 0;

    assert!(matches!(
        execute_player_move(&state, MoveSelection::Known(0), &mut rng),
        Err(EncounterError::NoPpRemaining { .. })
    ));

    let next = execute_player_move(&state, MoveSelection::Struggle, &mut rng).unwrap();
    assert!(next.battle_log.contains(&LogEntry::MoveUsed {
        side: Side::Player,
        move_name: STRUGGLE_NAME.to_string(),
    }));
    // Recoil is a quarter of max HP.
    assert!(next.battle_log.contains(&LogEntry::Recoil {
        side: Side::Player,
        amount: 20,
        remaining_hp: 60,
    }));
    assert_eq!(next.player.current_hp, 60);
    assert_eq!(next.player.moves[0].pp, 0);
    assert!(next.creature.current_hp < 500);
}

#[test]
fn test_struggle_rejected_while_pp_remains() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let state = create_encounter(
        &creature(5, stats(50, 5, 5, 5), harden_only()),
        &player(5, stats(80, 25, 18, 20), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    assert!(matches!(
        resolve_turn(
            &state,
            TurnAction::UseMove(MoveSelection::Struggle),
            &mut rng
        ),
        Err(EncounterError::StruggleNotAllowed)
    ));
}

// =============================================================================
// Fleeing
// =============================================================================

#[test]
fn test_failed_flee_gives_creature_a_free_turn() {
    let mut rng = unlucky();
    let state = create_encounter(
        &creature(5, stats(50, 5, 5, 200), vec![move_data("Tackle").unwrap()]),
        &player(5, stats(500, 25, 50, 1), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    let next = resolve_turn(&state, TurnAction::Flee, &mut rng).unwrap();
    assert!(next.result.is_none());
    assert_eq!(next.flee_attempts, 1);

    let round = next.log_since(state.battle_log.len());
    assert_eq!(round[0], LogEntry::FleeFailed { chance: 10 });
    assert!(matches!(
        round[1],
        LogEntry::MoveUsed {
            side: Side::Creature,
            ..
        }
    ));
    assert!(next.player.current_hp < 500);
}

#[test]
fn test_flee_chance_improves_after_failure() {
    let mut rng = unlucky();
    let state = create_encounter(
        &creature(5, stats(50, 5, 5, 200), harden_only()),
        &player(5, stats(500, 25, 50, 80), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    let first = execute_player_flee(&state, &mut rng).unwrap();
    assert_eq!(
        first.battle_log.last(),
        Some(&LogEntry::FleeFailed { chance: 20 })
    );
    let second = execute_player_flee(&first, &mut rng).unwrap();
    assert_eq!(
        second.battle_log.last(),
        Some(&LogEntry::FleeFailed { chance: 30 })
    );
}

#[test]
fn test_successful_flee_ends_encounter() {
    let mut rng = StepRng::new(0, 0);
    let state = create_encounter(
        &creature(5, stats(50, 5, 5, 5), harden_only()),
        &player(5, stats(80, 25, 18, 20), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    let next = resolve_turn(&state, TurnAction::Flee, &mut rng).unwrap();
    assert_eq!(next.result, Some(EncounterResult::Flee));
    assert_eq!(next.creature.current_hp, next.creature.max_hp());
}

// =============================================================================
// Burn
// =============================================================================

#[test]
fn test_burn_persists_and_ticks_every_creature_action() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let scorch = Move::new("Scorch", ElementType::Fire, 10, 100, 10, "flame")
        .with_effect(MoveEffect::Burn { chance: 100 });
    let state = create_encounter(
        &creature(5, stats(160, 5, 200, 5), harden_only()),
        &player(5, stats(1000, 10, 50, 50), vec![scorch]),
    )
    .unwrap();

    let mut state = execute_player_move(&state, MoveSelection::Known(0), &mut rng).unwrap();
    assert_eq!(state.creature.status, Some(StatusCondition::Burn));

    for _ in 0..5 {
        let hp_before = state.creature.current_hp;
        let log_before = state.battle_log.len();

        state = execute_creature_turn(&state, &mut rng).unwrap();
        assert_eq!(state.creature.status, Some(StatusCondition::Burn));
        assert_eq!(state.creature.current_hp, hp_before - 10);
        assert!(state
            .log_since(log_before)
            .contains(&LogEntry::StatusDamage {
                target: Side::Creature,
                status: StatusCondition::Burn,
                amount: 10,
                remaining_hp: hp_before - 10,
            }));

        state = execute_player_defend(&state).unwrap();
    }
    assert!(state.result.is_none());
}

fn scorch(chance: u8) -> Move {
    Move::new("Scorch", ElementType::Fire, 10, 100, 10, "flame")
        .with_effect(MoveEffect::Burn { chance })
}

#[test]
fn test_burned_player_takes_burn_on_defend_and_failed_flee() {
    let mut rng = unlucky();
    let state = create_encounter(
        &creature(5, stats(100, 5, 50, 200), vec![scorch(100)]),
        &player(5, stats(160, 10, 200, 1), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    let burned = execute_creature_turn(&state, &mut rng).unwrap();
    assert_eq!(burned.player.status, Some(StatusCondition::Burn));
    assert!(burned.battle_log.contains(&LogEntry::StatusInflicted {
        target: Side::Player,
        status: StatusCondition::Burn,
    }));
    // No burn tick on the creature's own action.
    assert!(!burned
        .battle_log
        .iter()
        .any(|e| matches!(e, LogEntry::StatusDamage { .. })));

    let hp = burned.player.current_hp;
    let defended = execute_player_defend(&burned).unwrap();
    assert_eq!(defended.player.current_hp, hp - 10);
    assert_eq!(
        defended.battle_log.last(),
        Some(&LogEntry::StatusDamage {
            target: Side::Player,
            status: StatusCondition::Burn,
            amount: 10,
            remaining_hp: hp - 10,
        })
    );

    let stuck = execute_player_flee(&defended, &mut rng).unwrap();
    assert!(stuck.result.is_none());
    assert_eq!(stuck.flee_attempts, 1);
    assert_eq!(stuck.player.current_hp, hp - 20);
    assert_eq!(stuck.player.status, Some(StatusCondition::Burn));
}

#[test]
fn test_failed_burn_roll_leaves_target_unburned() {
    let mut rng = unlucky();
    let state = create_encounter(
        &creature(5, stats(100, 5, 50, 200), vec![scorch(10)]),
        &player(5, stats(160, 10, 200, 1), vec![move_data("Tackle").unwrap()]),
    )
    .unwrap();

    let next = execute_creature_turn(&state, &mut rng).unwrap();
    assert!(next.player.current_hp < 160, "the attack itself still lands");
    assert_eq!(next.player.status, None);
    assert!(!next
        .battle_log
        .iter()
        .any(|e| matches!(e, LogEntry::StatusInflicted { .. })));

    let defended = execute_player_defend(&next).unwrap();
    assert_eq!(defended.player.current_hp, next.player.current_hp);
}

// =============================================================================
// Finality and monotonicity
// =============================================================================

fn finished_win() -> EncounterState {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let finisher = Move::new("Meteor Fist", ElementType::Normal, 250, 100, 5, "impact");
    let state = create_encounter(
        &creature(1, stats(10, 5, 5, 5), harden_only()),
        &player(50, stats(440, 160, 108, 110), vec![finisher]),
    )
    .unwrap();
    execute_player_move(&state, MoveSelection::Known(0), &mut rng).unwrap()
}

#[test]
fn test_finished_encounter_rejects_every_action() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let done = finished_win();
    let over = |r: Result<EncounterState, EncounterError>| {
        matches!(
            r,
            Err(EncounterError::EncounterOver {
                result: EncounterResult::Win
            })
        )
    };

    assert!(over(execute_player_move(
        &done,
        MoveSelection::Known(0),
        &mut rng
    )));
    assert!(over(execute_creature_turn(&done, &mut rng)));
    assert!(over(execute_player_defend(&done)));
    assert!(over(execute_player_flee(&done, &mut rng)));
    assert!(over(resolve_turn(&done, TurnAction::Defend, &mut rng)));
}

#[test]
fn test_seeded_fights_keep_pp_and_log_monotonic() {
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let wild = encounter::combat::creatures::spawn_creature(8, &mut rng);
        let hero = player(
            8,
            stats(104, 34, 24, 26),
            encounter::combat::moves::player_moves_for_level(8),
        );
        let mut state = create_encounter(&wild, &hero).unwrap();

        let mut rounds = 0;
        while !state.is_over() && rounds < 300 {
            let next = resolve_turn(&state, choose_action(&state), &mut rng).unwrap();

            assert!(next.battle_log.starts_with(&state.battle_log));
            for (before, after) in state
                .player
                .moves
                .iter()
                .chain(&state.creature.moves)
                .zip(next.player.moves.iter().chain(&next.creature.moves))
            {
                assert!(after.pp <= before.pp, "PP increased for {}", after.name);
                assert!(after.pp <= after.max_pp);
            }
            assert!(next.player.current_hp <= next.player.max_hp());
            assert!(next.creature.current_hp <= next.creature.max_hp());

            state = next;
            rounds += 1;
        }
        assert!(state.is_over(), "seed {} did not finish", seed);
    }
}

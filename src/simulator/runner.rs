//! Main simulation runner.
//!
//! Drives real encounters through `resolve_turn` and commits each outcome
//! through `PlayerProgression`, so results match actual gameplay.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::autopilot::choose_action;
use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::creatures::spawn_creature;
use crate::combat::error::EncounterError;
use crate::combat::logic::{create_encounter, resolve_turn};
use crate::combat::types::{EncounterResult, EncounterState};
use crate::progression::error::ProgressionError;
use crate::progression::record::ProgressionRecord;
use crate::progression::store::MemoryStore;
use crate::progression::tracker::PlayerProgression;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("encounter failed: {0}")]
    Encounter(#[from] EncounterError),

    #[error("progression failed: {0}")]
    Progression(#[from] ProgressionError),
}

/// Statistics for a single simulated run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub total_xp: u64,
    pub wins: u32,
    pub losses: u32,
    pub flees: u32,
    /// Encounters abandoned after `max_actions_per_encounter`.
    pub stalled: u32,
    /// Player decisions across all finished encounters.
    pub total_rounds: u64,
}

impl RunStats {
    pub fn finished_encounters(&self) -> u32 {
        self.wins + self.losses + self.flees
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, SimError> {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng)?;
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                level = run.final_level,
                wins = run.wins,
                losses = run.losses,
                flees = run.flees,
                "run finished"
            );
        }
        all_runs.push(run);
    }

    Ok(SimReport::from_runs(all_runs, config))
}

/// Plays `encounters_per_run` encounters for one fresh player.
pub fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> Result<RunStats, SimError> {
    let record = ProgressionRecord {
        level: config.starting_level.max(1),
        ..ProgressionRecord::new(0)
    };
    let mut progression = PlayerProgression::open(MemoryStore::with_record(record))?;
    let mut stats = RunStats::default();

    for _ in 0..config.encounters_per_run {
        let creature = spawn_creature(progression.record().level, rng);
        let state = create_encounter(&creature, &progression.get_player_battle_stats())?;

        match play_encounter(state, config.max_actions_per_encounter, rng)? {
            (Some(finished), rounds) => {
                let outcome = progression.commit_encounter(&finished)?;
                stats.total_rounds += rounds as u64;
                match outcome.result {
                    EncounterResult::Win => stats.wins += 1,
                    EncounterResult::Lose => stats.losses += 1,
                    EncounterResult::Flee => stats.flees += 1,
                }
            }
            (None, _) => {
                warn!(creature = %creature.name, "encounter stalled");
                stats.stalled += 1;
            }
        }
    }

    stats.final_level = progression.record().level;
    stats.total_xp = progression.record().total_xp;
    Ok(stats)
}

/// Runs the auto-pilot until the encounter ends. Returns `None` for the state
/// when the action cap is hit first, plus the number of rounds played.
pub fn play_encounter(
    mut state: EncounterState,
    max_actions: u32,
    rng: &mut impl Rng,
) -> Result<(Option<EncounterState>, u32), SimError> {
    let mut rounds = 0;
    while !state.is_over() {
        if state.turn >= max_actions {
            return Ok((None, rounds));
        }
        let action = choose_action(&state);
        state = resolve_turn(&state, action, rng)?;
        rounds += 1;
    }

    debug!(result = ?state.result, rounds, "simulated encounter finished");
    Ok((Some(state), rounds))
}

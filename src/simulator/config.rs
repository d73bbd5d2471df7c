//! Simulation configuration.

use crate::core::constants::{SIM_MAX_ACTIONS_PER_ENCOUNTER, STARTING_LEVEL};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Encounters fought back to back in each run
    pub encounters_per_run: u32,

    /// Player level every run starts from
    pub starting_level: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Actions after which an encounter counts as stalled
    pub max_actions_per_encounter: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            encounters_per_run: 50,
            starting_level: STARTING_LEVEL,
            seed: None,
            max_actions_per_encounter: SIM_MAX_ACTIONS_PER_ENCOUNTER,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small config for quick balance checks.
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            encounters_per_run: 20,
            ..Default::default()
        }
    }

    /// Starts every run at `level` to test mid-game balance.
    pub fn at_level(level: u32) -> Self {
        Self {
            starting_level: level.max(STARTING_LEVEL),
            ..Default::default()
        }
    }
}

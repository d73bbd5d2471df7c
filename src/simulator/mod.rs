//! Encounter balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of scripted encounters to analyze:
//! - Win / loss / flee rates against level-appropriate creatures
//! - How long fights last
//! - How fast players level
//!
//! The simulator drives the real combat core and progression tracker, so
//! results match actual gameplay.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::choose_action;
pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{play_encounter, run_simulation, simulate_single_run, RunStats, SimError};

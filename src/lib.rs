//! BagsWorld Encounter Engine
//!
//! Turn-based creature encounters, the combat math behind them and the
//! persistent player progression they feed. Rendering and transport live
//! elsewhere; this crate only computes state.

pub mod combat;
pub mod core;
pub mod progression;
pub mod simulator;
pub mod utils;

//! Turn-based encounter engine: types, data tables and combat logic.

pub mod creatures;
pub mod error;
pub mod log;
pub mod logic;
pub mod math;
pub mod moves;
pub mod type_chart;
pub mod types;

pub use error::*;
pub use log::*;
pub use logic::*;
pub use type_chart::*;
pub use types::*;

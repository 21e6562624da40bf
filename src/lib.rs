//! Short-term rental feasibility calculator
//!
//! Derives effective revenue, management fee, owner net income and
//! per-unit pricing for a scenario under a chosen case, occupancy rate
//! and management fee rate, and renders the result in English or Arabic.

pub mod calculator;
pub mod catalog;
pub mod controls;
pub mod error;
pub mod format;
pub mod models;
pub mod report;

pub use calculator::{compute, compute_feasibility};
pub use catalog::Catalog;
pub use error::{FeasibilityError, Result};
pub use format::Locale;
pub use models::{CaseKind, Scenario, SimulationInput, SimulationResult};

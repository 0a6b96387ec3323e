//! Headless host for the DOLO backdrop effects.
//!
//! Loads `dolo.toml`, replays a JSON scenario of pointer, resize and scheme
//! events against the outline and grid on a deterministic frame clock, and
//! summarizes the run as a JSON report.

pub mod config;
pub mod report;
pub mod runtime;
pub mod scenario;

pub use config::DoloConfig;
pub use report::SimulationReport;
pub use runtime::{run_scenario, Backdrop};
pub use scenario::{Scenario, ScenarioStep};

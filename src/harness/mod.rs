/*!
 * Harness Module
 * Process isolation and outcome classification for scenarios
 */

pub mod outcome;
pub mod supervisor;

pub use outcome::{ScenarioOutcome, ScenarioRun};
pub use supervisor::{Supervisor, SCENARIO_FLAG};

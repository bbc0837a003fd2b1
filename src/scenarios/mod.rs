/*!
 * Scenarios Module
 * Fault-provoking stimuli and the in-process scenario runner
 */

pub mod runner;
pub mod stimulus;
pub mod types;

pub use runner::run_scenario;
pub use stimulus::provoke;
pub use types::{ScenarioInfo, ScenarioKind};

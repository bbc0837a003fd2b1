/*!
 * sigprobe
 * Fault-injection harness that captures and decodes kernel signal events
 */

pub mod core;
pub mod harness;
pub mod monitoring;
pub mod scenarios;
pub mod signals;

// Re-exports
pub use crate::core::{HarnessConfig, ProbeError, ProbeResult};
pub use harness::{ScenarioOutcome, ScenarioRun, Supervisor};
pub use monitoring::init_tracing;
pub use scenarios::{run_scenario, ScenarioKind};
pub use signals::{decode_and_render, HandlerRegistrar, Report, Signal, SignalEvent};

/*!
 * Monitoring Module
 * Structured logging for the supervisor and scenario processes
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, ScenarioSpan};

/*!
 * Core Module
 * Configuration, errors and limits shared by every component
 */

pub mod config;
pub mod errors;
pub mod limits;

pub use config::HarnessConfig;
pub use errors::{ProbeError, ProbeResult};

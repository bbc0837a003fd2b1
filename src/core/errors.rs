/*!
 * Error Types
 * Centralized error handling with thiserror and miette
 */

use crate::signals::Signal;
use miette::Diagnostic;
use nix::errno::Errno;
use thiserror::Error;

/// Harness operation result
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors raised while registering handlers, provoking stimuli or supervising
/// scenario processes
#[derive(Error, Debug, Diagnostic)]
pub enum ProbeError {
    #[error("Signal {0} cannot be caught")]
    #[diagnostic(
        code(registrar::uncatchable),
        help("SIGKILL and SIGSTOP always take their default action.")
    )]
    Uncatchable(Signal),

    #[error("Failed to install handler for {signal}: {source}")]
    #[diagnostic(
        code(registrar::sigaction_failed),
        help("The kernel refused the new disposition. Check the signal number.")
    )]
    Registration {
        signal: Signal,
        #[source]
        source: Errno,
    },

    #[error("Payload does not match signal {signo} with code {code}")]
    #[diagnostic(
        code(event::payload_mismatch),
        help("The payload variant is fixed by the (signal, code) pair.")
    )]
    PayloadMismatch { signo: i32, code: i32 },

    #[error("{step} failed: {source}")]
    #[diagnostic(code(scenario::setup_failed))]
    Setup {
        step: &'static str,
        #[source]
        source: Errno,
    },

    #[error("Failed to spawn scenario process: {0}")]
    #[diagnostic(
        code(harness::spawn_failed),
        help("Check that the harness binary path is correct and executable.")
    )]
    Spawn(#[source] std::io::Error),

    #[error("Failed to wait for scenario process: {0}")]
    #[diagnostic(code(harness::wait_failed))]
    Wait(#[source] std::io::Error),

    #[error("Invalid value for {key}: {value:?}")]
    #[diagnostic(
        code(config::invalid_value),
        help("Durations are given in whole milliseconds; flags accept 1/true/0/false.")
    )]
    InvalidConfig { key: &'static str, value: String },

    #[error("Cannot locate harness executable: {0}")]
    #[diagnostic(code(config::current_exe))]
    CurrentExe(#[source] std::io::Error),
}

impl ProbeError {
    /// Wrap a failed OS call made while preparing a stimulus
    pub fn setup(step: &'static str) -> impl FnOnce(Errno) -> Self {
        move |source| ProbeError::Setup { step, source }
    }
}

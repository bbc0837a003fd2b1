/*!
 * Harness Configuration
 *
 * Defaults come from `core::limits`; environment variables override them:
 * - SIGPROBE_TIMEOUT_MS: per-scenario bound enforced by the supervisor
 * - SIGPROBE_SIGIO_WAIT_MS: how long asynchronous stimuli wait for delivery
 * - SIGPROBE_TRACE_JSON: JSON log output (1/true)
 */

use super::errors::{ProbeError, ProbeResult};
use super::limits::*;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration shared by the supervisor and scenario processes
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Executable re-run in scenario mode for each isolated child
    pub program: PathBuf,

    /// Upper bound on one scenario process (default: 10s)
    pub scenario_timeout: Duration,

    /// Wait for SIGIO/SIGCHLD delivery before giving up (default: 2s)
    pub async_signal_wait: Duration,

    /// Emit logs as JSON
    pub trace_json: bool,
}

impl HarnessConfig {
    /// Defaults, re-running the current executable
    pub fn new() -> ProbeResult<Self> {
        let program = std::env::current_exe().map_err(ProbeError::CurrentExe)?;
        Ok(Self::with_program(program))
    }

    /// Defaults for an explicit harness executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scenario_timeout: DEFAULT_SCENARIO_TIMEOUT,
            async_signal_wait: DEFAULT_ASYNC_SIGNAL_WAIT,
            trace_json: false,
        }
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> ProbeResult<Self> {
        Self::new()?.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env<F>(mut self, lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SCENARIO_TIMEOUT) {
            self.scenario_timeout = parse_millis(ENV_SCENARIO_TIMEOUT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_ASYNC_SIGNAL_WAIT) {
            self.async_signal_wait = parse_millis(ENV_ASYNC_SIGNAL_WAIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TRACE_JSON) {
            self.trace_json = parse_flag(ENV_TRACE_JSON, &raw)?;
        }
        Ok(self)
    }

    pub fn scenario_timeout(mut self, timeout: Duration) -> Self {
        self.scenario_timeout = timeout;
        self
    }

    pub fn async_signal_wait(mut self, wait: Duration) -> Self {
        self.async_signal_wait = wait;
        self
    }
}

fn parse_millis(key: &'static str, raw: &str) -> ProbeResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ProbeError::InvalidConfig {
            key,
            value: raw.to_string(),
        })
}

fn parse_flag(key: &'static str, raw: &str) -> ProbeResult<bool> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        _ => Err(ProbeError::InvalidConfig {
            key,
            value: raw.to_string(),
        }),
    }
}

/*!
 * Scenario Supervisor
 * Runs each scenario in a fresh process with a bounded wait
 *
 * Isolation comes from re-executing the harness binary in scenario mode.
 * A scenario that faults, hangs or fails to set up never affects the next.
 */

use super::outcome::{ScenarioOutcome, ScenarioRun};
use crate::core::config::HarnessConfig;
use crate::core::errors::{ProbeError, ProbeResult};
use crate::core::limits::ENV_ASYNC_SIGNAL_WAIT;
use crate::monitoring::ScenarioSpan;
use crate::scenarios::ScenarioKind;
use std::io::Write;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{info, warn};

/// Command-line flag that switches the binary into scenario mode
pub const SCENARIO_FLAG: &str = "--scenario";

/// Spawns and reaps isolated scenario processes
pub struct Supervisor {
    config: HarnessConfig,
}

impl Supervisor {
    pub fn new(config: HarnessConfig) -> Self {
        info!(
            program = %config.program.display(),
            timeout_ms = config.scenario_timeout.as_millis() as u64,
            "Supervisor initialized"
        );
        Self { config }
    }

    /// Run one scenario to completion or timeout
    pub async fn run(&self, kind: ScenarioKind) -> ProbeResult<ScenarioRun> {
        let span = ScenarioSpan::new(kind);
        let start = Instant::now();

        let child = Command::new(&self.config.program)
            .arg(SCENARIO_FLAG)
            .arg(kind.name())
            .env(
                ENV_ASYNC_SIGNAL_WAIT,
                self.config.async_signal_wait.as_millis().to_string(),
            )
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(ProbeError::Spawn)?;

        if let Some(pid) = child.id() {
            span.record_pid(pid);
        }

        let waited =
            tokio::time::timeout(self.config.scenario_timeout, child.wait_with_output()).await;

        let (outcome, stdout) = match waited {
            Ok(Ok(output)) => (
                ScenarioOutcome::from_status(output.status),
                String::from_utf8_lossy(&output.stdout).into_owned(),
            ),
            Ok(Err(e)) => {
                span.record_error(&e.to_string());
                return Err(ProbeError::Wait(e));
            }
            // Dropping the wait future kills the child
            Err(_) => (ScenarioOutcome::TimedOut, String::new()),
        };

        span.record_outcome(outcome);
        if !outcome.is_success() {
            warn!(scenario = %kind, outcome = %outcome, "scenario did not decode its signal");
        }

        Ok(ScenarioRun {
            kind,
            outcome,
            stdout,
            elapsed: start.elapsed(),
        })
    }

    /// Run scenarios one after another, printing each banner and report.
    ///
    /// A spawn or wait failure is logged and the sequence moves on.
    pub async fn run_sequence<W: Write>(
        &self,
        kinds: &[ScenarioKind],
        out: &mut W,
    ) -> std::io::Result<()> {
        for &kind in kinds {
            writeln!(out, "{}", kind.banner())?;
            out.flush()?;

            match self.run(kind).await {
                Ok(run) => out.write_all(run.stdout.as_bytes())?,
                Err(e) => warn!(scenario = %kind, error = %e, "scenario could not be supervised"),
            }

            writeln!(out)?;
            out.flush()?;
        }
        Ok(())
    }
}

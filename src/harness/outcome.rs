/*!
 * Scenario Outcomes
 * Classification of an isolated scenario's exit status
 */

use crate::core::limits::{EXIT_DECODED, EXIT_SETUP_FAILED, EXIT_SIGNAL_NOT_RAISED};
use crate::scenarios::ScenarioKind;
use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::time::Duration;

/// How one scenario process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Handler fired and wrote its report
    Decoded,
    /// Stimulus completed without the signal arriving
    SignalNotRaised,
    /// Registration or stimulus preparation failed
    SetupFailed,
    /// Exited with a code the runner never uses
    UnexpectedExit(i32),
    /// Terminated by a signal the handler did not catch
    KilledBy(i32),
    /// Exceeded the scenario timeout and was killed
    TimedOut,
}

impl ScenarioOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(EXIT_DECODED), _) => ScenarioOutcome::Decoded,
            (Some(EXIT_SIGNAL_NOT_RAISED), _) => ScenarioOutcome::SignalNotRaised,
            (Some(EXIT_SETUP_FAILED), _) => ScenarioOutcome::SetupFailed,
            (Some(code), _) => ScenarioOutcome::UnexpectedExit(code),
            (None, Some(signo)) => ScenarioOutcome::KilledBy(signo),
            // Stopped or continued; wait() does not report these
            (None, None) => ScenarioOutcome::UnexpectedExit(-1),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScenarioOutcome::Decoded)
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioOutcome::Decoded => f.write_str("decoded"),
            ScenarioOutcome::SignalNotRaised => f.write_str("signal not raised"),
            ScenarioOutcome::SetupFailed => f.write_str("setup failed"),
            ScenarioOutcome::UnexpectedExit(code) => write!(f, "unexpected exit code {}", code),
            ScenarioOutcome::KilledBy(signo) => write!(f, "killed by signal {}", signo),
            ScenarioOutcome::TimedOut => f.write_str("timed out"),
        }
    }
}

/// Result of supervising one scenario
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub kind: ScenarioKind,
    pub outcome: ScenarioOutcome,
    /// Everything the scenario wrote to stdout
    pub stdout: String,
    pub elapsed: Duration,
}

impl ScenarioRun {
    /// `key = value` lines of the scenario's report
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.stdout
            .lines()
            .filter_map(|line| line.split_once(" = "))
    }

    /// First value reported under `key`
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // wait(2) status encoding: exit code in bits 8-15, signal in bits 0-6
    fn exited(code: i32) -> ExitStatus {
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn test_exit_code_classification() {
        assert_eq!(ScenarioOutcome::from_status(exited(0)), ScenarioOutcome::Decoded);
        assert_eq!(
            ScenarioOutcome::from_status(exited(1)),
            ScenarioOutcome::SignalNotRaised
        );
        assert_eq!(ScenarioOutcome::from_status(exited(2)), ScenarioOutcome::SetupFailed);
        assert_eq!(
            ScenarioOutcome::from_status(exited(101)),
            ScenarioOutcome::UnexpectedExit(101)
        );
    }

    #[test]
    fn test_signal_classification() {
        assert_eq!(
            ScenarioOutcome::from_status(ExitStatus::from_raw(11)),
            ScenarioOutcome::KilledBy(11)
        );
        assert!(!ScenarioOutcome::KilledBy(11).is_success());
        assert!(ScenarioOutcome::Decoded.is_success());
    }

    #[test]
    fn test_field_lookup() {
        let run = ScenarioRun {
            kind: ScenarioKind::Segv,
            outcome: ScenarioOutcome::Decoded,
            stdout: "signo = 11\nerrno = 0\ncode = 1\naddr = 0x42\n".to_string(),
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(run.field("signo"), Some("11"));
        assert_eq!(run.field("addr"), Some("0x42"));
        assert_eq!(run.field("fd"), None);
        assert_eq!(run.fields().count(), 4);
    }
}

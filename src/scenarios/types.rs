/*!
 * Scenario Types
 * Catalogue of fault-provoking scenarios
 */

use crate::signals::Signal;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One deliberately-triggered abnormal condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// Write through an invalid pointer
    Segv,
    /// Hardware integer division by zero
    FpeIntdiv,
    /// Floating-point division by zero with traps unmasked
    FpeFltdiv,
    /// Execute an undefined instruction
    Ill,
    /// kill(self, SIGTERM)
    KillSigterm,
    /// kill(self, SIGUSR1)
    KillSigusr1,
    /// kill(self, SIGFPE)
    KillSigfpe,
    /// Asynchronous I/O readiness on a pipe
    Sigio,
    /// A forked child exits
    Sigchld,
    /// sigqueue(self, SIGUSR2) with an attached value
    SigqueueSigusr2,
    /// Breakpoint instruction
    TrapBreakpoint,
    /// Registers a handler and provokes nothing
    NoSignal,
}

impl ScenarioKind {
    /// Scenarios run when none are named
    pub const DEFAULT: &'static [ScenarioKind] = &[
        ScenarioKind::Segv,
        ScenarioKind::FpeIntdiv,
        ScenarioKind::FpeFltdiv,
        ScenarioKind::Ill,
        ScenarioKind::KillSigterm,
        ScenarioKind::KillSigusr1,
        ScenarioKind::KillSigfpe,
        ScenarioKind::Sigio,
        ScenarioKind::Sigchld,
        ScenarioKind::SigqueueSigusr2,
        ScenarioKind::TrapBreakpoint,
    ];

    /// Command-line name
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Segv => "segv",
            ScenarioKind::FpeIntdiv => "fpe-intdiv",
            ScenarioKind::FpeFltdiv => "fpe-fltdiv",
            ScenarioKind::Ill => "ill",
            ScenarioKind::KillSigterm => "kill-sigterm",
            ScenarioKind::KillSigusr1 => "kill-sigusr1",
            ScenarioKind::KillSigfpe => "kill-sigfpe",
            ScenarioKind::Sigio => "sigio",
            ScenarioKind::Sigchld => "sigchld",
            ScenarioKind::SigqueueSigusr2 => "sigqueue-sigusr2",
            ScenarioKind::TrapBreakpoint => "trap-breakpoint",
            ScenarioKind::NoSignal => "no-signal",
        }
    }

    /// Line printed before the scenario's report
    pub fn banner(&self) -> &'static str {
        match self {
            ScenarioKind::Segv => "Testing SIGSEGV",
            ScenarioKind::FpeIntdiv => "Testing SIGFPE/FPE_INTDIV",
            ScenarioKind::FpeFltdiv => "Testing SIGFPE/FPE_FLTDIV",
            ScenarioKind::Ill => "Testing SIGILL",
            ScenarioKind::KillSigterm => "Testing kill(self, SIGTERM)",
            ScenarioKind::KillSigusr1 => "Testing kill(self, SIGUSR1)",
            ScenarioKind::KillSigfpe => "Testing kill(self, SIGFPE)",
            ScenarioKind::Sigio => "Testing SIGIO",
            ScenarioKind::Sigchld => "Testing SIGCHLD",
            ScenarioKind::SigqueueSigusr2 => "Testing sigqueue(self, SIGUSR2)",
            ScenarioKind::TrapBreakpoint => "Testing SIGTRAP",
            ScenarioKind::NoSignal => "Testing no-op stimulus",
        }
    }

    /// Signal the scenario registers a handler for
    pub fn signal(&self) -> Signal {
        match self {
            ScenarioKind::Segv => Signal::SIGSEGV,
            ScenarioKind::FpeIntdiv | ScenarioKind::FpeFltdiv | ScenarioKind::KillSigfpe => {
                Signal::SIGFPE
            }
            ScenarioKind::Ill => Signal::SIGILL,
            ScenarioKind::KillSigterm => Signal::SIGTERM,
            ScenarioKind::KillSigusr1 | ScenarioKind::NoSignal => Signal::SIGUSR1,
            ScenarioKind::Sigio => Signal::SIGIO,
            ScenarioKind::Sigchld => Signal::SIGCHLD,
            ScenarioKind::SigqueueSigusr2 => Signal::SIGUSR2,
            ScenarioKind::TrapBreakpoint => Signal::SIGTRAP,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Listing entry for `--list`
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub signal: Signal,
    pub signal_description: &'static str,
    pub banner: &'static str,
    pub default: bool,
}

impl From<ScenarioKind> for ScenarioInfo {
    fn from(kind: ScenarioKind) -> Self {
        Self {
            name: kind.name(),
            signal: kind.signal(),
            signal_description: kind.signal().description(),
            banner: kind.banner(),
            default: ScenarioKind::DEFAULT.contains(&kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_cli_values() {
        for kind in ScenarioKind::value_variants() {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.name());
            assert_eq!(ScenarioKind::from_str(kind.name(), false), Ok(*kind));
        }
    }

    #[test]
    fn test_names_match_serde() {
        let json = serde_json::to_string(&ScenarioKind::SigqueueSigusr2).unwrap();
        assert_eq!(json, "\"sigqueue-sigusr2\"");
    }

    #[test]
    fn test_default_set_excludes_no_signal() {
        assert!(!ScenarioKind::DEFAULT.contains(&ScenarioKind::NoSignal));
        assert_eq!(ScenarioKind::DEFAULT.len(), ScenarioKind::value_variants().len() - 1);
    }
}

/*!
 * Scenario Runner
 * Entry point of an isolated scenario process
 */

use super::stimulus::provoke;
use super::types::ScenarioKind;
use crate::core::config::HarnessConfig;
use crate::core::limits::{EXIT_SETUP_FAILED, EXIT_SIGNAL_NOT_RAISED};
use crate::signals::HandlerRegistrar;
use std::io::Write;
use tracing::{debug, error};

/// Run one scenario in the current process and exit.
///
/// Exit codes: 0 when the handler decoded the signal, 1 when the stimulus
/// completed without delivery, 2 when setup failed.
pub fn run_scenario(kind: ScenarioKind, config: &HarnessConfig) -> ! {
    debug!(scenario = %kind, signal = %kind.signal(), "provoking");
    let registrar = HandlerRegistrar::new();

    match provoke(kind, &registrar, config.async_signal_wait) {
        Ok(()) => cause_failed(),
        Err(e) => {
            error!(scenario = %kind, error = %e, "scenario setup failed");
            eprintln!("{}", e);
            std::process::exit(EXIT_SETUP_FAILED)
        }
    }
}

fn cause_failed() -> ! {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "Failed to cause signal");
    let _ = stdout.flush();
    std::process::exit(EXIT_SIGNAL_NOT_RAISED)
}

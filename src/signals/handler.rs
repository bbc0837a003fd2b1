/*!
 * Handler Registrar
 * Installs the event decoder as a process-wide SA_SIGINFO handler
 *
 * The installed callback captures the siginfo record, decodes it, writes the
 * report to stdout and terminates the process with a success status. Every
 * signal is blocked while it runs, so one delivery is decoded at a time.
 */

use super::decoder::decode_and_render;
use super::event::SignalEvent;
use super::types::Signal;
use crate::core::errors::{ProbeError, ProbeResult};
use crate::core::limits::EXIT_DECODED;
use nix::libc::{self, c_int, c_void, siginfo_t};
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet};
use std::os::fd::BorrowedFd;
use tracing::debug;

/// Installs the report-and-exit handler
pub struct HandlerRegistrar {
    action: SigAction,
}

impl HandlerRegistrar {
    pub fn new() -> Self {
        Self {
            action: SigAction::new(
                SigHandler::SigAction(report_and_exit),
                SaFlags::SA_SIGINFO,
                SigSet::all(),
            ),
        }
    }

    /// Route future deliveries of `signal` to the decoder.
    ///
    /// There is no way back: the returned registration cannot be undone and
    /// the process ends on the first delivery.
    pub fn register(&self, signal: Signal) -> ProbeResult<Registration> {
        if !signal.can_catch() {
            return Err(ProbeError::Uncatchable(signal));
        }

        // SAFETY: the handler only calls async-signal-safe functions
        // (stack formatting, write(2), _exit(2)).
        let previous = unsafe { sigaction(signal.into(), &self.action) }
            .map_err(|source| ProbeError::Registration { signal, source })?;

        debug!(signal = %signal, "handler registered");
        Ok(Registration { signal, previous })
    }
}

impl Default for HandlerRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

/// Witness that a signal is routed to the decoder
#[must_use = "a registration is the only record of the replaced disposition"]
#[derive(Debug)]
pub struct Registration {
    signal: Signal,
    previous: SigAction,
}

impl Registration {
    pub fn signal(&self) -> Signal {
        self.signal
    }

    /// Whether the replaced disposition was the default action
    pub fn replaced_default(&self) -> bool {
        matches!(self.previous.handler(), SigHandler::SigDfl)
    }
}

extern "C" fn report_and_exit(_signo: c_int, info: *mut siginfo_t, _context: *mut c_void) {
    // SAFETY: the kernel passes a valid record for SA_SIGINFO handlers.
    if let Some(info) = unsafe { info.as_ref() } {
        let event = unsafe { SignalEvent::from_siginfo(info) };
        // SAFETY: stdout stays open for the life of the scenario process.
        let stdout = unsafe { BorrowedFd::borrow_raw(libc::STDOUT_FILENO) };
        decode_and_render(&event).write_to(stdout);
    }
    // SAFETY: _exit skips atexit hooks and stdio flushing, neither of which is
    // signal-safe; the report was written unbuffered.
    unsafe { libc::_exit(EXIT_DECODED) }
}

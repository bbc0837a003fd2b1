/*!
 * Scenario Stimuli
 * Register the scenario's handler, then provoke its signal
 *
 * Every stimulus returns normally only when the signal did not fire; a
 * delivery ends the process from inside the handler.
 */

use super::types::ScenarioKind;
use crate::core::errors::{ProbeError, ProbeResult};
use crate::core::limits::*;
use crate::signals::{HandlerRegistrar, Signal};
use nix::errno::Errno;
use nix::libc::{self, c_int, c_void};
use nix::sys::signal::kill;
use nix::unistd::{fork, getpid, pipe, write, ForkResult};
use std::hint::black_box;
use std::os::fd::{AsRawFd, OwnedFd};
use std::time::Duration;
use tracing::debug;

// asm-generic/fcntl.h
const F_SETSIG: c_int = 10;

/// Register and provoke one scenario
pub fn provoke(
    kind: ScenarioKind,
    registrar: &HandlerRegistrar,
    async_wait: Duration,
) -> ProbeResult<()> {
    match kind {
        ScenarioKind::Segv => {
            let _registration = registrar.register(Signal::SIGSEGV)?;
            invalid_write();
        }
        ScenarioKind::FpeIntdiv => {
            let _registration = registrar.register(Signal::SIGFPE)?;
            integer_divide_by_zero();
        }
        ScenarioKind::FpeFltdiv => {
            let _registration = registrar.register(Signal::SIGFPE)?;
            float_divide_by_zero();
        }
        ScenarioKind::Ill => {
            let _registration = registrar.register(Signal::SIGILL)?;
            undefined_instruction();
        }
        ScenarioKind::KillSigterm | ScenarioKind::KillSigusr1 | ScenarioKind::KillSigfpe => {
            let signal = kind.signal();
            let _registration = registrar.register(signal)?;
            kill(getpid(), nix::sys::signal::Signal::from(signal))
                .map_err(ProbeError::setup("kill()"))?;
        }
        ScenarioKind::Sigio => io_ready(registrar, async_wait)?,
        ScenarioKind::Sigchld => {
            let _registration = registrar.register(Signal::SIGCHLD)?;
            child_exit(async_wait)?;
        }
        ScenarioKind::SigqueueSigusr2 => {
            let _registration = registrar.register(Signal::SIGUSR2)?;
            queue_to_self(Signal::SIGUSR2, QUEUED_VALUE)?;
        }
        ScenarioKind::TrapBreakpoint => {
            let _registration = registrar.register(Signal::SIGTRAP)?;
            breakpoint();
        }
        ScenarioKind::NoSignal => {
            let _registration = registrar.register(Signal::SIGUSR1)?;
        }
    }
    Ok(())
}

fn invalid_write() {
    // A byte store has no alignment requirement, so the access itself faults.
    let target = FAULT_ADDRESS as *mut u8;
    // SAFETY: not safe at all; the write faults and the handler exits.
    unsafe { std::ptr::write_volatile(target, FAULT_WRITE_VALUE) };
}

#[cfg(target_arch = "x86_64")]
fn integer_divide_by_zero() {
    // Rust's `/` checks for zero and panics, so divide in hardware.
    unsafe {
        std::arch::asm!(
            "div {divisor:e}",
            divisor = in(reg) black_box(0u32),
            inout("eax") 3u32 => _,
            inout("edx") 0u32 => _,
            options(nomem, nostack),
        );
    }
}

// AArch64 and others return zero for integer division by zero.
#[cfg(not(target_arch = "x86_64"))]
fn integer_divide_by_zero() {}

#[cfg(target_arch = "x86_64")]
fn float_divide_by_zero() {
    // MXCSR bits 0-5 are sticky exception flags, bits 7-12 their masks.
    const FLAGS: u32 = 0x3f;
    const MASKS: u32 = 0x3f << 7;

    let mut mxcsr: u32 = 0;
    unsafe {
        std::arch::asm!(
            "stmxcsr dword ptr [{}]",
            in(reg) std::ptr::addr_of_mut!(mxcsr),
            options(nostack, preserves_flags),
        );
    }
    mxcsr &= !(FLAGS | MASKS);
    unsafe {
        std::arch::asm!(
            "ldmxcsr dword ptr [{}]",
            in(reg) std::ptr::addr_of!(mxcsr),
            options(nostack, readonly),
        );
    }
    let quotient = black_box(3.0f32) / black_box(0.0f32);
    black_box(quotient);
}

// No portable way to unmask FP traps; most AArch64 cores do not support them.
#[cfg(not(target_arch = "x86_64"))]
fn float_divide_by_zero() {
    black_box(black_box(3.0f32) / black_box(0.0f32));
}

fn undefined_instruction() {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        std::arch::asm!("ud2", options(nomem, nostack));
    };
    #[cfg(target_arch = "aarch64")]
    unsafe {
        std::arch::asm!("udf #0", options(nomem, nostack));
    };
}

fn breakpoint() {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        std::arch::asm!("int3", options(nomem, nostack));
    };
    #[cfg(target_arch = "aarch64")]
    unsafe {
        std::arch::asm!("brk #0", options(nomem, nostack));
    };
}

fn io_ready(registrar: &HandlerRegistrar, wait: Duration) -> ProbeResult<()> {
    let (read_end, write_end) = pipe().map_err(ProbeError::setup("pipe()"))?;

    let _registration = registrar.register(Signal::SIGIO)?;

    let fd = read_end.as_raw_fd();
    fcntl_raw(fd, libc::F_SETFL, libc::O_ASYNC).map_err(ProbeError::setup("fcntl() F_SETFL"))?;
    fcntl_raw(fd, libc::F_SETOWN, getpid().as_raw())
        .map_err(ProbeError::setup("fcntl() F_SETOWN"))?;
    fcntl_raw(fd, F_SETSIG, Signal::SIGIO.number())
        .map_err(ProbeError::setup("fcntl() F_SETSIG"))?;
    debug!(fd, "pipe armed for SIGIO");

    // SAFETY: the scenario process is single-threaded.
    match unsafe { fork() }.map_err(ProbeError::setup("fork()"))? {
        ForkResult::Child => {
            drop(read_end);
            write_then_exit(write_end)
        }
        ForkResult::Parent { .. } => {
            drop(write_end);
            std::thread::sleep(wait);
            drop(read_end);
            Ok(())
        }
    }
}

fn write_then_exit(write_end: OwnedFd) -> ! {
    let _ = write(&write_end, SIGIO_MESSAGE);
    drop(write_end);
    // SAFETY: leave without running the parent's atexit hooks.
    unsafe { libc::_exit(0) }
}

fn child_exit(wait: Duration) -> ProbeResult<()> {
    // SAFETY: the scenario process is single-threaded.
    match unsafe { fork() }.map_err(ProbeError::setup("fork()"))? {
        ForkResult::Child => unsafe { libc::_exit(CHILD_EXIT_STATUS) },
        ForkResult::Parent { child } => {
            debug!(child = child.as_raw(), "waiting for SIGCHLD");
            std::thread::sleep(wait);
            Ok(())
        }
    }
}

fn queue_to_self(signal: Signal, value: i32) -> ProbeResult<()> {
    // sival_int aliases the low bytes of sival_ptr.
    let sigval = libc::sigval {
        sival_ptr: value as isize as *mut c_void,
    };
    // SAFETY: plain syscall wrapper.
    let rc = unsafe { libc::sigqueue(getpid().as_raw(), signal.number(), sigval) };
    Errno::result(rc)
        .map(drop)
        .map_err(ProbeError::setup("sigqueue()"))
}

fn fcntl_raw(fd: c_int, cmd: c_int, arg: c_int) -> Result<(), Errno> {
    // SAFETY: fd is owned by the caller for the duration of the call.
    Errno::result(unsafe { libc::fcntl(fd, cmd, arg) }).map(drop)
}

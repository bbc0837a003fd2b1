/*!
 * Signal Types
 * Linux signal numbers, signal classes and si_code discriminants
 */

use serde::{Deserialize, Serialize};
use std::fmt;

// si_code values shared by every signal (include/uapi/asm-generic/siginfo.h)

/// Sent by kill(2), raise(3) or sigsend
pub const SI_USER: i32 = 0;
/// Sent by the kernel
pub const SI_KERNEL: i32 = 0x80;
/// Sent by sigqueue(3) with an attached value
pub const SI_QUEUE: i32 = -1;
/// POSIX timer expiration
pub const SI_TIMER: i32 = -2;
/// POSIX message queue state change
pub const SI_MESGQ: i32 = -3;
/// AIO completion
pub const SI_ASYNCIO: i32 = -4;
/// Queued SIGIO
pub const SI_SIGIO: i32 = -5;
/// Sent by tkill(2) or tgkill(2)
pub const SI_TKILL: i32 = -6;

/// Linux signal numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Signal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP = 1,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT = 2,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT = 3,
    /// Illegal instruction
    SIGILL = 4,
    /// Trace/breakpoint trap
    SIGTRAP = 5,
    /// Abort signal
    SIGABRT = 6,
    /// Bus error (bad memory access)
    SIGBUS = 7,
    /// Floating-point exception
    SIGFPE = 8,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = 9,
    /// User-defined signal 1
    SIGUSR1 = 10,
    /// Invalid memory reference
    SIGSEGV = 11,
    /// User-defined signal 2
    SIGUSR2 = 12,
    /// Broken pipe
    SIGPIPE = 13,
    /// Timer signal
    SIGALRM = 14,
    /// Termination signal
    SIGTERM = 15,
    /// Stack fault on coprocessor
    SIGSTKFLT = 16,
    /// Child process stopped or terminated
    SIGCHLD = 17,
    /// Continue if stopped
    SIGCONT = 18,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = 19,
    /// Stop typed at terminal (Ctrl+Z)
    SIGTSTP = 20,
    /// Terminal input for background process
    SIGTTIN = 21,
    /// Terminal output for background process
    SIGTTOU = 22,
    /// Urgent condition on socket
    SIGURG = 23,
    /// CPU time limit exceeded
    SIGXCPU = 24,
    /// File size limit exceeded
    SIGXFSZ = 25,
    /// Virtual alarm clock
    SIGVTALRM = 26,
    /// Profiling timer expired
    SIGPROF = 27,
    /// Window resize signal
    SIGWINCH = 28,
    /// I/O now possible (also SIGPOLL)
    SIGIO = 29,
    /// Power failure
    SIGPWR = 30,
    /// Bad system call
    SIGSYS = 31,
}

impl Signal {
    /// Convert from signal number. Real-time and unknown numbers have no name.
    pub fn from_number(n: i32) -> Option<Self> {
        let signal = match n {
            1 => Signal::SIGHUP,
            2 => Signal::SIGINT,
            3 => Signal::SIGQUIT,
            4 => Signal::SIGILL,
            5 => Signal::SIGTRAP,
            6 => Signal::SIGABRT,
            7 => Signal::SIGBUS,
            8 => Signal::SIGFPE,
            9 => Signal::SIGKILL,
            10 => Signal::SIGUSR1,
            11 => Signal::SIGSEGV,
            12 => Signal::SIGUSR2,
            13 => Signal::SIGPIPE,
            14 => Signal::SIGALRM,
            15 => Signal::SIGTERM,
            16 => Signal::SIGSTKFLT,
            17 => Signal::SIGCHLD,
            18 => Signal::SIGCONT,
            19 => Signal::SIGSTOP,
            20 => Signal::SIGTSTP,
            21 => Signal::SIGTTIN,
            22 => Signal::SIGTTOU,
            23 => Signal::SIGURG,
            24 => Signal::SIGXCPU,
            25 => Signal::SIGXFSZ,
            26 => Signal::SIGVTALRM,
            27 => Signal::SIGPROF,
            28 => Signal::SIGWINCH,
            29 => Signal::SIGIO,
            30 => Signal::SIGPWR,
            31 => Signal::SIGSYS,
            _ => return None,
        };
        Some(signal)
    }

    /// Get signal number
    pub fn number(&self) -> i32 {
        *self as i32
    }

    /// Check if signal can be caught/blocked
    pub fn can_catch(&self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }

    /// Which payload family the kernel fills in for this signal
    pub fn class(&self) -> SignalClass {
        match self {
            Signal::SIGILL | Signal::SIGFPE | Signal::SIGSEGV | Signal::SIGBUS | Signal::SIGTRAP => {
                SignalClass::Fault
            }
            Signal::SIGCHLD => SignalClass::ChildStatus,
            Signal::SIGIO => SignalClass::IoReady,
            _ => SignalClass::Other,
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Signal::SIGHUP => "Hangup",
            Signal::SIGINT => "Interrupt",
            Signal::SIGQUIT => "Quit",
            Signal::SIGILL => "Illegal instruction",
            Signal::SIGTRAP => "Trace/breakpoint trap",
            Signal::SIGABRT => "Aborted",
            Signal::SIGBUS => "Bus error",
            Signal::SIGFPE => "Floating point exception",
            Signal::SIGKILL => "Killed",
            Signal::SIGUSR1 => "User defined signal 1",
            Signal::SIGSEGV => "Segmentation fault",
            Signal::SIGUSR2 => "User defined signal 2",
            Signal::SIGPIPE => "Broken pipe",
            Signal::SIGALRM => "Alarm clock",
            Signal::SIGTERM => "Terminated",
            Signal::SIGSTKFLT => "Stack fault",
            Signal::SIGCHLD => "Child status changed",
            Signal::SIGCONT => "Continued",
            Signal::SIGSTOP => "Stopped (signal)",
            Signal::SIGTSTP => "Stopped",
            Signal::SIGTTIN => "Stopped (tty input)",
            Signal::SIGTTOU => "Stopped (tty output)",
            Signal::SIGURG => "Urgent I/O condition",
            Signal::SIGXCPU => "CPU time limit exceeded",
            Signal::SIGXFSZ => "File size limit exceeded",
            Signal::SIGVTALRM => "Virtual timer expired",
            Signal::SIGPROF => "Profiling timer expired",
            Signal::SIGWINCH => "Window size changed",
            Signal::SIGIO => "I/O possible",
            Signal::SIGPWR => "Power failure",
            Signal::SIGSYS => "Bad system call",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.number())
    }
}

impl From<Signal> for nix::sys::signal::Signal {
    fn from(signal: Signal) -> Self {
        use nix::sys::signal::Signal as Nix;
        match signal {
            Signal::SIGHUP => Nix::SIGHUP,
            Signal::SIGINT => Nix::SIGINT,
            Signal::SIGQUIT => Nix::SIGQUIT,
            Signal::SIGILL => Nix::SIGILL,
            Signal::SIGTRAP => Nix::SIGTRAP,
            Signal::SIGABRT => Nix::SIGABRT,
            Signal::SIGBUS => Nix::SIGBUS,
            Signal::SIGFPE => Nix::SIGFPE,
            Signal::SIGKILL => Nix::SIGKILL,
            Signal::SIGUSR1 => Nix::SIGUSR1,
            Signal::SIGSEGV => Nix::SIGSEGV,
            Signal::SIGUSR2 => Nix::SIGUSR2,
            Signal::SIGPIPE => Nix::SIGPIPE,
            Signal::SIGALRM => Nix::SIGALRM,
            Signal::SIGTERM => Nix::SIGTERM,
            Signal::SIGSTKFLT => Nix::SIGSTKFLT,
            Signal::SIGCHLD => Nix::SIGCHLD,
            Signal::SIGCONT => Nix::SIGCONT,
            Signal::SIGSTOP => Nix::SIGSTOP,
            Signal::SIGTSTP => Nix::SIGTSTP,
            Signal::SIGTTIN => Nix::SIGTTIN,
            Signal::SIGTTOU => Nix::SIGTTOU,
            Signal::SIGURG => Nix::SIGURG,
            Signal::SIGXCPU => Nix::SIGXCPU,
            Signal::SIGXFSZ => Nix::SIGXFSZ,
            Signal::SIGVTALRM => Nix::SIGVTALRM,
            Signal::SIGPROF => Nix::SIGPROF,
            Signal::SIGWINCH => Nix::SIGWINCH,
            Signal::SIGIO => Nix::SIGIO,
            Signal::SIGPWR => Nix::SIGPWR,
            Signal::SIGSYS => Nix::SIGSYS,
        }
    }
}

/// Payload family selected by the signal number alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalClass {
    /// Hardware or kernel-detected fault: SIGILL, SIGFPE, SIGSEGV, SIGBUS, SIGTRAP
    Fault,
    /// SIGCHLD
    ChildStatus,
    /// SIGIO / SIGPOLL
    IoReady,
    /// Everything else, including real-time signals
    Other,
}

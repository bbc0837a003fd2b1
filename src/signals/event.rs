/*!
 * Signal Events
 * Snapshot of one kernel-delivered siginfo record as a closed tagged union
 */

use super::raw::RawSigInfo;
use super::types::{Signal, SignalClass, SI_QUEUE, SI_USER};
use crate::core::errors::{ProbeError, ProbeResult};
use nix::libc::siginfo_t;

/// Which union member of siginfo is valid for a (signal, code) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Fault,
    Child,
    IoReady,
    Sender,
    Queued,
    None,
}

impl PayloadKind {
    /// The closed classification table.
    ///
    /// Dispatch is two-level: first on the signal's class, then on the code.
    /// Fault signals carry an address only when the kernel raised them; any
    /// other signal falls back to the code, where `SI_QUEUE` is checked
    /// before `SI_USER` because a queued send is a user send plus a value.
    pub fn classify(signo: i32, code: i32) -> Self {
        let class = Signal::from_number(signo)
            .map(|s| s.class())
            .unwrap_or(SignalClass::Other);

        match class {
            SignalClass::Fault if code == SI_USER => PayloadKind::None,
            SignalClass::Fault => PayloadKind::Fault,
            SignalClass::ChildStatus => PayloadKind::Child,
            SignalClass::IoReady => PayloadKind::IoReady,
            SignalClass::Other => match code {
                SI_QUEUE => PayloadKind::Queued,
                SI_USER => PayloadKind::Sender,
                _ => PayloadKind::None,
            },
        }
    }
}

/// SIGCHLD fields, kept in the kernel's own widths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildStatus {
    pub pid: i32,
    pub uid: u32,
    pub status: i32,
    pub utime: i64,
    pub stime: i64,
}

/// Fields valid for one delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Faulting address
    Fault { addr: usize },
    Child(ChildStatus),
    /// Descriptor that became ready
    IoReady { fd: i32 },
    /// Explicit send by a process
    Sender { pid: i32, uid: u32 },
    /// sigqueue(3) send with its attached value
    Queued {
        pid: i32,
        uid: u32,
        int: i32,
        ptr: usize,
    },
    None,
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Fault { .. } => PayloadKind::Fault,
            Payload::Child(_) => PayloadKind::Child,
            Payload::IoReady { .. } => PayloadKind::IoReady,
            Payload::Sender { .. } => PayloadKind::Sender,
            Payload::Queued { .. } => PayloadKind::Queued,
            Payload::None => PayloadKind::None,
        }
    }
}

/// Immutable snapshot of one signal delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    signo: i32,
    errno: i32,
    code: i32,
    payload: Payload,
}

impl SignalEvent {
    /// Build an event, rejecting payloads the (signo, code) pair does not select
    pub fn new(signo: i32, errno: i32, code: i32, payload: Payload) -> ProbeResult<Self> {
        if PayloadKind::classify(signo, code) != payload.kind() {
            return Err(ProbeError::PayloadMismatch { signo, code });
        }
        Ok(Self {
            signo,
            errno,
            code,
            payload,
        })
    }

    /// Capture a kernel-populated siginfo record.
    ///
    /// Reads only the union member `PayloadKind::classify` selects.
    ///
    /// # Safety
    /// `info` must be a siginfo record filled in by the kernel (or laid out
    /// identically) whose union member matches its signo and code.
    pub unsafe fn from_siginfo(info: &siginfo_t) -> Self {
        // SAFETY: RawSigInfo mirrors siginfo_t and has the same size.
        let raw = unsafe { &*(info as *const siginfo_t).cast::<RawSigInfo>() };
        let kind = PayloadKind::classify(raw.signo, raw.code);

        Self {
            signo: raw.signo,
            errno: raw.errno,
            code: raw.code,
            // SAFETY: kind comes from the record's own signo and code.
            payload: unsafe { raw.payload(kind) },
        }
    }

    pub fn signo(&self) -> i32 {
        self.signo
    }

    pub fn errno(&self) -> i32 {
        self.errno
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Named signal, if the number has one
    pub fn signal(&self) -> Option<Signal> {
        Signal::from_number(self.signo)
    }
}

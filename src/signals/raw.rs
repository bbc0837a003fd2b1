/*!
 * Raw siginfo Layout
 * Mirror of the Linux kernel's siginfo_t union (asm-generic/siginfo.h)
 */

use super::event::{ChildStatus, Payload, PayloadKind};
use nix::libc::{c_int, c_long, c_void, siginfo_t};

#[cfg(target_pointer_width = "64")]
const SI_PAD_INTS: usize = 28;
#[cfg(not(target_pointer_width = "64"))]
const SI_PAD_INTS: usize = 29;

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct KillFields {
    pub pid: c_int,
    pub uid: u32,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) union RawSigval {
    pub int: c_int,
    pub ptr: *mut c_void,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct QueueFields {
    pub pid: c_int,
    pub uid: u32,
    pub value: RawSigval,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct ChildFields {
    pub pid: c_int,
    pub uid: u32,
    pub status: c_int,
    pub utime: c_long,
    pub stime: c_long,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct FaultFields {
    pub addr: *mut c_void,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct PollFields {
    pub _band: c_long,
    pub fd: c_int,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) union RawFields {
    pub kill: KillFields,
    pub queue: QueueFields,
    pub child: ChildFields,
    pub fault: FaultFields,
    pub poll: PollFields,
    _pad: [c_int; SI_PAD_INTS],
}

#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawSigInfo {
    pub signo: c_int,
    pub errno: c_int,
    pub code: c_int,
    pub fields: RawFields,
}

const _: () = assert!(std::mem::size_of::<RawSigInfo>() == std::mem::size_of::<siginfo_t>());

impl RawSigInfo {
    /// Read the union member for `kind`.
    ///
    /// # Safety
    /// `kind` must name the member the kernel populated.
    pub(crate) unsafe fn payload(&self, kind: PayloadKind) -> Payload {
        match kind {
            PayloadKind::Fault => Payload::Fault {
                addr: self.fields.fault.addr as usize,
            },
            PayloadKind::Child => {
                let child = self.fields.child;
                Payload::Child(ChildStatus {
                    pid: child.pid,
                    uid: child.uid,
                    status: child.status,
                    utime: child.utime as i64,
                    stime: child.stime as i64,
                })
            }
            PayloadKind::IoReady => Payload::IoReady {
                fd: self.fields.poll.fd,
            },
            PayloadKind::Sender => {
                let kill = self.fields.kill;
                Payload::Sender {
                    pid: kill.pid,
                    uid: kill.uid,
                }
            }
            PayloadKind::Queued => {
                let queue = self.fields.queue;
                Payload::Queued {
                    pid: queue.pid,
                    uid: queue.uid,
                    int: queue.value.int,
                    ptr: queue.value.ptr as usize,
                }
            }
            PayloadKind::None => Payload::None,
        }
    }
}

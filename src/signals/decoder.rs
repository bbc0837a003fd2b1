/*!
 * Event Decoder
 * Renders a captured signal event as ordered key/value lines
 */

use super::event::{Payload, SignalEvent};
use super::report::{FieldValue, Report};

/// Decode one event into its report.
///
/// Base fields come first (`signo`, `errno`, `code`), then the fields of the
/// payload variant the event carries. Never fails: combinations without a
/// payload render the base fields only.
pub fn decode_and_render(event: &SignalEvent) -> Report {
    let mut report = Report::new();
    report.push("signo", FieldValue::Int(event.signo().into()));
    report.push("errno", FieldValue::Int(event.errno().into()));
    report.push("code", FieldValue::Int(event.code().into()));

    match *event.payload() {
        Payload::Fault { addr } => {
            report.push("addr", FieldValue::Ptr(addr));
        }
        Payload::Child(child) => {
            // Signed kernel widths are widened with sign extension before
            // being shown unsigned, like a C cast to unsigned long.
            report.push("pid", FieldValue::Uint(child.pid as i64 as u64));
            report.push("uid", FieldValue::Uint(child.uid.into()));
            report.push("status", FieldValue::Uint(child.status as i64 as u64));
            report.push("utime", FieldValue::Uint(child.utime as u64));
            report.push("stime", FieldValue::Uint(child.stime as u64));
        }
        Payload::IoReady { fd } => {
            report.push("fd", FieldValue::Int(fd.into()));
        }
        Payload::Sender { pid, uid } => {
            push_sender(&mut report, pid, uid);
        }
        Payload::Queued { pid, uid, int, ptr } => {
            push_sender(&mut report, pid, uid);
            report.push("int", FieldValue::Int(int.into()));
            report.push("ptr", FieldValue::Ptr(ptr));
        }
        Payload::None => {}
    }

    report
}

fn push_sender(report: &mut Report, pid: i32, uid: u32) {
    report.push("pid", FieldValue::Uint(pid as i64 as u64));
    report.push("uid", FieldValue::Uint(uid.into()));
}

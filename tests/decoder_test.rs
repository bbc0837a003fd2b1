/*!
 * Event Decoder Tests
 * Classification table and rendered line sequences
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sigprobe::signals::*;

const FAULT_SIGNALS: [Signal; 5] = [
    Signal::SIGILL,
    Signal::SIGFPE,
    Signal::SIGSEGV,
    Signal::SIGBUS,
    Signal::SIGTRAP,
];

fn keys(report: &Report) -> Vec<&'static str> {
    report.keys().collect()
}

fn rendered(report: &Report) -> Vec<String> {
    report.lines().iter().map(|line| line.to_string()).collect()
}

/// Any payload of the requested kind
fn payload_of(kind: PayloadKind) -> Payload {
    match kind {
        PayloadKind::Fault => Payload::Fault { addr: 0xdead_beef },
        PayloadKind::Child => Payload::Child(ChildStatus {
            pid: 100,
            uid: 1000,
            status: 3,
            utime: 5,
            stime: 6,
        }),
        PayloadKind::IoReady => Payload::IoReady { fd: 4 },
        PayloadKind::Sender => Payload::Sender { pid: 100, uid: 1000 },
        PayloadKind::Queued => Payload::Queued {
            pid: 100,
            uid: 1000,
            int: 7,
            ptr: 7,
        },
        PayloadKind::None => Payload::None,
    }
}

fn expected_keys(kind: PayloadKind) -> Vec<&'static str> {
    let mut keys = vec!["signo", "errno", "code"];
    keys.extend_from_slice(match kind {
        PayloadKind::Fault => &["addr"][..],
        PayloadKind::Child => &["pid", "uid", "status", "utime", "stime"],
        PayloadKind::IoReady => &["fd"],
        PayloadKind::Sender => &["pid", "uid"],
        PayloadKind::Queued => &["pid", "uid", "int", "ptr"],
        PayloadKind::None => &[],
    });
    keys
}

#[test]
fn test_segv_fault_renders_address() {
    let event = SignalEvent::new(11, 0, 1, Payload::Fault { addr: 0x42 }).unwrap();
    let report = decode_and_render(&event);

    assert_eq!(event.signal(), Some(Signal::SIGSEGV));
    assert_eq!(
        rendered(&report),
        ["signo = 11", "errno = 0", "code = 1", "addr = 0x42"]
    );
}

#[test]
fn test_fault_signals_gate_address_on_code() {
    for signal in FAULT_SIGNALS {
        let signo = signal.number();
        for code in [1, 2, 3, SI_KERNEL, SI_TKILL, SI_QUEUE] {
            let event = SignalEvent::new(signo, 0, code, Payload::Fault { addr: 0x1000 }).unwrap();
            assert!(keys(&decode_and_render(&event)).contains(&"addr"), "{signal} code {code}");
        }

        let sent = SignalEvent::new(signo, 0, SI_USER, Payload::None).unwrap();
        assert_eq!(keys(&decode_and_render(&sent)), ["signo", "errno", "code"]);
    }
}

#[test]
fn test_fault_signal_sent_by_user_rejects_address_payload() {
    let result = SignalEvent::new(8, 0, SI_USER, Payload::Fault { addr: 0x42 });
    assert!(matches!(
        result,
        Err(sigprobe::ProbeError::PayloadMismatch { signo: 8, code: SI_USER })
    ));
}

#[test]
fn test_child_status_fields_regardless_of_code() {
    for code in [1, 2, 3, 4, 5, 6, SI_USER, SI_QUEUE] {
        let event = SignalEvent::new(17, 0, code, payload_of(PayloadKind::Child)).unwrap();
        let report = decode_and_render(&event);
        assert_eq!(
            keys(&report),
            ["signo", "errno", "code", "pid", "uid", "status", "utime", "stime"]
        );
    }
}

#[test]
fn test_child_status_rendering() {
    let child = ChildStatus {
        pid: 4242,
        uid: 1000,
        status: 7,
        utime: 12,
        stime: 34,
    };
    let event = SignalEvent::new(17, 0, 1, Payload::Child(child)).unwrap();

    assert_eq!(
        decode_and_render(&event).to_string(),
        "signo = 17\nerrno = 0\ncode = 1\npid = 4242\nuid = 1000\nstatus = 7\nutime = 12\nstime = 34\n"
    );
}

#[test]
fn test_negative_status_renders_like_unsigned_long() {
    let child = ChildStatus {
        pid: 1,
        uid: 0,
        status: -1,
        utime: 0,
        stime: 0,
    };
    let event = SignalEvent::new(17, 0, 2, Payload::Child(child)).unwrap();
    let report = decode_and_render(&event);
    assert_eq!(report.get("status"), Some(FieldValue::Uint(u64::MAX)));
}

#[test]
fn test_io_ready_renders_fd_only() {
    let event = SignalEvent::new(29, 0, 1, Payload::IoReady { fd: 5 }).unwrap();
    let report = decode_and_render(&event);

    assert_eq!(keys(&report), ["signo", "errno", "code", "fd"]);
    assert_eq!(report.get("fd"), Some(FieldValue::Int(5)));
}

#[test]
fn test_user_sent_signal_renders_sender() {
    let event = SignalEvent::new(10, 0, SI_USER, Payload::Sender { pid: 77, uid: 1000 }).unwrap();

    assert_eq!(
        rendered(&decode_and_render(&event)),
        ["signo = 10", "errno = 0", "code = 0", "pid = 77", "uid = 1000"]
    );
}

#[test]
fn test_queued_signal_renders_sender_then_value() {
    let payload = Payload::Queued {
        pid: 77,
        uid: 1000,
        int: 42,
        ptr: 42,
    };
    let event = SignalEvent::new(12, 0, SI_QUEUE, payload).unwrap();

    assert_eq!(
        rendered(&decode_and_render(&event)),
        [
            "signo = 12",
            "errno = 0",
            "code = -1",
            "pid = 77",
            "uid = 1000",
            "int = 42",
            "ptr = 0x2a"
        ]
    );
}

#[test]
fn test_queued_is_checked_before_user() {
    assert_eq!(PayloadKind::classify(10, SI_QUEUE), PayloadKind::Queued);
    assert_eq!(PayloadKind::classify(10, SI_USER), PayloadKind::Sender);
    // Real-time signals have no name but follow the same fallback
    assert_eq!(PayloadKind::classify(40, SI_QUEUE), PayloadKind::Queued);
    assert_eq!(PayloadKind::classify(40, SI_USER), PayloadKind::Sender);
}

#[test]
fn test_unmatched_codes_render_base_fields_only() {
    for code in [SI_KERNEL, SI_TIMER, SI_MESGQ, SI_ASYNCIO, SI_SIGIO, SI_TKILL, 3] {
        let event = SignalEvent::new(15, 0, code, Payload::None).unwrap();
        assert_eq!(keys(&decode_and_render(&event)), ["signo", "errno", "code"]);
    }
}

#[test]
fn test_errno_is_rendered_verbatim() {
    let event = SignalEvent::new(15, 22, SI_KERNEL, Payload::None).unwrap();
    assert_eq!(
        decode_and_render(&event).get("errno"),
        Some(FieldValue::Int(22))
    );
}

#[test]
fn test_signal_classes() {
    for signal in FAULT_SIGNALS {
        assert_eq!(signal.class(), SignalClass::Fault);
    }
    assert_eq!(Signal::SIGCHLD.class(), SignalClass::ChildStatus);
    assert_eq!(Signal::SIGIO.class(), SignalClass::IoReady);
    assert_eq!(Signal::SIGUSR1.class(), SignalClass::Other);
    assert_eq!(Signal::from_number(29), Some(Signal::SIGIO));
    assert_eq!(Signal::from_number(34), None);
    assert_eq!(Signal::from_number(0), None);
}

proptest! {
    #[test]
    fn prop_report_matches_classification(signo in 1i32..=64, code in -8i32..=200, errno in any::<i32>()) {
        let kind = PayloadKind::classify(signo, code);
        let event = SignalEvent::new(signo, errno, code, payload_of(kind)).unwrap();
        let report = decode_and_render(&event);

        prop_assert_eq!(keys(&report), expected_keys(kind));
        prop_assert_eq!(report.get("signo"), Some(FieldValue::Int(signo.into())));
        prop_assert_eq!(report.get("code"), Some(FieldValue::Int(code.into())));
    }

    #[test]
    fn prop_decoding_is_deterministic(signo in 1i32..=64, code in -8i32..=200, addr in any::<usize>()) {
        let kind = PayloadKind::classify(signo, code);
        let payload = match kind {
            PayloadKind::Fault => Payload::Fault { addr },
            other => payload_of(other),
        };
        let event = SignalEvent::new(signo, 0, code, payload).unwrap();

        prop_assert_eq!(decode_and_render(&event), decode_and_render(&event));
    }

    #[test]
    fn prop_mismatched_payload_rejected(signo in 1i32..=64, code in -8i32..=200) {
        let kind = PayloadKind::classify(signo, code);
        let wrong = if kind == PayloadKind::IoReady {
            Payload::None
        } else {
            Payload::IoReady { fd: 0 }
        };
        prop_assert!(SignalEvent::new(signo, 0, code, wrong).is_err());
    }
}

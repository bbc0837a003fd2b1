/*!
 * Supervisor Tests
 * Isolated scenario runs driven through the async supervisor
 */

use sigprobe::harness::{ScenarioOutcome, Supervisor};
use sigprobe::{HarnessConfig, ProbeError, ScenarioKind};
use std::time::Duration;

const BIN: &str = env!("CARGO_BIN_EXE_sigprobe");

fn supervisor() -> Supervisor {
    Supervisor::new(
        HarnessConfig::with_program(BIN)
            .scenario_timeout(Duration::from_secs(20))
            .async_signal_wait(Duration::from_secs(5)),
    )
}

#[tokio::test]
async fn test_segv_decoded() {
    let run = supervisor().run(ScenarioKind::Segv).await.unwrap();

    assert_eq!(run.outcome, ScenarioOutcome::Decoded);
    assert_eq!(run.field("signo"), Some("11"));
    assert_eq!(run.field("addr"), Some("0x42"));
}

#[tokio::test]
async fn test_sigio_decoded() {
    let run = supervisor().run(ScenarioKind::Sigio).await.unwrap();

    assert_eq!(run.outcome, ScenarioOutcome::Decoded);
    assert!(run.field("fd").is_some());
}

#[tokio::test]
async fn test_no_signal_classified_as_not_raised() {
    let run = supervisor().run(ScenarioKind::NoSignal).await.unwrap();

    assert_eq!(run.outcome, ScenarioOutcome::SignalNotRaised);
    assert_eq!(run.stdout, "Failed to cause signal\n");
    assert_eq!(run.fields().count(), 0);
}

#[tokio::test]
async fn test_one_failure_does_not_stop_the_sequence() {
    let mut out = Vec::new();
    supervisor()
        .run_sequence(
            &[ScenarioKind::NoSignal, ScenarioKind::KillSigusr1],
            &mut out,
        )
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    let second = out.find("Testing kill(self, SIGUSR1)").unwrap();
    assert!(out[..second].contains("Failed to cause signal"));
    assert!(out[second..].contains("signo = 10"));
    assert!(out.ends_with("\n\n"));
}

#[tokio::test]
async fn test_missing_program_is_a_spawn_error() {
    let supervisor = Supervisor::new(HarnessConfig::with_program("/nonexistent/sigprobe"));
    let err = supervisor.run(ScenarioKind::Segv).await.unwrap_err();

    assert!(matches!(err, ProbeError::Spawn(_)));
}

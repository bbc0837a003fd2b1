/*!
 * Structured Tracing
 * Subscriber setup and per-scenario spans using the tracing crate
 *
 * Logs go to stderr so stdout carries only banners and reports. Nothing here
 * may be called from inside a signal handler.
 */

use crate::harness::ScenarioOutcome;
use crate::scenarios::ScenarioKind;
use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - SIGPROBE_TRACE_JSON: Enable JSON output (via `HarnessConfig::trace_json`)
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (tests, scenario re-entry) keeps the first subscriber
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        debug!(json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for correlating one scenario's logs
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span covering one supervised scenario
pub struct ScenarioSpan {
    span: tracing::Span,
    start: Instant,
    scenario: ScenarioKind,
    trace_id: String,
}

impl ScenarioSpan {
    pub fn new(scenario: ScenarioKind) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "scenario",
            trace_id = %trace_id,
            scenario = scenario.name(),
            signal = %scenario.signal(),
            pid = tracing::field::Empty,
            outcome = tracing::field::Empty,
            error = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        span.in_scope(|| debug!(scenario = scenario.name(), "scenario started"));

        Self {
            span,
            start: Instant::now(),
            scenario,
            trace_id,
        }
    }

    /// Record the OS pid of the isolated child
    pub fn record_pid(&self, pid: u32) {
        self.span.record("pid", pid);
    }

    pub fn record_outcome(&self, outcome: ScenarioOutcome) {
        self.span.record("outcome", tracing::field::display(outcome));
    }

    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
    }
}

impl Drop for ScenarioSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_ms", duration.as_millis() as u64);
        let _entered = self.span.enter();
        info!(
            trace_id = %self.trace_id,
            scenario = self.scenario.name(),
            duration_ms = duration.as_millis() as u64,
            "scenario finished"
        );
    }
}

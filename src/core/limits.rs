/*!
 * Harness Limits and Constants
 *
 * Central location for timeouts, exit codes and the magic values the
 * stimuli and the event decoder agree on.
 */

use std::time::Duration;

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Upper bound on one scenario process before the supervisor kills it
pub const DEFAULT_SCENARIO_TIMEOUT: Duration = Duration::from_secs(10);

/// How long asynchronous stimuli (SIGIO, SIGCHLD) wait for delivery
/// before reporting that the signal never arrived
pub const DEFAULT_ASYNC_SIGNAL_WAIT: Duration = Duration::from_secs(2);

// =============================================================================
// SCENARIO EXIT CODES
// =============================================================================

/// The registered signal fired and its report was written
pub const EXIT_DECODED: i32 = 0;

/// The stimulus completed without the signal arriving
pub const EXIT_SIGNAL_NOT_RAISED: i32 = 1;

/// Handler registration or stimulus preparation failed
pub const EXIT_SETUP_FAILED: i32 = 2;

// =============================================================================
// STIMULUS VALUES
// =============================================================================

/// Address the SIGSEGV stimulus writes through
pub const FAULT_ADDRESS: usize = 0x42;

/// Byte written to the faulting address
pub const FAULT_WRITE_VALUE: u8 = 123;

/// Bytes the SIGIO writer pushes through the pipe
pub const SIGIO_MESSAGE: &[u8] = b"hello\0";

/// Exit status of the forked child in the SIGCHLD scenario
pub const CHILD_EXIT_STATUS: i32 = 7;

/// Value attached by the sigqueue scenario
pub const QUEUED_VALUE: i32 = 42;

// =============================================================================
// REPORT
// =============================================================================

/// Maximum lines a single report holds (3 base fields + 5 child-status fields)
pub const MAX_REPORT_LINES: usize = 8;

/// Stack buffer size for rendering one report line inside a handler
pub const REPORT_LINE_BUFFER: usize = 64;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Scenario timeout override in milliseconds
pub const ENV_SCENARIO_TIMEOUT: &str = "SIGPROBE_TIMEOUT_MS";

/// Asynchronous signal wait override in milliseconds
pub const ENV_ASYNC_SIGNAL_WAIT: &str = "SIGPROBE_SIGIO_WAIT_MS";

/// Enables JSON log output
pub const ENV_TRACE_JSON: &str = "SIGPROBE_TRACE_JSON";

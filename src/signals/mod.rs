/*!
 * Signals Module
 * Capture, decode and report kernel-delivered signal events
 */

pub mod decoder;
pub mod event;
pub mod handler;
mod raw;
pub mod report;
pub mod types;

// Re-export public API
pub use decoder::decode_and_render;
pub use event::{ChildStatus, Payload, PayloadKind, SignalEvent};
pub use handler::{HandlerRegistrar, Registration};
pub use report::{FieldValue, Report, ReportLine};
pub use types::{
    Signal, SignalClass, SI_ASYNCIO, SI_KERNEL, SI_MESGQ, SI_QUEUE, SI_SIGIO, SI_TIMER,
    SI_TKILL, SI_USER,
};

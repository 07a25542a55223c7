//! Content-free instrumentation of the voice pipeline.
//!
//! Telemetry is written by the pipeline and never read back by classification
//! or dispatch. Events carry identifiers, enums and counts only; transcripts,
//! entity values and feedback messages never enter the buffer.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{DropReason, TelemetryEvent};
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::TelemetryRecorder;

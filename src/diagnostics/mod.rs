// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the toast lifecycle.
//!
//! Events are captured through a [`DiagnosticsHandle`], stored in a
//! memory-bounded [`CircularBuffer`] owned by the [`DiagnosticsCollector`],
//! and exported as JSON reports.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: timestamped [`DiagnosticEventKind`]
//! - [`DiagnosticReport`]: serializable snapshot with summary counters

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::CircularBuffer;
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, ToastEvent, WarningEvent,
    WarningType,
};
pub use report::{DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent};

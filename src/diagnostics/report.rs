// SPDX-License-Identifier: MPL-2.0
//! Serializable report assembled from the collector's buffer.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::events::{DiagnosticEventKind, ToastEvent};

/// Report header.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// When the report was generated (RFC 3339)
    pub generated_at: String,
    /// Version of the crate that generated the report
    pub version: String,
    /// When collection started (RFC 3339)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

/// An event with a timestamp relative to the start of collection.
#[derive(Debug, Clone, Serialize)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(event_timestamp: Instant, collection_start: Instant, kind: DiagnosticEventKind) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;
        Self { timestamp_ms, kind }
    }
}

/// Counters computed from the events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub submitted: usize,
    pub dismissed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        let mut summary = Self::default();
        for event in events {
            match &event.kind {
                DiagnosticEventKind::Toast {
                    event: ToastEvent::Submitted { .. },
                } => summary.submitted += 1,
                DiagnosticEventKind::Toast {
                    event: ToastEvent::Dismissed { .. },
                } => summary.dismissed += 1,
                DiagnosticEventKind::Toast { .. } => {}
                DiagnosticEventKind::Warning { .. } => summary.warnings += 1,
                DiagnosticEventKind::Error { .. } => summary.errors += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(metadata: ReportMetadata, events: Vec<SerializableEvent>) -> Self {
        let summary = ReportSummary::from_events(&events);
        Self {
            metadata,
            summary,
            events,
        }
    }
}

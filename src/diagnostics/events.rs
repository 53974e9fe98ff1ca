// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for toast lifecycle tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::notifications::{DismissReason, NotificationId, Position, Severity};

/// Lifecycle transitions recorded by the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToastEvent {
    Submitted {
        id: NotificationId,
        severity: Severity,
        position: Position,
        duration_ms: u64,
    },
    Dismissed {
        id: NotificationId,
        reason: DismissReason,
        /// Countdown time left at removal; absent for persistent toasts.
        #[serde(skip_serializing_if = "Option::is_none")]
        remaining_ms: Option<u64>,
    },
    Paused {
        id: NotificationId,
    },
    Resumed {
        id: NotificationId,
    },
    Activated {
        id: NotificationId,
    },
    Cleared {
        count: usize,
    },
}

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A warning toast was shown to the user.
    UserFacing,
    ConfigurationIssue,
    Other,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// An error toast was shown to the user.
    UserFacing,
    /// A caller-supplied callback panicked.
    CallbackPanicked,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    Toast {
        #[serde(flatten)]
        event: ToastEvent,
    },
    Warning {
        #[serde(flatten)]
        event: WarningEvent,
    },
    Error {
        #[serde(flatten)]
        event: ErrorEvent,
    },
}

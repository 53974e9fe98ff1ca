// SPDX-License-Identifier: MPL-2.0
//! Render snapshots for whatever draws the toasts.
//!
//! Views are detached copies: holding one never keeps a toast alive, and the
//! renderer reports interactions back as [`Message`](super::Message)s.

use serde::Serialize;

use super::notification::{Notification, NotificationId, Position, Severity};

/// Everything a renderer needs to draw one toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToastView {
    pub id: NotificationId,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Caller glyph, or the severity's default one.
    pub icon: String,
    pub position: Position,
    pub progress_pct: f32,
    pub show_progress: bool,
    pub closable: bool,
    pub clickable: bool,
    pub paused: bool,
}

impl From<&Notification> for ToastView {
    fn from(notification: &Notification) -> Self {
        let severity = notification.severity();
        Self {
            id: notification.id(),
            severity,
            title: notification.title().to_string(),
            message: notification.message().to_string(),
            icon: notification
                .icon()
                .unwrap_or_else(|| severity_glyph(severity))
                .to_string(),
            position: notification.position(),
            progress_pct: notification.progress_pct(),
            show_progress: notification.show_progress() && !notification.is_persistent(),
            closable: notification.closable(),
            clickable: notification.clickable(),
            paused: notification.is_paused(),
        }
    }
}

fn severity_glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✕",
        Severity::Warning => "⚠",
        Severity::Info => "ℹ",
    }
}

/// Toasts of one screen anchor, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionGroup {
    pub position: Position,
    pub toasts: Vec<ToastView>,
}

/// All live toasts grouped per position, in [`Position::ALL`] order.
///
/// Positions without toasts are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Board {
    groups: Vec<PositionGroup>,
}

impl Board {
    pub fn from_notifications<'a>(notifications: impl IntoIterator<Item = &'a Notification>) -> Self {
        let mut buckets: Vec<Vec<ToastView>> = vec![Vec::new(); Position::ALL.len()];
        for notification in notifications {
            if let Some(slot) = Position::ALL
                .iter()
                .position(|p| *p == notification.position())
            {
                buckets[slot].push(ToastView::from(notification));
            }
        }

        let groups = Position::ALL
            .into_iter()
            .zip(buckets)
            .filter(|(_, toasts)| !toasts.is_empty())
            .map(|(position, toasts)| PositionGroup { position, toasts })
            .collect();
        Self { groups }
    }

    /// Views at `position`; empty if none.
    #[must_use]
    pub fn at(&self, position: Position) -> &[ToastView] {
        self.groups
            .iter()
            .find(|g| g.position == position)
            .map(|g| g.toasts.as_slice())
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> impl Iterator<Item = &PositionGroup> {
        self.groups.iter()
    }

    /// Total number of toasts on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.toasts.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

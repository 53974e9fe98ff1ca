// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! [`Notification`] is a plain record: identity, display configuration and
//! the timing state the registry writes back after every tick. Behaviour
//! (callbacks, timers) lives in the registry, keyed by [`NotificationId`].

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::ToastsConfig;

use super::callbacks::{ClickCallback, CloseCallback};

/// Unique identifier for a notification.
///
/// Identifiers come from one process-wide counter, so they are never reused
/// and a smaller id always means an earlier submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Allocates the next identifier.
    pub(crate) fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity level determines default title, default duration and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Title used by the convenience constructors when the caller gives none.
    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

/// Screen anchor a toast is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    #[default]
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    title: String,
    message: String,
    icon: Option<String>,
    position: Position,
    /// Auto-dismiss duration in milliseconds; 0 never expires.
    duration_ms: u64,
    closable: bool,
    clickable: bool,
    persistent: bool,
    show_progress: bool,
    pause_on_hover: bool,
    #[serde(skip)]
    created_at: Instant,
    progress_pct: f32,
    paused: bool,
}

impl Notification {
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Returns whether this notification never auto-dismisses.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration_ms == 0
    }

    #[must_use]
    pub fn closable(&self) -> bool {
        self.closable
    }

    #[must_use]
    pub fn clickable(&self) -> bool {
        self.clickable
    }

    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.show_progress
    }

    #[must_use]
    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// Remaining share of the countdown, from 100 down to 0.
    #[must_use]
    pub fn progress_pct(&self) -> f32 {
        self.progress_pct
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_progress(&mut self, pct: f32) {
        // Never let a late tick raise the bar again.
        self.progress_pct = pct.clamp(0.0, 100.0).min(self.progress_pct);
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

/// Caller-supplied submission request.
///
/// Every field left unset falls back to the registry's [`ToastsConfig`].
///
/// ```
/// use toast_rack::notifications::{NotificationOptions, Position, Severity};
///
/// let options = NotificationOptions::new()
///     .severity(Severity::Warning)
///     .title("Disk almost full")
///     .position(Position::BottomRight)
///     .duration_ms(2_000);
/// # let _ = options;
/// ```
#[derive(Default)]
pub struct NotificationOptions {
    pub(crate) severity: Option<Severity>,
    pub(crate) title: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) position: Option<Position>,
    pub(crate) duration_ms: Option<u64>,
    pub(crate) closable: Option<bool>,
    pub(crate) clickable: Option<bool>,
    pub(crate) persistent: Option<bool>,
    pub(crate) show_progress: Option<bool>,
    pub(crate) pause_on_hover: Option<bool>,
    pub(crate) on_click: Option<ClickCallback>,
    pub(crate) on_close: Option<CloseCallback>,
}

impl NotificationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the auto-dismiss duration. Zero makes the toast non-expiring.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    #[must_use]
    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = Some(clickable);
        self
    }

    /// Marks the toast as persistent, which overrides any duration.
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = Some(persistent);
        self
    }

    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = Some(show_progress);
        self
    }

    #[must_use]
    pub fn pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = Some(pause_on_hover);
        self
    }

    /// Called on every activation of a clickable toast.
    #[must_use]
    pub fn on_click(mut self, f: impl FnMut(&Notification) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Called once when the toast leaves the registry, whatever the reason.
    #[must_use]
    pub fn on_close(mut self, f: impl FnOnce(&Notification) + 'static) -> Self {
        self.on_close = Some(Box::new(f));
        self
    }

    /// Fills `title` only when the caller left it unset.
    pub(crate) fn title_or(mut self, title: &str) -> Self {
        self.title.get_or_insert_with(|| title.to_string());
        self
    }

    /// Fills `duration_ms` only when the caller left it unset.
    pub(crate) fn duration_or(mut self, duration_ms: u64) -> Self {
        self.duration_ms.get_or_insert(duration_ms);
        self
    }

    /// Merges the options over `defaults`, producing the entity and the
    /// callbacks the registry will file under its id.
    pub(crate) fn build(
        self,
        defaults: &ToastsConfig,
        now: Instant,
    ) -> (Notification, Option<ClickCallback>, Option<CloseCallback>) {
        let persistent = self.persistent.unwrap_or(false);
        let duration_ms = if persistent {
            0
        } else {
            self.duration_ms.unwrap_or(defaults.duration_ms)
        };

        let notification = Notification {
            id: NotificationId::next(),
            severity: self.severity.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
            icon: self.icon,
            position: self.position.unwrap_or(defaults.position),
            duration_ms,
            closable: self.closable.unwrap_or(defaults.closable),
            clickable: self.clickable.unwrap_or(defaults.clickable),
            persistent,
            show_progress: self.show_progress.unwrap_or(defaults.show_progress),
            pause_on_hover: self.pause_on_hover.unwrap_or(defaults.pause_on_hover),
            created_at: now,
            progress_pct: 100.0,
            paused: false,
        };

        (notification, self.on_click, self.on_close)
    }
}

impl fmt::Debug for NotificationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationOptions")
            .field("severity", &self.severity)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("position", &self.position)
            .field("duration_ms", &self.duration_ms)
            .field("persistent", &self.persistent)
            .field("on_click", &self.on_click.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish_non_exhaustive()
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Registry`] owns the ordered collection of live toasts, their
//! countdowns and their callbacks. It enforces the capacity limit by evicting
//! the oldest toast at insertion time and guarantees that every toast's
//! `on_close` runs exactly once, whichever way it leaves.
//!
//! The registry is a plain `&mut self` state machine. Hosts that own a
//! run-loop call [`Registry::tick`] periodically; hosts on tokio use
//! [`ToastService`](super::ToastService), which arms one tick loop per toast.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::callbacks::{invoke_isolated, CallbackTable, ClickCallback, CloseCallback};
use super::countdown::{Countdown, CountdownState, TickOutcome};
use super::notification::{Notification, NotificationId, NotificationOptions, Position, Severity};
use super::ticker::TickLoop;
use crate::config::{Config, ToastsConfig};
use crate::diagnostics::{
    DiagnosticsHandle, ErrorEvent, ErrorType, ToastEvent, WarningEvent, WarningType,
};
use crate::domain::Capacity;

/// Why a toast left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissReason {
    /// `dismiss` was called.
    Dismissed,
    /// The user pressed the close control of a closable toast.
    Closed,
    /// The countdown ran out.
    Expired,
    /// Pushed out by a newer toast over capacity.
    Evicted,
    /// Removed by `clear_all`.
    Cleared,
}

/// Messages for notification state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Dismiss(NotificationId),
    /// Close control pressed; ignored for non-closable toasts.
    Close(NotificationId),
    Pause(NotificationId),
    Resume(NotificationId),
    HoverEnter(NotificationId),
    HoverLeave(NotificationId),
    Activate(NotificationId),
    /// Advance every running countdown.
    Tick,
}

/// A toast that has left the registry, with its close callback still to run.
pub struct Removal {
    notification: Notification,
    reason: DismissReason,
    on_close: Option<CloseCallback>,
}

impl Removal {
    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    #[must_use]
    pub fn reason(&self) -> DismissReason {
        self.reason
    }

    /// Runs the close callback, isolating panics.
    pub(crate) fn notify(self, diagnostics: Option<&DiagnosticsHandle>) {
        if let Some(on_close) = self.on_close {
            invoke_isolated("close", &self.notification, diagnostics, on_close);
        }
    }
}

impl fmt::Debug for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Removal")
            .field("id", &self.notification.id())
            .field("reason", &self.reason)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

struct Entry {
    notification: Notification,
    /// Absent for persistent toasts.
    countdown: Option<Countdown>,
    timer: Option<TickLoop>,
}

impl Entry {
    fn is_running(&self) -> bool {
        self.countdown
            .as_ref()
            .is_some_and(|c| c.state() == CountdownState::Running)
    }
}

/// Manages the live toasts.
pub struct Registry {
    /// Live toasts, oldest first.
    entries: VecDeque<Entry>,
    callbacks: CallbackTable,
    capacity: Capacity,
    defaults: ToastsConfig,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Capacity::default(), ToastsConfig::default())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capacity", &self.capacity)
            .field(
                "live",
                &self.entries.iter().map(|e| e.notification.id()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl Registry {
    #[must_use]
    pub fn new(capacity: Capacity, defaults: ToastsConfig) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.value() + 1),
            callbacks: CallbackTable::default(),
            capacity,
            defaults,
            diagnostics: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.queue.max_capacity, config.toasts.clone())
    }

    /// Sets the diagnostics handle for lifecycle logging.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    pub(crate) fn diagnostics(&self) -> Option<DiagnosticsHandle> {
        self.diagnostics.clone()
    }

    /// Defaults merged under every submission.
    #[must_use]
    pub fn defaults(&self) -> &ToastsConfig {
        &self.defaults
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Live toasts in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|e| &e.notification)
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.entry(id).map(|e| &e.notification)
    }

    /// Live toasts anchored at `position`, in submission order.
    pub fn query_by_position(&self, position: Position) -> impl Iterator<Item = &Notification> {
        self.iter().filter(move |n| n.position() == position)
    }

    /// Countdown time left for `id`; `None` if absent or persistent.
    #[must_use]
    pub fn remaining(&self, id: NotificationId, now: Instant) -> Option<Duration> {
        self.entry(id)?.countdown.as_ref().map(|c| c.remaining(now))
    }

    // =========================================================================
    // Public operations
    // =========================================================================

    /// Submits a toast and returns its id. Never fails.
    ///
    /// If the collection grows past capacity, the oldest toast is evicted
    /// (its `on_close` runs) before this returns.
    pub fn submit(&mut self, options: NotificationOptions) -> NotificationId {
        self.submit_at(options, Instant::now())
    }

    pub fn submit_at(&mut self, options: NotificationOptions, now: Instant) -> NotificationId {
        let (id, evicted) = self.admit(options, now);
        for removal in evicted {
            removal.notify(self.diagnostics.as_ref());
        }
        id
    }

    /// Removes a toast, running its `on_close`.
    ///
    /// Returns `true` if the toast was found. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.remove_and_notify(id, DismissReason::Dismissed, Instant::now())
    }

    /// User-initiated close; only honoured for closable toasts.
    pub fn request_close(&mut self, id: NotificationId) -> bool {
        if !self.get(id).is_some_and(Notification::closable) {
            return false;
        }
        self.remove_and_notify(id, DismissReason::Closed, Instant::now())
    }

    /// Removes every toast, running `on_close` in submission order.
    ///
    /// Returns the number of toasts removed.
    pub fn clear_all(&mut self) -> usize {
        let removals = self.take_all(Instant::now());
        let count = removals.len();
        for removal in removals {
            removal.notify(self.diagnostics.as_ref());
        }
        count
    }

    pub fn pause(&mut self, id: NotificationId) -> bool {
        self.set_paused(id, true, Instant::now())
    }

    pub fn resume(&mut self, id: NotificationId) -> bool {
        self.set_paused(id, false, Instant::now())
    }

    /// Pointer entered the toast: pauses when `pause_on_hover` is set.
    pub fn hover_enter(&mut self, id: NotificationId) -> bool {
        self.pauses_on_hover(id) && self.pause(id)
    }

    /// Pointer left the toast: resumes when `pause_on_hover` is set.
    pub fn hover_leave(&mut self, id: NotificationId) -> bool {
        self.pauses_on_hover(id) && self.resume(id)
    }

    /// Runs `on_click` for a clickable toast. Never dismisses it.
    ///
    /// Returns `true` if a callback ran (even if it panicked).
    pub fn handle_activation(&mut self, id: NotificationId) -> bool {
        let Some((snapshot, mut on_click)) = self.take_click(id) else {
            return false;
        };
        invoke_isolated("click", &snapshot, self.diagnostics.as_ref(), |n| on_click(n));
        self.restore_click(id, on_click);
        true
    }

    /// Advances every running countdown, dismissing the ones that expire.
    ///
    /// Returns the ids that expired on this tick.
    pub fn tick(&mut self, now: Instant) -> Vec<NotificationId> {
        let ids: Vec<NotificationId> = self.iter().map(Notification::id).collect();
        let expired: Vec<NotificationId> = ids
            .into_iter()
            .filter(|&id| self.advance(id, now) == Some(TickOutcome::Expired))
            .collect();
        for &id in &expired {
            self.remove_and_notify(id, DismissReason::Expired, now);
        }
        expired
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: &Message) {
        match *message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Close(id) => {
                self.request_close(id);
            }
            Message::Pause(id) => {
                self.pause(id);
            }
            Message::Resume(id) => {
                self.resume(id);
            }
            Message::HoverEnter(id) => {
                self.hover_enter(id);
            }
            Message::HoverLeave(id) => {
                self.hover_leave(id);
            }
            Message::Activate(id) => {
                self.handle_activation(id);
            }
            Message::Tick => {
                self.tick(Instant::now());
            }
        }
    }

    // =========================================================================
    // Building blocks shared with the service
    //
    // None of these run caller callbacks, so the service can call them while
    // holding its borrow and fire the callbacks afterwards.
    // =========================================================================

    /// Inserts a toast and evicts over capacity, returning the evictions.
    pub(crate) fn admit(
        &mut self,
        options: NotificationOptions,
        now: Instant,
    ) -> (NotificationId, Vec<Removal>) {
        let (notification, on_click, on_close) = options.build(&self.defaults, now);
        let id = notification.id();
        let countdown =
            (!notification.is_persistent()).then(|| Countdown::start(notification.duration(), now));

        self.log_submission(&notification);
        self.callbacks.insert(id, on_click, on_close);
        self.entries.push_back(Entry {
            notification,
            countdown,
            timer: None,
        });

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity.value() {
            let oldest = self.entries.front().map(|e| e.notification.id());
            match oldest.and_then(|oldest| self.take(oldest, DismissReason::Evicted, now)) {
                Some(removal) => evicted.push(removal),
                None => break,
            }
        }
        (id, evicted)
    }

    /// Detaches the timer, then removes the toast from the collection.
    pub(crate) fn take(
        &mut self,
        id: NotificationId,
        reason: DismissReason,
        now: Instant,
    ) -> Option<Removal> {
        let index = self.entries.iter().position(|e| e.notification.id() == id)?;

        let entry = &mut self.entries[index];
        if let Some(timer) = entry.timer.take() {
            timer.cancel();
        }
        let remaining = entry.countdown.as_mut().map(|c| {
            c.cancel(now);
            c.remaining(now)
        });

        let entry = self.entries.remove(index)?;
        let on_close = self.callbacks.remove(id).on_close;

        tracing::debug!(%id, ?reason, "toast removed");
        if let Some(handle) = &self.diagnostics {
            #[allow(clippy::cast_possible_truncation)]
            let remaining_ms = remaining.map(|d| d.as_millis() as u64);
            handle.log_toast(ToastEvent::Dismissed {
                id,
                reason,
                remaining_ms,
            });
        }

        Some(Removal {
            notification: entry.notification,
            reason,
            on_close,
        })
    }

    /// Takes every toast out, oldest first.
    pub(crate) fn take_all(&mut self, now: Instant) -> Vec<Removal> {
        let ids: Vec<NotificationId> = self.iter().map(Notification::id).collect();
        let removals: Vec<Removal> = ids
            .into_iter()
            .filter_map(|id| self.take(id, DismissReason::Cleared, now))
            .collect();
        if let Some(handle) = &self.diagnostics {
            handle.log_toast(ToastEvent::Cleared {
                count: removals.len(),
            });
        }
        removals
    }

    /// Pauses or resumes. Pausing detaches the toast's tick loop.
    ///
    /// Returns `true` when the paused flag changed.
    pub(crate) fn set_paused(&mut self, id: NotificationId, paused: bool, now: Instant) -> bool {
        let Some(entry) = self.entry_mut(id) else {
            return false;
        };
        if entry.notification.is_paused() == paused {
            return false;
        }

        entry.notification.set_paused(paused);
        if let Some(countdown) = entry.countdown.as_mut() {
            if paused {
                countdown.pause(now);
            } else {
                countdown.resume(now);
            }
        }
        if paused {
            if let Some(timer) = entry.timer.take() {
                timer.cancel();
            }
        }

        if let Some(handle) = &self.diagnostics {
            handle.log_toast(if paused {
                ToastEvent::Paused { id }
            } else {
                ToastEvent::Resumed { id }
            });
        }
        true
    }

    /// Advances one toast's countdown and records its progress.
    ///
    /// Does not remove an expired toast; the caller does.
    pub(crate) fn advance(&mut self, id: NotificationId, now: Instant) -> Option<TickOutcome> {
        let entry = self.entry_mut(id)?;
        let outcome = entry.countdown.as_mut()?.tick(now);
        match outcome {
            TickOutcome::Running(pct) => entry.notification.set_progress(pct),
            TickOutcome::Expired => entry.notification.set_progress(0.0),
            TickOutcome::Frozen | TickOutcome::Stopped => {}
        }
        Some(outcome)
    }

    /// Whether `id` has a running countdown and still needs a tick loop.
    pub(crate) fn wants_timer(&self, id: NotificationId) -> bool {
        self.entry(id)
            .is_some_and(|e| e.is_running() && e.timer.is_none())
    }

    /// Attaches a tick loop, replacing (and cancelling) any previous one.
    ///
    /// The loop is dropped instead when the toast is gone, persistent or
    /// paused.
    pub(crate) fn attach_timer(&mut self, id: NotificationId, timer: TickLoop) -> bool {
        match self.entry_mut(id) {
            Some(entry) if entry.is_running() => {
                if let Some(previous) = entry.timer.replace(timer) {
                    previous.cancel();
                }
                true
            }
            _ => {
                timer.cancel();
                false
            }
        }
    }

    /// Lends out the click callback of a clickable toast with a snapshot.
    pub(crate) fn take_click(
        &mut self,
        id: NotificationId,
    ) -> Option<(Notification, ClickCallback)> {
        let snapshot = self.get(id).filter(|n| n.clickable())?.clone();
        let on_click = self.callbacks.take_click(id)?;
        if let Some(handle) = &self.diagnostics {
            handle.log_toast(ToastEvent::Activated { id });
        }
        Some((snapshot, on_click))
    }

    /// Puts a lent click callback back if the toast is still live.
    pub(crate) fn restore_click(&mut self, id: NotificationId, on_click: ClickCallback) {
        if self.entry(id).is_some() {
            self.callbacks.restore_click(id, on_click);
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn remove_and_notify(&mut self, id: NotificationId, reason: DismissReason, now: Instant) -> bool {
        match self.take(id, reason, now) {
            Some(removal) => {
                removal.notify(self.diagnostics.as_ref());
                true
            }
            None => false,
        }
    }

    fn pauses_on_hover(&self, id: NotificationId) -> bool {
        self.get(id).is_some_and(Notification::pause_on_hover)
    }

    fn entry(&self, id: NotificationId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.notification.id() == id)
    }

    fn entry_mut(&mut self, id: NotificationId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.notification.id() == id)
    }

    fn log_submission(&self, notification: &Notification) {
        tracing::debug!(
            id = %notification.id(),
            severity = ?notification.severity(),
            position = %notification.position(),
            duration_ms = notification.duration_ms(),
            "toast submitted"
        );
        let Some(handle) = &self.diagnostics else {
            return;
        };
        handle.log_toast(ToastEvent::Submitted {
            id: notification.id(),
            severity: notification.severity(),
            position: notification.position(),
            duration_ms: notification.duration_ms(),
        });

        let text = if notification.message().is_empty() {
            notification.title()
        } else {
            notification.message()
        };
        match notification.severity() {
            Severity::Warning => {
                handle.log_warning(WarningEvent::new(WarningType::UserFacing, text));
            }
            Severity::Error => {
                handle.log_error(ErrorEvent::new(ErrorType::UserFacing, text));
            }
            Severity::Success | Severity::Info => {
                // Success and Info toasts are not logged as diagnostic events
            }
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Tokio-driven front end for the [`Registry`].
//!
//! [`ToastService`] is a cheap, clonable handle meant to be injected into
//! every part of an application that raises toasts. It lives on a single
//! thread inside a [`tokio::task::LocalSet`] and arms one tick loop per
//! expiring toast.
//!
//! Callbacks always run after the registry borrow is released, so an
//! `on_close` or `on_click` may call back into the service.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use super::countdown::TickOutcome;
use super::notification::{Notification, NotificationId, NotificationOptions, Position};
use super::registry::{DismissReason, Registry};
use super::ticker::TickLoop;
use super::view::Board;
use crate::config::Config;
use crate::diagnostics::DiagnosticsHandle;
use crate::domain::TickInterval;

struct Shared {
    registry: RefCell<Registry>,
    tick_interval: Duration,
}

/// Shared handle to one toast registry.
///
/// Every method that can arm a tick loop must run inside a `LocalSet`.
#[derive(Clone)]
pub struct ToastService {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for ToastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastService")
            .field("tick_interval", &self.shared.tick_interval)
            .field("live", &self.len())
            .finish()
    }
}

/// Current time on the tokio clock, so paused test time applies.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

impl ToastService {
    #[must_use]
    pub fn new(registry: Registry, tick_interval: TickInterval) -> Self {
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(registry),
                tick_interval: tick_interval.as_duration(),
            }),
        }
    }

    /// Builds a service from configuration, optionally logging to diagnostics.
    #[must_use]
    pub fn from_config(config: &Config, diagnostics: Option<DiagnosticsHandle>) -> Self {
        let mut registry = Registry::from_config(config);
        if let Some(handle) = diagnostics {
            registry.set_diagnostics(handle);
        }
        Self::new(registry, config.timing.tick_interval_ms)
    }

    /// Submits a toast, arming its countdown unless it is persistent.
    ///
    /// # Panics
    ///
    /// Panics when an expiring toast is submitted outside a `LocalSet`.
    pub fn submit(&self, options: NotificationOptions) -> NotificationId {
        let (id, evicted, diagnostics) = {
            let mut registry = self.shared.registry.borrow_mut();
            let (id, evicted) = registry.admit(options, now());
            (id, evicted, registry.diagnostics())
        };
        self.arm(id);
        for removal in evicted {
            removal.notify(diagnostics.as_ref());
        }
        id
    }

    /// Removes a toast and runs its `on_close`. Unknown ids are ignored.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        self.remove(id, DismissReason::Dismissed)
    }

    /// Close control pressed; only closable toasts are removed.
    pub fn request_close(&self, id: NotificationId) -> bool {
        let closable = self.get(id).is_some_and(|n| n.closable());
        closable && self.remove(id, DismissReason::Closed)
    }

    /// Removes every toast in submission order. Returns how many were live.
    pub fn clear_all(&self) -> usize {
        let (removals, diagnostics) = {
            let mut registry = self.shared.registry.borrow_mut();
            let removals = registry.take_all(now());
            (removals, registry.diagnostics())
        };
        let count = removals.len();
        for removal in removals {
            removal.notify(diagnostics.as_ref());
        }
        count
    }

    /// Freezes the countdown and detaches the tick loop.
    pub fn pause(&self, id: NotificationId) -> bool {
        let mut registry = self.shared.registry.borrow_mut();
        registry.set_paused(id, true, now())
    }

    /// Restarts the countdown from the time it had left.
    ///
    /// # Panics
    ///
    /// Panics when called outside a `LocalSet`.
    pub fn resume(&self, id: NotificationId) -> bool {
        let resumed = {
            let mut registry = self.shared.registry.borrow_mut();
            registry.set_paused(id, false, now())
        };
        if resumed {
            self.arm(id);
        }
        resumed
    }

    pub fn hover_enter(&self, id: NotificationId) -> bool {
        self.pauses_on_hover(id) && self.pause(id)
    }

    pub fn hover_leave(&self, id: NotificationId) -> bool {
        self.pauses_on_hover(id) && self.resume(id)
    }

    /// Runs `on_click` for a clickable toast. Never dismisses it.
    pub fn handle_activation(&self, id: NotificationId) -> bool {
        let (lent, diagnostics) = {
            let mut registry = self.shared.registry.borrow_mut();
            let lent = registry.take_click(id);
            (lent, registry.diagnostics())
        };
        let Some((snapshot, mut on_click)) = lent else {
            return false;
        };

        super::callbacks::invoke_isolated("click", &snapshot, diagnostics.as_ref(), |n| {
            on_click(n);
        });

        let mut registry = self.shared.registry.borrow_mut();
        registry.restore_click(id, on_click);
        true
    }

    /// Snapshots of the toasts anchored at `position`, in submission order.
    #[must_use]
    pub fn query_by_position(&self, position: Position) -> Vec<Notification> {
        let registry = self.shared.registry.borrow();
        registry.query_by_position(position).cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let registry = self.shared.registry.borrow();
        registry.get(id).cloned()
    }

    /// Snapshots of every live toast, in submission order.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        let registry = self.shared.registry.borrow();
        registry.iter().cloned().collect()
    }

    /// Render views grouped by position.
    #[must_use]
    pub fn board(&self) -> Board {
        let registry = self.shared.registry.borrow();
        Board::from_notifications(registry.iter())
    }

    #[must_use]
    pub fn remaining(&self, id: NotificationId) -> Option<Duration> {
        let registry = self.shared.registry.borrow();
        registry.remaining(id, now())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.shared.registry.borrow().capacity()
    }

    pub(crate) fn error_duration_ms(&self) -> u64 {
        self.shared.registry.borrow().defaults().error_duration_ms
    }

    fn remove(&self, id: NotificationId, reason: DismissReason) -> bool {
        let (removal, diagnostics) = {
            let mut registry = self.shared.registry.borrow_mut();
            let removal = registry.take(id, reason, now());
            (removal, registry.diagnostics())
        };
        match removal {
            Some(removal) => {
                removal.notify(diagnostics.as_ref());
                true
            }
            None => false,
        }
    }

    fn pauses_on_hover(&self, id: NotificationId) -> bool {
        self.get(id).is_some_and(|n| n.pause_on_hover())
    }

    /// Spawns a tick loop for `id` if its countdown is running without one.
    fn arm(&self, id: NotificationId) {
        let wanted = self.shared.registry.borrow().wants_timer(id);
        if !wanted {
            return;
        }

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let timer = TickLoop::spawn(self.shared.tick_interval, move || match weak.upgrade() {
            Some(shared) => ToastService { shared }.on_tick(id),
            None => ControlFlow::Break(()),
        });

        let mut registry = self.shared.registry.borrow_mut();
        registry.attach_timer(id, timer);
    }

    /// One tick for one toast. Breaks once the toast is gone or frozen.
    fn on_tick(&self, id: NotificationId) -> ControlFlow<()> {
        let now = now();
        let (removal, diagnostics) = {
            let mut registry = self.shared.registry.borrow_mut();
            let outcome = registry.advance(id, now);
            match outcome {
                Some(TickOutcome::Running(_)) => return ControlFlow::Continue(()),
                Some(TickOutcome::Expired) => {
                    let removal = registry.take(id, DismissReason::Expired, now);
                    (removal, registry.diagnostics())
                }
                Some(TickOutcome::Frozen | TickOutcome::Stopped) | None => {
                    return ControlFlow::Break(())
                }
            }
        };

        if let Some(removal) = removal {
            removal.notify(diagnostics.as_ref());
        }
        ControlFlow::Break(())
    }
}

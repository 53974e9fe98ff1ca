// SPDX-License-Identifier: MPL-2.0
//! Caller callbacks, kept beside the notifications rather than inside them.
//!
//! Panics raised by a callback are caught and reported so that a faulty
//! caller can never leave the registry half-updated.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType};

use super::notification::{Notification, NotificationId};

/// Invoked on every activation of a clickable toast.
pub type ClickCallback = Box<dyn FnMut(&Notification)>;

/// Invoked exactly once when the toast is removed.
pub type CloseCallback = Box<dyn FnOnce(&Notification)>;

/// Callbacks registered for one notification.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub(crate) on_click: Option<ClickCallback>,
    pub(crate) on_close: Option<CloseCallback>,
}

impl Callbacks {
    fn is_empty(&self) -> bool {
        self.on_click.is_none() && self.on_close.is_none()
    }
}

/// Side table of callbacks keyed by notification id.
#[derive(Default)]
pub(crate) struct CallbackTable {
    entries: HashMap<NotificationId, Callbacks>,
}

impl CallbackTable {
    pub(crate) fn insert(
        &mut self,
        id: NotificationId,
        on_click: Option<ClickCallback>,
        on_close: Option<CloseCallback>,
    ) {
        let callbacks = Callbacks { on_click, on_close };
        if !callbacks.is_empty() {
            self.entries.insert(id, callbacks);
        }
    }

    /// Removes everything filed under `id`.
    pub(crate) fn remove(&mut self, id: NotificationId) -> Callbacks {
        self.entries.remove(&id).unwrap_or_default()
    }

    /// Lends the click callback out so it can run without the table borrowed.
    pub(crate) fn take_click(&mut self, id: NotificationId) -> Option<ClickCallback> {
        self.entries.get_mut(&id)?.on_click.take()
    }

    /// Returns a lent click callback, unless one was registered meanwhile.
    pub(crate) fn restore_click(&mut self, id: NotificationId, callback: ClickCallback) {
        if let Some(callbacks) = self.entries.get_mut(&id) {
            callbacks.on_click.get_or_insert(callback);
        } else {
            self.entries.insert(
                id,
                Callbacks {
                    on_click: Some(callback),
                    on_close: None,
                },
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Runs a callback, converting a panic into a logged error.
///
/// Returns `false` when the callback panicked.
pub(crate) fn invoke_isolated(
    kind: &'static str,
    notification: &Notification,
    diagnostics: Option<&DiagnosticsHandle>,
    f: impl FnOnce(&Notification),
) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(|| f(notification))) {
        Ok(()) => true,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::warn!(id = %notification.id(), kind, %reason, "toast callback panicked");
            if let Some(handle) = diagnostics {
                handle.log_error(ErrorEvent::new(
                    ErrorType::CallbackPanicked,
                    format!("{kind} callback for {} panicked: {reason}", notification.id()),
                ));
            }
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToastsConfig;
    use crate::notifications::NotificationOptions;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Instant;

    fn sample() -> Notification {
        NotificationOptions::new()
            .build(&ToastsConfig::default(), Instant::now())
            .0
    }

    #[test]
    fn empty_callbacks_are_not_stored() {
        let mut table = CallbackTable::default();
        table.insert(sample().id(), None, None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn remove_returns_registered_callbacks_once() {
        let mut table = CallbackTable::default();
        let n = sample();
        table.insert(n.id(), None, Some(Box::new(|_| {})));

        assert!(table.remove(n.id()).on_close.is_some());
        assert!(table.remove(n.id()).on_close.is_none());
    }

    #[test]
    fn take_and_restore_click_round_trips() {
        let mut table = CallbackTable::default();
        let n = sample();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        table.insert(n.id(), Some(Box::new(move |_| counter.set(counter.get() + 1))), None);

        let mut cb = table.take_click(n.id()).expect("click registered");
        cb(&n);
        assert!(table.take_click(n.id()).is_none());
        table.restore_click(n.id(), cb);

        let mut cb = table.take_click(n.id()).expect("click restored");
        cb(&n);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn invoke_isolated_reports_success() {
        let n = sample();
        let called = Cell::new(false);
        assert!(invoke_isolated("close", &n, None, |_| called.set(true)));
        assert!(called.get());
    }

    #[test]
    fn invoke_isolated_swallows_panics() {
        let n = sample();
        assert!(!invoke_isolated("close", &n, None, |_| panic!("caller bug")));
    }

    #[test]
    fn panic_message_reads_string_payloads() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted"));
        assert_eq!(panic_message(payload.as_ref()), "formatted");
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}

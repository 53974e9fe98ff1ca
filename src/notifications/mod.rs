// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to inform users about actions (save
//! success, errors, etc.) without blocking interaction. At most a fixed number
//! are live at once; the oldest is evicted when a new one arrives.
//!
//! # Components
//!
//! - [`Notification`] - Core record with severity, position and progress
//! - [`Registry`] - Ordered collection enforcing capacity and lifecycle
//! - [`ToastService`] - Clonable handle driving countdowns on a tokio `LocalSet`
//! - [`Toasts`] - Severity and application presets
//! - [`Board`] - Render snapshots grouped by position
//!
//! # Usage
//!
//! ```no_run
//! use toast_rack::config::Config;
//! use toast_rack::notifications::{NotificationOptions, ToastService, Toasts};
//!
//! # async fn demo() {
//! let local = tokio::task::LocalSet::new();
//! local
//!     .run_until(async {
//!         let mut toasts = ToastService::from_config(&Config::default(), None);
//!         toasts.success("Image saved successfully", NotificationOptions::new());
//!         let board = toasts.board();
//!         # let _ = board;
//!     })
//!     .await;
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Default duration: 5s, errors 8s, zero means persistent
//! - Max live toasts: 5 (oldest evicted, its `on_close` still runs)
//! - Default position: top-right
//! - Hovering pauses the countdown unless `pause_on_hover` is off

mod callbacks;
mod countdown;
mod notification;
mod presets;
mod registry;
mod service;
mod ticker;
mod view;

pub use callbacks::{ClickCallback, CloseCallback};
pub use countdown::{Countdown, CountdownState, TickOutcome};
pub use notification::{Notification, NotificationId, NotificationOptions, Position, Severity};
pub use presets::{Submit, Toasts};
pub use registry::{DismissReason, Message as NotificationMessage, Registry, Removal};
pub use service::ToastService;
pub use view::{Board, PositionGroup, ToastView};

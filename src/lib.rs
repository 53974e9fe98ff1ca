// SPDX-License-Identifier: MPL-2.0
//! `toast_rack` is a bounded, position-aware toast notification manager.
//!
//! It keeps a capped, insertion-ordered set of short-lived notifications,
//! runs a pausable countdown for each one, and calls back into the host when
//! a toast is clicked or leaves the screen.

#![doc(html_root_url = "https://docs.rs/toast_rack/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod notifications;

#[cfg(test)]
pub(crate) mod test_utils;

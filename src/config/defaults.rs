// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Toasts**: per-notification defaults merged under caller options
//! - **Queue**: capacity of the live collection
//! - **Timing**: countdown tick period
//! - **Diagnostics**: event buffer size

use crate::domain::{buffer_capacity_bounds, capacity_bounds, tick_interval_bounds};

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Default auto-dismiss duration for a toast (in milliseconds).
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Default auto-dismiss duration used by the `error` convenience constructor.
pub const DEFAULT_ERROR_DURATION_MS: u64 = 8000;

/// Whether toasts show a close button by default.
pub const DEFAULT_CLOSABLE: bool = true;

/// Whether toasts react to activation by default.
pub const DEFAULT_CLICKABLE: bool = false;

/// Whether the renderer should draw the countdown bar by default.
pub const DEFAULT_SHOW_PROGRESS: bool = true;

/// Whether hovering a toast pauses its countdown by default.
pub const DEFAULT_PAUSE_ON_HOVER: bool = true;

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default maximum number of live toasts.
pub const DEFAULT_MAX_CAPACITY: usize = capacity_bounds::DEFAULT;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Default countdown tick period (in milliseconds).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = tick_interval_bounds::DEFAULT_MS;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events retained.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

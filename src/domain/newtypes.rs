// SPDX-License-Identifier: MPL-2.0
//! Bounded value types for queue, timing and diagnostics settings.
//!
//! Each newtype clamps on construction, so a held value is always in range.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// Capacity
// =============================================================================

/// Bounds for the number of simultaneously live toasts.
pub mod capacity_bounds {
    /// Minimum capacity.
    pub const MIN: usize = 1;
    /// Maximum capacity.
    pub const MAX: usize = 50;
    /// Default capacity.
    pub const DEFAULT: usize = 5;
}

/// Maximum number of live toasts a registry holds before evicting the oldest.
///
/// ```
/// use toast_rack::domain::Capacity;
///
/// assert_eq!(Capacity::new(3).value(), 3);
/// assert_eq!(Capacity::new(0).value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct Capacity(usize);

impl Capacity {
    /// Creates a new capacity, clamping to the valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(capacity_bounds::MIN, capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self(capacity_bounds::DEFAULT)
    }
}

impl From<usize> for Capacity {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<Capacity> for usize {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

// =============================================================================
// TickInterval
// =============================================================================

/// Bounds for the countdown tick period, in milliseconds.
pub mod tick_interval_bounds {
    pub const MIN_MS: u64 = 10;
    pub const MAX_MS: u64 = 1000;
    pub const DEFAULT_MS: u64 = 50;
}

/// Period between two countdown ticks of a single toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub struct TickInterval(u64);

impl TickInterval {
    /// Creates a new interval from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(tick_interval_bounds::MIN_MS, tick_interval_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for TickInterval {
    fn default() -> Self {
        Self(tick_interval_bounds::DEFAULT_MS)
    }
}

impl From<u64> for TickInterval {
    fn from(ms: u64) -> Self {
        Self::from_millis(ms)
    }
}

impl From<TickInterval> for u64 {
    fn from(value: TickInterval) -> Self {
        value.0
    }
}

// =============================================================================
// BufferCapacity
// =============================================================================

/// Buffer capacity bounds for the diagnostics ring buffer.
pub mod buffer_capacity_bounds {
    pub const MIN: usize = 16;
    pub const MAX: usize = 10_000;
    pub const DEFAULT: usize = 512;
}

/// Number of diagnostic events retained before the oldest is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(buffer_capacity_bounds::MIN, buffer_capacity_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(buffer_capacity_bounds::DEFAULT)
    }
}

impl From<usize> for BufferCapacity {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<BufferCapacity> for usize {
    fn from(value: BufferCapacity) -> Self {
        value.0
    }
}

// =============================================================================
// Tests
// =============================================================================

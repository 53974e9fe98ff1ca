// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Progress percentages are `f32`, so countdown tests compare them through the
//! `approx` macros rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;

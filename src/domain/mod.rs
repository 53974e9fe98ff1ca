// SPDX-License-Identifier: MPL-2.0
//! Domain layer: bounded value objects shared by configuration and runtime.
//!
//! - [`Capacity`]: live-toast limit enforced by the registry
//! - [`TickInterval`]: countdown tick period
//! - [`BufferCapacity`]: diagnostics ring buffer size

mod newtypes;

pub use newtypes::{
    buffer_capacity_bounds, capacity_bounds, tick_interval_bounds, BufferCapacity, Capacity,
    TickInterval,
};

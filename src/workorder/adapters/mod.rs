//! Adapter implementations of the work-order ports.

pub mod memory;
pub mod postgres;

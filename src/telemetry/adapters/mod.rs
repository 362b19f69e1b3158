//! Adapter implementations of the telemetry ports.

pub mod memory;
pub mod postgres;

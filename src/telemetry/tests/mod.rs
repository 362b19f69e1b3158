//! Unit tests for the telemetry context.

mod domain_tests;
mod service_tests;

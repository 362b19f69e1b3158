//! Unit tests for the registry context.

mod domain_tests;
mod service_tests;

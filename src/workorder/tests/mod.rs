//! Unit tests for the work-order context.

mod domain_tests;
mod service_tests;

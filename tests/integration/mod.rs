//! Integration Tests
//!
//! End-to-end coverage of the auto-context pipeline with a scripted mock
//! provider injected through the provider cache factory.

mod auto_context;
mod runner;
mod support;

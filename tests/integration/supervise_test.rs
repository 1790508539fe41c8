//! Integration tests for assistant manager supervision.
//!
//! These tests are implemented in:
//! `crates/warden-shim/tests/supervise_test.rs`
//!
//! Covered scenarios:
//! - `unmanaged_shim_fails_fast`: a shim the registry does not manage
//!   refuses to run
//! - `shim_runs_a_short_workload_to_completion`: exit info is decoded and
//!   reported back to the registry
//! - `stop_directive_terminates_a_long_workload`: a stop request winds the
//!   workload down with SIGTERM and the corpse is reported

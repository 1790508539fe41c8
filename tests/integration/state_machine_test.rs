//! Integration tests for the control protocol and state machine.
//!
//! These tests are implemented in:
//! `crates/warden-server/tests/state_machine_test.rs`
//!
//! Covered scenarios:
//! - `full_lifecycle_over_the_wire`: create/start/stop/report/delete driven
//!   manually through the wire client, standing in for all three roles
//! - `deleted_tag_reporting_in_is_aborted`: a forgotten shim is told to abort
//! - `concurrent_clients_are_serviced`: two connections interleave requests
//! - `malformed_line_keeps_the_connection_usable`: framing errors answer
//!   in-band and do not poison the connection

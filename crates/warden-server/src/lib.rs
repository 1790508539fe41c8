//! # warden-server
//!
//! The control interface of the Warden control plane: one multiplexed
//! request/response boundary exposing the registry's operations to
//! operators, the executor, and assistant managers.
//!
//! Connections are handled concurrently; every registry operation runs
//! as a single critical section behind the registry handle's lock, so
//! no caller ever observes a partially applied transition.

pub mod dispatch;
pub mod server;

pub use server::Server;

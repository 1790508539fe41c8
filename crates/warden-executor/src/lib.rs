//! # warden-executor
//!
//! The deferred-work role of the Warden control plane. The registry is
//! pure bookkeeping and must answer every request quickly, so anything
//! slow or privileged is offloaded here: the executor periodically
//! claims the ready queue and launches an assistant manager process for
//! every claimed tag, then reaps those children as they die.

pub mod executor;

pub use executor::{Executor, resolve_shim_bin};

//! # warden-shim
//!
//! The assistant manager: a per-container supervising process that
//! starts one workload, monitors it, reports status to the registry,
//! and honors the directive returned on every report. If the registry
//! does not recognize it, the shim kills the workload and itself — an
//! orphaned supervisor must never keep a workload alive just because
//! its controller forgot about it.

pub mod exit;
pub mod signal;
pub mod supervisor;

pub use supervisor::{AssistantManager, ShimOutcome};

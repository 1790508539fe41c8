//! Authoritative container lifecycle bookkeeping for Warden.
//!
//! The registry holds the single shared table of container records and
//! enforces which transitions are legal. It performs no external I/O —
//! process creation and teardown belong to the executor and assistant
//! manager roles, which only report outcomes back through the control
//! interface.

pub mod handle;
pub mod queue;
pub mod record;
pub mod registry;

pub use handle::RegistryHandle;
pub use registry::Registry;

//! Shared, mutation-serializing access to the registry.
//!
//! The reference for this control plane processed one request at a time
//! end-to-end; here the table sits behind a single async lock instead, so
//! connections are handled concurrently while every registry operation
//! remains one atomic critical section. No transition can be observed
//! half-applied, and a drain claims the whole queue before any other
//! caller runs.

use std::sync::Arc;

use tokio::sync::Mutex;
use warden_common::error::Result;
use warden_common::types::{
    AssistantManagerInfo, ContainerInfo, Directive, StatusReport, Tag, WorkloadCommand,
};

use crate::registry::Registry;

/// Cloneable handle to the shared registry table.
#[derive(Debug, Clone, Default)]
pub struct RegistryHandle {
    inner: Arc<Mutex<Registry>>,
}

impl RegistryHandle {
    /// Creates a handle over a fresh, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`Registry::create`].
    ///
    /// # Errors
    ///
    /// Returns an error if the tag already exists.
    pub async fn create(&self, tag: Tag, command: Option<WorkloadCommand>) -> Result<()> {
        self.inner.lock().await.create(tag, command)
    }

    /// See [`Registry::start`].
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not `Ready` or no command is
    /// known.
    pub async fn start(&self, tag: &Tag, command: Option<WorkloadCommand>) -> Result<()> {
        self.inner.lock().await.start(tag, command)
    }

    /// See [`Registry::stop`].
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not `Running`.
    pub async fn stop(&self, tag: &Tag) -> Result<()> {
        self.inner.lock().await.stop(tag)
    }

    /// See [`Registry::delete`].
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown or the record is not
    /// terminal.
    pub async fn delete(&self, tag: &Tag) -> Result<()> {
        self.inner.lock().await.delete(tag)
    }

    /// See [`Registry::list`].
    pub async fn list(&self, tags: &[Tag]) -> Vec<ContainerInfo> {
        self.inner.lock().await.list(tags)
    }

    /// See [`Registry::dequeue_ready`].
    pub async fn dequeue_ready(&self) -> Vec<Tag> {
        self.inner.lock().await.dequeue_ready()
    }

    /// See [`Registry::running`].
    pub async fn running(&self) -> Vec<Tag> {
        self.inner.lock().await.running()
    }

    /// See [`Registry::assistant_status`].
    pub async fn assistant_status(&self, tag: &Tag) -> Option<AssistantManagerInfo> {
        self.inner.lock().await.assistant_status(tag)
    }

    /// See [`Registry::report`].
    pub async fn report(&self, report: &StatusReport) -> Directive {
        self.inner.lock().await.report(report)
    }
}

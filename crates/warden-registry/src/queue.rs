//! Buffer of tags awaiting the executor's claim.
//!
//! Tags enter when a record reaches `Ready` and leave exactly once:
//! either through a drain or because an operator started the container
//! directly. The queue never holds a tag in any other state.

use std::collections::VecDeque;

use warden_common::types::Tag;

/// FIFO of `Ready` tags pending execution.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    inner: VecDeque<Tag>,
}

impl ReadyQueue {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: VecDeque::new(),
        }
    }

    /// Appends a tag; callers guarantee the tag is not already queued.
    pub fn push(&mut self, tag: Tag) {
        debug_assert!(!self.inner.contains(&tag));
        self.inner.push_back(tag);
    }

    /// Atomically returns and empties the queue contents.
    ///
    /// A tag returned here is never returned by a later drain unless it
    /// re-enters `Ready` through a new create.
    pub fn drain(&mut self) -> Vec<Tag> {
        self.inner.drain(..).collect()
    }

    /// Removes a tag if still queued, so the operator-start and
    /// executor-drain paths converge safely.
    pub fn remove(&mut self, tag: &Tag) {
        self.inner.retain(|t| t != tag);
    }

    /// Returns whether the tag is currently queued.
    #[must_use]
    pub fn contains(&self, tag: &Tag) -> bool {
        self.inner.contains(tag)
    }

    /// Returns the number of queued tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let mut q = ReadyQueue::new();
        q.push(Tag::new("a"));
        q.push(Tag::new("b"));
        assert_eq!(q.drain().len(), 2);
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn remove_deletes_only_the_named_tag() {
        let mut q = ReadyQueue::new();
        q.push(Tag::new("a"));
        q.push(Tag::new("b"));
        q.remove(&Tag::new("a"));
        assert!(!q.contains(&Tag::new("a")));
        assert!(q.contains(&Tag::new("b")));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn drain_preserves_insertion_order() {
        let mut q = ReadyQueue::new();
        q.push(Tag::new("a"));
        q.push(Tag::new("b"));
        q.push(Tag::new("c"));
        let tags: Vec<String> = q.drain().iter().map(ToString::to_string).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }
}

//! Root tag allocation.
//!
//! Root tags start at 1 and advance by 10; the tags in between are left for
//! the descendants the JavaScript side creates under that root.
//!
//! The counter is plain state owned by one UI manager and relies on the
//! single-thread discipline of the manager itself.

use crate::types::Tag;

/// Monotonic root tag counter.
///
/// Once the next tag would overflow [`Tag`], the counter is exhausted and
/// [`allocate`](Self::allocate) returns `None` from then on.
#[derive(Debug, Clone)]
pub struct RootTagAllocator {
    next: Option<Tag>,
    stride: Tag,
}

impl RootTagAllocator {
    pub const DEFAULT_FIRST: Tag = 1;
    pub const DEFAULT_STRIDE: Tag = 10;

    pub fn new(first: Tag, stride: Tag) -> Self {
        Self {
            next: Some(first),
            stride,
        }
    }

    /// Return the current value and advance by the stride.
    pub fn allocate(&mut self) -> Option<Tag> {
        let tag = self.next?;
        self.next = tag.checked_add(self.stride);
        Some(tag)
    }

    /// The tag the next [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> Option<Tag> {
        self.next
    }
}

impl Default for RootTagAllocator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FIRST, Self::DEFAULT_STRIDE)
    }
}

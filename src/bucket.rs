//! Buckets and chains: owned singly-linked nodes hanging off each slot.
//!
//! Every walk here is a loop rather than recursion so a long chain (for
//! example under a degenerate hasher) never costs stack depth. That
//! includes `Drop`.

use crate::value::Value;

pub(crate) type Link = Option<Box<Bucket>>;

#[derive(Debug)]
pub(crate) struct Bucket {
    pub(crate) key: Box<str>,
    pub(crate) value: Value,
    pub(crate) next: Link,
}

impl Bucket {
    /// New unlinked node owning a copy of `key`.
    pub(crate) fn new(key: &str, value: Value) -> Box<Self> {
        Box::new(Bucket {
            key: Box::from(key),
            value,
            next: None,
        })
    }

    #[inline]
    pub(crate) fn has_key(&self, key: &str) -> bool {
        // Slice equality checks length first, then stops at the first
        // differing byte.
        self.key.as_bytes() == key.as_bytes()
    }
}

/// One slot of the table: the head of a chain, possibly empty.
#[derive(Debug, Default)]
pub(crate) struct Chain {
    head: Link,
}

impl Chain {
    pub(crate) const fn new() -> Self {
        Chain { head: None }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Nodes in chain order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Bucket> {
        core::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
    }

    pub(crate) fn find(&self, key: &str) -> Option<&Bucket> {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if node.has_key(key) {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    /// The link that either holds the node for `key` or, when the key is
    /// absent, the empty tail link where a new node belongs.
    pub(crate) fn slot_mut(&mut self, key: &str) -> &mut Link {
        let mut cur = &mut self.head;
        while cur.as_deref().is_some_and(|node| !node.has_key(key)) {
            if let Some(node) = cur {
                cur = &mut node.next;
            }
        }
        cur
    }

    /// Unlink and return the node for `key`, if any. The rest of the chain
    /// keeps its order.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Box<Bucket>> {
        let slot = self.slot_mut(key);
        let mut node = slot.take()?;
        *slot = node.next.take();
        Some(node)
    }

    /// Link `node` after the current tail. `node` must be unlinked.
    pub(crate) fn push_back(&mut self, node: Box<Bucket>) {
        debug_assert!(node.next.is_none());
        let mut cur = &mut self.head;
        while let Some(n) = cur {
            cur = &mut n.next;
        }
        *cur = Some(node);
    }

    /// Detach the head node, leaving it unlinked.
    pub(crate) fn pop_front(&mut self) -> Option<Box<Bucket>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.iter().count()
    }

    /// Keys in chain order. Test-only view; the table offers no traversal.
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<&str> {
        self.iter().map(|node| &*node.key).collect()
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next.take();
        }
    }
}

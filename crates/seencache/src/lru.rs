//! Recency-ordered store backing the cache
//!
//! Slots live in an arena and link to each other by index, forming an
//! intrusive doubly-linked list (head = most recent, tail = least recent).
//! The arena only grows until it reaches capacity; after that, inserting a
//! new key recycles the tail slot in place.

use std::collections::HashMap;
use std::sync::Arc;
use ahash::RandomState;

use crate::element::CacheElement;
use crate::error::{Error, Result};

/// Slot in the recency list
struct Slot<E: ?Sized> {
    element: Arc<E>,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Outcome of recording an element
pub(crate) enum Seen<E: ?Sized> {
    /// Key was present; value replaced and promoted
    Updated,
    /// Key was new and a free slot was available
    Inserted,
    /// Key was new and the least recently seen element made room for it
    Evicted(Arc<E>),
}

/// Index plus recency list, not synchronized
pub(crate) struct Recency<E: ?Sized> {
    index: HashMap<String, usize, RandomState>,
    slots: Vec<Slot<E>>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<E: CacheElement + ?Sized> Recency<E> {
    /// Create an empty store with room reserved for `capacity` elements
    ///
    /// Fails with `Error::InvalidCapacity` when the reservation cannot be
    /// made, rather than aborting on allocation.
    pub(crate) fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        let mut index = HashMap::with_hasher(RandomState::new());
        index
            .try_reserve(capacity)
            .map_err(|_| Error::InvalidCapacity)?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| Error::InvalidCapacity)?;

        Ok(Self {
            index,
            slots,
            head: None,
            tail: None,
            capacity,
        })
    }

    /// Record `element` as the most recently seen one
    ///
    /// Every call into `CacheElement::key` happens before the store is
    /// touched, so a panicking key leaves index and list consistent.
    pub(crate) fn see(&mut self, element: Arc<E>) -> Seen<E> {
        if let Some(&idx) = self.index.get(element.key()) {
            self.slots[idx].element = element;
            self.move_to_front(idx);
            return Seen::Updated;
        }

        match self.tail {
            Some(idx) if self.slots.len() >= self.capacity => {
                let incoming = element.key();
                let outgoing = self.slots[idx].element.key();

                // Reuse the evicted key's buffer for the new key
                let stale = self.index.remove_entry(outgoing);
                debug_assert!(stale.is_some(), "evicted key missing from index");
                let mut key = stale.map(|(key, _)| key).unwrap_or_default();
                key.clear();
                key.push_str(incoming);
                self.index.insert(key, idx);

                let evicted = std::mem::replace(&mut self.slots[idx].element, element);
                self.move_to_front(idx);
                Seen::Evicted(evicted)
            }
            _ => {
                let idx = self.slots.len();
                let key = element.key().to_owned();
                self.slots.push(Slot {
                    element,
                    prev: None,
                    next: None,
                });
                self.push_front(idx);
                self.index.insert(key, idx);
                Seen::Inserted
            }
        }
    }

    /// Look up an element without changing its position
    pub(crate) fn get(&self, key: &str) -> Option<&Arc<E>> {
        self.index.get(key).map(|&idx| &self.slots[idx].element)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate elements from most to least recently seen
    pub(crate) fn iter(&self) -> Iter<'_, E> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
        }
    }

    /// Verify that index and list describe the same set of elements in a
    /// well-formed order
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.slots.len() > self.capacity {
            return Err(Error::Corrupted(format!(
                "{} entries exceed capacity {}",
                self.slots.len(),
                self.capacity
            )));
        }

        if self.index.len() != self.slots.len() {
            return Err(Error::Corrupted(format!(
                "index holds {} keys but list holds {} entries",
                self.index.len(),
                self.slots.len()
            )));
        }

        for (key, &idx) in &self.index {
            match self.slots.get(idx) {
                Some(slot) if slot.element.key() == key.as_str() => {}
                Some(slot) => {
                    return Err(Error::Corrupted(format!(
                        "key {:?} points at entry holding {:?}",
                        key,
                        slot.element.key()
                    )));
                }
                None => {
                    return Err(Error::Corrupted(format!(
                        "key {:?} points past the list ({})",
                        key, idx
                    )));
                }
            }
        }

        let mut prev = None;
        let mut cursor = self.head;
        let mut visited = 0;
        while let Some(idx) = cursor {
            if visited == self.slots.len() {
                return Err(Error::Corrupted("list contains a cycle".to_string()));
            }
            let slot = self
                .slots
                .get(idx)
                .ok_or_else(|| Error::Corrupted(format!("link to missing entry {}", idx)))?;
            if slot.prev != prev {
                return Err(Error::Corrupted(format!("broken back link at entry {}", idx)));
            }
            prev = Some(idx);
            cursor = slot.next;
            visited += 1;
        }

        if visited != self.slots.len() {
            return Err(Error::Corrupted(format!(
                "list reaches {} of {} entries",
                visited,
                self.slots.len()
            )));
        }

        if self.tail != prev {
            return Err(Error::Corrupted("tail is not the last entry".to_string()));
        }

        Ok(())
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        self.slots[idx].prev = None;
        self.slots[idx].next = self.head;

        match self.head {
            Some(head_idx) => self.slots[head_idx].prev = Some(idx),
            None => self.tail = Some(idx),
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.slots[idx].prev, self.slots[idx].next);

        match prev {
            Some(prev_idx) => self.slots[prev_idx].next = next,
            None => self.head = next,
        }

        match next {
            Some(next_idx) => self.slots[next_idx].prev = prev,
            None => self.tail = prev,
        }

        self.slots[idx].prev = None;
        self.slots[idx].next = None;
    }
}

/// Iterator over stored elements in recency order
pub(crate) struct Iter<'a, E: ?Sized> {
    slots: &'a [Slot<E>],
    cursor: Option<usize>,
}

impl<'a, E: ?Sized> Iterator for Iter<'a, E> {
    type Item = &'a Arc<E>;

    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.slots;
        let slot = &slots[self.cursor?];
        self.cursor = slot.next;
        Some(&slot.element)
    }
}

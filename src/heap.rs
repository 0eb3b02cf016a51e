//! Array-backed binary heap with a pluggable tie-break rule.
//!
//! The heap is generic over its payload type and over a caller-supplied
//! tie-break predicate that resolves equal priorities, so the pop order is
//! a strict total order and two runs over identical input sequences always
//! pop in the same order. The comparison *direction* is chosen at
//! construction: `max_with` pops the highest priority first, `min_with`
//! pops the lowest. The event scheduler uses the `Min` direction so that
//! the chronologically earliest event is always dispatched next.

use std::fmt;

use crate::error::{SimError, SimResult};

// ── Priority Container ───────────────────────────────────────────────

/// A (payload, priority) pair handed back by `pop`.
///
/// Produced only by pop; the heap copies entries out of its storage, so a
/// container never aliases the heap's internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityContainer<T> {
    /// The popped payload.
    pub content: T,
    /// The priority it was pushed with.
    pub priority: u64,
}

// ── Heap internals ────────────────────────────────────────────────────

/// Internal storage unit. The backing `Vec` is a dense, zero-indexed
/// complete binary tree: parent of `i` is `(i - 1) / 2`, children are
/// `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
struct HeapEntry<T> {
    content: T,
    priority: u64,
}

/// Which end of the priority scale pops first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeapOrder {
    /// Highest priority pops first.
    Max,
    /// Lowest priority pops first.
    Min,
}

// ── Heap ──────────────────────────────────────────────────────────────

/// Binary heap over (payload, priority) pairs.
///
/// `F` is the tie-break predicate: `tiebreak(a, prio_a, b, prio_b)` returns
/// `true` when `a` should come before `b` given equal priorities. It is
/// consulted only on exact priority ties.
#[derive(Clone)]
pub struct Heap<T, F> {
    entries: Vec<HeapEntry<T>>,
    order: HeapOrder,
    tiebreak: F,
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, u64, &T, u64) -> bool,
{
    /// A heap that pops the *highest* priority first.
    pub fn max_with(tiebreak: F) -> Self {
        Heap {
            entries: Vec::new(),
            order: HeapOrder::Max,
            tiebreak,
        }
    }

    /// A heap that pops the *lowest* priority first.
    pub fn min_with(tiebreak: F) -> Self {
        Heap {
            entries: Vec::new(),
            order: HeapOrder::Min,
            tiebreak,
        }
    }

    /// Append an entry and sift it up until heap order holds. O(log n).
    pub fn push(&mut self, content: T, priority: u64) {
        self.entries.push(HeapEntry { content, priority });
        self.sift_up(self.entries.len() - 1);
    }

    /// Remove and return the front entry.
    ///
    /// The last entry moves into the root slot and sifts down until heap
    /// order holds. O(log n). Fails with [`SimError::EmptyQueue`] when no
    /// entries remain.
    pub fn pop(&mut self) -> SimResult<PriorityContainer<T>> {
        if self.entries.is_empty() {
            return Err(SimError::EmptyQueue);
        }
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok(PriorityContainer {
            content: root.content,
            priority: root.priority,
        })
    }

    /// Returns `true` if the heap holds no entries. O(1).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when the entry at `a` must pop before the entry at `b`.
    ///
    /// Strict priority comparison in the heap's direction, falling back to
    /// the tie-break predicate on equal priorities.
    fn outranks(&self, a: usize, b: usize) -> bool {
        let (ea, eb) = (&self.entries[a], &self.entries[b]);
        let strictly = match self.order {
            HeapOrder::Max => ea.priority > eb.priority,
            HeapOrder::Min => ea.priority < eb.priority,
        };
        strictly
            || (ea.priority == eb.priority
                && (self.tiebreak)(&ea.content, ea.priority, &eb.content, eb.priority))
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.outranks(idx, parent) {
                self.entries.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut front = idx;
            if left < self.entries.len() && self.outranks(left, front) {
                front = left;
            }
            if right < self.entries.len() && self.outranks(right, front) {
                front = right;
            }
            if front == idx {
                break;
            }
            self.entries.swap(idx, front);
            idx = front;
        }
    }
}

impl<T: fmt::Debug, F> fmt::Debug for Heap<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("order", &self.order)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

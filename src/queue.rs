//! Priority queue facade over the binary heap.
//!
//! A thin pass-through wrapper that owns exactly one [`Heap`] instance.
//! It exists so the simulator can speak in queue terms (push / pop /
//! is_empty) without caring about heap mechanics, and so the whole queue
//! can be deep-copied: cloning clones every entry, which lets a simulator
//! be value-copied without aliasing its event queue.

use crate::error::SimResult;
use crate::heap::{Heap, PriorityContainer};

/// Priority queue over (payload, priority) pairs.
///
/// Direction and tie-break rule are fixed at construction, exactly as for
/// the underlying [`Heap`].
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, F> {
    heap: Heap<T, F>,
}

impl<T, F> PriorityQueue<T, F>
where
    F: Fn(&T, u64, &T, u64) -> bool,
{
    /// A queue that pops the highest priority first.
    pub fn max_with(tiebreak: F) -> Self {
        PriorityQueue {
            heap: Heap::max_with(tiebreak),
        }
    }

    /// A queue that pops the lowest priority first.
    pub fn min_with(tiebreak: F) -> Self {
        PriorityQueue {
            heap: Heap::min_with(tiebreak),
        }
    }

    /// Insert `content` with the given priority.
    pub fn push(&mut self, content: T, priority: u64) {
        self.heap.push(content, priority);
    }

    /// Remove and return the front entry; fails with
    /// [`crate::SimError::EmptyQueue`] when the queue is empty.
    pub fn pop(&mut self) -> SimResult<PriorityContainer<T>> {
        self.heap.pop()
    }

    /// Returns `true` if no entries are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

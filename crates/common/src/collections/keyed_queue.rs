#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! Thread-safe unbounded FIFO queue keyed by a monotonic counter.
//!
//! [`KeyedQueue`] stores each element under the next value of a 64-bit
//! counter. `enqueue` writes at `tail` and advances it; `dequeue` removes the
//! entry at `head` and advances it. Removal never shifts or compacts other
//! entries, and the key is deleted from the map immediately so memory stays
//! proportional to the current length.
//!
//! **Complexity**
//! - `enqueue`, `dequeue`, `len`, and `max` are `O(1)` on average.
//!
//! **Thread Safety**
//! - All operations take `&self` behind a single `parking_lot::Mutex`; every
//!   call mutates or reads the counters, so there is no separate read path.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;
use tracing::debug;

struct QueueState<T> {
    store: HashMap<u64, T>,
    head: u64,
    tail: u64,
    peak: usize,
}

impl<T> QueueState<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self { store: HashMap::with_capacity(capacity), head: 0, tail: 0, peak: 0 }
    }
}

/// Unbounded first-in, first-out queue with a high-water mark.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use cds_common::collections::KeyedQueue;
///
/// let queue = Arc::new(KeyedQueue::new());
/// let producer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         for n in 0..3 {
///             queue.enqueue(n);
///         }
///     })
/// };
/// producer.join().unwrap();
///
/// assert_eq!(queue.dequeue(), Some(0));
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.max(), 3);
/// ```
pub struct KeyedQueue<T> {
    state: Mutex<QueueState<T>>,
}

impl<T> KeyedQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue whose store is presized for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { state: Mutex::new(QueueState::with_capacity(capacity)) }
    }

    /// Returns the number of queued elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().store.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the largest number of elements the queue has ever held.
    #[must_use]
    pub fn max(&self) -> usize {
        self.state.lock().peak
    }

    /// Places `value` at the tail of the queue.
    pub fn enqueue(&self, value: T) {
        let mut state = self.state.lock();
        let key = state.tail;
        state.store.insert(key, value);
        state.tail += 1;

        let len = state.store.len();
        if len > state.peak {
            state.peak = len;
            if len.is_power_of_two() {
                debug!(
                    peak = len,
                    head = state.head,
                    tail = state.tail,
                    "keyed queue reached new peak"
                );
            }
        }
    }

    /// Removes and returns the element at the head of the queue, or `None`
    /// when the queue is empty.
    #[must_use]
    pub fn dequeue(&self) -> Option<T> {
        let mut state = self.state.lock();
        let key = state.head;
        let value = state.store.remove(&key)?;
        state.head += 1;
        Some(value)
    }
}

impl<T> Default for KeyedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for KeyedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("KeyedQueue")
            .field("len", &state.store.len())
            .field("head", &state.head)
            .field("tail", &state.tail)
            .field("peak", &state.peak)
            .finish()
    }
}

//! Concurrent collections
//!
//! Every type in this module is safe to share between threads (typically
//! behind an `Arc`) with no external locking:
//! - **[`ring_deque`]**: Growable double-ended sequence with indexed access
//! - **[`keyed_queue`]**: Unbounded FIFO queue keyed by a monotonic counter
//! - **[`map`]**: Key/value map
//! - **[`set`]**: Unordered set
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use cds_common::collections::{KeyedQueue, RingDeque};
//!
//! let deque = Arc::new(RingDeque::new());
//! let queue = Arc::new(KeyedQueue::new());
//!
//! let worker = {
//!     let (deque, queue) = (Arc::clone(&deque), Arc::clone(&queue));
//!     thread::spawn(move || {
//!         deque.push_high(1);
//!         queue.enqueue("job");
//!     })
//! };
//! worker.join().unwrap();
//!
//! assert_eq!(deque.pop_low(), 1);
//! assert_eq!(queue.dequeue(), Some("job"));
//! ```

pub mod keyed_queue;
pub mod map;
pub mod ring_deque;
pub mod set;

// Re-export commonly used types
pub use keyed_queue::KeyedQueue;
pub use map::{ConcurrentMap, MapStrInt, MapStrStr};
pub use ring_deque::RingDeque;
pub use set::{ConcurrentSet, SetOfInt, SetOfStr};

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

//! A growable, thread-safe double-ended sequence backed by a circular buffer.
//!
//! A [`RingDeque`] keeps its elements in a slot vector addressed modulo the
//! current capacity. Logical index `i` lives in physical slot
//! `(origin + i) % capacity`, so pushes and pops at either end only move the
//! origin or the length. When a push finds every slot occupied, the buffer is
//! reallocated to `floor(capacity * growth_factor)` slots (golden ratio by
//! default) and relinearized so that logical index `0` lands in slot `0`.
//!
//! # Complexity
//! - `push_*` are amortized **O(1)**; a single push that triggers growth is
//!   O(n).
//! - `pop_*`, `peek_*`, `put_*`, `get`, `put`, `swap`, and `size` are **O(1)**.
//! - `export` is O(n).
//!
//! # Failure discipline
//! - Operations that need an element (`pop_*`, `peek_*`, `put_*`) or a valid
//!   index (`get`, `put`, `swap`) come in two flavours. The `try_*` form
//!   returns a [`CollectionError`]; the plain form panics with the same
//!   message. Either way the check runs before any mutation and the lock is
//!   released before a panic unwinds.
//! - Pushes fail only when a grow cannot be sized or allocated. The new slots
//!   are reserved before anything moves, so a failed grow leaves the deque
//!   untouched.
//!
//! # Thread Safety
//! - One `parking_lot::RwLock` per instance. Mutators hold it exclusively for
//!   their full duration, growth included; `size`, `get`, `peek_*`, `export`
//!   and `capacity` share it.

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, error, trace};

use crate::config::DequeConfig;
use crate::error::{CollectionError, CollectionResult};

const STRUCTURE: &str = "RingDeque";

/// Circular storage guarded by the deque's lock.
struct Ring<T> {
    slots: Vec<Option<T>>,
    origin: usize,
    len: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots, origin: 0, len: 0 }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Physical slot of `logical`. Callers guarantee `logical < capacity`.
    #[inline]
    fn physical(&self, logical: usize) -> usize {
        let slot = self.origin + logical;
        if slot >= self.capacity() {
            slot - self.capacity()
        } else {
            slot
        }
    }

    #[inline]
    fn last(&self, operation: &'static str) -> CollectionResult<usize> {
        if self.len == 0 {
            return Err(CollectionError::empty(STRUCTURE, operation));
        }
        Ok(self.physical(self.len - 1))
    }

    #[inline]
    fn first(&self, operation: &'static str) -> CollectionResult<usize> {
        if self.len == 0 {
            return Err(CollectionError::empty(STRUCTURE, operation));
        }
        Ok(self.origin)
    }

    #[inline]
    fn slot_of(&self, index: usize, operation: &'static str) -> CollectionResult<usize> {
        if index >= self.len {
            return Err(CollectionError::index(STRUCTURE, operation, index, self.len));
        }
        Ok(self.physical(index))
    }

    fn grow(&mut self, config: &DequeConfig) -> CollectionResult<()> {
        let old_capacity = self.capacity();
        let overflow = || CollectionError::capacity_overflow(STRUCTURE, old_capacity);
        let new_capacity = config.next_capacity(old_capacity).ok_or_else(overflow)?;

        // Allocate before touching the slots; nothing below can fail.
        self.slots.try_reserve_exact(new_capacity - old_capacity).map_err(|_| overflow())?;

        // Rotating by the origin puts logical index 0 at slot 0; the vacant
        // slots were already `None` and stay at the back.
        self.slots.rotate_left(self.origin);
        self.slots.resize_with(new_capacity, || None);
        self.origin = 0;

        debug!(old_capacity, new_capacity, len = self.len, "ring deque grew");
        Ok(())
    }

    fn push_high(&mut self, value: T, config: &DequeConfig) -> CollectionResult<()> {
        if self.len == self.capacity() {
            self.grow(config)?;
        }
        let slot = self.physical(self.len);
        self.slots[slot] = Some(value);
        self.len += 1;
        Ok(())
    }

    fn push_low(&mut self, value: T, config: &DequeConfig) -> CollectionResult<()> {
        if self.len == self.capacity() {
            self.grow(config)?;
        }
        let slot = if self.origin == 0 { self.capacity() - 1 } else { self.origin - 1 };
        self.slots[slot] = Some(value);
        self.origin = slot;
        self.len += 1;
        Ok(())
    }

    fn take(&mut self, slot: usize, operation: &'static str) -> CollectionResult<T> {
        self.slots[slot].take().ok_or_else(|| CollectionError::empty(STRUCTURE, operation))
    }

    fn pop_high(&mut self) -> CollectionResult<T> {
        let slot = self.last("pop_high")?;
        let value = self.take(slot, "pop_high")?;
        self.len -= 1;
        Ok(value)
    }

    fn pop_low(&mut self) -> CollectionResult<T> {
        let slot = self.first("pop_low")?;
        let value = self.take(slot, "pop_low")?;
        self.len -= 1;
        self.origin = if slot + 1 == self.capacity() { 0 } else { slot + 1 };
        Ok(value)
    }
}

impl<T: Clone> Ring<T> {
    fn clone_at(&self, slot: usize, operation: &'static str) -> CollectionResult<T> {
        self.slots[slot].clone().ok_or_else(|| CollectionError::empty(STRUCTURE, operation))
    }

    fn export(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len);
        for logical in 0..self.len {
            let slot = &self.slots[self.physical(logical)];
            debug_assert!(slot.is_some(), "live logical index {logical} maps to a vacant slot");
            values.extend(slot.clone());
        }
        values
    }
}

/// Unwrap a fallible result, halting with the error's message on failure.
#[track_caller]
fn halt<V>(result: CollectionResult<V>) -> V {
    match result {
        Ok(value) => value,
        Err(err) => {
            error!(error_type = err.error_type_name(), %err, "ring deque operation failed");
            panic!("{err}");
        }
    }
}

#[inline]
fn traced<V>(result: CollectionResult<V>) -> CollectionResult<V> {
    if let Err(err) = &result {
        trace!(error_type = err.error_type_name(), %err, "ring deque operation rejected");
    }
    result
}

/// A thread-safe growable double-ended sequence with O(1) indexed access.
///
/// # Examples
///
/// ```rust
/// use cds_common::collections::RingDeque;
///
/// let deque = RingDeque::new();
/// deque.push_high(1);
/// deque.push_high(2);
/// deque.push_low(0);
///
/// assert_eq!(deque.export(), vec![0, 1, 2]);
/// assert_eq!(deque.pop_low(), 0);
/// assert_eq!(deque.export(), vec![1, 2]);
/// assert!(deque.try_get(2).is_err());
/// ```
pub struct RingDeque<T> {
    ring: RwLock<Ring<T>>,
    config: DequeConfig,
}

impl<T> RingDeque<T> {
    /// Creates an empty deque with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(DequeConfig::default())
    }

    /// Creates an empty deque with `capacity` preallocated slots and the
    /// default growth factor.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(DequeConfig::with_capacity(capacity))
    }

    /// Creates an empty deque from a validated configuration.
    pub fn with_config(config: DequeConfig) -> CollectionResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: DequeConfig) -> Self {
        Self { ring: RwLock::new(Ring::with_capacity(config.initial_capacity)), config }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.ring.read().len
    }

    /// Returns `true` when the deque holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the number of physical slots currently allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.read().capacity()
    }

    /// Appends `value` as the new last element.
    ///
    /// Fails with [`CollectionError::CapacityOverflow`] when the deque is full
    /// and cannot grow; `value` is dropped and the contents are unchanged.
    pub fn try_push_high(&self, value: T) -> CollectionResult<()> {
        traced(self.ring.write().push_high(value, &self.config))
    }

    /// Prepends `value` as the new first element.
    ///
    /// Fails like [`try_push_high`](Self::try_push_high).
    pub fn try_push_low(&self, value: T) -> CollectionResult<()> {
        traced(self.ring.write().push_low(value, &self.config))
    }

    /// Appends `value` as the new last element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is full and cannot grow.
    #[track_caller]
    pub fn push_high(&self, value: T) {
        halt(self.try_push_high(value));
    }

    /// Prepends `value` as the new first element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is full and cannot grow.
    #[track_caller]
    pub fn push_low(&self, value: T) {
        halt(self.try_push_low(value));
    }

    /// Removes and returns the last element.
    pub fn try_pop_high(&self) -> CollectionResult<T> {
        traced(self.ring.write().pop_high())
    }

    /// Removes and returns the first element.
    pub fn try_pop_low(&self) -> CollectionResult<T> {
        traced(self.ring.write().pop_low())
    }

    /// Removes and returns the last element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn pop_high(&self) -> T {
        halt(self.try_pop_high())
    }

    /// Removes and returns the first element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn pop_low(&self) -> T {
        halt(self.try_pop_low())
    }

    /// Replaces the last element with `value`.
    pub fn try_put_high(&self, value: T) -> CollectionResult<()> {
        let mut ring = self.ring.write();
        let slot = traced(ring.last("put_high"))?;
        ring.slots[slot] = Some(value);
        Ok(())
    }

    /// Replaces the first element with `value`.
    pub fn try_put_low(&self, value: T) -> CollectionResult<()> {
        let mut ring = self.ring.write();
        let slot = traced(ring.first("put_low"))?;
        ring.slots[slot] = Some(value);
        Ok(())
    }

    /// Replaces the last element with `value`.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn put_high(&self, value: T) {
        halt(self.try_put_high(value));
    }

    /// Replaces the first element with `value`.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn put_low(&self, value: T) {
        halt(self.try_put_low(value));
    }

    /// Replaces the element at logical `index` with `value`.
    pub fn try_put(&self, index: usize, value: T) -> CollectionResult<()> {
        let mut ring = self.ring.write();
        let slot = traced(ring.slot_of(index, "put"))?;
        ring.slots[slot] = Some(value);
        Ok(())
    }

    /// Replaces the element at logical `index` with `value`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.size()`.
    #[track_caller]
    pub fn put(&self, index: usize, value: T) {
        halt(self.try_put(index, value));
    }

    /// Exchanges the elements at logical indexes `i` and `j`.
    pub fn try_swap(&self, i: usize, j: usize) -> CollectionResult<()> {
        let mut ring = self.ring.write();
        let a = traced(ring.slot_of(i, "swap"))?;
        let b = traced(ring.slot_of(j, "swap"))?;
        ring.slots.swap(a, b);
        Ok(())
    }

    /// Exchanges the elements at logical indexes `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics when either index is `>= self.size()`.
    #[track_caller]
    pub fn swap(&self, i: usize, j: usize) {
        halt(self.try_swap(i, j));
    }
}

impl<T: Clone> RingDeque<T> {
    /// Returns a copy of the last element.
    pub fn try_peek_high(&self) -> CollectionResult<T> {
        let ring = self.ring.read();
        let slot = traced(ring.last("peek_high"))?;
        ring.clone_at(slot, "peek_high")
    }

    /// Returns a copy of the first element.
    pub fn try_peek_low(&self) -> CollectionResult<T> {
        let ring = self.ring.read();
        let slot = traced(ring.first("peek_low"))?;
        ring.clone_at(slot, "peek_low")
    }

    /// Returns a copy of the last element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn peek_high(&self) -> T {
        halt(self.try_peek_high())
    }

    /// Returns a copy of the first element.
    ///
    /// # Panics
    ///
    /// Panics when the deque is empty.
    #[track_caller]
    pub fn peek_low(&self) -> T {
        halt(self.try_peek_low())
    }

    /// Returns a copy of the element at logical `index`.
    pub fn try_get(&self, index: usize) -> CollectionResult<T> {
        let ring = self.ring.read();
        let slot = traced(ring.slot_of(index, "get"))?;
        ring.clone_at(slot, "get")
    }

    /// Returns a copy of the element at logical `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index >= self.size()`.
    #[track_caller]
    pub fn get(&self, index: usize) -> T {
        halt(self.try_get(index))
    }

    /// Returns every element in logical order as an independent vector.
    #[must_use]
    pub fn export(&self) -> Vec<T> {
        self.ring.read().export()
    }
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    /// Collects the items with `push_high`, preserving iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let deque = Self::new();
        for value in iter {
            deque.push_high(value);
        }
        deque
    }
}

impl<T> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.read();
        f.debug_struct("RingDeque")
            .field("len", &ring.len)
            .field("capacity", &ring.capacity())
            .field("origin", &ring.origin)
            .field("growth_factor", &self.config.growth_factor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for collections::ring_deque.
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::config::DEFAULT_CAPACITY;

    /// Validates `RingDeque::new` behavior for the mixed-end push scenario.
    ///
    /// Assertions:
    /// - Confirms `deque.export()` equals `vec![0, 1, 2]`.
    /// - Confirms `deque.pop_low()` equals `0`.
    /// - Confirms `deque.export()` equals `vec![1, 2]`.
    #[test]
    fn mixed_end_pushes_export_in_logical_order() {
        let deque = RingDeque::new();
        deque.push_high(1);
        deque.push_high(2);
        deque.push_low(0);

        assert_eq!(deque.export(), vec![0, 1, 2]);
        assert_eq!(deque.pop_low(), 0);
        assert_eq!(deque.export(), vec![1, 2]);
    }

    #[test]
    fn new_deque_is_empty_with_default_capacity() {
        let deque: RingDeque<u8> = RingDeque::new();
        assert_eq!(deque.size(), 0);
        assert!(deque.is_empty());
        assert_eq!(deque.capacity(), DEFAULT_CAPACITY);
        assert!(deque.export().is_empty());
    }

    /// Validates growth past the initial capacity at both ends.
    ///
    /// Assertions:
    /// - Confirms `deque.size()` equals `1000`.
    /// - Confirms the export equals `-500..500` in order.
    /// - Ensures capacity grew beyond the default.
    #[test]
    fn growth_preserves_order_from_both_ends() {
        let deque = RingDeque::new();
        for value in 0..500 {
            deque.push_high(value);
            deque.push_low(-value - 1);
        }

        assert_eq!(deque.size(), 1000);
        assert_eq!(deque.export(), (-500..500).collect::<Vec<_>>());
        assert!(deque.capacity() >= 1000);
    }

    /// Validates that growth relinearizes a wrapped buffer.
    ///
    /// Assertions:
    /// - Confirms capacity follows the golden-ratio step from 16 to 25.
    /// - Confirms export order survives the wrap and the grow.
    #[test]
    fn grow_relinearizes_wrapped_contents() {
        let deque = RingDeque::new();
        for value in 0..10 {
            deque.push_high(value);
        }
        for _ in 0..6 {
            let _ = deque.pop_low();
        }
        // origin now 6; these wrap past the physical end.
        for value in 10..22 {
            deque.push_high(value);
        }
        assert_eq!(deque.size(), DEFAULT_CAPACITY);
        assert_eq!(deque.capacity(), DEFAULT_CAPACITY);

        deque.push_high(22);
        assert_eq!(deque.capacity(), 25);
        assert_eq!(deque.export(), (6..23).collect::<Vec<_>>());
        assert_eq!(deque.get(0), 6);
        assert_eq!(deque.get(16), 22);
    }

    #[test]
    fn zero_capacity_grows_to_default_on_first_push() {
        let deque = RingDeque::with_capacity(0);
        assert_eq!(deque.capacity(), 0);
        deque.push_low('a');
        assert_eq!(deque.capacity(), DEFAULT_CAPACITY);
        assert_eq!(deque.peek_high(), 'a');
        assert_eq!(deque.peek_low(), 'a');
    }

    #[test]
    fn capacity_one_still_grows() {
        let deque = RingDeque::with_capacity(1);
        deque.push_high(1);
        deque.push_high(2);
        deque.push_low(0);
        assert_eq!(deque.capacity(), 3);
        assert_eq!(deque.export(), vec![0, 1, 2]);
    }

    #[test]
    fn with_config_rejects_invalid_factor() {
        let config = DequeConfig { initial_capacity: 4, growth_factor: 1.0 };
        let err = RingDeque::<u8>::with_config(config).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidConfig { .. }));

        let config = DequeConfig { initial_capacity: 4, growth_factor: 3.0 };
        let deque = RingDeque::with_config(config).unwrap();
        for value in 0..5 {
            deque.push_high(value);
        }
        assert_eq!(deque.capacity(), 12);
    }

    /// Validates push/pop duality at both ends.
    ///
    /// Assertions:
    /// - Confirms `pop_high` returns the value just pushed high.
    /// - Confirms `pop_low` returns the value just pushed low.
    /// - Confirms size is restored each time.
    #[test]
    fn push_then_pop_restores_prior_state() {
        let deque: RingDeque<i32> = (0..20).collect();
        let before = deque.export();

        deque.push_high(99);
        assert_eq!(deque.pop_high(), 99);
        assert_eq!(deque.size(), 20);

        deque.push_low(-99);
        assert_eq!(deque.pop_low(), -99);
        assert_eq!(deque.export(), before);

        let empty: RingDeque<i32> = RingDeque::new();
        empty.push_low(5);
        assert_eq!(empty.pop_low(), 5);
        assert!(empty.is_empty());
    }

    #[test]
    fn peek_and_put_at_ends() {
        let deque: RingDeque<&str> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(deque.peek_low(), "a");
        assert_eq!(deque.peek_high(), "c");

        deque.put_low("A");
        deque.put_high("C");
        assert_eq!(deque.export(), vec!["A", "b", "C"]);
        assert_eq!(deque.size(), 3);
    }

    #[test]
    fn get_put_swap_by_logical_index() {
        let deque = RingDeque::with_capacity(4);
        deque.push_high(2);
        deque.push_high(3);
        deque.push_low(1);
        deque.push_low(0);

        assert_eq!(deque.get(0), 0);
        assert_eq!(deque.get(3), 3);

        deque.put(1, 10);
        deque.swap(0, 3);
        assert_eq!(deque.export(), vec![3, 10, 2, 0]);

        deque.swap(2, 2);
        assert_eq!(deque.get(2), 2);
    }

    /// Validates the boundary rules for indexed access.
    ///
    /// Assertions:
    /// - Ensures index `size()` and `usize::MAX` fail with `IndexOutOfRange`.
    /// - Confirms the rejected `put` and `swap` left the contents untouched.
    #[test]
    fn out_of_range_index_is_rejected_without_mutation() {
        let deque: RingDeque<u32> = (0..3).collect();

        for index in [3, usize::MAX] {
            assert_eq!(
                deque.try_get(index),
                Err(CollectionError::index(STRUCTURE, "get", index, 3))
            );
            assert!(matches!(
                deque.try_put(index, 7),
                Err(CollectionError::IndexOutOfRange { operation: "put", .. })
            ));
            assert!(matches!(
                deque.try_swap(0, index),
                Err(CollectionError::IndexOutOfRange { operation: "swap", .. })
            ));
            assert!(deque.try_swap(index, 0).is_err());
        }

        assert_eq!(deque.export(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_deque_rejects_end_operations() {
        let deque: RingDeque<u32> = RingDeque::new();
        assert_eq!(deque.try_pop_high(), Err(CollectionError::empty(STRUCTURE, "pop_high")));
        assert_eq!(deque.try_pop_low(), Err(CollectionError::empty(STRUCTURE, "pop_low")));
        assert_eq!(deque.try_peek_high(), Err(CollectionError::empty(STRUCTURE, "peek_high")));
        assert_eq!(deque.try_peek_low(), Err(CollectionError::empty(STRUCTURE, "peek_low")));
        assert_eq!(deque.try_put_high(1), Err(CollectionError::empty(STRUCTURE, "put_high")));
        assert_eq!(deque.try_put_low(1), Err(CollectionError::empty(STRUCTURE, "put_low")));
        assert!(deque.is_empty());
    }

    #[test]
    #[should_panic(expected = "RingDeque::pop_high: collection is empty")]
    fn pop_high_panics_on_empty() {
        let deque: RingDeque<u32> = RingDeque::new();
        let _ = deque.pop_high();
    }

    #[test]
    #[should_panic(expected = "RingDeque::peek_low: collection is empty")]
    fn peek_low_panics_on_empty() {
        let deque: RingDeque<u32> = RingDeque::new();
        let _ = deque.peek_low();
    }

    #[test]
    #[should_panic(expected = "RingDeque::get: index 0 out of range for length 0")]
    fn get_panics_out_of_range() {
        let deque: RingDeque<u32> = RingDeque::new();
        let _ = deque.get(0);
    }

    /// Validates that a panicking call leaves the deque usable.
    ///
    /// Assertions:
    /// - Ensures the caught panic is reported as an error.
    /// - Confirms subsequent pushes and pops work normally.
    #[test]
    fn deque_stays_usable_after_panic() {
        let deque = Arc::new(RingDeque::new());
        let panicking = Arc::clone(&deque);
        let outcome = thread::spawn(move || panicking.pop_low()).join();
        assert!(outcome.is_err());

        deque.push_high(1u32);
        assert_eq!(deque.pop_low(), 1);
    }

    /// Validates that vacated slots drop their values.
    ///
    /// Assertions:
    /// - Confirms the strong count returns to `1` after both pops.
    #[test]
    fn popped_slots_release_their_values() {
        let shared = Arc::new(String::from("payload"));
        let deque = RingDeque::new();
        deque.push_high(Arc::clone(&shared));
        deque.push_low(Arc::clone(&shared));
        assert_eq!(Arc::strong_count(&shared), 3);

        drop(deque.pop_high());
        drop(deque.pop_low());
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn export_is_independent_snapshot() {
        let deque: RingDeque<i32> = (0..4).collect();
        let mut snapshot = deque.export();
        snapshot.push(100);
        deque.put(0, 42);
        assert_eq!(snapshot, vec![0, 1, 2, 3, 100]);
        assert_eq!(deque.export(), vec![42, 1, 2, 3]);
    }

    #[test]
    fn concurrent_pushes_at_both_ends_are_not_lost() {
        let deque = Arc::new(RingDeque::with_capacity(2));
        let handles: Vec<_> = (0..4)
            .map(|id| {
                let deque = Arc::clone(&deque);
                thread::spawn(move || {
                    for n in 0..250 {
                        if id % 2 == 0 {
                            deque.push_high(n);
                        } else {
                            deque.push_low(n);
                        }
                        let _ = deque.size();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(deque.size(), 1000);
        let mut values = deque.export();
        values.sort_unstable();
        let mut expected: Vec<i32> = (0..250).flat_map(|n| [n; 4]).collect();
        expected.sort_unstable();
        assert_eq!(values, expected);
    }

    /// Full deque with origin 2, so a grow would have to relinearize.
    fn wrapped_full_deque(growth_factor: f64) -> RingDeque<u32> {
        let deque = RingDeque::from_config(DequeConfig { initial_capacity: 4, growth_factor });
        for value in 0..4 {
            deque.push_high(value);
        }
        assert_eq!(deque.pop_low(), 0);
        assert_eq!(deque.pop_low(), 1);
        deque.push_high(4);
        deque.push_high(5);
        assert_eq!(deque.export(), vec![2, 3, 4, 5]);
        assert_eq!(deque.capacity(), 4);
        deque
    }

    /// Validates that a grow which cannot be sized leaves the deque intact.
    ///
    /// Assertions:
    /// - Ensures `try_push_high` and `try_push_low` fail with
    ///   `CapacityOverflow` for an unrepresentable next capacity.
    /// - Ensures the panicking `push_high` unwinds.
    /// - Confirms export order, size, and capacity are unchanged afterwards.
    #[test]
    fn failed_grow_leaves_contents_in_order() {
        let deque = wrapped_full_deque(1e300);

        assert_eq!(deque.try_push_high(6), Err(CollectionError::capacity_overflow(STRUCTURE, 4)));
        assert_eq!(deque.try_push_low(6), Err(CollectionError::capacity_overflow(STRUCTURE, 4)));

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            deque.push_high(6);
        }));
        assert!(outcome.is_err());

        assert_eq!(deque.export(), vec![2, 3, 4, 5]);
        assert_eq!(deque.size(), 4);
        assert_eq!(deque.capacity(), 4);
        assert_eq!(deque.get(0), 2);
        assert_eq!(deque.pop_high(), 5);
        deque.push_low(1);
        assert_eq!(deque.export(), vec![1, 2, 3, 4]);
    }

    /// Validates that a grow whose allocation is refused leaves the deque
    /// intact.
    ///
    /// Assertions:
    /// - Ensures a representable but unallocatable capacity fails with
    ///   `CapacityOverflow`.
    /// - Confirms export order is unchanged afterwards.
    #[test]
    fn refused_allocation_leaves_contents_in_order() {
        let deque = wrapped_full_deque(1e18);
        assert!(deque.config.next_capacity(4).is_some());

        assert!(matches!(
            deque.try_push_low(6),
            Err(CollectionError::CapacityOverflow { capacity: 4, .. })
        ));
        assert_eq!(deque.export(), vec![2, 3, 4, 5]);
        assert_eq!(deque.capacity(), 4);
    }

    #[test]
    fn debug_reports_layout() {
        let deque: RingDeque<u8> = RingDeque::with_capacity(8);
        deque.push_low(1);
        let rendered = format!("{deque:?}");
        assert!(rendered.contains("len: 1"));
        assert!(rendered.contains("capacity: 8"));
        assert!(rendered.contains("origin: 7"));
    }
}

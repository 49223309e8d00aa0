//! Thread-safe unordered set guarded by a readers-writer lock.
//!
//! [`ConcurrentSet`] delegates to a `HashSet`; every method takes the lock
//! once and returns owned data, so callers never observe the set mid-update.
//! Listing order is unspecified.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

/// Set of integers.
pub type SetOfInt = ConcurrentSet<i64>;

/// Set of strings.
pub type SetOfStr = ConcurrentSet<String>;

/// A set that may be shared across threads without external locking.
///
/// # Examples
///
/// ```
/// use cds_common::collections::SetOfStr;
///
/// let tags = SetOfStr::new();
/// tags.insert("alpha".to_string());
/// tags.insert("alpha".to_string());
/// assert_eq!(tags.len(), 1);
/// assert!(tags.contains("alpha"));
/// ```
pub struct ConcurrentSet<T> {
    set: RwLock<HashSet<T>>,
}

impl<T: Eq + Hash> ConcurrentSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self { set: RwLock::new(HashSet::new()) }
    }

    /// Returns the cardinality of the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.set.read().len()
    }

    /// Returns `true` when the set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.read().is_empty()
    }

    /// Removes every element.
    pub fn clear(&self) {
        self.set.write().clear();
    }

    /// Returns `true` if `value` is a member.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.set.read().contains(value)
    }

    /// Adds `value`; returns `true` if it was not already present.
    pub fn insert(&self, value: T) -> bool {
        self.set.write().insert(value)
    }

    /// Removes `value`; returns `true` if it was present.
    pub fn remove<Q>(&self, value: &Q) -> bool
    where
        T: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.set.write().remove(value)
    }
}

impl<T: Eq + Hash + Clone> ConcurrentSet<T> {
    /// Returns a snapshot of every element, in no particular order.
    #[must_use]
    pub fn list(&self) -> Vec<T> {
        self.set.read().iter().cloned().collect()
    }
}

impl<T: Eq + Hash> Default for ConcurrentSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for ConcurrentSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { set: RwLock::new(iter.into_iter().collect()) }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.set.read().iter()).finish()
    }
}

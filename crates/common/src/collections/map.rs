//! Thread-safe key/value map guarded by a readers-writer lock.
//!
//! [`ConcurrentMap`] is a functional relation: each key maps to at most one
//! value. Besides point operations it can project its domain (keys) and range
//! (values) into a [`ConcurrentSet`], built locally under the map's read lock
//! so no second shared instance is ever locked.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use super::set::ConcurrentSet;

/// Map from strings to strings.
pub type MapStrStr = ConcurrentMap<String, String>;

/// Map from strings to integers.
pub type MapStrInt = ConcurrentMap<String, i64>;

/// A hash map that may be shared across threads without external locking.
///
/// # Examples
///
/// ```
/// use cds_common::collections::MapStrInt;
///
/// let counts = MapStrInt::new();
/// counts.insert("apples".to_string(), 3);
/// counts.insert("pears".to_string(), 3);
///
/// assert_eq!(counts.get("apples"), Some(3));
/// assert_eq!(counts.domain().len(), 2);
/// assert_eq!(counts.range().len(), 1);
/// assert_eq!(counts.take("pears"), Some(3));
/// assert_eq!(counts.len(), 1);
/// ```
pub struct ConcurrentMap<K, V> {
    map: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V> ConcurrentMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self { map: RwLock::new(HashMap::new()) }
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    /// Returns `true` when the map has no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }

    /// Removes every pair.
    pub fn clear(&self) {
        self.map.write().clear();
    }

    /// Returns `true` if `key` is in the domain.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.read().contains_key(key)
    }

    /// Puts the pair `(key, value)`, returning the value it replaced.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.map.write().insert(key, value)
    }

    /// Removes the pair for `key` and returns its value.
    pub fn take<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.write().remove(key)
    }
}

impl<K: Eq + Hash, V: Clone> ConcurrentMap<K, V> {
    /// Returns a copy of the value for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.read().get(key).cloned()
    }
}

impl<K: Eq + Hash + Clone, V> ConcurrentMap<K, V> {
    /// Returns the set of keys. Its cardinality equals [`len`](Self::len).
    #[must_use]
    pub fn domain(&self) -> ConcurrentSet<K> {
        self.map.read().keys().cloned().collect()
    }
}

impl<K: Eq + Hash, V: Eq + Hash + Clone> ConcurrentMap<K, V> {
    /// Returns the set of values. Its cardinality is at most
    /// [`len`](Self::len).
    #[must_use]
    pub fn range(&self) -> ConcurrentSet<V> {
        self.map.read().values().cloned().collect()
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ConcurrentMap<K, V> {
    /// Returns a snapshot of every pair, in no particular order.
    #[must_use]
    pub fn list(&self) -> Vec<(K, V)> {
        self.map.read().iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Eq + Hash, V> Default for ConcurrentMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for ConcurrentMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { map: RwLock::new(iter.into_iter().collect()) }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ConcurrentMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.read().iter()).finish()
    }
}

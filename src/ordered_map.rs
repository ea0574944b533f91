//! Insertion-ordered map implementation.
//!
//! This module provides the core [`OrderedMap`] type and related
//! functionality. The map maintains insertion order while providing O(1)
//! lookup, insertion, and removal, and hands out read-only [`Element`] views
//! that can be walked forward or backward without going through the hash
//! index.
//!
//! # Examples
//!
//! ```
//! use braid_map::ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.set("first", 1);
//! map.set("second", 2);
//!
//! // Iteration preserves insertion order
//! let entries: Vec<_> = map.iter().collect();
//! assert_eq!(entries, [(&"first", &1), (&"second", &2)]);
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Eq;
use core::hash::BuildHasher;
use core::hash::Hash;

use hashbrown::HashTable;

use crate::arena::Arena;
use crate::arena::Ptr;
use crate::list::OrderList;
use crate::RandomState;

mod element;
mod iter;

pub use element::Element;
pub use iter::IntoIter;
pub use iter::Iter;

/// A hash map that maintains insertion order using a doubly-linked list.
///
/// This data structure combines the O(1) lookup performance of a hash table
/// with iteration in insertion order. The hash index maps each key to a node
/// in an arena-backed linked list; the index answers existence questions,
/// the list owns the order. The two structures always hold exactly the same
/// set of entries.
///
/// Setting an existing key updates its value in place and never moves it.
/// Removing a key and setting it again pushes it to the back, like a fresh
/// insert.
///
/// The generic parameters are:
/// - `K`: Key type, must implement `Hash + Eq`
/// - `T`: Value type
/// - `S`: Hash builder type, defaults to the standard hasher
///
/// # Examples
///
/// ```
/// use braid_map::ordered_map::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set("apple", 5);
/// map.set("banana", 3);
/// map.set("cherry", 8);
///
/// // Iterate in insertion order
/// for (key, value) in map.iter() {
///     println!("{}: {}", key, value);
/// }
/// // Prints: apple: 5, banana: 3, cherry: 8
/// ```
pub struct OrderedMap<K, T, S = RandomState> {
    list: OrderList,
    nodes: Arena<K, T>,
    table: HashTable<Ptr>,
    hasher: S,
}

/// Error returned by [`OrderedMap::try_from_rows`] when a row is too short
/// to supply both a key and a value.
///
/// # Examples
///
/// ```
/// use braid_map::OrderedMap;
///
/// let err = OrderedMap::<&str, &str>::try_from_rows(vec![vec!["a", "1"], vec!["b"]])
///     .unwrap_err();
/// assert_eq!(err.row(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFromRowsError {
    index: usize,
}

impl TryFromRowsError {
    /// Zero-based index of the offending row.
    pub fn row(&self) -> usize {
        self.index
    }
}

impl core::fmt::Display for TryFromRowsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "row {} must contain at least a key and a value",
            self.index
        )
    }
}

impl core::error::Error for TryFromRowsError {}

impl<K, T> OrderedMap<K, T> {
    /// Creates a new ordered map with the specified capacity.
    ///
    /// The map will be able to hold at least `capacity` elements without
    /// reallocating. If `capacity` is 0, the map will not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let map: OrderedMap<&str, i32> = OrderedMap::with_capacity(10);
    /// assert_eq!(map.len(), 0);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap {
            list: OrderList::new(),
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher: RandomState::default(),
        }
    }

    /// Creates a new, empty ordered map.
    ///
    /// The map is initially created with a capacity of 0, so it will not
    /// allocate until the first element is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<&str, i32> = OrderedMap::new();
    /// assert!(map.is_empty());
    /// map.set("key", 42);
    /// assert!(!map.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, T, S> OrderedMap<K, T, S> {
    /// Creates a new ordered map with the specified capacity and hasher.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hashbrown::DefaultHashBuilder as RandomState;
    /// use braid_map::ordered_map::OrderedMap;
    ///
    /// let hasher = RandomState::default();
    /// let mut map: OrderedMap<&str, i32, _> = OrderedMap::with_capacity_and_hasher(10, hasher);
    /// map.set("key", 42);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        OrderedMap {
            list: OrderList::new(),
            nodes: Arena::with_capacity(capacity),
            table: HashTable::with_capacity(capacity),
            hasher,
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.set("a", 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries from the map.
    ///
    /// The hash index and the order list are reset together; the map is
    /// usable immediately afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert!(map.front().is_none());
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.nodes.clear();
        self.list.clear();
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion
    /// order.
    ///
    /// The iterator element type is `(&'a K, &'a V)`. The iterator borrows
    /// the map, so the map cannot be structurally mutated while any
    /// traversal is in progress; a fresh call always reflects the current
    /// contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// map.set("c", 3);
    ///
    /// for (key, val) in map.iter() {
    ///     println!("key: {} val: {}", key, val);
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, K, T> {
        Iter {
            forward: self.list.front().optional(),
            reverse: self.list.back().optional(),
            len: self.len(),
            nodes: &self.nodes,
        }
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion
    /// order. Alias for [`iter`](Self::iter).
    pub fn entries(&self) -> Iter<'_, K, T> {
        self.iter()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map, in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let values: Vec<_> = map.values().copied().collect();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a view of the first-inserted entry, or `None` if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.front().is_none());
    ///
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// assert_eq!(map.front().unwrap().key(), &"a");
    /// ```
    pub fn front(&self) -> Option<Element<'_, K, T>> {
        self.list
            .front()
            .optional()
            .map(|ptr| Element::new(&self.nodes, ptr))
    }

    /// Returns a view of the most recently inserted entry, or `None` if the
    /// map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    /// assert_eq!(map.back().unwrap().key(), &"b");
    /// ```
    pub fn back(&self) -> Option<Element<'_, K, T>> {
        self.list
            .back()
            .optional()
            .map(|ptr| Element::new(&self.nodes, ptr))
    }

    /// Calls `f` for every entry, front to back, as `f(value, key, map)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let mut seen = Vec::new();
    /// map.for_each(|value, key, m| {
    ///     seen.push((*key, *value, m.len()));
    /// });
    /// assert_eq!(seen, [("a", 1, 2), ("b", 2, 2)]);
    /// ```
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, &K, &Self),
    {
        let mut cur = self.list.front();
        while let Some(ptr) = cur.optional() {
            let node = &self.nodes[ptr];
            f(&node.value, &node.key, self);
            cur = node.next;
        }
    }

    /// Maps every entry to `f(key, value, index)` and collects the results,
    /// front to back. `index` starts at 0 and increments per entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// map.set("b", 2);
    ///
    /// let labels = map.map_to_vec(|key, value, index| format!("{index}:{key}={value}"));
    /// assert_eq!(labels, ["0:a=1", "1:b=2"]);
    /// ```
    pub fn map_to_vec<R, F>(&self, mut f: F) -> Vec<R>
    where
        F: FnMut(&K, &T, usize) -> R,
    {
        let mut array = Vec::with_capacity(self.len());
        for (index, (key, value)) in self.iter().enumerate() {
            array.push(f(key, value, index));
        }
        array
    }
}

impl<K, T, S> OrderedMap<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Sets `key` to `value`, returning `&mut self` for chaining.
    ///
    /// If the key already exists, its value is updated in place and the
    /// entry keeps its position in the order. Otherwise the entry is
    /// appended at the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1).set("b", 2).set("a", 10);
    ///
    /// // "a" kept its position, with the new value
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&"a", &10), (&"b", &2)]);
    /// ```
    pub fn set(&mut self, key: K, value: T) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Inserts a key-value pair, returning the replaced value if the key was
    /// already present.
    ///
    /// Same semantics as [`set`](Self::set): an existing entry is updated in
    /// place and never moves; a new entry goes to the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("a", 2), Some(1));
    /// ```
    pub fn insert(&mut self, key: K, value: T) -> Option<T> {
        let hash = self.hasher.hash_one(&key);
        let existing = self
            .table
            .find(hash, |&p| self.nodes[p].key == key)
            .copied();
        if let Some(ptr) = existing {
            return Some(core::mem::replace(&mut self.nodes[ptr].value, value));
        }
        let ptr = self.list.push_back(&mut self.nodes, key, value, hash);
        self.table.insert_unique(hash, ptr, |&p| self.nodes[p].hash);
        None
    }

    /// Returns a reference to the value corresponding to the key, or `None`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&T> {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&p| &self.nodes[p].key == key)
            .map(|&ptr| &self.nodes[ptr].value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        let hash = self.hasher.hash_one(key);
        let ptr = self
            .table
            .find(hash, |&p| &self.nodes[p].key == key)
            .copied()?;
        Some(&mut self.nodes[ptr].value)
    }

    /// Returns a read-only view of the entry for `key`, or `None` if the key
    /// is absent.
    ///
    /// The view exposes the entry's neighbors, so callers can start at an
    /// arbitrary key and walk the insertion order in either direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1).set("b", 2).set("c", 3);
    ///
    /// let element = map.get_element(&"b").unwrap();
    /// assert_eq!(element.value(), &2);
    /// assert_eq!(element.next_element().unwrap().key(), &"c");
    /// assert_eq!(element.prev_element().unwrap().key(), &"a");
    /// ```
    pub fn get_element(&self, key: &K) -> Option<Element<'_, K, T>> {
        let hash = self.hasher.hash_one(key);
        let ptr = self
            .table
            .find(hash, |&p| &self.nodes[p].key == key)
            .copied()?;
        Some(Element::new(&self.nodes, ptr))
    }

    /// Returns `true` if the map contains an entry for the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&p| &self.nodes[p].key == key)
            .is_some()
    }

    /// Removes the entry for `key`, returning its value.
    ///
    /// An absent key is a no-op returning `None`, not an error. The hash
    /// index and the order list are updated together; the removed entry's
    /// neighbors become adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1).set("b", 2).set("c", 3);
    ///
    /// assert_eq!(map.remove(&"b"), Some(2));
    /// assert_eq!(map.remove(&"b"), None);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["a", "c"]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<T> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key`, returning the stored key and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.set("a", 1);
    /// assert_eq!(map.remove_entry(&"a"), Some(("a", 1)));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, T)> {
        let hash = self.hasher.hash_one(key);
        match self.table.find_entry(hash, |&p| &self.nodes[p].key == key) {
            Ok(entry) => {
                let (ptr, _) = entry.remove();
                self.list.remove(&mut self.nodes, ptr);
                let node = self.nodes.free(ptr);
                Some((node.key, node.value))
            }
            Err(_) => None,
        }
    }

    /// Shrinks the internal storage as much as possible.
    ///
    /// The hash index shrinks to fit the current entries. The node storage
    /// may retain interior free slots, since live entries cannot be moved.
    pub fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit(|&p| self.nodes[p].hash);
        self.nodes.shrink_to_fit();
    }
}

impl<K, T, S> OrderedMap<K, Vec<T>, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Groups the items of an iterable by the key returned from
    /// `classifier(&item, index)`.
    ///
    /// Groups appear in the order their key was first produced; within a
    /// group, items keep the input order. `index` is the item's zero-based
    /// position in the input.
    ///
    /// This is an associated function: it builds a fresh map and needs no
    /// existing instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let map = OrderedMap::group_by([1, 2, 3, 4], |x, _index| x % 2);
    ///
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 0]);
    /// assert_eq!(map.get(&1), Some(&vec![1, 3]));
    /// assert_eq!(map.get(&0), Some(&vec![2, 4]));
    /// ```
    pub fn group_by<I, F>(items: I, mut classifier: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T, usize) -> K,
    {
        let mut map = Self::with_capacity_and_hasher(0, S::default());
        for (index, item) in items.into_iter().enumerate() {
            let group = classifier(&item, index);
            match map.get_mut(&group) {
                Some(items) => items.push(item),
                None => {
                    map.insert(group, vec![item]);
                }
            }
        }
        map
    }
}

impl<T, S> OrderedMap<T, T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Builds a map from rows of unchecked length, taking the first element
    /// of each row as the key and the second as the value.
    ///
    /// Elements beyond the second are ignored. A row with fewer than two
    /// elements fails with [`TryFromRowsError`] naming the row. Duplicate
    /// keys follow [`set`](Self::set) semantics: last value wins, first
    /// position is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let map = OrderedMap::try_from_rows([["a", "1"], ["b", "2"]]).unwrap();
    /// assert_eq!(map.get(&"b"), Some(&"2"));
    ///
    /// let err = OrderedMap::<&str, &str>::try_from_rows(vec![vec!["a", "1"], vec!["b"]])
    ///     .unwrap_err();
    /// assert_eq!(err.row(), 1);
    /// ```
    pub fn try_from_rows<I>(rows: I) -> Result<Self, TryFromRowsError>
    where
        I: IntoIterator,
        I::Item: IntoIterator<Item = T>,
    {
        let mut map = Self::with_capacity_and_hasher(0, S::default());
        for (index, row) in rows.into_iter().enumerate() {
            let mut row = row.into_iter();
            let (Some(key), Some(value)) = (row.next(), row.next()) else {
                return Err(TryFromRowsError { index });
            };
            map.set(key, value);
        }
        Ok(map)
    }
}

impl<K, T, S> Default for OrderedMap<K, T, S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        OrderedMap::with_capacity_and_hasher(0, S::default())
    }
}

impl<K, T, S> Clone for OrderedMap<K, T, S>
where
    K: Hash + Eq + Clone,
    T: Clone,
    S: BuildHasher + Clone,
{
    fn clone(&self) -> Self {
        let mut map = Self::with_capacity_and_hasher(self.len(), self.hasher.clone());
        for (key, value) in self.iter() {
            map.set(key.clone(), value.clone());
        }
        map
    }
}

impl<K: core::fmt::Debug, T: core::fmt::Debug, S> core::fmt::Debug for OrderedMap<K, T, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, T, S> PartialEq for OrderedMap<K, T, S>
where
    K: PartialEq,
    T: PartialEq,
{
    /// Order-sensitive equality: two maps are equal when they hold the same
    /// entries in the same insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<K, T, S> core::cmp::Eq for OrderedMap<K, T, S>
where
    K: Eq,
    T: Eq,
{
}

impl<K, T, S> FromIterator<(K, T)> for OrderedMap<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Builds a map from pairs in sequence order via [`set`]: duplicate keys
    /// resolve to the value of their last occurrence at the position of
    /// their first occurrence.
    ///
    /// [`set`]: OrderedMap::set
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        map.extend(iter);
        map
    }
}

impl<K, T, S> Extend<(K, T)> for OrderedMap<K, T, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, T, const N: usize> From<[(K, T); N]> for OrderedMap<K, T, RandomState>
where
    K: Hash + Eq,
{
    /// # Examples
    ///
    /// ```
    /// use braid_map::OrderedMap;
    ///
    /// let map = OrderedMap::from([("a", 1), ("b", 2)]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, ["a", "b"]);
    /// ```
    fn from(entries: [(K, T); N]) -> Self {
        Self::from_iter(entries)
    }
}

impl<'a, K, T, S> IntoIterator for &'a OrderedMap<K, T, S> {
    type Item = (&'a K, &'a T);
    type IntoIter = Iter<'a, K, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, T, S> IntoIterator for OrderedMap<K, T, S> {
    type Item = (K, T);
    type IntoIter = IntoIter<K, T>;

    fn into_iter(self) -> Self::IntoIter {
        let OrderedMap {
            list,
            nodes,
            table,
            hasher: _,
        } = self;
        IntoIter {
            forward: list.front().optional(),
            reverse: list.back().optional(),
            len: table.len(),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::assert_eq;

    use crate::OrderedMap;
    use crate::TryFromRowsError;

    #[test]
    fn test_new_and_default() {
        let map: OrderedMap<i32, Vec<i32>> = OrderedMap::default();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert!(map.front().is_none());
        assert!(map.back().is_none());
    }

    #[test]
    fn test_with_capacity() {
        let map: OrderedMap<i32, Vec<i32>> = OrderedMap::with_capacity(10);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        map.set("b", 2);

        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.get(&"b"), Some(&2));
        assert_eq!(map.get(&"c"), None);
        assert!(map.contains_key(&"a"));
        assert!(!map.contains_key(&"c"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_set_chains() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2).set("c", 3);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_order_preservation() {
        let mut map = OrderedMap::new();
        for i in 0..100 {
            map.set(i, i * 2);
        }

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());

        // Value mutations do not affect order
        for i in 0..100 {
            map.set(i, i * 3);
        }
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_reset_does_not_reorder() {
        let mut map = OrderedMap::new();
        map.set("A", 1).set("B", 2).set("C", 3);

        let before = map.get_element(&"A").unwrap();
        map.set("A", 10);
        let after = map.get_element(&"A").unwrap();
        assert_eq!(before.key(), after.key());

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, [(&"A", &10), (&"B", &2), (&"C", &3)]);
    }

    #[test]
    fn test_insert_returns_replaced() {
        let mut map = OrderedMap::new();
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(1));
        assert_eq!(map.get(&"a"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_mut() {
        let mut map = OrderedMap::new();
        map.set(1, "a");
        *map.get_mut(&1).unwrap() = "b";
        assert_eq!(map.get(&1), Some(&"b"));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2).set("c", 3).set("d", 4);

        // Middle
        assert_eq!(map.remove(&"b"), Some(2));
        let a = map.get_element(&"a").unwrap();
        let c = map.get_element(&"c").unwrap();
        assert_eq!(a.next_element().unwrap(), c);
        assert_eq!(c.prev_element().unwrap(), a);

        // Head
        assert_eq!(map.remove(&"a"), Some(1));
        let c = map.front().unwrap();
        assert_eq!(c.key(), &"c");
        assert!(c.prev_element().is_none());

        // Tail
        assert_eq!(map.remove(&"d"), Some(4));
        let c = map.back().unwrap();
        assert_eq!(c.key(), &"c");
        assert!(c.next_element().is_none());
        assert_eq!(map.front().unwrap(), map.back().unwrap());

        // Last one
        assert_eq!(map.remove(&"c"), Some(3));
        assert!(map.is_empty());
        assert!(map.front().is_none());
        assert!(map.back().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2);

        assert_eq!(map.remove(&"z"), None);
        assert_eq!(map.len(), 2);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn test_remove_entry() {
        let mut map = OrderedMap::new();
        map.set("a".to_string(), 1);
        assert_eq!(map.remove_entry(&"a".to_string()), Some(("a".to_string(), 1)));
        assert_eq!(map.remove_entry(&"a".to_string()), None);
    }

    #[test]
    fn test_reinsert_after_remove_goes_to_back() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2).set("c", 3);

        map.remove(&"a");
        map.set("a", 10);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["b", "c", "a"]);
        assert_eq!(map.back().unwrap().key(), &"a");
    }

    #[test]
    fn test_bijection_invariant() {
        let mut map = OrderedMap::new();
        for i in 0..50 {
            map.set(i, i);
        }
        for i in (0..50).step_by(3) {
            map.remove(&i);
        }
        map.set(3, 3);
        map.set(100, 100);

        let walked = map.iter().count();
        let indexed = (0..=100).filter(|i| map.contains_key(i)).count();
        assert_eq!(map.len(), walked);
        assert_eq!(map.len(), indexed);

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_link_symmetry() {
        let mut map = OrderedMap::new();
        for i in 0..10 {
            map.set(i, i);
        }
        map.remove(&0);
        map.remove(&4);
        map.remove(&9);

        let mut cur = map.front();
        while let Some(a) = cur {
            let next = a.next_element();
            if let Some(b) = next {
                assert_eq!(b.prev_element().unwrap(), a);
            } else {
                assert_eq!(map.back().unwrap(), a);
            }
            cur = next;
        }
    }

    #[test]
    fn test_round_trip() {
        let mut map = OrderedMap::new();
        map.set("x", 1).set("y", 2).set("z", 3);
        map.remove(&"y");
        map.set("w", 4);

        let rebuilt: OrderedMap<&str, i32> =
            map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(rebuilt, map);

        let original: Vec<_> = map.iter().collect();
        let copied: Vec<_> = rebuilt.iter().collect();
        assert_eq!(original, copied);
    }

    #[test]
    fn test_construction_scenario() {
        let map = OrderedMap::from([("key", "value"), ("key2", "123"), ("key3", "foo")]);

        assert_eq!(map.back().unwrap().key(), &"key3");
        assert_eq!(map.front().unwrap().key(), &"key");
        assert_eq!(map.len(), 3);

        let mut map = map;
        assert_eq!(map.remove(&"key2"), Some("123"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.front().unwrap().next_element().unwrap().key(), &"key3");
    }

    #[test]
    fn test_duplicate_keys_in_input() {
        // Last value wins, first position is kept
        let map = OrderedMap::from([("a", 1), ("b", 2), ("a", 3)]);
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, [(&"a", &3), (&"b", &2)]);
    }

    #[test]
    fn test_group_by_parity_scenario() {
        let map = OrderedMap::group_by([1, 2, 3, 4], |x, _| x % 2);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [1, 0]);
        assert_eq!(map.get(&1), Some(&vec![1, 3]));
        assert_eq!(map.get(&0), Some(&vec![2, 4]));
    }

    #[test]
    fn test_group_by_uses_index() {
        let map = OrderedMap::group_by(["a", "b", "c", "d"], |_, index| index / 2);

        let groups: Vec<_> = map.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(groups, [(0, vec!["a", "b"]), (1, vec!["c", "d"])]);
    }

    #[test]
    fn test_group_by_empty() {
        let map = OrderedMap::group_by(Vec::<i32>::new(), |x, _| *x);
        assert!(map.is_empty());
    }

    #[test]
    fn test_for_each_order_and_map_arg() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2).set("c", 3);

        let mut seen = Vec::new();
        map.for_each(|value, key, m| {
            seen.push((*key, *value));
            assert_eq!(m.len(), 3);
        });
        assert_eq!(seen, [("a", 1), ("b", 2), ("c", 3)]);
    }

    #[test]
    fn test_for_each_empty() {
        let map: OrderedMap<i32, i32> = OrderedMap::new();
        let mut called = false;
        map.for_each(|_, _, _| called = true);
        assert!(!called);
    }

    #[test]
    fn test_map_to_vec() {
        let mut map = OrderedMap::new();
        map.set("a", 10).set("b", 20);

        let labels: Vec<String> =
            map.map_to_vec(|key, value, index| format!("{index}:{key}={value}"));
        assert_eq!(labels, ["0:a=10", "1:b=20"]);
    }

    #[test]
    fn test_try_from_rows() {
        let map = OrderedMap::try_from_rows([["a", "1"], ["b", "2"], ["c", "3"]]).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&"b"), Some(&"2"));
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn test_try_from_rows_ignores_extra_elements() {
        let map =
            OrderedMap::try_from_rows(vec![vec!["a", "1", "junk"], vec!["b", "2"]]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&"a"), Some(&"1"));
    }

    #[test]
    fn test_try_from_rows_short_row() {
        let err =
            OrderedMap::<&str, &str>::try_from_rows(vec![vec!["a", "1"], vec!["b"], vec![]])
                .unwrap_err();
        assert_eq!(err, TryFromRowsError { index: 1 });
        assert_eq!(err.row(), 1);
        assert_eq!(
            err.to_string(),
            "row 1 must contain at least a key and a value"
        );
    }

    #[test]
    fn test_try_from_rows_duplicate_keys() {
        let map = OrderedMap::try_from_rows([["a", "1"], ["b", "2"], ["a", "3"]]).unwrap();
        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut map = OrderedMap::new();
        map.set(1, "one").set(2, "two");

        map.clear();
        assert!(map.is_empty());
        assert!(map.front().is_none());

        map.set(3, "three");
        assert_eq!(map.len(), 1);
        assert_eq!(map.front().unwrap().key(), &3);
        assert_eq!(map.back().unwrap().key(), &3);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = OrderedMap::from([("x", 1), ("y", 2)]);
        let b = OrderedMap::from([("x", 1), ("y", 2)]);
        let c = OrderedMap::from([("y", 2), ("x", 1)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_clone() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2);
        map.remove(&"a");
        map.set("a", 3);

        let cloned = map.clone();
        assert_eq!(cloned, map);
        let keys: Vec<_> = cloned.keys().copied().collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn test_debug() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2);
        assert_eq!(format!("{map:?}"), "{\"a\": 1, \"b\": 2}");
    }

    #[test]
    fn test_iter_double_ended() {
        let mut map = OrderedMap::new();
        map.set(1, "a").set(2, "b").set(3, "c");

        let reversed: Vec<_> = map.iter().rev().map(|(k, _)| *k).collect();
        assert_eq!(reversed, [3, 2, 1]);

        let mut iter = map.iter();
        assert_eq!(iter.next().map(|(k, _)| *k), Some(1));
        assert_eq!(iter.next_back().map(|(k, _)| *k), Some(3));
        assert_eq!(iter.next().map(|(k, _)| *k), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_exact_size() {
        let mut map = OrderedMap::new();
        map.set(1, "a").set(2, "b").set(3, "c");

        let mut iter = map.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next_back();
        assert_eq!(iter.len(), 1);
    }

    #[test]
    fn test_entries_alias() {
        let mut map = OrderedMap::new();
        map.set("a", 1);
        let via_entries: Vec<_> = map.entries().collect();
        let via_iter: Vec<_> = map.iter().collect();
        assert_eq!(via_entries, via_iter);
    }

    #[test]
    fn test_into_iter_owning() {
        let mut map = OrderedMap::new();
        map.set("a".to_string(), 1);
        map.set("b".to_string(), 2);
        map.set("c".to_string(), 3);
        map.remove(&"b".to_string());

        let pairs: Vec<_> = map.into_iter().collect();
        assert_eq!(pairs, [("a".to_string(), 1), ("c".to_string(), 3)]);
    }

    #[test]
    fn test_into_iter_double_ended() {
        let map = OrderedMap::from([(1, "a"), (2, "b"), (3, "c")]);

        let mut iter = map.into_iter();
        assert_eq!(iter.next_back(), Some((3, "c")));
        assert_eq!(iter.next(), Some((1, "a")));
        assert_eq!(iter.next(), Some((2, "b")));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_ref_into_iter() {
        let map = OrderedMap::from([(1, "a"), (2, "b")]);
        let mut keys = Vec::new();
        for (key, _) in &map {
            keys.push(*key);
        }
        assert_eq!(keys, [1, 2]);
    }

    #[test]
    fn test_values_and_keys_reversible() {
        let map = OrderedMap::from([(1, "a"), (2, "b"), (3, "c")]);

        let values: Vec<_> = map.values().rev().copied().collect();
        assert_eq!(values, ["c", "b", "a"]);
        assert_eq!(map.keys().len(), 3);
    }

    #[test]
    fn test_slot_reuse_keeps_order() {
        let mut map = OrderedMap::new();
        map.set("a", 1).set("b", 2).set("c", 3);
        map.remove(&"b");
        // New entry reuses the freed slot but must land at the back
        map.set("d", 4);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, ["a", "c", "d"]);
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut map = OrderedMap::with_capacity(100);
        map.set(1, "a").set(2, "b");
        map.shrink_to_fit();
        assert_eq!(map.len(), 2);
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [1, 2]);
    }

    #[test]
    fn test_extend() {
        let mut map = OrderedMap::from([("a", 1)]);
        map.extend([("b", 2), ("a", 10)]);

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, [(&"a", &10), (&"b", &2)]);
    }

    #[test]
    fn test_large_churn() {
        let mut map = OrderedMap::new();
        for i in 0..1000 {
            map.set(i, i);
        }
        for i in (0..1000).step_by(2) {
            assert_eq!(map.remove(&i), Some(i));
        }
        assert_eq!(map.len(), 500);

        let keys: Vec<_> = map.keys().copied().collect();
        let expected: Vec<_> = (0..1000).filter(|i| i % 2 == 1).collect();
        assert_eq!(keys, expected);

        // Walk backwards too
        let back_keys: Vec<_> = map.iter().rev().map(|(k, _)| *k).collect();
        let mut expected_rev = expected;
        expected_rev.reverse();
        assert_eq!(back_keys, expected_rev);
    }
}

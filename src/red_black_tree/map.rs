use crate::red_black_tree::{ByKey, Cursor, Error, IntoIter, Iter, Position, RedBlackTree, Result};
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red black tree.
///
/// Entries are stored as `(key, value)` pairs ordered by key alone. Each key is stored at most
/// once, and `insert` never overwrites an existing entry; use `insert_or_assign` for that.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert!(!map.insert(0, 2).1);
/// assert_eq!(map[&0], 1);
/// map.insert_or_assign(0, 2);
/// assert_eq!(map[&0], 2);
///
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackMap<K, V> {
    tree: RedBlackTree<(K, V), ByKey>,
}

impl<K, V> RedBlackMap<K, V>
where
    K: Ord,
{
    /// Constructs a new, empty `RedBlackMap<K, V>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: RedBlackTree::with_compare(ByKey),
        }
    }

    /// Inserts a key-value pair into the map unless the key is already present. Returns the
    /// position of the entry with that key and whether the pair was inserted. An existing entry
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (position, inserted) = map.insert(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.insert(1, 2), (position, false));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        self.tree.insert((key, value))
    }

    /// Inserts a key-value pair into the map. If the key already exists, its value is replaced
    /// instead. Returns the position of the entry and `true` if the key was new.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert!(map.insert_or_assign(1, 1).1);
    /// assert!(!map.insert_or_assign(1, 2).1);
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        let position = self.tree.find(&key);
        match self.tree.get_mut(position) {
            Some(entry) => {
                entry.1 = value;
                (position, false)
            },
            None => self.tree.insert((key, value)),
        }
    }

    /// Inserts every pair of `pairs` in order with `insert` and returns the outcome of each
    /// insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let results = map.insert_many(vec![(1, 'a'), (2, 'b'), (1, 'c')]);
    /// assert!(!results[2].1);
    /// assert_eq!(map[&1], 'a');
    /// ```
    pub fn insert_many<I>(&mut self, pairs: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.tree.insert_many(pairs)
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let position = self.tree.find(key);
        self.tree.erase(position).ok()
    }

    /// Returns the position of the entry with `key`, or `end()` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get_at(map.find(&1)), Some((&1, &1)));
    /// assert_eq!(map.find(&2), map.end());
    /// ```
    pub fn find(&self, key: &K) -> Position {
        self.tree.find(key)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.get(self.tree.find(key)).map(|entry| &entry.1)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let position = self.tree.find(key);
        self.tree.get_mut(position).map(|entry| &mut entry.1)
    }

    /// Returns an immutable reference to the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.at(&1), Ok(&1));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with `key`.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.at_mut(&1)? += 1;
    /// assert_eq!(map[&1], 2);
    /// assert!(map.at_mut(&2).is_err());
    /// # Ok::<(), rb_collections::red_black_tree::Error>(())
    /// ```
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with `key`, inserting the default
    /// value first if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map: RedBlackMap<&str, u32> = RedBlackMap::new();
    /// *map.get_or_insert_default("a") += 1;
    /// *map.get_or_insert_default("a") += 1;
    /// assert_eq!(map[&"a"], 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let (position, _) = self.tree.insert((key, V::default()));
        self.tree
            .get_mut(position)
            .map(|entry| &mut entry.1)
            .expect("Expected an entry at the inserted position.")
    }

    /// Returns the position of the first entry whose key is not less than `key`, or `end()` if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.get_at(map.lower_bound(&2)), Some((&3, &3)));
    /// assert_eq!(map.get_at(map.lower_bound(&3)), Some((&3, &3)));
    /// ```
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.lower_bound(key)
    }

    /// Returns the position of the first entry whose key is greater than `key`, or `end()` if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.get_at(map.upper_bound(&1)), Some((&3, &3)));
    /// assert_eq!(map.upper_bound(&3), map.end());
    /// ```
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.upper_bound(key)
    }

    /// Moves every entry of `other` whose key is not in the map into the map. Entries whose key
    /// is already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// let mut other = RedBlackMap::new();
    /// other.insert(1, 'b');
    /// other.insert(2, 'c');
    ///
    /// map.merge(&mut other);
    /// assert_eq!(map.iter().collect::<Vec<(&u32, &char)>>(), vec![(&1, &'a'), (&2, &'c')]);
    /// assert_eq!(other.iter().collect::<Vec<(&u32, &char)>>(), vec![(&1, &'b')]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }
}

impl<K, V> RedBlackMap<K, V> {
    /// Removes the entry at `position` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `position` is `end()` or its entry was already
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::{Error, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// let (position, _) = map.insert(1, 2);
    /// assert_eq!(map.erase(position), Ok((1, 2)));
    /// assert_eq!(map.erase(position), Err(Error::InvalidPosition));
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<(K, V)> {
        self.tree.erase(position)
    }

    /// Returns the entry at `position`, or `None` if `position` is `end()`, stale or from another
    /// map.
    pub fn get_at(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.get(position).map(|entry| (&entry.0, &entry.1))
    }

    /// Returns the entry at `position` with a mutable reference to its value, or `None` if
    /// `position` is `end()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (position, _) = map.insert(1, 1);
    /// if let Some((_, value)) = map.get_at_mut(position) {
    ///     *value = 5;
    /// }
    /// assert_eq!(map[&1], 5);
    /// ```
    pub fn get_at_mut(&mut self, position: Position) -> Option<(&K, &mut V)> {
        self.tree.get_mut(position).map(|entry| (&entry.0, &mut entry.1))
    }

    /// Returns the position of the entry with the minimum key, or `end()` if the map is empty.
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the end sentinel, the position one past the entry with the maximum key.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position after `position`.
    pub fn next(&self, position: Position) -> Position {
        self.tree.next(position)
    }

    /// Returns the position before `position`. The position before `end()` is the entry with the
    /// maximum key.
    pub fn prev(&self, position: Position) -> Position {
        self.tree.prev(position)
    }

    /// Returns a read-only cursor over the entries starting at `position`.
    pub fn cursor(&self, position: Position) -> Cursor<'_, (K, V), ByKey> {
        self.tree.cursor(position)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of entries the map could hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two maps.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|entry| &entry.0)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|entry| &entry.0)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, K, V> {
        RedBlackMapIter {
            tree_iter: self.tree.iter(),
        }
    }

    /// Returns an iterator over the keys of the map in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.values().collect::<Vec<&char>>(), vec![&'a', &'b']);
    /// ```
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V> IntoIterator for RedBlackMap<K, V> {
    type IntoIter = RedBlackMapIntoIter<K, V>;
    type Item = (K, V);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RedBlackMap<K, V>
where
    K: 'a,
    V: 'a,
{
    type IntoIter = RedBlackMapIter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<K, V> {
    tree_iter: IntoIter<(K, V)>,
}

impl<K, V> Iterator for RedBlackMapIntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for RedBlackMapIntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<K, V> ExactSizeIterator for RedBlackMapIntoIter<K, V> {}

/// An iterator for `RedBlackMap<K, V>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, K, V> {
    tree_iter: Iter<'a, (K, V), ByKey>,
}

impl<'a, K, V> Iterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next().map(|entry| (&entry.0, &entry.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back().map(|entry| (&entry.0, &entry.1))
    }
}

impl<'a, K, V> ExactSizeIterator for RedBlackMapIter<'a, K, V>
where
    K: 'a,
    V: 'a,
{
}

impl<K, V> Default for RedBlackMap<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for RedBlackMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for RedBlackMap<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.tree.extend(pairs);
    }
}

impl<K, V> FromIterator<(K, V)> for RedBlackMap<K, V>
where
    K: Ord,
{
    /// Collects the pairs into a map. Of several pairs with the same key only the first one is
    /// kept.
    fn from_iter<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        RedBlackMap {
            tree: RedBlackTree::from_values(ByKey, pairs),
        }
    }
}

impl<'a, K, V> Index<&'a K> for RedBlackMap<K, V>
where
    K: Ord,
{
    type Output = V;

    fn index(&self, key: &K) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, K, V> IndexMut<&'a K> for RedBlackMap<K, V>
where
    K: Ord,
{
    fn index_mut(&mut self, key: &K) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

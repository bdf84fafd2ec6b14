use crate::red_black_tree::{Cursor, IntoIter, Iter, Natural, Position, RedBlackTree, Result};
use std::fmt;
use std::iter::FromIterator;

/// An ordered multiset implemented using a red black tree.
///
/// Unlike `RedBlackSet<T>`, a multiset keeps every inserted value, including values equal to ones
/// already present. Equal values are kept in insertion order.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMultiset;
///
/// let mut multiset = RedBlackMultiset::new();
/// multiset.insert(5);
/// multiset.insert(5);
/// multiset.insert(1);
///
/// assert_eq!(multiset.len(), 3);
/// assert_eq!(multiset.count(&5), 2);
///
/// assert_eq!(multiset.remove(&5), Some(5));
/// assert_eq!(multiset.count(&5), 1);
/// assert!(multiset.contains(&5));
/// ```
#[derive(Clone)]
pub struct RedBlackMultiset<T> {
    tree: RedBlackTree<T, Natural>,
}

impl<T> RedBlackMultiset<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackMultiset<T>`
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMultiset {
            tree: RedBlackTree::new(),
        }
    }

    /// Inserts a value into the multiset and returns its position. The value is placed after
    /// every equal value already in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// let first = multiset.insert(1);
    /// let second = multiset.insert(1);
    /// assert_ne!(first, second);
    /// assert_eq!(multiset.next(first), second);
    /// ```
    pub fn insert(&mut self, value: T) -> Position {
        self.tree.insert_non_unique(value).0
    }

    /// Inserts every value of `values` in order. Every insertion succeeds, so each returned flag
    /// is `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// let results = multiset.insert_many(vec![2, 1, 2]);
    /// assert!(results.iter().all(|result| result.1));
    /// assert_eq!(multiset.len(), 3);
    /// ```
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        self.tree.insert_many_non_unique(values)
    }

    /// Removes the earliest inserted occurrence of `value` and returns it. Returns `None` if the
    /// value is not in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), Some(1));
    /// assert_eq!(multiset.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let position = self.tree.lower_bound(value);
        let found = self.tree.get(position).map_or(false, |found| found == value);
        if found {
            self.tree.erase(position).ok()
        } else {
            None
        }
    }

    /// Returns the position of an occurrence of `value`, or `end()` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// assert_eq!(multiset.get_at(multiset.find(&1)), Some(&1));
    /// assert_eq!(multiset.find(&2), multiset.end());
    /// ```
    pub fn find(&self, value: &T) -> Position {
        self.tree.find(value)
    }

    /// Checks if a value exists in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// assert!(!multiset.contains(&0));
    /// assert!(multiset.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// Returns the number of occurrences of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset = vec![1, 2, 2, 2, 3].into_iter().collect::<RedBlackMultiset<u32>>();
    /// assert_eq!(multiset.count(&2), 3);
    /// assert_eq!(multiset.count(&4), 0);
    /// ```
    pub fn count(&self, value: &T) -> usize {
        self.tree.count(value)
    }

    /// Returns the position of the first value that is not less than `value`, or `end()` if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset = vec![1, 3, 3].into_iter().collect::<RedBlackMultiset<u32>>();
    /// assert_eq!(multiset.lower_bound(&2), multiset.next(multiset.begin()));
    /// ```
    pub fn lower_bound(&self, value: &T) -> Position {
        self.tree.lower_bound(value)
    }

    /// Returns the position of the first value that is greater than `value`, or `end()` if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset = vec![1, 3, 3].into_iter().collect::<RedBlackMultiset<u32>>();
    /// assert_eq!(multiset.upper_bound(&3), multiset.end());
    /// ```
    pub fn upper_bound(&self, value: &T) -> Position {
        self.tree.upper_bound(value)
    }

    /// Returns the half-open range of positions holding `value`. Both positions are equal if the
    /// value is not in the multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset = vec![1, 2, 2, 3].into_iter().collect::<RedBlackMultiset<u32>>();
    /// let (mut curr, last) = multiset.equal_range(&2);
    /// let mut values = Vec::new();
    /// while curr != last {
    ///     values.push(multiset.get_at(curr));
    ///     curr = multiset.next(curr);
    /// }
    /// assert_eq!(values, vec![Some(&2), Some(&2)]);
    /// ```
    pub fn equal_range(&self, value: &T) -> (Position, Position) {
        self.tree.equal_range(value)
    }

    /// Moves every value of `other` into the multiset, leaving `other` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = vec![1, 2].into_iter().collect::<RedBlackMultiset<u32>>();
    /// let mut other = vec![2, 3].into_iter().collect::<RedBlackMultiset<u32>>();
    /// multiset.merge(&mut other);
    /// assert_eq!(multiset.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2, &3]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge_non_unique(&mut other.tree);
    }
}

impl<T> RedBlackMultiset<T> {
    /// Removes the value at `position` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `position` is `end()` or its value was already
    /// removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// let position = multiset.insert(1);
    /// assert_eq!(multiset.erase(position), Ok(1));
    /// assert_eq!(multiset.len(), 1);
    /// assert!(multiset.erase(multiset.end()).is_err());
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<T> {
        self.tree.erase(position)
    }

    /// Returns the value at `position`, or `None` if `position` is `end()`.
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.tree.get(position)
    }

    /// Returns the position of the minimum value, or `end()` if the multiset is empty.
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the end sentinel, the position one past the maximum value.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position after `position`.
    pub fn next(&self, position: Position) -> Position {
        self.tree.next(position)
    }

    /// Returns the position before `position`. The position before `end()` is the maximum.
    pub fn prev(&self, position: Position) -> Position {
        self.tree.prev(position)
    }

    /// Returns a read-only cursor starting at `position`.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, Natural> {
        self.tree.cursor(position)
    }

    /// Returns the number of elements in the multiset, counting every occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// assert_eq!(multiset.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
    /// assert!(multiset.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of elements the multiset could hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the multiset, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(1);
    /// multiset.insert(1);
    /// multiset.clear();
    /// assert_eq!(multiset.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two multisets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns the minimum value of the multiset. Returns `None` if the multiset is empty.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum value of the multiset. Returns `None` if the multiset is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns an iterator over the multiset. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiset;
    ///
    /// let mut multiset = RedBlackMultiset::new();
    /// multiset.insert(2);
    /// multiset.insert(1);
    /// multiset.insert(2);
    ///
    /// let mut iterator = multiset.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMultisetIter<'_, T> {
        RedBlackMultisetIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<T> IntoIterator for RedBlackMultiset<T> {
    type IntoIter = RedBlackMultisetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackMultiset<T>
where
    T: 'a,
{
    type IntoIter = RedBlackMultisetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields owned values.
pub struct RedBlackMultisetIntoIter<T> {
    tree_iter: IntoIter<T>,
}

impl<T> Iterator for RedBlackMultisetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for RedBlackMultisetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<T> ExactSizeIterator for RedBlackMultisetIntoIter<T> {}

/// An iterator for `RedBlackMultiset<T>`.
///
/// This iterator traverses the elements of the multiset in-order and yields immutable
/// references.
pub struct RedBlackMultisetIter<'a, T> {
    tree_iter: Iter<'a, T, Natural>,
}

impl<'a, T> Iterator for RedBlackMultisetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for RedBlackMultisetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<'a, T> ExactSizeIterator for RedBlackMultisetIter<'a, T> where T: 'a {}

impl<T> Default for RedBlackMultiset<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackMultiset<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for RedBlackMultiset<T>
where
    T: Ord,
{
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut multiset = Self::new();
        multiset.extend(values);
        multiset
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMultiset;
    use crate::red_black_tree::Error;

    #[test]
    fn test_len_empty() {
        let multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
        assert_eq!(multiset.len(), 0);
        assert_eq!(multiset.begin(), multiset.end());
    }

    #[test]
    fn test_insert_twice() {
        let mut multiset = RedBlackMultiset::new();
        multiset.insert(5);
        multiset.insert(5);
        assert_eq!(multiset.len(), 2);

        let position = multiset.find(&5);
        assert_eq!(multiset.erase(position), Ok(5));
        assert_eq!(multiset.len(), 1);
        assert_eq!(multiset.get_at(multiset.find(&5)), Some(&5));
    }

    #[test]
    fn test_insert_order_of_equal_values() {
        let mut multiset = RedBlackMultiset::new();
        let first = multiset.insert(2);
        multiset.insert(1);
        let second = multiset.insert(2);
        multiset.insert(3);

        let (lower, upper) = multiset.equal_range(&2);
        assert_eq!(lower, first);
        assert_eq!(multiset.next(lower), second);
        assert_eq!(multiset.next(second), upper);
        assert_eq!(multiset.get_at(upper), Some(&3));
    }

    #[test]
    fn test_count() {
        let multiset = vec![4, 1, 4, 2, 4].into_iter().collect::<RedBlackMultiset<u32>>();
        assert_eq!(multiset.count(&4), 3);
        assert_eq!(multiset.count(&1), 1);
        assert_eq!(multiset.count(&3), 0);
    }

    #[test]
    fn test_equal_range_absent() {
        let multiset = vec![1, 3].into_iter().collect::<RedBlackMultiset<u32>>();
        let (lower, upper) = multiset.equal_range(&2);
        assert_eq!(lower, upper);
        assert_eq!(multiset.get_at(lower), Some(&3));
    }

    #[test]
    fn test_remove() {
        let mut multiset = vec![1, 2, 2].into_iter().collect::<RedBlackMultiset<u32>>();
        assert_eq!(multiset.remove(&2), Some(2));
        assert_eq!(multiset.remove(&2), Some(2));
        assert_eq!(multiset.remove(&2), None);
        assert_eq!(multiset.remove(&0), None);
        assert_eq!(multiset.len(), 1);
    }

    #[test]
    fn test_erase_end() {
        let mut multiset: RedBlackMultiset<u32> = RedBlackMultiset::new();
        let end = multiset.end();
        assert_eq!(multiset.erase(end), Err(Error::InvalidPosition));
    }

    #[test]
    fn test_merge_moves_everything() {
        let mut multiset = vec![1, 2].into_iter().collect::<RedBlackMultiset<u32>>();
        let mut other = vec![1, 2, 3].into_iter().collect::<RedBlackMultiset<u32>>();
        multiset.merge(&mut other);
        assert!(other.is_empty());
        assert_eq!(multiset.into_iter().collect::<Vec<u32>>(), vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_min_max() {
        let multiset = vec![3, 1, 3, 2].into_iter().collect::<RedBlackMultiset<u32>>();
        assert_eq!(multiset.min(), Some(&1));
        assert_eq!(multiset.max(), Some(&3));
        assert_eq!(multiset.get_at(multiset.prev(multiset.end())), Some(&3));
    }

    #[test]
    fn test_clone_and_swap() {
        let mut multiset = vec![1, 1].into_iter().collect::<RedBlackMultiset<u32>>();
        let mut copy = multiset.clone();
        multiset.clear();
        assert_eq!(copy.len(), 2);

        multiset.swap(&mut copy);
        assert_eq!(multiset.len(), 2);
        assert!(copy.is_empty());
    }

    #[test]
    fn test_debug() {
        let multiset = vec![2, 1, 2].into_iter().collect::<RedBlackMultiset<u32>>();
        assert_eq!(format!("{:?}", multiset), "[1, 2, 2]");
    }

    #[test]
    fn test_iter() {
        let multiset = vec![2, 1, 2].into_iter().collect::<RedBlackMultiset<u32>>();
        assert_eq!(multiset.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2]);
        assert_eq!(multiset.iter().len(), 3);
        assert_eq!((&multiset).into_iter().rev().collect::<Vec<&u32>>(), vec![&2, &2, &1]);
    }
}

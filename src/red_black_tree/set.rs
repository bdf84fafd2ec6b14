use crate::red_black_tree::{Cursor, IntoIter, Iter, Natural, Position, RedBlackTree, Result};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// and keeps the number of black nodes on every root-to-leaf path equal, which bounds its height
/// by `2 * log2(n + 1)`. Each value is stored at most once.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.get_at(set.lower_bound(&2)), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T> {
    tree: RedBlackTree<T, Natural>,
}

impl<T> RedBlackSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>`
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet {
            tree: RedBlackTree::new(),
        }
    }

    /// Inserts a value into the set. Returns the position of the value and `true` if it was
    /// inserted, or the position of the existing equal value and `false` if it was already
    /// present. An existing value is never replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (position, inserted) = set.insert(1);
    /// assert!(inserted);
    /// assert_eq!(set.insert(1), (position, false));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.tree.insert(value)
    }

    /// Inserts every value of `values` in order and returns the outcome of each insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let results = set.insert_many(vec![2, 1, 2]);
    /// let inserted = results.iter().map(|result| result.1).collect::<Vec<bool>>();
    /// assert_eq!(inserted, vec![true, true, false]);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        self.tree.insert_many(values)
    }

    /// Removes a value from the set. If the value exists in the set, it will return the value.
    /// Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let position = self.tree.find(value);
        self.tree.erase(position).ok()
    }

    /// Returns the position of `value`, or `end()` if it is not in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.get_at(set.find(&1)), Some(&1));
    /// assert_eq!(set.find(&2), set.end());
    /// ```
    pub fn find(&self, value: &T) -> Position {
        self.tree.find(value)
    }

    /// Checks if a value exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.tree.contains(value)
    }

    /// Returns the position of the first value that is not less than `value`, or `end()` if
    /// there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = vec![1, 3, 5].into_iter().collect::<RedBlackSet<u32>>();
    /// assert_eq!(set.get_at(set.lower_bound(&3)), Some(&3));
    /// assert_eq!(set.get_at(set.lower_bound(&4)), Some(&5));
    /// assert!(set.lower_bound(&6).is_end());
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
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = vec![1, 3, 5].into_iter().collect::<RedBlackSet<u32>>();
    /// assert_eq!(set.get_at(set.upper_bound(&3)), Some(&5));
    /// assert!(set.upper_bound(&5).is_end());
    /// ```
    pub fn upper_bound(&self, value: &T) -> Position {
        self.tree.upper_bound(value)
    }

    /// Moves every value of `other` that is not already in the set into the set. Values that are
    /// already present stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = vec![1, 2].into_iter().collect::<RedBlackSet<u32>>();
    /// let mut other = vec![2, 3].into_iter().collect::<RedBlackSet<u32>>();
    /// set.merge(&mut other);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(other.iter().collect::<Vec<&u32>>(), vec![&2]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree);
    }
}

impl<T> RedBlackSet<T> {
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
    /// use rb_collections::red_black_tree::{Error, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::new();
    /// let (position, _) = set.insert(1);
    /// assert_eq!(set.erase(position), Ok(1));
    /// assert_eq!(set.erase(set.end()), Err(Error::InvalidPosition));
    /// ```
    pub fn erase(&mut self, position: Position) -> Result<T> {
        self.tree.erase(position)
    }

    /// Returns the value at `position`, or `None` if `position` is `end()`, stale or from another
    /// set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (position, _) = set.insert(1);
    /// assert_eq!(set.get_at(position), Some(&1));
    /// assert_eq!(set.get_at(set.end()), None);
    /// ```
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.tree.get(position)
    }

    /// Returns the position of the minimum value, or `end()` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.begin(), set.end());
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.get_at(set.begin()), Some(&1));
    /// ```
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// Returns the end sentinel, the position one past the maximum value.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// Returns the position after `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = vec![1, 2].into_iter().collect::<RedBlackSet<u32>>();
    /// let position = set.next(set.begin());
    /// assert_eq!(set.get_at(position), Some(&2));
    /// assert_eq!(set.next(position), set.end());
    /// ```
    pub fn next(&self, position: Position) -> Position {
        self.tree.next(position)
    }

    /// Returns the position before `position`. The position before `end()` is the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = vec![1, 2].into_iter().collect::<RedBlackSet<u32>>();
    /// assert_eq!(set.get_at(set.prev(set.end())), Some(&2));
    /// assert_eq!(set.prev(set.begin()), set.end());
    /// ```
    pub fn prev(&self, position: Position) -> Position {
        self.tree.prev(position)
    }

    /// Returns a read-only cursor starting at `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set = vec![1, 2].into_iter().collect::<RedBlackSet<u32>>();
    /// let mut cursor = set.cursor(set.begin());
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&2));
    /// ```
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, Natural> {
        self.tree.cursor(position)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the maximum number of elements the set could hold.
    pub fn max_size(&self) -> usize {
        self.tree.max_size()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = vec![1].into_iter().collect::<RedBlackSet<u32>>();
    /// let mut other = vec![2, 3].into_iter().collect::<RedBlackSet<u32>>();
    /// set.swap(&mut other);
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(other.len(), 1);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns the minimum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the maximum value of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns an iterator over the set. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter {
            tree_iter: self.tree.iter(),
        }
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            tree_iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct RedBlackSetIntoIter<T> {
    tree_iter: IntoIter<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree_iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tree_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct RedBlackSetIter<'a, T> {
    tree_iter: Iter<'a, T, Natural>,
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
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

impl<'a, T> DoubleEndedIterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree_iter.next_back()
    }
}

impl<'a, T> ExactSizeIterator for RedBlackSetIter<'a, T> where T: 'a {}

impl<T> Default for RedBlackSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.tree.extend(values);
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    /// Collects the values into a set. Of several equal values only the first one is kept.
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        RedBlackSet {
            tree: RedBlackTree::from_values(Natural, values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::red_black_tree::Error;

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        assert!(set.insert(1).1);
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_existing() {
        let mut set = RedBlackSet::new();
        let (position, inserted) = set.insert(5);
        assert!(inserted);
        assert_eq!(set.insert(5), (position, false));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        assert_eq!(set.remove(&1), None);
    }

    #[test]
    fn test_erase() {
        let mut set = vec![2, 1, 3].into_iter().collect::<RedBlackSet<u32>>();
        let position = set.find(&2);
        assert_eq!(set.erase(position), Ok(2));
        assert_eq!(set.erase(position), Err(Error::InvalidPosition));
        assert_eq!(set.erase(set.end()), Err(Error::InvalidPosition));
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3]);
    }

    #[test]
    fn test_min_max() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_bounds() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.get_at(set.lower_bound(&0)), Some(&1));
        assert_eq!(set.get_at(set.lower_bound(&3)), Some(&3));
        assert_eq!(set.get_at(set.lower_bound(&4)), Some(&5));
        assert_eq!(set.lower_bound(&6), set.end());

        assert_eq!(set.get_at(set.upper_bound(&0)), Some(&1));
        assert_eq!(set.get_at(set.upper_bound(&3)), Some(&5));
        assert_eq!(set.upper_bound(&5), set.end());
    }

    #[test]
    fn test_navigation() {
        let set = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect::<RedBlackSet<u32>>();
        let mut forward = Vec::new();
        let mut position = set.begin();
        while position != set.end() {
            forward.extend(set.get_at(position).cloned());
            position = set.next(position);
        }
        assert_eq!(forward, vec![1, 3, 4, 5, 7, 8, 9]);

        let mut backward = Vec::new();
        let mut position = set.prev(set.end());
        while position != set.end() {
            backward.extend(set.get_at(position).cloned());
            position = set.prev(position);
        }
        assert_eq!(backward, vec![9, 8, 7, 5, 4, 3, 1]);
    }

    #[test]
    fn test_merge() {
        let mut set = vec![1, 3].into_iter().collect::<RedBlackSet<u32>>();
        let mut other = vec![2, 3, 4].into_iter().collect::<RedBlackSet<u32>>();
        set.merge(&mut other);
        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 2, 3, 4]);
        assert_eq!(other.into_iter().collect::<Vec<u32>>(), vec![3]);
    }

    #[test]
    fn test_swap() {
        let mut set = vec![1].into_iter().collect::<RedBlackSet<u32>>();
        let mut other = RedBlackSet::new();
        set.swap(&mut other);
        assert!(set.is_empty());
        assert_eq!(other.min(), Some(&1));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut set = vec![1, 2, 3].into_iter().collect::<RedBlackSet<u32>>();
        let copy = set.clone();
        set.remove(&2);
        set.insert(4);
        assert_eq!(copy.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    }

    #[test]
    fn test_extend() {
        let mut set = RedBlackSet::new();
        set.extend(vec![3, 1, 3]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_debug() {
        let set = vec![2, 1].into_iter().collect::<RedBlackSet<u32>>();
        assert_eq!(format!("{:?}", set), "{1, 2}");
    }

    #[test]
    fn test_into_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = RedBlackSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }
}

use crate::arena::Handle;
use crate::red_black_tree::tree::RedBlackTree;
use std::fmt;
use std::ptr;
use std::vec;

/// A position in a `RedBlackTree`: either a node or the end sentinel.
///
/// Positions compare equal when they refer to the same node of the same tree, and the end
/// sentinels of two trees are different positions. They do not borrow the tree, so they can be
/// passed back to mutating operations such as `erase`. A position stays valid until the node it
/// refers to is erased or its tree is cleared. After that, and for positions handed to a tree
/// they do not belong to, `erase` reports `Error::InvalidPosition` and `get` returns `None`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    tree: usize,
    handle: Option<Handle>,
}

impl Position {
    pub(crate) fn new(tree: usize, handle: Option<Handle>) -> Self {
        Position { tree, handle }
    }

    pub(crate) fn tree(self) -> usize {
        self.tree
    }

    pub(crate) fn handle(self) -> Option<Handle> {
        self.handle
    }

    /// Returns `true` if this is the end sentinel.
    pub fn is_end(self) -> bool {
        self.handle.is_none()
    }
}

/// A read-only cursor over a `RedBlackTree`.
///
/// A cursor can move in both directions and read the value under it, but it never exposes the
/// position it holds, so it cannot be used to modify the tree. Moving past either extreme lands
/// on the end sentinel, and moving again continues from the other extreme: `move_next` from the
/// end goes to the minimum. This differs from `RedBlackTree::next`, for which the successor of
/// `end()` is `end()`.
pub struct Cursor<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
    position: Position,
}

impl<'a, T, C> Cursor<'a, T, C> {
    pub(crate) fn new(tree: &'a RedBlackTree<T, C>, position: Position) -> Self {
        Cursor { tree, position }
    }

    /// Returns the value under the cursor, or `None` at the end sentinel.
    pub fn get(&self) -> Option<&'a T> {
        self.tree.get(self.position)
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    pub fn move_next(&mut self) {
        self.position = if self.position == self.tree.end() {
            self.tree.begin()
        } else {
            self.tree.next(self.position)
        };
    }

    pub fn move_prev(&mut self) {
        self.position = self.tree.prev(self.position);
    }
}

impl<'a, T, C> Clone for Cursor<'a, T, C> {
    fn clone(&self) -> Self {
        Cursor {
            tree: self.tree,
            position: self.position,
        }
    }
}

impl<'a, T, C> PartialEq for Cursor<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.position == other.position
    }
}

impl<'a, T, C> Eq for Cursor<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Cursor<'a, T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// An iterator for `RedBlackTree<T, C>`.
///
/// This iterator traverses the elements of the tree in-order from both ends and yields immutable
/// references.
pub struct Iter<'a, T, C> {
    tree: &'a RedBlackTree<T, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    len: usize,
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(
        tree: &'a RedBlackTree<T, C>,
        front: Option<Handle>,
        back: Option<Handle>,
        len: usize,
    ) -> Self {
        Iter {
            tree,
            front,
            back,
            len,
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.successor(handle);
        self.len -= 1;
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.predecessor(handle);
        self.len -= 1;
        Some(self.tree.value(handle))
    }
}

impl<'a, T, C> ExactSizeIterator for Iter<'a, T, C> where T: 'a {}

impl<'a, T, C> Clone for Iter<'a, T, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

/// An owning iterator for `RedBlackTree<T, C>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct IntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        IntoIter {
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::RedBlackTree;

    #[test]
    fn test_position_is_end() {
        let mut tree = RedBlackTree::new();
        assert!(tree.end().is_end());
        let (position, _) = tree.insert(1);
        assert!(!position.is_end());
    }

    #[test]
    fn test_positions_of_different_trees() {
        let mut tree = RedBlackTree::new();
        let mut other = RedBlackTree::new();
        tree.insert(1);
        other.insert(1);

        assert_ne!(tree.begin(), other.begin());
        assert_ne!(tree.end(), other.end());
        assert_eq!(tree.begin(), tree.find(&1));
    }

    #[test]
    fn test_cursor() {
        let mut tree = RedBlackTree::new();
        tree.insert_many(vec![2, 1, 3]);

        let mut cursor = tree.cursor(tree.begin());
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&2));
        cursor.move_next();
        cursor.move_next();
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_prev();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_cursor_wraps_unlike_next() {
        let tree = vec![1, 2].into_iter().collect::<RedBlackTree<u32>>();
        assert_eq!(tree.next(tree.end()), tree.end());

        let mut cursor = tree.cursor(tree.end());
        cursor.move_next();
        assert_eq!(cursor.get(), Some(&1));

        let mut cursor = tree.cursor(tree.end());
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&2));
    }

    #[test]
    fn test_cursor_eq() {
        let tree = vec![1, 2].into_iter().collect::<RedBlackTree<u32>>();
        let other = tree.clone();
        let mut cursor = tree.cursor(tree.begin());
        assert_eq!(cursor, tree.cursor(tree.begin()));
        assert!(cursor != other.cursor(other.begin()));
        cursor.move_next();
        assert!(cursor != tree.cursor(tree.begin()));
        assert_eq!(format!("{:?}", cursor), "Cursor(Some(2))");
    }

    #[test]
    fn test_iter_double_ended() {
        let tree = (0..10).collect::<RedBlackTree<u32>>();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&9));
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.rev().cloned().collect::<Vec<u32>>(), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_iter_meets_in_middle() {
        let tree = (0..3).collect::<RedBlackTree<u32>>();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_into_iter_rev() {
        let tree = (0..4).collect::<RedBlackTree<u32>>();
        assert_eq!(tree.into_iter().rev().collect::<Vec<u32>>(), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_borrowed_into_iter() {
        let tree = (0..3).collect::<RedBlackTree<u32>>();
        let mut sum = 0;
        for value in &tree {
            sum += value;
        }
        assert_eq!(sum, 3);
    }
}

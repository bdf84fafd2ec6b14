use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::compare::{Compare, Natural};
use crate::red_black_tree::iter::{Cursor, IntoIter, Iter, Position};
use crate::red_black_tree::node::{Color, Node, Side};
use crate::red_black_tree::{Error, Result};
use std::cmp;
use std::fmt;
use std::iter::FromIterator;
use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of nodes per arena chunk used by the plain constructors.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

// Every tree value gets a fresh id so that positions can be traced back to the tree they came
// from.
fn next_tree_id() -> usize {
    NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)
}

/// An ordered collection implemented using a red black tree.
///
/// A red black tree is a binary search tree where every node is colored red or black. The root
/// is black, a red node never has a red child and every path from a node down to a missing child
/// passes through the same number of black nodes. Together these bound the height of the tree by
/// `2 * log2(n + 1)`, so every operation below runs in `O(log N)` time.
///
/// The tree is ordered by a `Compare<T>` policy chosen at construction and can either reject
/// equivalent values (`insert`) or keep all of them (`insert_non_unique`). Nodes live in an arena
/// and are addressed through `Position`s. Erasing a node only invalidates the positions that refer
/// to that node. A position is only accepted by the tree that produced it; clearing, cloning or
/// draining a tree gives it a new identity.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// let (position, inserted) = tree.insert(5);
/// assert!(inserted);
/// assert_eq!(tree.insert(5), (position, false));
///
/// tree.insert_many(vec![3, 8, 1]);
/// assert_eq!(tree.get(tree.begin()), Some(&1));
/// assert_eq!(tree.get(tree.prev(tree.end())), Some(&8));
///
/// assert_eq!(tree.erase(tree.find(&3)), Ok(3));
/// assert!(tree.erase(tree.end()).is_err());
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &5, &8]);
/// ```
pub struct RedBlackTree<T, C = Natural> {
    id: usize,
    arena: TypedArena<Node<T>>,
    root: Option<Handle>,
    leftmost: Option<Handle>,
    rightmost: Option<Handle>,
    len: usize,
    compare: C,
}

impl<T> RedBlackTree<T>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackTree<T>` ordered by `Ord`.
    pub fn new() -> Self {
        Self::with_compare(Natural)
    }
}

impl<T, C> RedBlackTree<T, C> {
    /// Constructs a new, empty tree ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        Self::with_chunk_size(compare, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty tree ordered by `compare` whose arena allocates `chunk_size` nodes
    /// at a time.
    pub fn with_chunk_size(compare: C, chunk_size: usize) -> Self {
        RedBlackTree {
            id: next_tree_id(),
            arena: TypedArena::new(chunk_size),
            root: None,
            leftmost: None,
            rightmost: None,
            len: 0,
            compare,
        }
    }

    /// Returns the ordering policy of the tree.
    pub fn compare(&self) -> &C {
        &self.compare
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the maximum number of elements the tree could address.
    pub fn max_size(&self) -> usize {
        isize::max_value() as usize / cmp::max(mem::size_of::<Node<T>>(), 1)
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();
        while let Some((handle, depth)) = stack.pop() {
            height = cmp::max(height, depth);
            let node = &self.arena[handle];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Returns the position of the minimum value, or `end()` if the tree is empty. Runs in `O(1)`.
    pub fn begin(&self) -> Position {
        self.position(self.leftmost)
    }

    /// Returns the end sentinel, the position one past the maximum value.
    pub fn end(&self) -> Position {
        self.position(None)
    }

    /// Returns the position after `position`. The successor of the maximum is `end()` and the
    /// successor of `end()` is `end()`. Positions that do not belong to this tree map to `end()`.
    pub fn next(&self, position: Position) -> Position {
        match self.resolve(position) {
            Some(handle) => self.position(self.successor(handle)),
            None => self.end(),
        }
    }

    /// Returns the position before `position`. The predecessor of `end()` is the maximum and the
    /// predecessor of the minimum is `end()`. Positions that do not belong to this tree map to
    /// `end()`.
    pub fn prev(&self, position: Position) -> Position {
        if position == self.end() {
            return self.position(self.rightmost);
        }
        match self.resolve(position) {
            Some(handle) => self.position(self.predecessor(handle)),
            None => self.end(),
        }
    }

    /// Returns the value at `position`, or `None` for `end()`, erased positions and positions of
    /// other trees.
    pub fn get(&self, position: Position) -> Option<&T> {
        let handle = self.resolve(position)?;
        Some(&self.arena[handle].value)
    }

    /// Returns a mutable reference to the value at `position`.
    ///
    /// The value must not be changed in a way that moves it relative to the other values under
    /// the ordering policy; doing so leaves lookups unspecified.
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        let handle = self.resolve(position)?;
        Some(&mut self.arena[handle].value)
    }

    /// Returns a read-only cursor starting at `position`.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, C> {
        Cursor::new(self, position)
    }

    /// Returns the minimum value of the tree in `O(1)`.
    pub fn min(&self) -> Option<&T> {
        self.leftmost.map(|handle| &self.arena[handle].value)
    }

    /// Returns the maximum value of the tree in `O(1)`.
    pub fn max(&self) -> Option<&T> {
        self.rightmost.map(|handle| &self.arena[handle].value)
    }

    /// Returns an in-order iterator over the values of the tree.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self, self.leftmost, self.rightmost, self.len)
    }

    /// Removes the value at `position` and returns it.
    ///
    /// A node with two children is replaced by relinking its in-order successor into its place,
    /// so positions of every other node stay valid.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if `position` is `end()`, its node was already erased or
    /// it belongs to another tree. The tree is not modified in that case.
    pub fn erase(&mut self, position: Position) -> Result<T> {
        let target = match self.resolve(position) {
            Some(handle) => handle,
            None => {
                log::debug!("erase rejected: position does not refer to an element");
                return Err(Error::InvalidPosition);
            },
        };

        if self.leftmost == Some(target) {
            self.leftmost = self.successor(target);
        }
        if self.rightmost == Some(target) {
            self.rightmost = self.predecessor(target);
        }

        let (left, right, target_parent, target_color) = {
            let node = &self.arena[target];
            (node.left, node.right, node.parent, node.color)
        };

        let (child, child_parent, removed_color) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.minimum(right);
                let successor_color = self.arena[successor].color;
                let child = self.arena[successor].right;
                let child_parent = if successor == right {
                    Some(successor)
                } else {
                    let successor_parent = self.arena[successor].parent;
                    self.transplant(successor, child);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    successor_parent
                };
                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                self.arena[successor].color = target_color;
                (child, child_parent, successor_color)
            },
            (left, right) => {
                let child = left.or(right);
                self.transplant(target, child);
                (child, target_parent, target_color)
            },
        };

        let node = self
            .arena
            .free(target)
            .expect("Expected the erased node to be live.");
        self.len -= 1;
        debug_assert_eq!(self.arena.len(), self.len);

        if removed_color == Color::Black {
            self.delete_fixup(child, child_parent);
        }

        Ok(node.value)
    }

    /// Clears the tree, removing all values.
    pub fn clear(&mut self) {
        log::debug!("clearing tree of {} values", self.len);
        self.id = next_tree_id();
        self.arena.clear();
        self.root = None;
        self.leftmost = None;
        self.rightmost = None;
        self.len = 0;
    }

    /// Swaps the contents and ordering policies of two trees in `O(1)`.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves every value out of the tree into a new tree, leaving `self` empty.
    pub fn take(&mut self) -> Self
    where
        C: Clone,
    {
        let empty = Self::with_chunk_size(self.compare.clone(), self.arena.chunk_size());
        mem::replace(self, empty)
    }

    fn position(&self, handle: Option<Handle>) -> Position {
        Position::new(self.id, handle)
    }

    // Returns the node of `position` if it is a live node of this tree.
    fn resolve(&self, position: Position) -> Option<Handle> {
        if position.tree() != self.id {
            return None;
        }
        position
            .handle()
            .filter(|&handle| self.arena.contains(handle))
    }

    pub(crate) fn value(&self, handle: Handle) -> &T {
        &self.arena[handle].value
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    // Moves one node towards `side` in in-order sequence.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.arena[handle].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        let mut curr = handle;
        let mut parent = self.arena[handle].parent;
        while let Some(parent_handle) = parent {
            if self.arena[parent_handle].child(side.opposite()) == Some(curr) {
                return Some(parent_handle);
            }
            curr = parent_handle;
            parent = self.arena[parent_handle].parent;
        }
        None
    }

    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.arena[handle].child(side) {
            handle = child;
        }
        handle
    }

    fn minimum(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Left)
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        match handle {
            Some(handle) => self.arena[handle].color == Color::Red,
            None => false,
        }
    }

    fn set_color(&mut self, handle: Option<Handle>, color: Color) {
        if let Some(handle) = handle {
            self.arena[handle].color = color;
        }
    }

    // Replaces the subtree rooted at `old` with the subtree rooted at `new` in the link of `old`'s
    // parent.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.arena[old].parent;
        match parent {
            None => self.root = new,
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    self.arena[parent].left = new;
                } else {
                    self.arena[parent].right = new;
                }
            },
        }
        if let Some(new) = new {
            self.arena[new].parent = parent;
        }
    }

    // Rotates `handle` down towards `side`, lifting its child on the opposite side into its place.
    fn rotate(&mut self, handle: Handle, side: Side) {
        let opposite = side.opposite();
        let child = self.arena[handle]
            .child(opposite)
            .expect("Expected a child node to rotate into place.");
        let inner = self.arena[child].child(side);

        self.arena[handle].set_child(opposite, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }
        self.transplant(handle, Some(child));
        self.arena[child].set_child(side, Some(handle));
        self.arena[handle].parent = Some(child);
    }

    fn insert_fixup(&mut self, mut node: Handle) {
        while let Some(mut parent) = self.arena[node].parent {
            if self.arena[parent].color == Color::Black {
                break;
            }

            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a red node to have a parent.");
            let side = if self.arena[grandparent].left == Some(parent) {
                Side::Left
            } else {
                Side::Right
            };
            let uncle = self.arena[grandparent].child(side.opposite());

            if self.is_red(uncle) {
                log::trace!("insert fixup: red uncle, recoloring");
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                node = grandparent;
                continue;
            }

            if self.arena[parent].child(side.opposite()) == Some(node) {
                log::trace!("insert fixup: zig-zag, rotating at parent");
                self.rotate(parent, side);
                node = parent;
                parent = self.arena[node]
                    .parent
                    .expect("Expected a rotated node to have a parent.");
            }

            log::trace!("insert fixup: straight line, rotating at grandparent");
            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, side.opposite());
            break;
        }

        self.set_color(self.root, Color::Black);
    }

    // `node` carries an extra black. It may be absent, in which case `parent` locates it.
    fn delete_fixup(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let parent_handle = match parent {
                Some(parent_handle) => parent_handle,
                None => break,
            };
            let side = if self.arena[parent_handle].left == node {
                Side::Left
            } else {
                Side::Right
            };
            let opposite = side.opposite();
            let mut sibling = self.arena[parent_handle]
                .child(opposite)
                .expect("Expected a doubly black node to have a sibling.");

            if self.arena[sibling].color == Color::Red {
                log::trace!("delete fixup: red sibling, rotating at parent");
                self.arena[sibling].color = Color::Black;
                self.arena[parent_handle].color = Color::Red;
                self.rotate(parent_handle, side);
                sibling = self.arena[parent_handle]
                    .child(opposite)
                    .expect("Expected a doubly black node to have a sibling.");
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(opposite);

            if !self.is_red(near) && !self.is_red(far) {
                log::trace!("delete fixup: black nephews, moving deficiency up");
                self.arena[sibling].color = Color::Red;
                node = Some(parent_handle);
                parent = self.arena[parent_handle].parent;
                continue;
            }

            if !self.is_red(far) {
                log::trace!("delete fixup: red near nephew, rotating at sibling");
                self.set_color(near, Color::Black);
                self.arena[sibling].color = Color::Red;
                self.rotate(sibling, opposite);
                sibling = self.arena[parent_handle]
                    .child(opposite)
                    .expect("Expected a doubly black node to have a sibling.");
            }

            log::trace!("delete fixup: red far nephew, rotating at parent");
            self.arena[sibling].color = self.arena[parent_handle].color;
            self.arena[parent_handle].color = Color::Black;
            let far = self.arena[sibling].child(opposite);
            self.set_color(far, Color::Black);
            self.rotate(parent_handle, side);
            node = self.root;
            break;
        }

        self.set_color(node, Color::Black);
    }

    // Empties the tree and returns its values in order.
    fn drain_values(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.len);
        let mut curr = self.leftmost;
        while let Some(handle) = curr {
            handles.push(handle);
            curr = self.successor(handle);
        }

        let chunk_size = self.arena.chunk_size();
        let mut arena = mem::replace(&mut self.arena, TypedArena::new(chunk_size));
        self.id = next_tree_id();
        self.root = None;
        self.leftmost = None;
        self.rightmost = None;
        self.len = 0;

        handles
            .into_iter()
            .filter_map(|handle| arena.free(handle))
            .map(|node| node.value)
            .collect()
    }
}

impl<T, C> RedBlackTree<T, C>
where
    C: Compare<T>,
{
    /// Constructs a tree ordered by `compare` holding `values`. Each value goes through `insert`,
    /// so of several equivalent values only the first one is kept.
    pub fn from_values<I>(compare: C, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::with_compare(compare);
        tree.extend(values);
        tree
    }

    /// Inserts `value` unless an equivalent value is already present. Returns the position of the
    /// new value and `true`, or the position of the existing value and `false`.
    pub fn insert(&mut self, value: T) -> (Position, bool) {
        self.insert_value(value, true)
    }

    /// Inserts `value` even if equivalent values are present. Equivalent values are kept in
    /// insertion order. The returned flag is always `true`.
    pub fn insert_non_unique(&mut self, value: T) -> (Position, bool) {
        self.insert_value(value, false)
    }

    /// Inserts each value with `insert` and reports the outcome of every insertion.
    pub fn insert_many<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(|value| self.insert(value)).collect()
    }

    /// Inserts each value with `insert_non_unique`.
    pub fn insert_many_non_unique<I>(&mut self, values: I) -> Vec<(Position, bool)>
    where
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .map(|value| self.insert_non_unique(value))
            .collect()
    }

    fn insert_value(&mut self, value: T, unique: bool) -> (Position, bool) {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;

        while let Some(handle) = curr {
            let node = &self.arena[handle];
            let key = self.compare.key(&value);
            let node_key = self.compare.key(&node.value);
            if unique && self.compare.equivalent(key, node_key) {
                return (self.position(Some(handle)), false);
            }
            side = if self.compare.less(key, node_key) {
                Side::Left
            } else {
                Side::Right
            };
            parent = Some(handle);
            curr = node.child(side);
        }

        let handle = self.arena.allocate(Node::new(value, parent));
        match parent {
            None => {
                self.root = Some(handle);
                self.leftmost = Some(handle);
                self.rightmost = Some(handle);
            },
            Some(parent) => {
                self.arena[parent].set_child(side, Some(handle));
                if side == Side::Left && self.leftmost == Some(parent) {
                    self.leftmost = Some(handle);
                }
                if side == Side::Right && self.rightmost == Some(parent) {
                    self.rightmost = Some(handle);
                }
            },
        }
        self.len += 1;
        debug_assert_eq!(self.arena.len(), self.len);

        self.insert_fixup(handle);
        (self.position(Some(handle)), true)
    }

    /// Returns the position of a value equivalent to `key`, or `end()` if there is none.
    pub fn find(&self, key: &C::Key) -> Position {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            let node_key = self.compare.key(&node.value);
            if self.compare.equivalent(key, node_key) {
                return self.position(Some(handle));
            }
            curr = if self.compare.less(key, node_key) {
                node.left
            } else {
                node.right
            };
        }
        self.end()
    }

    pub fn contains(&self, key: &C::Key) -> bool {
        !self.find(key).is_end()
    }

    /// Returns the position of the first value that is not less than `key`, or `end()`.
    pub fn lower_bound(&self, key: &C::Key) -> Position {
        self.bound(|compare, node_key| !compare.less(node_key, key))
    }

    /// Returns the position of the first value that is greater than `key`, or `end()`.
    pub fn upper_bound(&self, key: &C::Key) -> Position {
        self.bound(|compare, node_key| compare.less(key, node_key))
    }

    /// Returns `(lower_bound(key), upper_bound(key))`, the range of values equivalent to `key`.
    pub fn equal_range(&self, key: &C::Key) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the number of values equivalent to `key`.
    pub fn count(&self, key: &C::Key) -> usize {
        let (mut curr, last) = self.equal_range(key);
        let mut count = 0;
        while curr != last {
            count += 1;
            curr = self.next(curr);
        }
        count
    }

    // Descends keeping the last node accepted by `accept`; accepted nodes send the search left.
    fn bound<F>(&self, accept: F) -> Position
    where
        F: Fn(&C, &C::Key) -> bool,
    {
        let mut best = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if accept(&self.compare, self.compare.key(&node.value)) {
                best = Some(handle);
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        self.position(best)
    }

    /// Moves every value of `other` that has no equivalent in `self` into `self`. Values that
    /// are already present stay in `other`.
    pub fn merge(&mut self, other: &mut Self) {
        let mut moved = 0;
        let mut position = other.begin();
        while let Some(handle) = position.handle() {
            let next = other.next(position);
            if !self.contains(self.compare.key(other.value(handle))) {
                if let Ok(value) = other.erase(position) {
                    self.insert(value);
                    moved += 1;
                }
            }
            position = next;
        }
        log::debug!("merge moved {} values, {} left behind", moved, other.len());
    }

    /// Moves every value of `other` into `self`, keeping duplicates.
    pub fn merge_non_unique(&mut self, other: &mut Self) {
        let values = other.drain_values();
        log::debug!("merge moved {} values", values.len());
        for value in values {
            self.insert_non_unique(value);
        }
    }
}

impl<T, C> Clone for RedBlackTree<T, C>
where
    T: Clone,
    C: Clone,
{
    /// Copies the tree node for node, keeping its shape and colors.
    fn clone(&self) -> Self {
        let mut arena = TypedArena::new(self.arena.chunk_size());
        let mut root = None;
        let mut leftmost = None;
        let mut rightmost = None;

        if let Some(source_root) = self.root {
            let copy_root = arena.allocate(self.arena[source_root].clone_detached(None));
            let mut stack = vec![(source_root, copy_root)];
            while let Some((source, copy)) = stack.pop() {
                for &side in &[Side::Left, Side::Right] {
                    if let Some(source_child) = self.arena[source].child(side) {
                        let copy_child =
                            arena.allocate(self.arena[source_child].clone_detached(Some(copy)));
                        arena[copy].set_child(side, Some(copy_child));
                        stack.push((source_child, copy_child));
                    }
                }
                if self.leftmost == Some(source) {
                    leftmost = Some(copy);
                }
                if self.rightmost == Some(source) {
                    rightmost = Some(copy);
                }
            }
            root = Some(copy_root);
        }

        RedBlackTree {
            id: next_tree_id(),
            arena,
            root,
            leftmost,
            rightmost,
            len: self.len,
            compare: self.compare.clone(),
        }
    }
}

impl<T, C> Default for RedBlackTree<T, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::with_compare(C::default())
    }
}

impl<T, C> fmt::Debug for RedBlackTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C> Extend<T> for RedBlackTree<T, C>
where
    C: Compare<T>,
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

impl<T, C> FromIterator<T> for RedBlackTree<T, C>
where
    C: Compare<T> + Default,
{
    fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values(C::default(), values)
    }
}

impl<T, C> IntoIterator for RedBlackTree<T, C> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.drain_values())
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackTree<T, C>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T, C>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

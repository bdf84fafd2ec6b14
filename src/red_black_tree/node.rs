use crate::arena::Handle;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// `left` and `right` are owning edges. `parent` is only ever followed upwards to find
/// successors and to rebalance.
pub struct Node<T> {
    pub value: T,
    pub color: Color,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(value: T, parent: Option<Handle>) -> Self {
        Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    /// Copies the color of `self` onto a fresh, unlinked node holding a clone of its value.
    pub fn clone_detached(&self, parent: Option<Handle>) -> Self
    where
        T: Clone,
    {
        Node {
            value: self.value.clone(),
            color: self.color,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// The side of a child link.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

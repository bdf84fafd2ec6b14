//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! `RedBlackTree<T, C>` is the shared engine. `RedBlackSet`, `RedBlackMultiset` and
//! `RedBlackMap` are thin wrappers that pick an ordering policy and a uniqueness mode.

mod compare;
mod iter;
mod map;
mod multiset;
mod node;
mod set;
mod tree;

pub use self::compare::{ByKey, Compare, FnCompare, Natural};
pub use self::iter::{Cursor, IntoIter, Iter, Position};
pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
pub use self::multiset::{RedBlackMultiset, RedBlackMultisetIntoIter, RedBlackMultisetIter};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
pub use self::tree::{RedBlackTree, DEFAULT_CHUNK_SIZE};

use std::error;
use std::fmt;
use std::result;

/// Convenience `Result` type for fallible tree operations.
pub type Result<T> = result::Result<T, Error>;

/// An enum representing the ways a tree operation can fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The position is the end sentinel or refers to a node that has been erased.
    InvalidPosition,
    /// The requested key is not present in the map.
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPosition => write!(f, "position does not refer to an element"),
            Error::KeyNotFound => write!(f, "key does not exist"),
        }
    }
}

impl error::Error for Error {}

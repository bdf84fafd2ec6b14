//! Ordered collections built on a single red black tree engine.
//!
//! `red_black_tree::RedBlackTree` is generic over an ordering policy and supports both unique and
//! non-unique insertion. `RedBlackSet`, `RedBlackMultiset` and `RedBlackMap` wrap it for the
//! common cases.

mod arena;
pub mod red_black_tree;

//! This crate exposes an ordered key-store built on an unbalanced Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one element
//! and will sometimes have child `Node`s. The most important invariants of
//! this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have an element
//!    less than its own element.
//! 2. For every `Node`, all the `Node`s in its right subtree have an element
//!    greater than or equal to its own element. Equal elements are never
//!    merged; they pile up to the right of each other.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for an element takes `O(height)` (where `height` is the longest
//! path from the root `Node` to a leaf `Node`). This tree does no rebalancing,
//! so inserting elements in sorted order builds a "degenerate" tree whose
//! height is `N - 1`. None of the operations here recurse, so a degenerate
//! tree is slow but never overflows the stack. BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! # Examples
//!
//! ```
//! use keytree::Tree;
//!
//! let mut tree: Tree<_> = ["pear", "apple", "fig"].into_iter().collect();
//!
//! assert_eq!(tree.find(&"fig"), Some(&"fig"));
//! assert_eq!(tree.delete(&"pear"), Some("pear"));
//! assert_eq!(tree.iter().collect::<Vec<_>>(), [&"apple", &"fig"]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod iter;
mod node;
pub mod tree;

pub use error::InvariantError;
pub use tree::Tree;

//! A birthday book: personal records keyed by name, kept in a Binary Search Tree and saved to
//! a flat text file.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` here stores one
//! [`Record`][record::Record] and has up to two child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    name less than its own name.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    name greater than its own name.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. The [`tree::Tree`] in this crate does nothing to limit its
//! height, so names inserted in sorted order give a tree as tall as it is large. BSTs also
//! naturally support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree, which is how records are listed and saved.
//!
//! ## Layout
//!
//! - [`record`]: the `Date` and `Record` values.
//! - [`tree`]: the BST itself.
//! - [`store`]: a façade over one tree that also loads and saves it.
//! - [`console`]: the interactive menu driving a store.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cli;
pub mod console;
pub mod error;
pub mod record;
pub mod store;
pub mod tree;

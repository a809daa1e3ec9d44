//! An unbalanced BST of [`Record`]s keyed by name. Every child link uniquely owns its
//! subtree so there is no sharing and no parent pointers.
//!
//! Nothing rebalances the tree, so inserting names in sorted order degrades it to a linked
//! list. Because of that every walk (insertion, search, removal, traversal and drop) uses a
//! loop or an explicit stack rather than recursion.
//!
//! # Examples
//!
//! ```
//! use birthday_book::record::{Date, Record};
//! use birthday_book::tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.search("Bob"), None);
//!
//! assert!(tree.insert(Record::new("Bob", Date::new(5, 1, 1990))));
//! assert!(tree.insert(Record::new("Amy", Date::new(3, 2, 1991))));
//!
//! // Inserting an existing name leaves the original record alone.
//! assert!(!tree.insert(Record::new("Bob", Date::new(1, 1, 2000))));
//! assert_eq!(tree.search("Bob"), Some(Record::new("Bob", Date::new(5, 1, 1990))));
//!
//! let names: Vec<_> = tree.iter().map(|r| r.name()).collect();
//! assert_eq!(names, ["Amy", "Bob"]);
//!
//! // Removing a record hands it back.
//! assert_eq!(tree.remove("Amy").map(|r| r.birthday()), Some(Date::new(3, 2, 1991)));
//! assert_eq!(tree.remove("Amy"), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use tracing::debug;

use crate::record::Record;

type Link = Option<Box<Node>>;

/// A Binary Search Tree of [`Record`]s ordered by [`Record::name`]. Names are unique: the
/// first record inserted under a name wins.
pub struct Tree {
    root: Link,
    len: usize,
}

struct Node {
    left: Link,
    right: Link,
    record: Record,
}

impl Node {
    fn new_boxed(record: Record) -> Box<Self> {
        Box::new(Self {
            left: None,
            right: None,
            record,
        })
    }

    fn into_record(self: Box<Self>) -> Record {
        self.record
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Tree {
    /// Frees nodes in post-order with an explicit stack: a node is only dropped once both of
    /// its subtrees are gone.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(node);
                stack.push(left);
            } else if let Some(right) = node.right.take() {
                stack.push(node);
                stack.push(right);
            }
        }
    }
}

impl Clone for Tree {
    fn clone(&self) -> Self {
        // Re-inserting in pre-order reproduces the exact shape.
        let mut tree = Self::new();
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            tree.insert(node.record.clone());
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        tree
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Tree {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// How many records are stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Inserts `record` under its name. Returns `false`, leaving the tree untouched, when the
    /// name is already present.
    pub fn insert(&mut self, record: Record) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match record.name().cmp(node.record.name()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    debug!(name = record.name(), "duplicate name ignored");
                    return false;
                }
            };
        }

        debug!(name = record.name(), "inserted");
        *link = Some(Node::new_boxed(record));
        self.len += 1;
        true
    }

    /// Potentially finds the record stored under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use birthday_book::record::{Date, Record};
    /// use birthday_book::tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Record::new("Cid", Date::new(7, 4, 1989)));
    ///
    /// assert_eq!(tree.find("Cid").map(|r| r.birthday().year()), Some(1989));
    /// assert_eq!(tree.find("Dot"), None);
    /// ```
    pub fn find(&self, name: &str) -> Option<&Record> {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            link = match name.cmp(node.record.name()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    /// Like [`find`][Self::find] but hands back a copy of the record.
    pub fn search(&self, name: &str) -> Option<Record> {
        self.find(name).cloned()
    }

    /// Whether a record is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Removes the record stored under `name` and returns it, or returns `None` and leaves the
    /// tree untouched if there is no such record.
    ///
    /// A node with two children isn't unlinked itself. It takes over the record of its
    /// in-order successor (the leftmost node of its right subtree) and that node is unlinked
    /// instead.
    pub fn remove(&mut self, name: &str) -> Option<Record> {
        let mut link = &mut self.root;
        loop {
            let ordering = name.cmp(link.as_ref()?.record.name());
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Greater => &mut link.as_mut()?.right,
                Ordering::Equal => break,
            };
        }

        let removed = unlink(link);
        if removed.is_some() {
            debug!(name, "removed");
            self.len -= 1;
        }
        removed
    }

    /// Walks the records in ascending name order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Walks the records whose birthday falls in `month`, in ascending name order.
    ///
    /// # Examples
    ///
    /// ```
    /// use birthday_book::record::{Date, Record};
    /// use birthday_book::tree::Tree;
    ///
    /// let tree: Tree = [
    ///     Record::new("Bob", Date::new(5, 1, 1990)),
    ///     Record::new("Amy", Date::new(3, 2, 1991)),
    ///     Record::new("Ann", Date::new(5, 9, 1970)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let may: Vec<_> = tree.by_month(5).map(|r| r.name()).collect();
    /// assert_eq!(may, ["Ann", "Bob"]);
    /// ```
    pub fn by_month(&self, month: i32) -> ByMonth<'_> {
        ByMonth {
            inner: self.iter(),
            month,
        }
    }

    /// The records rendered as `name month day year` lines, in ascending name order.
    pub fn serialize_ordered(&self) -> Lines<'_> {
        Lines(self.iter())
    }
}

/// Unlinks the node at `link`, splicing a lone child into its place. Returns `None` if the
/// link is empty.
fn unlink(link: &mut Link) -> Option<Record> {
    let mut node = link.take()?;
    if node.left.is_none() {
        *link = node.right.take();
        return Some(node.into_record());
    }
    if node.right.is_none() {
        *link = node.left.take();
        return Some(node.into_record());
    }

    let removed = match take_leftmost(&mut node.right) {
        Some(successor) => mem::replace(&mut node.record, successor),
        None => unreachable!("successor not found but right subtree was not empty"),
    };
    *link = Some(node);
    Some(removed)
}

/// Unlinks the leftmost node under `link`. It has no left child so it is always spliced out
/// directly.
fn take_leftmost(mut link: &mut Link) -> Option<Record> {
    while link.as_ref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    unlink(link)
}

impl Extend<Record> for Tree {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl FromIterator<Record> for Tree {
    fn from_iter<I: IntoIterator<Item = Record>>(records: I) -> Self {
        let mut tree = Self::new();
        tree.extend(records);
        tree
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Record;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`Tree`]. Holds the path of nodes whose left subtrees are being
/// visited.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}

impl<'a> Iter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// In-order iterator over the records born in one month. See [`Tree::by_month`].
#[derive(Clone, Debug)]
pub struct ByMonth<'a> {
    inner: Iter<'a>,
    month: i32,
}

impl<'a> Iterator for ByMonth<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let month = self.month;
        self.inner.find(|record| record.birthday().month() == month)
    }
}

impl FusedIterator for ByMonth<'_> {}

/// Persisted form of a [`Tree`], one line per record. See [`Tree::serialize_ordered`].
#[derive(Clone, Debug)]
pub struct Lines<'a>(Iter<'a>);

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Record::to_line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Date;

    fn record(name: &str) -> Record {
        Record::new(name, Date::new(1, 1, 2000))
    }

    fn tree_of(names: &[&str]) -> Tree {
        names.iter().copied().map(record).collect()
    }

    fn names(tree: &Tree) -> Vec<&str> {
        tree.iter().map(Record::name).collect()
    }

    /// Walks the whole tree checking every key against the bounds its ancestors impose.
    fn assert_bst(tree: &Tree) {
        let mut count = 0;
        let mut stack: Vec<(&Node, Option<&str>, Option<&str>)> = tree
            .root
            .as_deref()
            .map(|root| (root, None, None))
            .into_iter()
            .collect();
        while let Some((node, low, high)) = stack.pop() {
            let name = node.record.name();
            assert!(low.map_or(true, |low| low < name), "{name} not above {low:?}");
            assert!(high.map_or(true, |high| name < high), "{name} not below {high:?}");
            count += 1;
            if let Some(left) = node.left.as_deref() {
                stack.push((left, low, Some(name)));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some(name), high));
            }
        }
        assert_eq!(count, tree.len());
    }

    fn root_name(tree: &Tree) -> Option<&str> {
        tree.root.as_deref().map(|node| node.record.name())
    }

    #[test]
    fn always_adding_left() {
        let keys = ["j", "i", "h", "g", "f", "e", "d", "c", "b", "a"];
        let mut inserted = Vec::new();

        let mut tree = Tree::new();
        assert!(tree.find("j").is_none());

        for key in keys {
            assert!(tree.insert(record(key)));
            inserted.push(key);
            for inserted in &inserted {
                assert_eq!(tree.find(inserted), Some(&record(inserted)));
            }
        }
        assert_bst(&tree);
    }

    #[test]
    fn always_adding_right() {
        let keys = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];

        let tree = tree_of(&keys);

        assert_eq!(names(&tree), keys);
        assert_bst(&tree);
    }

    #[test]
    fn duplicate_insert_keeps_first_record() {
        let mut tree = Tree::new();
        assert!(tree.insert(Record::new("Bob", Date::new(5, 1, 1990))));
        assert!(!tree.insert(Record::new("Bob", Date::new(6, 6, 1966))));

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find("Bob").map(Record::birthday), Some(Date::new(5, 1, 1990)));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let tree = tree_of(&["bob", "Bob", "amy", "Amy", "Ab"]);

        assert_eq!(names(&tree), ["Ab", "Amy", "Bob", "amy", "bob"]);
    }

    #[test]
    fn delete_leaf() {
        let mut tree = tree_of(&["m", "f", "t"]);

        assert_eq!(tree.remove("t"), Some(record("t")));
        assert_eq!(tree.find("t"), None);

        assert_eq!(names(&tree), ["f", "m"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_with_null_left() {
        let mut tree = tree_of(&["m", "f", "t", "w"]);

        assert_eq!(tree.remove("t"), Some(record("t")));

        assert_eq!(names(&tree), ["f", "m", "w"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_with_null_right() {
        let mut tree = tree_of(&["m", "f", "t", "p"]);

        assert_eq!(tree.remove("t"), Some(record("t")));

        assert_eq!(names(&tree), ["f", "m", "p"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_with_adjacent_successor() {
        let mut tree = tree_of(&["m", "f", "t", "p", "w"]);

        assert_eq!(tree.remove("t"), Some(record("t")));

        assert_eq!(names(&tree), ["f", "m", "p", "w"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_with_deeper_successor() {
        let mut tree = tree_of(&["m", "f", "t", "c", "p", "w", "r", "q"]);

        // The successor of "m" is "p", which has a right subtree that must be kept.
        assert_eq!(tree.remove("m"), Some(record("m")));

        assert_eq!(root_name(&tree), Some("p"));
        assert_eq!(names(&tree), ["c", "f", "p", "q", "r", "t", "w"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_two_children_root() {
        let mut tree = tree_of(&["M", "B", "T", "A", "D", "N", "Z"]);

        assert_eq!(tree.remove("M"), Some(record("M")));

        assert_eq!(root_name(&tree), Some("N"));
        assert_eq!(tree.find("M"), None);
        assert_eq!(names(&tree), ["A", "B", "D", "N", "T", "Z"]);
        assert_bst(&tree);
    }

    #[test]
    fn delete_root_with_one_child() {
        let mut tree = tree_of(&["m", "t", "w"]);

        assert_eq!(tree.remove("m"), Some(record("m")));

        assert_eq!(root_name(&tree), Some("t"));
        assert_eq!(names(&tree), ["t", "w"]);
    }

    #[test]
    fn delete_root() {
        let mut tree = tree_of(&["m"]);

        assert_eq!(tree.remove("m"), Some(record("m")));
        assert_eq!(tree.find("m"), None);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut tree = tree_of(&["m", "f", "t"]);

        assert_eq!(tree.remove("a"), None);
        assert_eq!(tree.remove("z"), None);
        assert_eq!(Tree::new().remove("a"), None);

        assert_eq!(root_name(&tree), Some("m"));
        assert_eq!(tree.len(), 3);
        assert_eq!(names(&tree), ["f", "m", "t"]);
    }

    #[test]
    fn by_month_filters_in_order() {
        let tree: Tree = [
            Record::new("Bob", Date::new(5, 1, 1990)),
            Record::new("Amy", Date::new(3, 2, 1991)),
            Record::new("Cid", Date::new(5, 4, 1989)),
            Record::new("Ann", Date::new(5, 9, 1970)),
        ]
        .into_iter()
        .collect();

        let may: Vec<_> = tree.by_month(5).map(Record::name).collect();
        assert_eq!(may, ["Ann", "Bob", "Cid"]);
        assert_eq!(tree.by_month(12).count(), 0);
    }

    #[test]
    fn iteration_is_restartable() {
        let tree = tree_of(&["b", "a", "c"]);

        assert_eq!(names(&tree), names(&tree));
        assert_eq!(tree.iter().len(), 3);

        let mut walked = Vec::new();
        for record in &tree {
            walked.push(record.name());
        }
        assert_eq!(walked, ["a", "b", "c"]);
    }

    #[test]
    fn serialize_ordered_lines() {
        let tree: Tree = [
            Record::new("Bob", Date::new(5, 1, 1990)),
            Record::new("Amy", Date::new(3, 2, 1991)),
        ]
        .into_iter()
        .collect();

        let lines: Vec<_> = tree.serialize_ordered().collect();
        assert_eq!(lines, ["Amy 3 2 1991", "Bob 5 1 1990"]);
    }

    #[test]
    fn clone_keeps_shape() {
        let tree = tree_of(&["m", "f", "t", "c", "p"]);
        let mut copy = tree.clone();

        assert_eq!(root_name(&copy), Some("m"));
        assert_eq!(names(&copy), names(&tree));

        copy.remove("m");
        assert!(tree.contains("m"));
    }

    #[test]
    fn clear_empties() {
        let mut tree = tree_of(&["m", "f", "t"]);
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn skewed_tree_does_not_overflow() {
        let mut tree = Tree::new();
        for i in 0..10_000 {
            tree.insert(record(&format!("{i:05}")));
        }

        assert_eq!(tree.iter().count(), 10_000);
        assert_eq!(tree.remove("00000"), Some(record("00000")));
        assert_eq!(tree.find("09999"), Some(&record("09999")));
        drop(tree);
    }
}

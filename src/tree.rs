//! An unbalanced BST that stores elements directly and keeps every duplicate.
//!
//! Elements are routed by their own ordering: anything less than a node goes into its left
//! subtree and anything greater than *or equal to* it goes into its right subtree. Inserting an
//! element equal to one already stored adds a second node rather than replacing the first.
//!
//! # Examples
//!
//! ```
//! use keytree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//! assert_eq!(tree.height(), -1);
//!
//! tree.insert(1);
//! assert_eq!(tree.find(&1), Some(&1));
//! assert_eq!(tree.height(), 0);
//!
//! // Inserting an equal element keeps both.
//! tree.insert(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Deleting returns the stored element, one copy at a time.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), Some(1));
//! assert_eq!(tree.delete(&1), None);
//! assert!(tree.is_empty());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::InvariantError;
use crate::iter::{IntoIter, Iter};
use crate::node::{self, Link, Node};

/// An ordered collection of elements backed by an unbalanced Binary Search Tree. This can be
/// used for inserting, finding, and deleting elements and for visiting them in ascending order.
///
/// There is no rebalancing, so the height of the tree depends on insertion order. Inserting
/// elements in sorted order produces a tree shaped like a linked list. Every operation walks the
/// tree iteratively so even those trees never exhaust the call stack.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of elements in the tree, counting every duplicate.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Adds `element` to the tree as a new leaf. This never replaces an existing element: an
    /// element equal to one already stored is placed in that node's right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    /// tree.insert(2);
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &2]);
    /// ```
    pub fn insert(&mut self, element: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match element.cmp(&node.element) {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }

        *link = Some(Node::new_boxed(element));
        self.len += 1;
    }

    /// Potentially finds the stored element equal to `key`. If no element matches, `None` is
    /// returned. When several equal elements are stored, this returns the one nearest the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(String::from("apple"));
    ///
    /// assert_eq!(tree.find("apple").map(String::as_str), Some("apple"));
    /// assert_eq!(tree.find("pear"), None);
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            node = match key.cmp(n.element.borrow()) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(&n.element),
                Ordering::Greater => n.right(),
            };
        }

        None
    }

    /// Whether an element equal to `key` is stored in the tree.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Deletes one element equal to `key` from the tree and returns it. If the tree does not
    /// contain a matching element, nothing happens and `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 2, 8, 1, 3, 7, 9].into_iter().collect();
    ///
    /// // 5 has two children so its in-order predecessor, 3, takes its place.
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 7, 8, 9]);
    ///
    /// assert_eq!(tree.delete(&42), None);
    /// assert_eq!(tree.len(), 6);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let deleted = node::unlink(self.locate_mut(key)?)?;
        self.len -= 1;

        if cfg!(debug_assertions) {
            assert_eq!(self.root.is_none(), self.len == 0);
        }
        Some(deleted)
    }

    /// Finds the link holding the first node equal to `key` on the search path. The returned
    /// link is never empty. Nothing is modified.
    fn locate_mut<Q>(&mut self, key: &Q) -> Option<&mut Link<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &mut self.root;
        loop {
            let ordering = key.cmp(link.as_deref()?.element.borrow());
            if ordering == Ordering::Equal {
                return Some(link);
            }

            let node = link.as_deref_mut()?;
            link = match ordering {
                Ordering::Less => &mut node.left,
                Ordering::Equal | Ordering::Greater => &mut node.right,
            };
        }
    }

    /// The number of edges on the longest path from the root down to a leaf. A tree with a
    /// single element has a height of `0` and an empty tree has a height of `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([2, 1, 3]);
    /// assert_eq!(tree.height(), 1);
    ///
    /// // Only the right side grows.
    /// tree.extend([4, 5]);
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut level: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level.into_iter().flat_map(Node::children).collect();
        }

        height
    }

    /// The smallest element in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some(&node.element)
    }

    /// The largest element in the tree.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some(&node.element)
    }

    /// Removes every element from the tree.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Visits every element in ascending order. Equal elements are yielded next to each other in
    /// the order they were inserted, whatever deletions happened in between.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Walks the whole tree checking that an in-order walk never steps down to a smaller
    /// element and that [`len`][Self::len] matches the number of reachable nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use keytree::Tree;
    ///
    /// let mut tree: Tree<_> = [5, 2, 8, 2].into_iter().collect();
    /// tree.delete(&5);
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        T: Ord,
    {
        let mut counted = 0;
        let mut previous: Option<&T> = None;
        for element in self.iter_unbounded() {
            if previous.is_some_and(|p| element < p) {
                return Err(InvariantError::OutOfOrder { position: counted });
            }
            previous = Some(element);
            counted += 1;
        }

        if counted != self.len {
            return Err(InvariantError::LengthMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }

    /// An in-order walk that doesn't trust `len`, so an audit can count the nodes itself.
    fn iter_unbounded(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), usize::MAX)
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        // Detach children before each node is dropped so a deep tree doesn't drop recursively.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    /// Copies the tree node for node, preserving its exact shape.
    fn clone(&self) -> Self {
        enum Step<'a, T> {
            /// Copy this subtree and push the copy onto `built`.
            Visit(Option<&'a Node<T>>),
            /// Both children of this node are on top of `built`, right child topmost.
            Assemble(&'a Node<T>),
        }

        let mut steps = vec![Step::Visit(self.root.as_deref())];
        let mut built: Vec<Link<T>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(None) => built.push(None),
                Step::Visit(Some(node)) => {
                    steps.push(Step::Assemble(node));
                    steps.push(Step::Visit(node.right()));
                    steps.push(Step::Visit(node.left()));
                }
                Step::Assemble(node) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        element: node.element.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        Self {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold equal elements in the same order, whatever their shapes.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let len = self.len;
        self.len = 0;
        IntoIter::new(self.root.take(), len)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

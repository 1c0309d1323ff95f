use std::mem;

/// A slot that either holds a subtree or is empty. The root of a [`Tree`][crate::Tree] and
/// both children of every [`Node`] are `Link`s.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single element and the two subtrees hanging off of it. Every element in `left` compares
/// less than `element` and every element in `right` compares greater than or equal to it.
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new childless `Node` holding `element`.
    pub(crate) fn new_boxed(element: T) -> Box<Self> {
        Box::new(Node {
            element,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The children that are present, left first.
    pub(crate) fn children(&self) -> impl Iterator<Item = &Self> {
        self.left().into_iter().chain(self.right())
    }
}

/// Removes the node held in `link` from the tree and returns the element it stored. Returns
/// `None` only when `link` is empty.
///
/// - A leaf is detached, leaving `link` empty.
/// - A node with one child is replaced by that child.
/// - A node with two children stays where it is. Its in-order predecessor (the largest element
///   of its left subtree) is spliced out with [`unlink_max`] and moved into the node, and the
///   node's old element is returned.
pub(crate) fn unlink<T>(link: &mut Link<T>) -> Option<T> {
    let node = link.as_deref_mut()?;
    if node.left.is_some() && node.right.is_some() {
        let predecessor = unlink_max(&mut node.left)?;
        return Some(mem::replace(&mut node.element, predecessor));
    }

    let node = *link.take()?;
    *link = node.left.or(node.right);
    Some(node.element)
}

/// Removes the largest element of the subtree held in `link`. The node holding it has no right
/// child, so it is either a leaf or has a single left child to promote into its place.
pub(crate) fn unlink_max<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_deref()?.right.is_some() {
        link = &mut link.as_deref_mut()?.right;
    }

    let node = *link.take()?;
    *link = node.left;
    Some(node.element)
}

use keytree::Tree;

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::Op;

/// A sorted `Vec` standing in for the tree. Equal elements are kept in insertion order.
#[derive(Default)]
struct Model<T>(Vec<T>);

impl<T: Ord> Model<T> {
    fn insert(&mut self, x: T) {
        let pos = self.0.partition_point(|y| y <= &x);
        self.0.insert(pos, x);
    }

    fn delete(&mut self, x: &T) -> Option<T> {
        let pos = self.0.iter().position(|y| y == x)?;
        Some(self.0.remove(pos))
    }
}

/// Applies a set of operations to a tree and a sorted model.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same elements, in the same order, in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, model: &mut Model<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                model.insert(x.clone());
            }
            Op::Delete(x) => {
                if tree.delete(x) != model.delete(x) {
                    return false;
                }
            }
            Op::Iter => {
                if !tree.iter().eq(model.0.iter()) {
                    return false;
                }
            }
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Model::default();

    do_ops(&ops, &mut tree, &mut model)
        && tree.check_invariants().is_ok()
        && tree.len() == model.0.len()
        && tree.iter().eq(model.0.iter())
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    tree.into_iter().eq(sorted)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn insert_then_delete(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    tree.insert(x);
    let matches = |tree: &Tree<i8>| tree.iter().filter(|y| **y == x).count();
    let before = matches(&tree);
    let deleted = tree.delete(&x);

    // A separately inserted duplicate is still there.
    deleted == Some(x)
        && matches(&tree) == before - 1
        && tree.contains(&x) == xs.contains(&x)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut still_present = xs;
    for delete in &deletes {
        let expected = still_present
            .iter()
            .position(|x| x == delete)
            .map(|pos| still_present.swap_remove(pos));
        if tree.delete(delete) != expected {
            return false;
        }
    }

    still_present.sort();
    tree.check_invariants().is_ok() && tree.iter().eq(still_present.iter())
}

#[quickcheck]
fn size_conservation(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before = tree.iter().count();
    let deleted = tree.delete(&x).is_some();
    let after = tree.iter().count();

    if deleted {
        after == before - 1
    } else {
        after == before
    }
}

#[quickcheck]
fn missing_delete_is_a_no_op(xs: Vec<i8>, x: i8) -> bool {
    if xs.contains(&x) {
        return true;
    }
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let height = tree.height();
    let before: Vec<_> = tree.iter().copied().collect();

    tree.delete(&x).is_none() && tree.height() == height && tree.iter().eq(before.iter())
}

#[quickcheck]
fn height_grows_monotonically(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let mut height = tree.height();
    if height != -1 {
        return false;
    }

    for x in xs {
        tree.insert(x);
        let new_height = tree.height();
        // A tree of `n` nodes is at least `floor(lg n)` and at most `n - 1` tall.
        let len = tree.len() as isize;
        let lower = (usize::BITS - 1 - tree.len().leading_zeros()) as isize;
        if new_height < height || new_height > len - 1 || new_height < lower {
            return false;
        }
        height = new_height;
    }

    true
}

/// An element that orders by `key` alone, so equal elements can still be told apart.
#[derive(Clone, Debug)]
struct Tagged {
    key: u8,
    tag: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for Tagged {}
impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[quickcheck]
fn duplicates_keep_insertion_order(keys: Vec<u8>) -> bool {
    // Squash keys into a small range so duplicates are common.
    let tree: Tree<_> = keys
        .iter()
        .enumerate()
        .map(|(tag, key)| Tagged { key: key % 8, tag })
        .collect();

    in_insertion_order(&tree)
}

/// Whether equal elements sit next to each other with their tags ascending.
fn in_insertion_order(tree: &Tree<Tagged>) -> bool {
    let elements: Vec<_> = tree.iter().collect();
    elements
        .windows(2)
        .all(|w| w[0].key < w[1].key || (w[0].key == w[1].key && w[0].tag < w[1].tag))
}

#[quickcheck]
fn duplicates_keep_insertion_order_across_deletes(ops: Vec<(bool, u8)>) -> bool {
    let mut tree = Tree::new();
    for (tag, (is_insert, key)) in ops.into_iter().enumerate() {
        let key = key % 4;
        if is_insert {
            tree.insert(Tagged { key, tag });
        } else {
            tree.delete(&Tagged { key, tag: 0 });
        }

        if !in_insertion_order(&tree) || tree.check_invariants().is_err() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn clone_independence(xs: Vec<u8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut cloned = tree.clone();
    if cloned != tree || cloned.height() != tree.height() {
        return false;
    }

    for x in xs.iter().take(xs.len() / 2 + 1) {
        cloned.delete(x);
    }

    let mut sorted = xs;
    sorted.sort();
    tree.iter().eq(sorted.iter())
}

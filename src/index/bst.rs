//! Unbalanced binary search tree used as a key -> locator index
//!
//! Each node owns its children. Mutation is expressed as functions that take
//! a subtree by value and hand back the (possibly new) subtree root, so no
//! node ever holds a reference to its parent.
//!
//! # Invariants
//!
//! - For every node: all keys on the left < node key < all keys on the right
//! - A key appears at most once; inserting an existing key is a no-op
//! - No rebalancing: depth depends only on insertion order

use std::borrow::Borrow;
use std::cmp::Ordering;

/// Position of a record in the backing record sequence
pub type Locator = usize;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug)]
struct Node<K> {
    key: K,
    locator: Locator,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K, locator: Locator) -> Box<Self> {
        Box::new(Self {
            key,
            locator,
            left: None,
            right: None,
        })
    }
}

/// Ordered index over a single key field.
#[derive(Debug)]
pub struct OrderedIndex<K = String> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Ord> OrderedIndex<K> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key -> locator`.
    ///
    /// Returns `false` without touching the existing entry if `key` is
    /// already present. Uniqueness is the caller's concern.
    pub fn insert(&mut self, key: K, locator: Locator) -> bool {
        let mut inserted = false;
        self.root = Some(insert_node(self.root.take(), key, locator, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Exact-match lookup.
    pub fn search<Q>(&self, key: &Q) -> Option<Locator>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.locator),
            };
        }
        None
    }

    /// Returns true if `key` is indexed
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Remove `key`, returning the locator it mapped to.
    ///
    /// Absent keys are a no-op. A node with two children takes over both the
    /// key and the locator of its in-order successor, and the successor is
    /// then removed from the right subtree.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<Locator>
    where
        K: Borrow<Q> + Clone,
        Q: Ord + ?Sized,
    {
        let mut removed = None;
        self.root = delete_node(self.root.take(), key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Point an existing key at a new locator.
    ///
    /// Returns `false` if the key is not indexed.
    pub fn relocate<Q>(&mut self, key: &Q, locator: Locator) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => {
                    node.locator = locator;
                    return true;
                }
            };
        }
        false
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<&K> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    /// In-order `(key, locator)` pairs.
    pub fn entries(&self) -> Vec<(&K, Locator)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K>> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push((&node.key, node.locator));
                    current = node.right.as_deref();
                }
                None => break,
            }
        }

        out
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

fn insert_node<K: Ord>(
    link: Link<K>,
    key: K,
    locator: Locator,
    inserted: &mut bool,
) -> Box<Node<K>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Node::leaf(key, locator);
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            node.left = Some(insert_node(node.left.take(), key, locator, inserted))
        }
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, locator, inserted))
        }
        Ordering::Equal => {}
    }

    node
}

fn delete_node<K, Q>(link: Link<K>, key: &Q, removed: &mut Option<Locator>) -> Link<K>
where
    K: Borrow<Q> + Clone,
    Q: Ord + ?Sized,
{
    let mut node = link?;

    match key.cmp(node.key.borrow()) {
        Ordering::Less => node.left = delete_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = delete_node(node.right.take(), key, removed),
        Ordering::Equal => {
            *removed = Some(node.locator);
            match (node.left.take(), node.right.take()) {
                (None, right) => return right,
                (left, None) => return left,
                (left, Some(right)) => {
                    let successor = min_node(&right);
                    let successor_key = successor.key.clone();
                    let successor_locator = successor.locator;

                    // The successor has no left child, so this hits one of
                    // the single-child cases above.
                    let mut ignored = None;
                    let successor_ref: &Q = successor_key.borrow();
                    node.right = delete_node(Some(right), successor_ref, &mut ignored);
                    node.left = left;
                    node.key = successor_key;
                    node.locator = successor_locator;
                }
            }
        }
    }

    Some(node)
}

fn min_node<K>(node: &Node<K>) -> &Node<K> {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current
}

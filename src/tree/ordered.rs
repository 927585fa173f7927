use crate::tree::traversal::Traversal;
use crate::tree::types::{ShapeError, TraversalOrder};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

type Link<K> = Option<Box<Node<K>>>;

/// A single tree node; owns both of its subtrees
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// Which children a node has, as recorded in a pre-order shape listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeShape {
    pub has_left: bool,
    pub has_right: bool,
}

impl NodeShape {
    const LEFT: u8 = 1 << 0;
    const RIGHT: u8 = 1 << 1;

    pub fn to_bits(self) -> u8 {
        let mut bits = 0;
        if self.has_left {
            bits |= Self::LEFT;
        }
        if self.has_right {
            bits |= Self::RIGHT;
        }
        bits
    }

    /// Decode shape bits, rejecting any bit outside the two child flags
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !(Self::LEFT | Self::RIGHT) != 0 {
            return None;
        }
        Some(Self {
            has_left: bits & Self::LEFT != 0,
            has_right: bits & Self::RIGHT != 0,
        })
    }

    fn children(self) -> usize {
        self.has_left as usize + self.has_right as usize
    }
}

/// Unbalanced binary search tree over unique keys.
///
/// Every walk over the structure is iterative, so a degenerate tree built
/// from sorted input (height == len) is slow but never exhausts the stack.
pub struct OrderedIndex<K> {
    root: Link<K>,
    len: usize,
}

impl<K> OrderedIndex<K> {
    /// Create an empty index
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Key stored at the root, if any
    pub fn root(&self) -> Option<&K> {
        self.root.as_deref().map(|node| &node.key)
    }

    /// Remove every key
    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }

        height
    }

    /// Remove and return the smallest key
    pub fn remove_min(&mut self) -> Option<K> {
        let mut slot = &mut self.root;
        while slot.as_ref().is_some_and(|node| node.left.is_some()) {
            slot = &mut slot.as_mut()?.left;
        }

        let node = slot.take()?;
        let Node { key, right, .. } = *node;
        *slot = right;
        self.len -= 1;
        Some(key)
    }

    /// Remove and return the largest key
    pub fn remove_max(&mut self) -> Option<K> {
        let mut slot = &mut self.root;
        while slot.as_ref().is_some_and(|node| node.right.is_some()) {
            slot = &mut slot.as_mut()?.right;
        }

        let node = slot.take()?;
        let Node { key, left, .. } = *node;
        *slot = left;
        self.len -= 1;
        Some(key)
    }

    /// Ascending-order cursor
    pub fn in_order(&self) -> Traversal<'_, K> {
        self.traverse(TraversalOrder::InOrder)
    }

    pub fn pre_order(&self) -> Traversal<'_, K> {
        self.traverse(TraversalOrder::PreOrder)
    }

    pub fn post_order(&self) -> Traversal<'_, K> {
        self.traverse(TraversalOrder::PostOrder)
    }

    /// Materialize the visiting sequence for `order` and wrap it in a cursor
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, K> {
        let entries = match order {
            TraversalOrder::InOrder => self.collect_in_order(),
            TraversalOrder::PreOrder => self.shape().into_iter().map(|(key, _)| key).collect(),
            TraversalOrder::PostOrder => self.collect_post_order(),
        };
        Traversal::new(entries)
    }

    /// Pre-order listing of every key with the children its node has.
    ///
    /// Feeding this listing back into [`OrderedIndex::from_shape`] rebuilds
    /// a tree of identical structure.
    pub fn shape(&self) -> Vec<(&K, NodeShape)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push((
                &node.key,
                NodeShape {
                    has_left: node.left.is_some(),
                    has_right: node.right.is_some(),
                },
            ));
            // Right pushed first so the left subtree is visited first
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }

        out
    }

    fn collect_in_order(&self) -> Vec<&K> {
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
                    out.push(&node.key);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }

        out
    }

    fn collect_post_order(&self) -> Vec<&K> {
        // Node-right-left pre-order, reversed, is left-right-node
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push(&node.key);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        out.reverse();
        out
    }
}

impl<K: Ord> OrderedIndex<K> {
    /// Insert `key`; returns false and leaves the tree untouched if an
    /// equal key is already present
    pub fn add(&mut self, key: K) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }

        *slot = Some(Box::new(Node::leaf(key)));
        self.len += 1;
        true
    }

    /// Find the stored key equal to `key`
    pub fn search<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.key),
            };
        }
        None
    }

    /// Find the stored key equal to `key` for in-place update.
    ///
    /// Callers must not change the part of the key that determines its
    /// ordering.
    pub fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.key),
            };
        }
        None
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Rebuild a tree from a pre-order shape listing.
    ///
    /// The listing must describe exactly one tree and its keys must be
    /// strictly ascending in order; anything else is rejected.
    pub fn from_shape<I>(entries: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (K, NodeShape)>,
    {
        let entries: Vec<(K, NodeShape)> = entries.into_iter().collect();
        let len = entries.len();

        // Walking the pre-order listing backwards, both subtrees of a node
        // are complete (left on top) by the time the node itself is reached.
        let mut built: Vec<Box<Node<K>>> = Vec::new();
        for (key, shape) in entries.into_iter().rev() {
            if built.len() < shape.children() {
                built.into_iter().for_each(|node| release(Some(node)));
                return Err(ShapeError::MissingChild);
            }
            let left = if shape.has_left { built.pop() } else { None };
            let right = if shape.has_right { built.pop() } else { None };
            built.push(Box::new(Node { key, left, right }));
        }

        let root = built.pop();
        if !built.is_empty() {
            release(root);
            built.into_iter().for_each(|node| release(Some(node)));
            return Err(ShapeError::DetachedSubtree);
        }

        let index = Self { root, len };
        let ascending = index
            .collect_in_order()
            .windows(2)
            .all(|pair| pair[0] < pair[1]);
        if !ascending {
            return Err(ShapeError::OutOfOrder);
        }

        Ok(index)
    }
}

impl<K> Default for OrderedIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for OrderedIndex<K> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K: Ord> FromIterator<K> for OrderedIndex<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<K: Ord> Extend<K> for OrderedIndex<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for OrderedIndex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

/// Drop a subtree without recursing once per level
fn release<K>(root: Link<K>) {
    let mut pending: Vec<Box<Node<K>>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

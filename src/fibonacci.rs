//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list, and so are the children of every node. The
//! heap maintains a key to the minimum root.
//!
//! Nodes are stored in a segmented [`NodeArena`] and handles are generational
//! arena keys, so a handle to a removed element is reported as
//! [`HeapError::InvalidHandle`] instead of touching freed memory. Merging
//! hands the other heap's segments over whole, so handles from both inputs
//! keep working on the merged heap.

use crate::arena::{NodeArena, NodeKey};
use crate::degree::{self, Degree};
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// Handle to an element in a Fibonacci heap
///
/// A handle stays valid until its element is removed by
/// [`extract_min`](FibonacciHeap::extract_min) or [`delete`](FibonacciHeap::delete),
/// or the heap is cleared. After a [`merge`](FibonacciHeap::merge) it is used
/// on the merged heap. Invalid handles, and handles issued by an unrelated
/// heap, are rejected with [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use arena_fibheap::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.insert(5);
/// let handle = heap.insert(8);
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// ```
pub struct FibonacciHeap<K> {
    nodes: NodeArena<K>,
    min: Option<NodeKey>,
}

impl<K: Ord> Default for FibonacciHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FibonacciHeap<K> {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            min: None,
        }
    }

    /// Returns the number of keys in the heap
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the heap holds no keys
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Removes every key. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
    }

    /// Inserts a key and returns a handle to it
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K) -> FibonacciHandle {
        let node = self.nodes.insert(key);
        self.add_root(node);
        self.handle(node)
    }

    /// Returns the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the heap holds no keys
    pub fn find_min(&self) -> Result<&K, HeapError> {
        self.min
            .map(|min| &self.nodes[min].key)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the minimum key
    ///
    /// # Errors
    /// [`HeapError::EmptyHeap`] if the heap holds no keys
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<K, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;
        self.remove_min(min)
    }

    /// Lowers the key behind `handle` to `new_key`
    ///
    /// Setting a key to its current value is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::InvalidArgument`] if `new_key` is greater than the current key
    /// - [`HeapError::InvalidHandle`] if the handle does not name a live key of this heap
    ///
    /// The heap is unchanged on error.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_key > self.nodes[node].key {
            return Err(HeapError::InvalidArgument);
        }
        self.nodes[node].key = new_key;

        if let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if self.nodes[node].key < self.nodes[min].key {
                self.min = Some(node);
            }
        }
        Ok(())
    }

    /// Removes the key behind `handle` and returns it
    ///
    /// The node is forced to the front as if its key were below every other
    /// key, then extracted, so no sentinel "minus infinity" key is needed.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle does not name a live key of this heap
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<K, HeapError> {
        let node = self.resolve(handle)?;
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);
        self.remove_min(node)
    }

    /// Merges `other` into this heap, consuming it
    ///
    /// `other`'s arena segments are taken over as they are and the two root
    /// lists are spliced. Handles issued by either input stay valid on the
    /// merged heap.
    ///
    /// # Time Complexity
    /// O(1) in the number of keys: no node is moved or relinked beyond the
    /// root-list splice
    pub fn merge(&mut self, other: Self) {
        let other_min = other.min;
        self.nodes.append(other.nodes);

        match (self.min, other_min) {
            (_, None) => {}
            (None, Some(_)) => self.min = other_min,
            (Some(min), Some(other_min)) => {
                self.nodes.splice(min, other_min);
                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
        }
    }

    /// Consuming form of [`merge`](Self::merge)
    pub fn union(mut a: Self, b: Self) -> Self {
        a.merge(b);
        a
    }

    /// Finds a node holding `key` by preorder depth-first search
    ///
    /// The walk starts at the minimum root and searches each node's subtree
    /// before moving on to its right sibling. Keys need not be unique; the
    /// first match in that order is returned. This is an O(n) scan for
    /// interactive use. Keep the handle from [`insert`](Self::insert) when
    /// the element must be found again.
    pub fn find_node(&self, key: &K) -> Option<FibonacciHandle> {
        let min = self.min?;
        // (node to visit, first member of its ring)
        let mut stack = vec![(min, min)];
        while let Some((node, start)) = stack.pop() {
            if &self.nodes[node].key == key {
                return Some(self.handle(node));
            }
            let right = self.nodes[node].right;
            if right != start {
                stack.push((right, start));
            }
            if let Some(child) = self.nodes[node].child {
                stack.push((child, child));
            }
        }
        None
    }

    /// Returns true if `handle` names a live key of this heap
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the current key behind `handle`
    pub fn get(&self, handle: &FibonacciHandle) -> Option<&K> {
        let node = self.resolve(handle).ok()?;
        Some(&self.nodes[node].key)
    }

    /// Lists the root list as `(key, degree)` pairs, starting at the minimum
    pub fn root_degrees(&self) -> Vec<(&K, Degree)> {
        match self.min {
            None => Vec::new(),
            Some(min) => self
                .nodes
                .ring(min)
                .map(|root| {
                    let node = &self.nodes[root];
                    (&node.key, node.degree)
                })
                .collect(),
        }
    }

    /// Drains the heap into a vector in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(key) = self.extract_min() {
            sorted.push(key);
        }
        sorted
    }

    /// Checks every structural invariant of the heap
    ///
    /// - rings are symmetric and only contain live nodes
    /// - every child names its parent and every `degree` matches its child ring
    /// - keys are heap ordered and `min` holds the smallest root
    /// - roots are unmarked
    /// - every node is reachable exactly once
    /// - a node of degree `d` roots at least `Fib(d + 2)` nodes
    ///
    /// Intended for tests and debugging; O(n).
    pub fn verify_internal_structure(&self) -> bool {
        let Some(min) = self.min else {
            return self.nodes.is_empty();
        };
        let Some(min_node) = self.nodes.get(min) else {
            return false;
        };

        // Preorder: every node appears after its parent.
        let mut order = Vec::with_capacity(self.len());
        let mut rings: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];
        while let Some((start, parent)) = rings.pop() {
            let Some(members) = self.nodes.checked_ring(start) else {
                return false;
            };
            if let Some(parent) = parent {
                if members.len() != self.nodes[parent].degree as usize {
                    return false;
                }
            }
            for member in members {
                let node = &self.nodes[member];
                if node.parent != parent || node.child.is_none() != (node.degree == 0) {
                    return false;
                }
                let ordered = match parent {
                    None => !node.marked && node.key >= min_node.key,
                    Some(parent) => node.key >= self.nodes[parent].key,
                };
                if !ordered {
                    return false;
                }
                if let Some(child) = node.child {
                    rings.push((child, Some(member)));
                }
                order.push(member);
                if order.len() > self.len() {
                    return false;
                }
            }
        }
        if order.len() != self.len() {
            return false;
        }

        let mut sizes: FxHashMap<NodeKey, usize> = FxHashMap::default();
        for &member in order.iter().rev() {
            let node = &self.nodes[member];
            let below: usize = node.child.map_or(0, |child| {
                self.nodes
                    .ring(child)
                    .map(|c| sizes.get(&c).copied().unwrap_or(0))
                    .sum()
            });
            let size = below + 1;
            if size < degree::min_subtree_size(node.degree) {
                return false;
            }
            sizes.insert(member, size);
        }
        true
    }

    fn handle(&self, node: NodeKey) -> FibonacciHandle {
        FibonacciHandle { node }
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if self.nodes.contains(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Adds a detached singleton node to the root list
    fn add_root(&mut self, node: NodeKey) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                self.nodes.insert_after(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Removes `min` (which `self.min` currently points at) and returns its key
    fn remove_min(&mut self, min: NodeKey) -> Result<K, HeapError> {
        // Promote children to the root list
        if let Some(child) = self.nodes[min].child.take() {
            let children: SmallVec<[NodeKey; 8]> = self.nodes.ring(child).collect();
            for c in children {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
            }
            self.nodes.splice(min, child);
            self.nodes[min].degree = 0;
        }

        let next = self.nodes.unlink(min);
        let removed = self.nodes.remove(min).ok_or(HeapError::InvalidHandle)?;

        match next {
            None => self.min = None,
            Some(next) => {
                self.min = Some(next);
                self.consolidate();
            }
        }
        Ok(removed.key)
    }

    /// Links roots of equal degree until every degree occurs at most once,
    /// then rebuilds the root list and finds the new minimum
    fn consolidate(&mut self) {
        self.consolidate_with(degree::table_capacity(self.len()));
    }

    /// [`consolidate`](Self::consolidate) starting from a degree table of
    /// `initial_slots` entries; the table grows whenever a root outgrows it
    fn consolidate_with(&mut self, initial_slots: usize) {
        let Some(start) = self.min else {
            return;
        };
        // The walk links roots away, so snapshot the list first
        let roots: Vec<NodeKey> = self.nodes.ring(start).collect();
        let mut table: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; initial_slots];

        for root in roots {
            let mut x = root;
            let mut d = self.nodes[x].degree as usize;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else {
                    break;
                };
                // On equal keys the root already in the table stays on top
                if self.nodes[y].key <= self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d = self.nodes[x].degree as usize;
            }
            table[d] = Some(x);
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            self.nodes.make_singleton(root);
            self.add_root(root);
        }
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.nodes.unlink(child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }
        match self.nodes[parent].child {
            None => self.nodes[parent].child = Some(child),
            Some(sibling) => self.nodes.insert_after(sibling, child),
        }
        let node = &mut self.nodes[parent];
        node.degree = degree::checked_increment(node.degree);
    }

    /// Moves `node` from `parent`'s child ring to the root list
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let next = self.nodes.unlink(node);
        {
            let p = &mut self.nodes[parent];
            if p.child == Some(node) {
                p.child = next;
            }
            p.degree = degree::saturating_decrement(p.degree);
        }
        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        self.add_root(node);
    }

    /// Walks up from `node`: marks the first unmarked non-root ancestor and
    /// cuts every marked one on the way
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}

impl<K: Ord> Heap<K> for FibonacciHeap<K> {
    fn new() -> Self {
        Self::with_capacity(0)
    }

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.find_min().ok()
    }

    fn pop(&mut self) -> Option<K> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}

impl<K: Ord> DecreaseKeyHeap<K> for FibonacciHeap<K> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, key: K) -> FibonacciHandle {
        self.insert(key)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_key)
    }

    fn delete(&mut self, handle: &FibonacciHandle) -> Result<K, HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

impl<K: Ord> FromIterator<K> for FibonacciHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord> Extend<K> for FibonacciHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len())
            .field("min", &self.find_min().ok())
            .finish()
    }
}

/// Renders the root list as ` key:degree` entries starting at the minimum
impl<K: Ord + fmt::Display> fmt::Display for FibonacciHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "empty");
        }
        for (key, degree) in self.root_degrees() {
            write!(f, " {}:{}", key, degree)?;
        }
        Ok(())
    }
}

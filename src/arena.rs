//! Arena storage for Fibonacci heap nodes
//!
//! Nodes live in [`SlotMap`] segments and refer to each other by [`NodeKey`]
//! instead of pointers. A key names its segment and its slot. Slot keys are
//! generational: once a node is removed its key never resolves again, even
//! after the slot is reused, so stale handles are detected rather than
//! aliasing a newer node.
//!
//! # Segments
//!
//! Every arena owns one home segment that receives new nodes. Appending
//! another arena hands over its segments whole, so no node is moved and no
//! key changes. Segment ids are process-unique, which also makes keys from
//! an unrelated arena fail to resolve. A foreign segment is dropped as soon
//! as its last node is removed.
//!
//! # Rings
//!
//! Siblings (the root list, or the children of one node) form a circular
//! doubly-linked ring through `left`/`right`:
//!
//! - A single node points to itself in both directions
//! - There is no head or tail; any member can be the entry point
//! - Splicing two rings together is O(1)
//! - Iteration wraps around and stops on returning to the entry point
//!
//! The ring operations here only touch `left`/`right`. Keeping `parent`,
//! `child`, `degree` and `marked` consistent is the heap's job.

use crate::degree::Degree;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    /// Slot of a node within its segment
    pub struct SlotKey;
}

/// Process-unique identity of one segment
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SegmentId(u64);

impl SegmentId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        SegmentId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Arena key of a heap node
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeKey {
    segment: SegmentId,
    slot: SlotKey,
}

type Segment<K> = SlotMap<SlotKey, Node<K>>;

/// One tree node of a Fibonacci heap
#[derive(Debug, Clone)]
pub struct Node<K> {
    pub key: K,
    /// Number of nodes in this node's child ring
    pub degree: Degree,
    /// Lost a child since it last became a child itself
    pub marked: bool,
    pub parent: Option<NodeKey>,
    /// Any one member of the child ring; `None` iff `degree == 0`
    pub child: Option<NodeKey>,
    pub left: NodeKey,
    pub right: NodeKey,
}

/// Segmented slot arena owning every node of one heap
#[derive(Debug, Clone)]
pub struct NodeArena<K> {
    home_id: SegmentId,
    home: Segment<K>,
    /// Segments taken over by [`append`](Self::append), all non-empty
    foreign: FxHashMap<SegmentId, Segment<K>>,
    len: usize,
}

impl<K> Default for NodeArena<K> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K> NodeArena<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            home_id: SegmentId::next(),
            home: SlotMap::with_capacity_and_key(capacity),
            foreign: FxHashMap::default(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments currently holding nodes or receiving inserts
    pub fn segment_count(&self) -> usize {
        1 + self.foreign.len()
    }

    #[inline]
    fn segment(&self, id: SegmentId) -> Option<&Segment<K>> {
        if id == self.home_id {
            Some(&self.home)
        } else {
            self.foreign.get(&id)
        }
    }

    #[inline]
    fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment<K>> {
        if id == self.home_id {
            Some(&mut self.home)
        } else {
            self.foreign.get_mut(&id)
        }
    }

    #[inline]
    pub fn contains(&self, node: NodeKey) -> bool {
        self.get(node).is_some()
    }

    #[inline]
    pub fn get(&self, node: NodeKey) -> Option<&Node<K>> {
        self.segment(node.segment)?.get(node.slot)
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeKey) -> Option<&mut Node<K>> {
        self.segment_mut(node.segment)?.get_mut(node.slot)
    }

    /// Allocates a detached node forming a singleton ring.
    pub fn insert(&mut self, key: K) -> NodeKey {
        let segment = self.home_id;
        let slot = self.home.insert_with_key(|slot| {
            let me = NodeKey { segment, slot };
            Node {
                key,
                degree: 0,
                marked: false,
                parent: None,
                child: None,
                left: me,
                right: me,
            }
        });
        self.len += 1;
        NodeKey { segment, slot }
    }

    /// Frees a node. The caller must have unlinked it from every ring first.
    pub fn remove(&mut self, node: NodeKey) -> Option<Node<K>> {
        let removed = if node.segment == self.home_id {
            self.home.remove(node.slot)?
        } else {
            let segment = self.foreign.get_mut(&node.segment)?;
            let removed = segment.remove(node.slot)?;
            if segment.is_empty() {
                self.foreign.remove(&node.segment);
            }
            removed
        };
        self.len -= 1;
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.home.clear();
        self.foreign.clear();
        self.len = 0;
    }

    /// Takes over every segment of `other`.
    ///
    /// Keys issued by either arena stay valid. Only segment directory
    /// entries change hands: the smaller directory is folded into the larger
    /// one, and no node is touched.
    pub fn append(&mut self, other: NodeArena<K>) {
        let NodeArena {
            home_id,
            home,
            mut foreign,
            len,
        } = other;
        if foreign.len() > self.foreign.len() {
            std::mem::swap(&mut self.foreign, &mut foreign);
        }
        self.foreign.extend(foreign);
        if !home.is_empty() {
            self.foreign.insert(home_id, home);
        }
        self.len += len;
    }

    /// Resets a node's ring links to point at itself without touching its
    /// former neighbours.
    #[inline]
    pub fn make_singleton(&mut self, node: NodeKey) {
        let n = &mut self[node];
        n.left = node;
        n.right = node;
    }

    /// Inserts the singleton `node` into `anchor`'s ring, directly right of `anchor`.
    pub fn insert_after(&mut self, anchor: NodeKey, node: NodeKey) {
        let anchor_right = self[anchor].right;
        {
            let n = &mut self[node];
            n.left = anchor;
            n.right = anchor_right;
        }
        self[anchor_right].left = node;
        self[anchor].right = node;
    }

    /// Joins the ring containing `b` into the ring containing `a`.
    ///
    /// The rings must be distinct. Afterwards `b`'s former ring follows `a`.
    pub fn splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_right = self[a].right;
        let b_left = self[b].left;

        self[a].right = b;
        self[b].left = a;
        self[b_left].right = a_right;
        self[a_right].left = b_left;
    }

    /// Removes `node` from its ring, leaving it as a singleton.
    ///
    /// Returns the former right neighbour, or `None` if the node was alone.
    pub fn unlink(&mut self, node: NodeKey) -> Option<NodeKey> {
        let (left, right) = {
            let n = &self[node];
            (n.left, n.right)
        };
        if right == node {
            return None;
        }
        self[left].right = right;
        self[right].left = left;
        self.make_singleton(node);
        Some(right)
    }

    /// Iterates a ring starting at `start`, following `right` links.
    pub fn ring(&self, start: NodeKey) -> RingIter<'_, K> {
        RingIter {
            arena: self,
            start,
            next: Some(start),
        }
    }

    /// Collects a ring while validating it: every member must be live and
    /// `right.left` must lead back to the member.
    ///
    /// Returns `None` on a broken link or if the walk exceeds the arena size.
    pub fn checked_ring(&self, start: NodeKey) -> Option<Vec<NodeKey>> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let node = self.get(current)?;
            if self.get(node.right)?.left != current {
                return None;
            }
            members.push(current);
            if members.len() > self.len {
                return None;
            }
            current = node.right;
            if current == start {
                return Some(members);
            }
        }
    }
}

impl<K> Index<NodeKey> for NodeArena<K> {
    type Output = Node<K>;

    #[inline]
    fn index(&self, node: NodeKey) -> &Node<K> {
        match self.get(node) {
            Some(n) => n,
            None => panic!("invalid node key {:?}", node),
        }
    }
}

impl<K> IndexMut<NodeKey> for NodeArena<K> {
    #[inline]
    fn index_mut(&mut self, node: NodeKey) -> &mut Node<K> {
        match self.get_mut(node) {
            Some(n) => n,
            None => panic!("invalid node key {:?}", node),
        }
    }
}

/// Iterator over the members of one ring
pub struct RingIter<'a, K> {
    arena: &'a NodeArena<K>,
    start: NodeKey,
    next: Option<NodeKey>,
}

impl<K> Iterator for RingIter<'_, K> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        let current = self.next?;
        let right = self.arena[current].right;
        self.next = (right != self.start).then_some(right);
        Some(current)
    }
}

use crate::bounding_volume::Aabb;
use crate::utils::{ScratchStack, ScratchWorkspace, WeightedValue};
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;

/// Errors raised by the dynamic tree.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DbvtError {
    /// The node pool is exhausted. The tree was left unchanged.
    #[error("the dynamic tree is full: it cannot hold more than {capacity} proxies.")]
    OutOfMemory {
        /// The maximum number of proxies of the tree.
        capacity: usize,
    },
}

/// The handle of a leaf of a [`Dbvt`].
///
/// It remains valid until the leaf is removed, regardless of the changes made to the rest
/// of the tree.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DbvtHandle(pub(super) u32);

impl DbvtHandle {
    /// The index of the node referenced by this handle.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(super) enum NodeKind {
    Leaf { external_id: u32 },
    Internal { left: u32, right: u32 },
    // Unused slot, linked to the next unused one.
    Free { next: Option<u32> },
}

#[derive(Copy, Clone, Debug)]
pub(super) struct DbvtNode {
    pub aabb: Aabb,
    pub parent: Option<u32>,
    pub kind: NodeKind,
}

impl DbvtNode {
    #[inline]
    pub fn children(&self) -> Option<(u32, u32)> {
        match self.kind {
            NodeKind::Internal { left, right } => Some((left, right)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }
}

/// Scratch memory used by the dynamic tree operations.
///
/// It can be shared by any number of trees, and is emptied by each operation using it.
#[derive(Clone, Debug, Default)]
pub struct DbvtWorkspace {
    pub(super) queue: BinaryHeap<WeightedValue<u32>>,
    pub(super) pairs: ScratchStack<(u32, u32)>,
    pub(super) nodes: ScratchStack<u32>,
}

impl DbvtWorkspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace that never reallocates while traversing a tree holding up to
    /// `max_proxies` leaves.
    pub fn with_capacity(max_proxies: usize) -> Self {
        Self {
            queue: BinaryHeap::new(),
            pairs: ScratchStack::with_capacity(Dbvt::max_pair_stack_len(max_proxies)),
            nodes: ScratchStack::with_capacity(Dbvt::max_node_stack_len(max_proxies)),
        }
    }
}

impl ScratchWorkspace for DbvtWorkspace {
    fn restore(&mut self) {
        self.queue.clear();
        self.pairs.restore();
        self.nodes.restore();
    }
}

/// A dynamic bounding volume tree.
///
/// Each leaf holds the AABB of a proxy, identified by an external 32-bit identifier. Internal
/// nodes always have exactly two children and their AABB is the union of their children's.
/// Leaves are inserted at the position minimizing the surface area heuristic, and local tree
/// rotations keep the tree balanced as leaves are inserted, removed or moved.
///
/// All the nodes are stored in a pool allocated once for the maximum number of proxies
/// given at creation. Unused nodes form a free list.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use kollide3d::bounding_volume::Aabb;
/// use kollide3d::partitioning::{Dbvt, DbvtWorkspace};
/// use kollide3d::na::{Point3, Vector3};
///
/// let mut tree = Dbvt::with_capacity(16);
/// let mut workspace = DbvtWorkspace::new();
///
/// let a = Aabb::new(Point3::origin(), Vector3::repeat(1.0));
/// let b = Aabb::new(Point3::new(1.5, 0.0, 0.0), Vector3::repeat(1.0));
/// let c = Aabb::new(Point3::new(10.0, 0.0, 0.0), Vector3::repeat(1.0));
///
/// tree.insert(0, a, &mut workspace).unwrap();
/// tree.insert(1, b, &mut workspace).unwrap();
/// tree.insert(2, c, &mut workspace).unwrap();
///
/// let mut pairs = Vec::new();
/// tree.query_overlap_pairs(&mut workspace, &mut pairs);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].as_tuple(), (0, 1));
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Dbvt {
    pub(super) nodes: Vec<DbvtNode>,
    pub(super) root: Option<u32>,
    pub(super) free_head: Option<u32>,
    pub(super) free_count: usize,
    pub(super) proxy_count: usize,
    pub(super) capacity: usize,
}

impl Dbvt {
    /// Creates an empty tree able to hold up to `max_proxies` leaves.
    pub fn with_capacity(max_proxies: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(Self::max_node_count(max_proxies)),
            root: None,
            free_head: None,
            free_count: 0,
            proxy_count: 0,
            capacity: max_proxies,
        }
    }

    fn max_node_count(max_proxies: usize) -> usize {
        (2 * max_proxies).saturating_sub(1)
    }

    // A depth-first traversal holds at most two pending pairs per level, and the pair
    // descent goes down by one level of either subtree at each step. The tree height is
    // smaller than the number of leaves.
    pub(super) fn max_pair_stack_len(max_proxies: usize) -> usize {
        4 * max_proxies + 1
    }

    pub(super) fn max_node_stack_len(max_proxies: usize) -> usize {
        max_proxies + 1
    }

    /// The maximum number of leaves this tree can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of leaves of this tree.
    #[inline]
    pub fn proxy_count(&self) -> usize {
        self.proxy_count
    }

    /// The number of nodes (leaves and internal nodes) of this tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_count
    }

    /// Does this tree have no leaf?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The AABB of the root node: it encloses every leaf of the tree.
    pub fn root_aabb(&self) -> Option<Aabb> {
        self.root.map(|root| self.nodes[root as usize].aabb)
    }

    /// The AABB of the given leaf.
    #[inline]
    pub fn aabb(&self, handle: DbvtHandle) -> Aabb {
        self.assert_leaf(handle);
        self.nodes[handle.0 as usize].aabb
    }

    /// The external identifier of the given leaf.
    #[inline]
    pub fn external_id(&self, handle: DbvtHandle) -> u32 {
        match self.nodes[handle.0 as usize].kind {
            NodeKind::Leaf { external_id } => external_id,
            _ => panic!("The handle {:?} does not reference a leaf.", handle),
        }
    }

    /// Iterates through every leaf of this tree, in unspecified order.
    pub fn leaves(&self) -> impl Iterator<Item = (DbvtHandle, u32, &Aabb)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| match node.kind {
                NodeKind::Leaf { external_id } => {
                    Some((DbvtHandle(i as u32), external_id, &node.aabb))
                }
                _ => None,
            })
    }

    /// Removes every leaf from this tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.free_head = None;
        self.free_count = 0;
        self.proxy_count = 0;
    }

    #[inline]
    pub(super) fn assert_leaf(&self, handle: DbvtHandle) {
        debug_assert!(
            self.nodes
                .get(handle.0 as usize)
                .map(|node| node.is_leaf())
                .unwrap_or(false),
            "The handle {:?} does not reference a leaf.",
            handle
        );
    }

    /// Can `count` more nodes be allocated?
    #[inline]
    pub(super) fn has_room_for(&self, count: usize) -> bool {
        self.node_count() + count <= Self::max_node_count(self.capacity)
    }

    pub(super) fn allocate(&mut self, node: DbvtNode) -> u32 {
        match self.free_head {
            Some(id) => {
                if let NodeKind::Free { next } = self.nodes[id as usize].kind {
                    self.free_head = next;
                }
                self.free_count -= 1;
                self.nodes[id as usize] = node;
                id
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as u32
            }
        }
    }

    pub(super) fn release(&mut self, id: u32) {
        let node = &mut self.nodes[id as usize];
        node.kind = NodeKind::Free {
            next: self.free_head,
        };
        node.parent = None;
        self.free_head = Some(id);
        self.free_count += 1;
    }

    /// Replaces the child `old` of `parent` by `new`.
    pub(super) fn replace_child(&mut self, parent: u32, old: u32, new: u32) {
        if let NodeKind::Internal { left, right } = &mut self.nodes[parent as usize].kind {
            if *left == old {
                *left = new;
            } else {
                debug_assert_eq!(*right, old, "Invalid DBVT child replacement.");
                *right = new;
            }
        }
    }

    /// Recomputes the AABB of an internal node from its children.
    pub(super) fn refit_node(&mut self, id: u32) {
        if let Some((left, right)) = self.nodes[id as usize].children() {
            let aabb = self.nodes[left as usize]
                .aabb
                .merged(&self.nodes[right as usize].aabb);
            self.nodes[id as usize].aabb = aabb;
        }
    }

    /// Rotates and refits every node from `start` to the root.
    pub(super) fn rebalance_from(&mut self, start: Option<u32>) {
        let mut curr = start;

        while let Some(id) = curr {
            self.rotate(id);
            self.refit_node(id);
            curr = self.nodes[id as usize].parent;
        }
    }
}

use super::dbvt_tree::{Dbvt, DbvtHandle, DbvtWorkspace, NodeKind};
use crate::bounding_volume::Aabb;
use crate::utils::{ScratchGuard, SortedPair};
use alloc::vec::Vec;

impl Dbvt {
    /// Calls `f` with the external identifiers of every pair of leaves with overlapping AABBs.
    ///
    /// Each pair is reported once. The tree is descended simultaneously from both children of
    /// the root, using an explicit stack: when two overlapping subtrees are not both leaves,
    /// the one with the largest volume is split first.
    pub fn traverse_overlap_pairs(
        &self,
        workspace: &mut DbvtWorkspace,
        mut f: impl FnMut(u32, u32),
    ) {
        let Some(root) = self.root else {
            return;
        };

        let max_len = Self::max_pair_stack_len(self.capacity);
        let mut workspace = ScratchGuard::new(workspace);
        workspace.pairs.reserve(max_len);
        let mut stack = workspace.pairs.scope();
        stack.push((root, root));

        while let Some((a, b)) = stack.pop() {
            debug_assert!(stack.len() < max_len, "DBVT pair stack overflow.");
            let node_a = &self.nodes[a as usize];

            if a == b {
                // Pairs inside of the same subtree.
                if let Some((left, right)) = node_a.children() {
                    stack.push((left, right));
                    stack.push((left, left));
                    stack.push((right, right));
                }
                continue;
            }

            let node_b = &self.nodes[b as usize];

            if !node_a.aabb.intersects(&node_b.aabb) {
                continue;
            }

            match (node_a.kind, node_b.kind) {
                (NodeKind::Leaf { external_id: id_a }, NodeKind::Leaf { external_id: id_b }) => {
                    f(id_a, id_b)
                }
                (NodeKind::Internal { left, right }, NodeKind::Leaf { .. }) => {
                    stack.push((left, b));
                    stack.push((right, b));
                }
                (NodeKind::Leaf { .. }, NodeKind::Internal { left, right }) => {
                    stack.push((a, left));
                    stack.push((a, right));
                }
                (
                    NodeKind::Internal {
                        left: left_a,
                        right: right_a,
                    },
                    NodeKind::Internal {
                        left: left_b,
                        right: right_b,
                    },
                ) => {
                    if node_a.aabb.volume() >= node_b.aabb.volume() {
                        stack.push((left_a, b));
                        stack.push((right_a, b));
                    } else {
                        stack.push((a, left_b));
                        stack.push((a, right_b));
                    }
                }
                _ => debug_assert!(false, "Free node reachable from the DBVT root."),
            }
        }
    }

    /// Collects the pairs of leaves with overlapping AABBs into `out`.
    ///
    /// `out` is cleared first. Pairs are given by the external identifiers of the leaves.
    pub fn query_overlap_pairs(
        &self,
        workspace: &mut DbvtWorkspace,
        out: &mut Vec<SortedPair<u32>>,
    ) {
        out.clear();
        self.traverse_overlap_pairs(workspace, |a, b| out.push(SortedPair::new(a, b)));
    }

    /// Calls `f` on every leaf with an AABB intersecting `aabb`.
    pub fn intersect_aabb(
        &self,
        aabb: &Aabb,
        workspace: &mut DbvtWorkspace,
        mut f: impl FnMut(DbvtHandle, u32),
    ) {
        let Some(root) = self.root else {
            return;
        };

        let max_len = Self::max_node_stack_len(self.capacity);
        let mut workspace = ScratchGuard::new(workspace);
        workspace.nodes.reserve(max_len);
        let mut stack = workspace.nodes.scope();
        stack.push(root);

        while let Some(id) = stack.pop() {
            debug_assert!(stack.len() < max_len, "DBVT node stack overflow.");
            let node = &self.nodes[id as usize];

            if !node.aabb.intersects(aabb) {
                continue;
            }

            match node.kind {
                NodeKind::Leaf { external_id } => f(DbvtHandle(id), external_id),
                NodeKind::Internal { left, right } => {
                    stack.push(left);
                    stack.push(right);
                }
                NodeKind::Free { .. } => debug_assert!(false, "Free node reachable from the DBVT root."),
            }
        }
    }
}

use super::dbvt_tree::{Dbvt, DbvtError, DbvtHandle, DbvtNode, DbvtWorkspace, NodeKind};
use crate::bounding_volume::Aabb;
use crate::utils::{ScratchGuard, WeightedValue};

impl Dbvt {
    /// Inserts a new leaf with the given AABB into this tree.
    ///
    /// Fails without modifying the tree if it already holds [`Dbvt::capacity`] leaves.
    pub fn insert(
        &mut self,
        external_id: u32,
        aabb: Aabb,
        workspace: &mut DbvtWorkspace,
    ) -> Result<DbvtHandle, DbvtError> {
        // The first leaf becomes the root. Any other leaf comes with a new internal node.
        let required = if self.root.is_some() { 2 } else { 1 };

        if !self.has_room_for(required) {
            log::debug!(
                "Cannot insert the proxy {} into a full dynamic tree ({} proxies).",
                external_id,
                self.capacity
            );
            return Err(DbvtError::OutOfMemory {
                capacity: self.capacity,
            });
        }

        let leaf = self.allocate(DbvtNode {
            aabb,
            parent: None,
            kind: NodeKind::Leaf { external_id },
        });
        self.proxy_count += 1;

        let Some(root) = self.root else {
            self.root = Some(leaf);
            return Ok(DbvtHandle(leaf));
        };

        let sibling = self.find_best_sibling(root, &aabb, workspace);
        let old_parent = self.nodes[sibling as usize].parent;
        let new_parent = self.allocate(DbvtNode {
            aabb: self.nodes[sibling as usize].aabb.merged(&aabb),
            parent: old_parent,
            kind: NodeKind::Internal {
                left: sibling,
                right: leaf,
            },
        });

        self.nodes[sibling as usize].parent = Some(new_parent);
        self.nodes[leaf as usize].parent = Some(new_parent);

        match old_parent {
            Some(old_parent) => self.replace_child(old_parent, sibling, new_parent),
            None => self.root = Some(new_parent),
        }

        self.rebalance_from(old_parent);

        Ok(DbvtHandle(leaf))
    }

    /// Branch-and-bound search of the sibling minimizing the surface area heuristic.
    ///
    /// The cost of a candidate is the surface area of its union with the new leaf, plus the
    /// increase of the surface area of all its ancestors (the inherited cost). Candidates are
    /// explored by increasing inherited cost, and a subtree is skipped if even a perfect fit of
    /// the new leaf in it cannot beat the best cost found so far.
    fn find_best_sibling(&self, root: u32, aabb: &Aabb, workspace: &mut DbvtWorkspace) -> u32 {
        let mut workspace = ScratchGuard::new(workspace);
        let leaf_area = aabb.surface_area();
        let mut best = root;
        let mut best_cost = self.nodes[root as usize].aabb.merged_surface_area(aabb);

        // The queue pops the largest cost: costs are negated.
        workspace.queue.push(WeightedValue::new(root, 0.0));

        while let Some(entry) = workspace.queue.pop() {
            let id = entry.value;
            let inherited_cost = -entry.cost;
            let node = &self.nodes[id as usize];
            let merged_area = node.aabb.merged_surface_area(aabb);
            let cost = merged_area + inherited_cost;

            if cost < best_cost {
                best_cost = cost;
                best = id;
            }

            if let Some((left, right)) = node.children() {
                let child_inherited_cost = inherited_cost + merged_area - node.aabb.surface_area();

                if leaf_area + child_inherited_cost < best_cost {
                    workspace
                        .queue
                        .push(WeightedValue::new(left, -child_inherited_cost));
                    workspace
                        .queue
                        .push(WeightedValue::new(right, -child_inherited_cost));
                }
            }
        }

        best
    }
}

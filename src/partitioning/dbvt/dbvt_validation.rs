use super::dbvt_tree::NodeKind;
use crate::partitioning::Dbvt;
use alloc::vec::Vec;

impl Dbvt {
    /// The number of levels of this tree: zero if it is empty, one if it only has one leaf.
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 0;
        let mut stack = Vec::new();
        stack.push((root, 1));

        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);

            if let Some((left, right)) = self.nodes[id as usize].children() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }

        height
    }

    /// Panics if the tree isn't well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (parent and child indices are
    /// consistent, every used node is reachable from the root, the free list holds exactly
    /// the unused nodes) and geometrically correct (the AABB of an internal node is the union
    /// of its children's).
    pub fn assert_well_formed(&self) {
        match self.root {
            None => {
                assert_eq!(self.proxy_count, 0);
                assert_eq!(self.node_count(), 0);
            }
            Some(root) => {
                assert!(
                    self.nodes[root as usize].parent.is_none(),
                    "The DBVT root must not have a parent."
                );
                assert_eq!(self.node_count(), 2 * self.proxy_count - 1);

                let mut reached = 0;
                let leaf_count = self.assert_well_formed_recurse(root, &mut reached);
                assert_eq!(leaf_count, self.proxy_count);
                assert_eq!(reached, self.node_count());
            }
        }

        assert!(self.proxy_count <= self.capacity);

        let mut free_count = 0;
        let mut curr = self.free_head;

        while let Some(id) = curr {
            free_count += 1;
            assert!(free_count <= self.nodes.len(), "Loop in the DBVT free list.");

            match self.nodes[id as usize].kind {
                NodeKind::Free { next } => curr = next,
                _ => panic!("Used node {} found in the DBVT free list.", id),
            }
        }

        assert_eq!(free_count, self.free_count);
    }

    fn assert_well_formed_recurse(&self, id: u32, reached: &mut usize) -> usize {
        *reached += 1;
        let node = &self.nodes[id as usize];

        match node.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { left, right } => {
                assert_eq!(self.nodes[left as usize].parent, Some(id));
                assert_eq!(self.nodes[right as usize].parent, Some(id));

                let union = self.nodes[left as usize]
                    .aabb
                    .merged(&self.nodes[right as usize].aabb);
                assert_relative_eq!(node.aabb.mins(), union.mins(), max_relative = 1.0e-5);
                assert_relative_eq!(node.aabb.maxs(), union.maxs(), max_relative = 1.0e-5);

                self.assert_well_formed_recurse(left, reached)
                    + self.assert_well_formed_recurse(right, reached)
            }
            NodeKind::Free { .. } => panic!("Free node {} reachable from the DBVT root.", id),
        }
    }
}

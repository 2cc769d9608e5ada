use super::dbvt_tree::{Dbvt, DbvtHandle, NodeKind};
use crate::bounding_volume::Aabb;

impl Dbvt {
    /// Removes a leaf from this tree, returning its external identifier.
    ///
    /// The sibling of the removed leaf takes the place of their common parent. Removing the
    /// last leaf releases every node: the tree is then back to its freshly created state.
    pub fn remove(&mut self, handle: DbvtHandle) -> u32 {
        self.assert_leaf(handle);
        let leaf = handle.0;
        let external_id = self.external_id(handle);

        match self.nodes[leaf as usize].parent {
            None => {
                self.root = None;
                self.release(leaf);
            }
            Some(parent) => {
                let sibling = match self.nodes[parent as usize].kind {
                    NodeKind::Internal { left, right } if left == leaf => right,
                    NodeKind::Internal { left, .. } => left,
                    _ => unreachable!("The parent of a DBVT node must be an internal node."),
                };
                let grandparent = self.nodes[parent as usize].parent;

                self.nodes[sibling as usize].parent = grandparent;

                match grandparent {
                    Some(grandparent) => self.replace_child(grandparent, parent, sibling),
                    None => self.root = Some(sibling),
                }

                self.release(leaf);
                self.release(parent);
                self.rebalance_from(grandparent);
            }
        }

        self.proxy_count -= 1;

        if self.proxy_count == 0 {
            self.clear();
        }

        external_id
    }

    /// Changes the AABB of a leaf, refitting and rebalancing all its ancestors.
    ///
    /// The leaf keeps its position in the tree, so large displacements degrade the tree
    /// quality. Removing and re-inserting the leaf is preferable in that case.
    pub fn refit(&mut self, handle: DbvtHandle, aabb: Aabb) {
        self.assert_leaf(handle);
        let node = &mut self.nodes[handle.0 as usize];
        node.aabb = aabb;
        let parent = node.parent;
        self.rebalance_from(parent);
    }
}

use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::partitioning::Dbvt;

// A rotation swapping the child `child` of a node with the grandchild `nephew` under `sibling`.
#[derive(Copy, Clone, Debug)]
struct Rotation {
    child: u32,
    sibling: u32,
    nephew: u32,
    gain: Real,
}

impl Dbvt {
    /// Applies the tree rotation at `id` that reduces the most the surface area of its
    /// children, if any.
    ///
    /// With `B` and `C` the children of `id`, `D`, `E` the children of `B` and `F`, `G` the
    /// children of `C`, the candidate rotations are `B ↔ F`, `B ↔ G`, `C ↔ D` and `C ↔ E`.
    /// The surface area of `id` is left unchanged by any of them.
    pub(super) fn rotate(&mut self, id: u32) {
        let Some((b, c)) = self.nodes[id as usize].children() else {
            return;
        };

        let mut best: Option<Rotation> = None;

        for (child, sibling) in [(b, c), (c, b)] {
            let Some((nephew1, nephew2)) = self.nodes[sibling as usize].children() else {
                continue;
            };

            let sibling_area = self.aabb_of(sibling).surface_area();
            let child_aabb = self.aabb_of(child);

            // Moving `child` down in place of one nephew, the other nephew stays with it.
            for (nephew, other) in [(nephew1, nephew2), (nephew2, nephew1)] {
                let gain = sibling_area - child_aabb.merged_surface_area(&self.aabb_of(other));

                if gain > best.map(|r| r.gain).unwrap_or(0.0) {
                    best = Some(Rotation {
                        child,
                        sibling,
                        nephew,
                        gain,
                    });
                }
            }
        }

        if let Some(rotation) = best {
            self.apply_rotation(id, rotation);
        }
    }

    fn apply_rotation(&mut self, id: u32, rotation: Rotation) {
        let Rotation {
            child,
            sibling,
            nephew,
            ..
        } = rotation;

        self.replace_child(id, child, nephew);
        self.replace_child(sibling, nephew, child);
        self.nodes[nephew as usize].parent = Some(id);
        self.nodes[child as usize].parent = Some(sibling);
        self.refit_node(sibling);
    }

    #[inline]
    fn aabb_of(&self, id: u32) -> Aabb {
        self.nodes[id as usize].aabb
    }
}

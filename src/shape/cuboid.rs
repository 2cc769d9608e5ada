//! Support mapping based Cuboid shape.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::SupportMap;

/// Shape of a box.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Cuboid {
    /// The half-extents of the cuboid.
    pub half_extents: Vector<Real>,
}

// NOTE: the support point index of a cuboid is its vertex id: the i-th bit of the id
//       is set to 1 iff. the i-th component of the vertex is negative.
impl Cuboid {
    /// Creates a new box from its half-extents. Half-extents are the box half-width along each
    /// axis. Each half-extent must be positive.
    #[inline]
    pub fn new(half_extents: Vector<Real>) -> Cuboid {
        Cuboid { half_extents }
    }

    /// The vertex of this cuboid identified by `id`.
    #[inline]
    pub fn vertex(&self, id: u32) -> Point<Real> {
        let mut res = self.half_extents;

        for i in 0..DIM {
            if id & (1 << i) != 0 {
                res[i] = -res[i]
            }
        }

        Point::from(res)
    }

    /// The eight vertices of this cuboid, indexed by their vertex id.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        core::array::from_fn(|i| self.vertex(i as u32))
    }

    /// Computes the local-space AABB of this cuboid.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(Point::origin(), self.half_extents)
    }

    /// Computes the world-space AABB of this cuboid, transformed by `pos`.
    #[inline]
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let rot = pos.rotation.to_rotation_matrix();
        let ws_half_extents = rot.matrix().abs() * self.half_extents;
        Aabb::new(Point::from(pos.translation.vector), ws_half_extents)
    }
}

impl SupportMap for Cuboid {
    #[inline]
    fn local_support_point_with_id(&self, dir: &Vector<Real>) -> (Point<Real>, u32) {
        let mut id = 0;

        for i in 0..DIM {
            if dir[i] < 0.0 {
                id |= 1 << i;
            }
        }

        (self.vertex(id), id)
    }

    #[inline]
    fn compute_aabb(&self, transform: &Isometry<Real>) -> Aabb {
        self.aabb(transform)
    }
}

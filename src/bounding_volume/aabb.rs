//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};
use na::ComplexField;

/// An Axis-Aligned Bounding Box (AABB).
///
/// The box is stored as its center and its half-extents (the half-width of the box along each
/// coordinate axis). Every component of the half-extents is non-negative.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use kollide3d::bounding_volume::Aabb;
/// use kollide3d::na::{Point3, Vector3};
///
/// let a = Aabb::new(Point3::origin(), Vector3::repeat(1.0));
/// let b = Aabb::new(Point3::new(1.5, 0.0, 0.0), Vector3::repeat(1.0));
///
/// assert!(a.intersects(&b));
/// assert_eq!(a.merged(&b).mins(), Point3::new(-1.0, -1.0, -1.0));
/// assert_eq!(a.merged(&b).maxs(), Point3::new(2.5, 1.0, 1.0));
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The center of the box.
    pub center: Point<Real>,
    /// The half-width of the box along each axis.
    pub half_extents: Vector<Real>,
}

impl Aabb {
    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn new(center: Point<Real>, half_extents: Vector<Real>) -> Aabb {
        debug_assert!(
            half_extents.iter().all(|e| *e >= 0.0),
            "AABB half-extents must be non-negative."
        );
        Aabb {
            center,
            half_extents,
        }
    }

    /// Creates a new AABB from its center and its half-extents.
    ///
    /// This is the same as [`Aabb::new`].
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Aabb {
        Self::new(center, half_extents)
    }

    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn from_corners(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Self::new(na::center(&mins, &maxs), (maxs - mins) * 0.5)
    }

    /// The corner of this box with the smallest coordinates.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.center - self.half_extents
    }

    /// The corner of this box with the largest coordinates.
    #[inline]
    pub fn maxs(&self) -> Point<Real> {
        self.center + self.half_extents
    }

    /// The full extents of this box.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.half_extents * 2.0
    }

    /// The volume of this box.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// The surface area of this box.
    ///
    /// This is the cost metric of the surface area heuristic used by the dynamic tree.
    #[inline]
    pub fn surface_area(&self) -> Real {
        let e = &self.half_extents;
        8.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    /// The surface area of the union of `self` and `other`, without building it.
    #[inline]
    pub fn merged_surface_area(&self, other: &Aabb) -> Real {
        let mins = self.mins().inf(&other.mins());
        let maxs = self.maxs().sup(&other.maxs());
        let e = maxs - mins;
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    /// Returns a copy of this box translated by `translation`.
    #[inline]
    pub fn translated(mut self, translation: &Vector<Real>) -> Self {
        self.center += translation;
        self
    }

    /// Does this box contain the given point?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        let dpt = point - self.center;
        dpt.iter()
            .zip(self.half_extents.iter())
            .all(|(d, e)| ComplexField::abs(*d) <= *e)
    }

    /// The distance between this box and the origin (zero if the origin is inside).
    #[inline]
    pub fn distance_to_origin(&self) -> Real {
        let gap = self.center.coords.abs() - self.half_extents;
        gap.sup(&Vector::zeros()).norm()
    }

    /// The distance separating `self` from `other` (zero if they overlap).
    #[inline]
    pub fn distance(&self, other: &Aabb) -> Real {
        let gap = (other.center - self.center).abs() - self.half_extents - other.half_extents;
        gap.sup(&Vector::zeros()).norm()
    }

    /// Do `self` and `other` overlap? Touching boxes overlap.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let dpt = other.center - self.center;
        let reach = self.half_extents + other.half_extents;
        dpt.iter()
            .zip(reach.iter())
            .all(|(d, r)| ComplexField::abs(*d) <= *r)
    }

    /// Is `other` completely inside of `self`?
    #[inline]
    pub fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins(), &other.mins()) && na::partial_ge(&self.maxs(), &other.maxs())
    }

    /// Enlarges `self` so it also encloses `other`.
    #[inline]
    pub fn merge(&mut self, other: &Aabb) {
        *self = self.merged(other);
    }

    /// The smallest box enclosing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::from_corners(self.mins().inf(&other.mins()), self.maxs().sup(&other.maxs()))
    }

    /// Returns a copy of this box enlarged by `margin` along every direction.
    #[inline]
    pub fn loosened(&self, margin: Real) -> Aabb {
        assert!(margin >= 0.0, "The loosening margin must be positive.");
        Aabb {
            center: self.center,
            half_extents: self.half_extents + Vector::repeat(margin),
        }
    }
}

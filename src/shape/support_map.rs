//! Traits for support mapping based shapes.

use crate::bounding_volume::{self, Aabb};
use crate::math::{Isometry, Point, Real, Vector};
use na::Unit;

/// Traits of convex shapes representable by a support mapping function.
///
/// A support function associates a direction to the point of the shape that maximizes its dot
/// product with this direction. GJK and EPA only ever see shapes through this trait, so any
/// source of convex geometry implementing it can be used with them.
///
/// Each support point is identified by an index (typically a vertex index). Those indices are
/// combined by GJK and EPA to detect support points re-entering a simplex or polytope, so
/// the same point must always be reported with the same index.
pub trait SupportMap {
    /// Evaluates the support function of this shape, returning the support point and its index.
    ///
    /// The direction does not have to be normalized.
    fn local_support_point_with_id(&self, dir: &Vector<Real>) -> (Point<Real>, u32);

    /// Evaluates the support function of this shape.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.local_support_point_with_id(dir).0
    }

    /// Same as `self.local_support_point` except that `dir` is normalized.
    fn local_support_point_toward(&self, dir: &Unit<Vector<Real>>) -> Point<Real> {
        self.local_support_point(dir.as_ref())
    }

    /// Evaluates the support function of this shape transformed by `transform`.
    ///
    /// Both `dir` and the returned point are expressed in the frame `transform` maps to.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        self.support_point_with_id(transform, dir).0
    }

    /// Evaluates the support function of this shape transformed by `transform`, along with the
    /// index of the support point.
    fn support_point_with_id(
        &self,
        transform: &Isometry<Real>,
        dir: &Vector<Real>,
    ) -> (Point<Real>, u32) {
        let local_dir = transform.inverse_transform_vector(dir);
        let (pt, id) = self.local_support_point_with_id(&local_dir);
        (transform * pt, id)
    }

    /// Computes the world-space AABB of this shape transformed by `transform`.
    fn compute_aabb(&self, transform: &Isometry<Real>) -> Aabb {
        bounding_volume::details::support_map_aabb(transform, self)
    }
}

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::SupportMap;

// Six support queries, one per face of the box.
fn aabb_from_support_function(support: impl Fn(&Vector<Real>) -> Point<Real>) -> Aabb {
    let mut mins = Point::origin();
    let mut maxs = Point::origin();

    for axis in 0..DIM {
        let mut dir = Vector::zeros();
        dir[axis] = 1.0;
        maxs[axis] = support(&dir)[axis];
        mins[axis] = support(&-dir)[axis];
    }

    Aabb::from_corners(mins, maxs)
}

/// Computes the AABB of a support-mapped shape transformed by `pos`.
pub fn support_map_aabb<G>(pos: &Isometry<Real>, shape: &G) -> Aabb
where
    G: ?Sized + SupportMap,
{
    aabb_from_support_function(|dir| shape.support_point(pos, dir))
}

/// Computes the local-space AABB of a support-mapped shape.
pub fn local_support_map_aabb<G>(shape: &G) -> Aabb
where
    G: ?Sized + SupportMap,
{
    aabb_from_support_function(|dir| shape.local_support_point(dir))
}

use crate::math::{Isometry, Real};
use crate::query::gjk::{self, GjkOptions, GjkResult, JohnsonSimplex};
use crate::query::ClosestPoints;
use crate::shape::SupportMap;

/// Computes the pair of closest points between two shapes.
///
/// Returns `ClosestPoints::Intersecting` if the shapes overlap. Otherwise, the returned
/// points are expressed in world-space.
pub fn closest_points<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &GjkOptions,
) -> ClosestPoints
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    closest_points_support_map_support_map(&pos12, g1, g2, options).transform_by(pos1)
}

/// Closest points between support-mapped shapes.
///
/// Both points are expressed in the local-space of the first shape.
pub fn closest_points_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    options: &GjkOptions,
) -> ClosestPoints
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut simplex = JohnsonSimplex::new();

    match gjk::closest_points(pos12, g1, g2, options, true, &mut simplex) {
        GjkResult::ClosestPoints {
            point1,
            point2,
            distance,
            ..
        } => ClosestPoints::Disjoint {
            point1,
            point2,
            distance,
        },
        GjkResult::Intersection | GjkResult::Separated => ClosestPoints::Intersecting,
    }
}

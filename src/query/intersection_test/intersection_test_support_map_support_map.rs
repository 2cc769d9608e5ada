use crate::math::{Isometry, Real};
use crate::query::gjk::{self, GjkOptions, GjkResult, JohnsonSimplex};
use crate::shape::SupportMap;

/// Tests whether two shapes are intersecting.
pub fn intersection_test<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &GjkOptions,
) -> bool
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    intersection_test_support_map_support_map(&pos12, g1, g2, options)
}

/// Intersection test between support-mapped shapes (`Cuboid`, `ConvexVertexSet`, etc.)
pub fn intersection_test_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    options: &GjkOptions,
) -> bool
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut simplex = JohnsonSimplex::new();
    gjk::closest_points(pos12, g1, g2, options, false, &mut simplex) == GjkResult::Intersection
}

use crate::math::{Isometry, Real};
use crate::query::gjk::{self, GjkOptions, GjkResult, JohnsonSimplex};
use crate::shape::SupportMap;

/// Computes the minimum distance separating two shapes.
///
/// Returns `0.0` if the shapes are intersecting.
pub fn distance<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &GjkOptions,
) -> Real
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    distance_support_map_support_map(&pos12, g1, g2, options)
}

/// Distance between support-mapped shapes.
pub fn distance_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    options: &GjkOptions,
) -> Real
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut simplex = JohnsonSimplex::new();

    match gjk::closest_points(pos12, g1, g2, options, true, &mut simplex) {
        GjkResult::ClosestPoints { distance, .. } => distance,
        GjkResult::Intersection | GjkResult::Separated => 0.0,
    }
}

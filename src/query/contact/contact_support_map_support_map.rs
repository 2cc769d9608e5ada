use crate::math::{Isometry, Real};
use crate::query::epa::{Epa, EpaOptions};
use crate::query::gjk::{self, GjkOptions, GjkResult, JohnsonSimplex};
use crate::query::ContactManifold;
use crate::shape::SupportMap;

/// Computes the penetration of two shapes.
///
/// Returns `None` if the shapes are separated. Everything is expressed in world-space.
/// If EPA fails, the returned contact has `converged == false` and holds the best estimate
/// available, possibly with a zero depth.
pub fn contact<G1, G2>(
    pos1: &Isometry<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    gjk_options: &GjkOptions,
    epa_options: &EpaOptions,
    epa: &mut Epa,
) -> Option<ContactManifold>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pos12 = pos1.inv_mul(pos2);
    contact_support_map_support_map(&pos12, g1, g2, gjk_options, epa_options, epa)
        .map(|manifold| manifold.transform_by(pos1))
}

/// Contact between support-mapped shapes (`Cuboid`, `ConvexVertexSet`, etc.)
///
/// The contact is expressed in the local-space of the first shape.
pub fn contact_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    gjk_options: &GjkOptions,
    epa_options: &EpaOptions,
    epa: &mut Epa,
) -> Option<ContactManifold>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let mut simplex = JohnsonSimplex::new();

    match gjk::closest_points(pos12, g1, g2, gjk_options, false, &mut simplex) {
        GjkResult::Intersection => Some(penetration_support_map_support_map(
            pos12,
            g1,
            g2,
            &simplex,
            epa_options,
            epa,
        )),
        GjkResult::Separated | GjkResult::ClosestPoints { .. } => None,
    }
}

/// Runs EPA on two shapes GJK found intersecting, `simplex` being the terminal GJK simplex.
///
/// The contact is expressed in the local-space of the first shape.
pub fn penetration_support_map_support_map<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    simplex: &JohnsonSimplex,
    epa_options: &EpaOptions,
    epa: &mut Epa,
) -> ContactManifold
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    match epa.closest_points(pos12, g1, g2, simplex, epa_options) {
        Ok(contact) => ContactManifold::from_epa(contact, true),
        Err(err) => {
            log::debug!("EPA failed, falling back to a best-effort contact: {}", err);
            ContactManifold::from_epa(err.fallback_contact(pos12, simplex), false)
        }
    }
}

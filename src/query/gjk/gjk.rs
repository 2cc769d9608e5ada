//! The Gilbert-Johnson-Keerthi distance algorithm.
//!
//! GJK operates on the **Minkowski difference** (also called Configuration Space Obstacle or
//! CSO) of two convex shapes. Two shapes intersect if and only if their CSO contains the
//! origin, and their distance is the distance from the origin to the CSO. GJK iteratively
//! builds a simplex of CSO support points whose closest point to the origin converges toward
//! the closest point of the CSO itself.
//!
//! When the shapes are penetrating, GJK only detects the intersection: its terminal simplex
//! is then handed to EPA (see [`crate::query::epa`]) to compute the penetration depth.

use na::{ComplexField, Unit};

use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{CsoPoint, JohnsonSimplex};
use crate::shape::SupportMap;

/// Results of the GJK algorithm.
///
/// All points are expressed in the local-space of the first shape.
#[derive(Clone, Debug, PartialEq)]
pub enum GjkResult {
    /// The shapes are intersecting: the origin is inside of their Minkowski difference.
    ///
    /// The simplex passed to GJK then holds the terminal simplex, suitable to seed EPA.
    Intersection,
    /// The shapes are separated.
    ///
    /// Only returned when the exact distance was not requested.
    Separated,
    /// The shapes are separated and their closest points were computed.
    ClosestPoints {
        /// The closest point on the first shape.
        point1: Point<Real>,
        /// The closest point on the second shape.
        point2: Point<Real>,
        /// The unit direction from `point1` toward `point2`.
        normal1: Unit<Vector<Real>>,
        /// The distance between both shapes.
        distance: Real,
    },
}

/// Tolerances and iteration bound of the GJK algorithm.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GjkOptions {
    /// Relative tolerance on the distance: GJK stops when the gap between the lower and upper
    /// bounds of the distance is smaller than `rel_tol` times the upper bound.
    pub rel_tol: Real,
    /// Absolute tolerance: the origin is considered to lie on the simplex when its squared
    /// distance to it is smaller than `abs_tol` times the largest squared norm of the simplex
    /// vertices.
    pub abs_tol: Real,
    /// The maximum number of support points evaluated before giving up.
    pub max_iterations: usize,
}

impl Default for GjkOptions {
    fn default() -> Self {
        let abs_tol = eps_tol();
        Self {
            rel_tol: ComplexField::sqrt(abs_tol),
            abs_tol,
            max_iterations: 100,
        }
    }
}

/// The default absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 10.0
}

/// The first search direction for the pair of shapes separated by `pos12`.
///
/// Pointing from the first shape toward the second one makes the first support point
/// a good guess of the closest points.
pub fn initial_direction(pos12: &Isometry<Real>) -> Vector<Real> {
    let dir = pos12.translation.vector;

    if dir.norm_squared() > DEFAULT_EPSILON {
        dir
    } else {
        Vector::x()
    }
}

/// Computes the closest points between two shapes using the GJK algorithm.
///
/// # Parameters
///
/// - `pos12`: the position of the second shape relative to the first one.
/// - `exact_dist`: if `false`, GJK stops as soon as a separating axis is found and
///   returns [`GjkResult::Separated`]. If `true`, it runs until convergence and returns
///   [`GjkResult::ClosestPoints`] for separated shapes.
/// - `simplex`: the simplex used by the algorithm. If it is empty, it is initialized with
///   the support point along [`initial_direction`]. Otherwise its current vertices are
///   re-used as a warm start. On [`GjkResult::Intersection`] it holds the terminal simplex.
///
/// Running out of iterations is not an error: the last estimate is returned.
pub fn closest_points<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    options: &GjkOptions,
    exact_dist: bool,
    simplex: &mut JohnsonSimplex,
) -> GjkResult
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    if simplex.is_empty() {
        let dir = initial_direction(pos12);
        simplex.reset(CsoPoint::from_shapes(pos12, g1, g2, &dir));
    }

    let mut proj = simplex.project_origin_and_reduce();

    for _ in 0..options.max_iterations {
        let sq_dist = proj.coords.norm_squared();

        // The origin lies on the simplex.
        if sq_dist <= options.abs_tol * simplex.max_sq_norm() || sq_dist == 0.0 {
            return GjkResult::Intersection;
        }

        let max_bound = ComplexField::sqrt(sq_dist);
        let dir = -proj.coords / max_bound;
        let cso_point = CsoPoint::from_shapes(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&cso_point.point.coords);

        // The plane orthogonal to `dir` through the support point separates the origin
        // from the Minkowski difference.
        if min_bound > 0.0 && !exact_dist {
            return GjkResult::Separated;
        }

        if max_bound - min_bound <= options.rel_tol * max_bound {
            return result(simplex, exact_dist);
        }

        // The support point is already part of the simplex: no progress is possible.
        if simplex.contains_id(cso_point.id) {
            return result(simplex, exact_dist);
        }

        let previous = simplex.clone();
        let _ = simplex.add_point(cso_point);
        proj = simplex.project_origin_and_reduce();

        if simplex.kind() == 3 {
            return GjkResult::Intersection;
        }

        // Round-off errors made the estimate worse: keep the previous one.
        if proj.coords.norm_squared() >= sq_dist {
            *simplex = previous;
            return result(simplex, exact_dist);
        }
    }

    log::debug!(
        "GJK did not converge after {} iterations.",
        options.max_iterations
    );

    let sq_dist = proj.coords.norm_squared();
    if sq_dist <= options.abs_tol * simplex.max_sq_norm() || sq_dist == 0.0 {
        GjkResult::Intersection
    } else {
        result(simplex, exact_dist)
    }
}

fn result(simplex: &JohnsonSimplex, exact_dist: bool) -> GjkResult {
    if !exact_dist {
        return GjkResult::Separated;
    }

    let (point1, point2) = simplex.witness_points();
    let proj = simplex.proj();
    let distance = proj.coords.norm();

    match Unit::try_new(-proj.coords, 0.0) {
        Some(normal1) => GjkResult::ClosestPoints {
            point1,
            point2,
            normal1,
            distance,
        },
        None => GjkResult::Intersection,
    }
}

#[cfg(test)]
mod test {
    use super::{closest_points, GjkOptions, GjkResult};
    use crate::math::{Isometry, Real, Vector};
    use crate::query::gjk::JohnsonSimplex;
    use crate::shape::Cuboid;

    #[test]
    fn separated_cubes() {
        let cube = Cuboid::new(Vector::repeat(1.0));
        let pos12 = Isometry::translation(3.0, 0.0, 0.0);
        let options = GjkOptions::default();

        let mut simplex = JohnsonSimplex::new();
        assert_eq!(
            closest_points(&pos12, &cube, &cube, &options, false, &mut simplex),
            GjkResult::Separated
        );

        let mut simplex = JohnsonSimplex::new();
        match closest_points(&pos12, &cube, &cube, &options, true, &mut simplex) {
            GjkResult::ClosestPoints {
                point1,
                point2,
                normal1,
                distance,
            } => {
                assert_relative_eq!(distance, 1.0, epsilon = 1.0e-5);
                assert_relative_eq!(point1.x, 1.0, epsilon = 1.0e-5);
                assert_relative_eq!(point2.x, 2.0, epsilon = 1.0e-5);
                assert_relative_eq!(*normal1, Vector::x(), epsilon = 1.0e-5);
            }
            other => panic!("Unexpected GJK result: {:?}", other),
        }
    }

    #[test]
    fn overlapping_cubes() {
        let cube = Cuboid::new(Vector::repeat(1.0));
        let pos12 = Isometry::translation(1.5, 0.0, 0.0);
        let mut simplex = JohnsonSimplex::new();

        assert_eq!(
            closest_points(
                &pos12,
                &cube,
                &cube,
                &GjkOptions::default(),
                true,
                &mut simplex
            ),
            GjkResult::Intersection
        );
        assert!(!simplex.is_empty());
    }

    #[test]
    fn distance_between_rotated_cubes() {
        let cube = Cuboid::new(Vector::repeat(0.5));
        // The second cube shows an edge to the first one.
        let angle = core::f64::consts::FRAC_PI_4 as Real;
        let pos12 = Isometry::new(Vector::new(2.0, 0.0, 0.0), Vector::z() * angle);
        let mut simplex = JohnsonSimplex::new();

        match closest_points(
            &pos12,
            &cube,
            &cube,
            &GjkOptions::default(),
            true,
            &mut simplex,
        ) {
            GjkResult::ClosestPoints {
                point1,
                point2,
                distance,
                ..
            } => {
                let half_diagonal = (0.5 as Real) * (2.0 as Real).sqrt();
                assert_relative_eq!(distance, 1.5 - half_diagonal, epsilon = 1.0e-4);
                assert_relative_eq!(point1.x, 0.5, epsilon = 1.0e-4);
                assert_relative_eq!(point2.x, 2.0 - half_diagonal, epsilon = 1.0e-4);
                assert_relative_eq!(point2.y, 0.0, epsilon = 1.0e-4);
            }
            other => panic!("Unexpected GJK result: {:?}", other),
        }
    }
}

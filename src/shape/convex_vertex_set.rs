//! Convex shapes described by their vertices only.

use crate::bounding_volume::{self, Aabb};
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use alloc::vec::Vec;

/// Error raised when building a [`ConvexVertexSet`] from invalid vertices.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// A convex vertex set must contain at least one vertex.
    #[error("a convex vertex set must contain at least one vertex.")]
    Empty,
    /// The vertex count does not fit the 32 bits of a support point index.
    #[error("a convex vertex set cannot contain more than u32::MAX vertices.")]
    TooManyVertices,
    /// A vertex has a NaN or infinite coordinate.
    #[error("the vertex {0} has a non-finite coordinate.")]
    NonFiniteVertex(u32),
}

/// A convex shape given as the vertices of its convex hull.
///
/// The hull itself is built elsewhere: only its vertices matter for collision detection since
/// the shape is only ever accessed through its support function. The support point index is
/// the index of the vertex in [`ConvexVertexSet::points`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexVertexSet {
    points: Vec<Point<Real>>,
}

impl ConvexVertexSet {
    /// Creates a convex shape from the vertices of its convex hull.
    ///
    /// Points that aren't vertices of their convex hull are accepted: they are just never
    /// returned by the support function.
    pub fn new(points: Vec<Point<Real>>) -> Result<Self, ShapeError> {
        if points.is_empty() {
            return Err(ShapeError::Empty);
        }

        if u32::try_from(points.len()).is_err() {
            return Err(ShapeError::TooManyVertices);
        }

        if let Some(bad) = points
            .iter()
            .position(|pt| pt.coords.iter().any(|x| !x.is_finite()))
        {
            return Err(ShapeError::NonFiniteVertex(bad as u32));
        }

        Ok(Self { points })
    }

    /// The vertices of this shape.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The vertex with the given support point index.
    #[inline]
    pub fn vertex(&self, id: u32) -> Point<Real> {
        self.points[id as usize]
    }

    /// Computes the local-space AABB of this shape.
    pub fn local_aabb(&self) -> Aabb {
        bounding_volume::details::local_support_map_aabb(self)
    }

    /// Computes the world-space AABB of this shape, transformed by `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        bounding_volume::details::support_map_aabb(pos, self)
    }
}

impl SupportMap for ConvexVertexSet {
    #[inline]
    fn local_support_point_with_id(&self, dir: &Vector<Real>) -> (Point<Real>, u32) {
        // Ties keep the first vertex: the result only depends on the vertex order.
        let (best, _) = self.points.iter().enumerate().skip(1).fold(
            (0, self.points[0].coords.dot(dir)),
            |(best, best_dot), (i, pt)| {
                let dot = pt.coords.dot(dir);
                if dot > best_dot {
                    (i, dot)
                } else {
                    (best, best_dot)
                }
            },
        );

        (self.points[best], best as u32)
    }
}

#[cfg(test)]
mod test {
    use super::{ConvexVertexSet, ShapeError};
    use crate::math::{Point, Real, Vector};
    use crate::shape::SupportMap;
    use alloc::vec;

    #[test]
    fn rejects_invalid_vertices() {
        assert_eq!(ConvexVertexSet::new(vec![]), Err(ShapeError::Empty));
        assert_eq!(
            ConvexVertexSet::new(vec![Point::origin(), Point::new(Real::NAN, 0.0, 0.0)]),
            Err(ShapeError::NonFiniteVertex(1))
        );
    }

    #[test]
    fn support_point_is_a_vertex() {
        let tetra = ConvexVertexSet::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ])
        .unwrap();

        assert_eq!(
            tetra.local_support_point_with_id(&Vector::new(0.1, 0.2, 1.0)),
            (Point::new(0.0, 0.0, 1.0), 3)
        );
        assert_eq!(
            tetra.local_support_point_with_id(&Vector::new(-1.0, -1.0, -1.0)),
            (Point::origin(), 0)
        );

        let aabb = tetra.local_aabb();
        assert_eq!(aabb.mins(), Point::origin());
        assert_eq!(aabb.maxs(), Point::new(1.0, 1.0, 1.0));
    }
}

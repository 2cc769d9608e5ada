use crate::math::{Isometry, Point, Real};

/// Closest points information.
#[derive(Debug, PartialEq, Clone, Copy)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ClosestPoints {
    /// The two objects are intersecting.
    Intersecting,
    /// The two objects are non-intersecting.
    Disjoint {
        /// The point of the first object closest to the second one.
        point1: Point<Real>,
        /// The point of the second object closest to the first one.
        point2: Point<Real>,
        /// The distance between both objects.
        distance: Real,
    },
}

impl ClosestPoints {
    /// Returns the result of swapping the two points if `self` is `Disjoint`.
    #[must_use]
    pub fn flipped(&self) -> Self {
        match *self {
            ClosestPoints::Disjoint {
                point1,
                point2,
                distance,
            } => ClosestPoints::Disjoint {
                point1: point2,
                point2: point1,
                distance,
            },
            ClosestPoints::Intersecting => ClosestPoints::Intersecting,
        }
    }

    /// Transforms both points in `self` by `pos`.
    #[must_use]
    pub fn transform_by(self, pos: &Isometry<Real>) -> Self {
        match self {
            ClosestPoints::Disjoint {
                point1,
                point2,
                distance,
            } => ClosestPoints::Disjoint {
                point1: pos * point1,
                point2: pos * point2,
                distance,
            },
            ClosestPoints::Intersecting => ClosestPoints::Intersecting,
        }
    }
}

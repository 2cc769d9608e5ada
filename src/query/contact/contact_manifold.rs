use crate::math::{Isometry, Point, Real, Vector};
use crate::query::epa::EpaContact;
use na::Unit;

/// Geometric description of the penetration of two shapes.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ContactManifold {
    /// The deepest point of the second shape inside of the first one, on the first shape.
    pub point1: Point<Real>,
    /// The deepest point of the first shape inside of the second one, on the second shape.
    pub point2: Point<Real>,
    /// The contact normal, pointing toward the exterior of the first shape.
    ///
    /// Translating the second shape by `normal1 * depth` separates both shapes.
    pub normal1: Unit<Vector<Real>>,
    /// The penetration depth. Always non-negative.
    pub depth: Real,
    /// Whether EPA converged. If not, this contact is a best-effort estimate.
    pub converged: bool,
}

impl ContactManifold {
    /// Builds a contact manifold from the output of EPA.
    pub fn from_epa(contact: EpaContact, converged: bool) -> Self {
        ContactManifold {
            point1: contact.point1,
            point2: contact.point2,
            normal1: contact.normal1,
            depth: contact.depth.max(0.0),
            converged,
        }
    }

    /// Transforms the points and the normal of this contact by `pos`.
    #[must_use]
    pub fn transform_by(self, pos: &Isometry<Real>) -> Self {
        ContactManifold {
            point1: pos * self.point1,
            point2: pos * self.point2,
            normal1: pos * self.normal1,
            ..self
        }
    }

    /// Returns a new contact with the roles of both shapes swapped.
    #[must_use]
    pub fn flipped(&self) -> Self {
        ContactManifold {
            point1: self.point2,
            point2: self.point1,
            normal1: -self.normal1,
            ..*self
        }
    }
}

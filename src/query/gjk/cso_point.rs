use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use core::ops::Sub;

/// A point of a Configuration-Space Obstacle.
///
/// A Configuration-Space Obstacle (CSO) is the result of the
/// Minkowski Difference of two solids. In other words, each of its
/// points correspond to the difference of two point, each belonging
/// to a different solid.
///
/// Each CSO point also carries the combined identifier of the two support points it was
/// built from: the upper 32 bits identify the support point on the first shape, the lower
/// 32 bits the support point on the second shape. Two CSO points with the same identifier
/// are the same point of the Minkowski difference.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CsoPoint {
    /// The point on the CSO. This is equal to `self.orig1 - self.orig2`.
    pub point: Point<Real>,
    /// The original point on the first shape used to compute `self.point`.
    pub orig1: Point<Real>,
    /// The original point on the second shape used to compute `self.point`.
    pub orig2: Point<Real>,
    /// The combined identifier of `self.orig1` and `self.orig2`.
    pub id: u64,
}

impl CsoPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, id1: u32, orig2: Point<Real>, id2: u32) -> Self {
        CsoPoint {
            point: Point::from(orig1 - orig2),
            orig1,
            orig2,
            id: Self::combine_ids(id1, id2),
        }
    }

    /// Packs the support point identifiers of both shapes into a single identifier.
    #[inline]
    pub fn combine_ids(id1: u32, id2: u32) -> u64 {
        ((id1 as u64) << 32) | id2 as u64
    }

    /// The identifier of the support point on the first shape.
    #[inline]
    pub fn id1(&self) -> u32 {
        (self.id >> 32) as u32
    }

    /// The identifier of the support point on the second shape.
    #[inline]
    pub fn id2(&self) -> u32 {
        self.id as u32
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the direction `dir`.
    ///
    /// The direction, as well as the resulting points, are expressed in the local-space of `g1`,
    /// `pos12` being the position of `g2` relative to `g1`.
    pub fn from_shapes<G1, G2>(pos12: &Isometry<Real>, g1: &G1, g2: &G2, dir: &Vector<Real>) -> Self
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let (sp1, id1) = g1.local_support_point_with_id(dir);
        let (sp2, id2) = g2.support_point_with_id(pos12, &-*dir);

        CsoPoint::new(sp1, id1, sp2, id2)
    }
}

impl Sub<CsoPoint> for CsoPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CsoPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}

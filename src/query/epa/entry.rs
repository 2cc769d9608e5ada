use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::CsoPoint;
use na::ComplexField;
use thunderdome::Index;

// Tolerance on the barycentric coordinates of a projection still considered inside its face.
// The projection of the origin often lands on an edge shared by two coplanar faces.
const BARYCENTRIC_EPSILON: Real = DEFAULT_EPSILON * 100.0;

/// A triangular face of the EPA polytope.
///
/// Vertices are ordered counterclockwise when seen from outside of the polytope. Edge `i`
/// goes from `pts[i]` to `pts[(i + 1) % 3]` and is shared with `adjacent[i]`, where it is
/// the edge number `twin_edge[i]`.
#[derive(Clone, Debug)]
pub(super) struct Entry {
    pub pts: [usize; 3],
    pub adjacent: [Index; 3],
    pub twin_edge: [usize; 3],
    /// Outward unit normal, zero if the face is degenerate.
    pub normal: Vector<Real>,
    /// Projection of the origin on the plane of this face.
    pub closest: Point<Real>,
    /// Barycentric coordinates of `closest`.
    pub bcoords: [Real; 3],
    pub dist_sq: Real,
    pub valid: bool,
}

impl Entry {
    pub fn new(vertices: &[CsoPoint], pts: [usize; 3]) -> Self {
        let a = vertices[pts[0]].point;
        let b = vertices[pts[1]].point;
        let c = vertices[pts[2]].point;
        let ab = b - a;
        let ac = c - a;
        let n = ab.cross(&ac);
        let n_sq = n.norm_squared();
        let scale = ab.norm_squared().max(ac.norm_squared());

        let mut entry = Entry {
            pts,
            adjacent: [Index::DANGLING; 3],
            twin_edge: [0; 3],
            normal: Vector::zeros(),
            closest: Point::origin(),
            bcoords: [-1.0; 3],
            dist_sq: Real::MAX,
            valid: true,
        };

        if n_sq <= DEFAULT_EPSILON * scale * scale {
            return entry;
        }

        let normal = n / ComplexField::sqrt(n_sq);
        let closest = Point::from(normal * normal.dot(&a.coords));

        // Barycentric coordinates of the projection, even if it lies outside of the triangle.
        let ap = closest - a;
        let d00 = ab.dot(&ab);
        let d01 = ab.dot(&ac);
        let d11 = ac.dot(&ac);
        let d20 = ap.dot(&ab);
        let d21 = ap.dot(&ac);
        let denom = d00 * d11 - d01 * d01;
        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;

        entry.normal = normal;
        entry.closest = closest;
        entry.bcoords = [1.0 - v - w, v, w];
        entry.dist_sq = closest.coords.norm_squared();
        entry
    }

    /// Does the projection of the origin lie inside of this face?
    pub fn is_internal(&self) -> bool {
        self.bcoords.iter().all(|b| *b >= -BARYCENTRIC_EPSILON)
    }

    /// Is `point` strictly in front of this face?
    pub fn can_be_seen_by(&self, vertices: &[CsoPoint], point: &Point<Real>) -> bool {
        let a = &vertices[self.pts[0]].point;
        self.normal.dot(&(point - a)) > 0.0
    }

    pub fn closest_points(&self, vertices: &[CsoPoint]) -> (Point<Real>, Point<Real>) {
        let mut res1 = Point::origin();
        let mut res2 = Point::origin();

        for (pt, bcoord) in self.pts.iter().zip(self.bcoords.iter()) {
            res1.coords += vertices[*pt].orig1.coords * *bcoord;
            res2.coords += vertices[*pt].orig2.coords * *bcoord;
        }

        (res1, res2)
    }

    /// The vertices at the start and the end of the edge `edge`.
    #[inline]
    pub fn edge(&self, edge: usize) -> (usize, usize) {
        (self.pts[edge], self.pts[(edge + 1) % 3])
    }
}

#[cfg(test)]
mod test {
    use super::Entry;
    use crate::math::{Point, Vector};
    use crate::query::gjk::CsoPoint;
    use alloc::vec::Vec;

    fn vertices(pts: &[[f32; 3]]) -> Vec<CsoPoint> {
        pts.iter()
            .enumerate()
            .map(|(i, p)| {
                let pt = Point::new(p[0] as _, p[1] as _, p[2] as _);
                CsoPoint::new(pt, i as u32, Point::origin(), 0)
            })
            .collect()
    }

    #[test]
    fn projection_on_a_face() {
        let vtx = vertices(&[[-1.0, -1.0, 2.0], [3.0, -1.0, 2.0], [-1.0, 3.0, 2.0]]);
        let entry = Entry::new(&vtx, [0, 1, 2]);

        assert!(entry.is_internal());
        assert_relative_eq!(entry.normal, Vector::z());
        assert_relative_eq!(entry.dist_sq, 4.0);
        assert_relative_eq!(entry.closest, Point::new(0.0, 0.0, 2.0));
        assert_relative_eq!(entry.bcoords[0] + entry.bcoords[1] + entry.bcoords[2], 1.0);
        assert!(entry.can_be_seen_by(&vtx, &Point::new(0.0, 0.0, 3.0)));
        assert!(!entry.can_be_seen_by(&vtx, &Point::origin()));
    }

    #[test]
    fn projection_on_a_shared_edge_is_internal() {
        let vtx = vertices(&[[1.0, -1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]]);
        let entry = Entry::new(&vtx, [0, 1, 2]);

        assert!(entry.is_internal());
        assert_relative_eq!(entry.dist_sq, 1.0);
        assert_relative_eq!(entry.bcoords[2], 0.0, epsilon = 1.0e-6);
    }

    #[test]
    fn projection_outside_of_the_face() {
        let vtx = vertices(&[[1.0, 1.0, 1.0], [2.0, 1.0, 1.0], [1.0, 2.0, 1.0]]);
        let entry = Entry::new(&vtx, [0, 1, 2]);
        assert!(!entry.is_internal());
    }

    #[test]
    fn degenerate_face() {
        let vtx = vertices(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [2.0, 0.0, 1.0]]);
        let entry = Entry::new(&vtx, [0, 1, 2]);
        assert!(!entry.is_internal());
        assert_eq!(entry.normal, Vector::zeros());
        assert!(!entry.can_be_seen_by(&vtx, &Point::new(0.0, 5.0, 5.0)));
    }
}

//! Construction of the initial EPA tetrahedron from the terminal GJK simplex.

use super::epa::{Epa, EpaError, EpaOptions};
use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{CsoPoint, JohnsonSimplex};
use crate::shape::SupportMap;
use na::{ComplexField, Unit};

// cos(120°) and sin(120°).
const COS_120: Real = -0.5;
const SIN_120: Real = 0.866_025_403_784_438_6;

impl Epa {
    /// Grows the terminal simplex of GJK into a tetrahedron enclosing the origin.
    ///
    /// The four vertices are pushed to `self.vertices`, positively oriented.
    pub(super) fn seed_tetrahedron<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &JohnsonSimplex,
        options: &EpaOptions,
    ) -> Result<(), EpaError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let seeder = Seeder {
            support: |dir: &Vector<Real>| CsoPoint::from_shapes(pos12, g1, g2, dir),
            tolerance: options.rel_tol,
            flatness: options.abs_tol,
        };

        let pt = |i| *simplex.point(i);
        let tetra = match simplex.len() {
            4 => seeder.from_tetrahedron([pt(0), pt(1), pt(2), pt(3)]),
            3 => seeder.from_triangle(pt(0), pt(1), pt(2)),
            2 => seeder.from_segment(pt(0), pt(1)),
            1 => seeder.from_point(pt(0)),
            _ => None,
        };

        match tetra {
            Some(tetra) => {
                self.vertices.extend_from_slice(&tetra);
                Ok(())
            }
            None => {
                log::debug!(
                    "EPA: failed to grow a simplex with {} vertices into a tetrahedron enclosing the origin.",
                    simplex.len()
                );
                Err(EpaError::InvalidSeed)
            }
        }
    }
}

struct Seeder<F> {
    support: F,
    // Tolerance on the barycentric coordinates of the origin in extruded tetrahedra.
    tolerance: Real,
    // Tetrahedra with a relative volume smaller than this are considered flat.
    flatness: Real,
}

impl<F: Fn(&Vector<Real>) -> CsoPoint> Seeder<F> {
    fn from_tetrahedron(&self, pts: [CsoPoint; 4]) -> Option<[CsoPoint; 4]> {
        if let Some(tetra) = self.enclose_origin(pts, None) {
            return Some(tetra);
        }

        // GJK may accept a tetrahedron with the origin on one of its faces because of
        // round-off. The vertex opposite to that face is dropped and the face is extruded.
        let (_, bcoords) = self.barycentric_coordinates(&pts)?;
        let (opposite, min_bcoord) = bcoords
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        if min_bcoord < -self.tolerance {
            return None;
        }

        log::debug!("EPA: the origin lies on a face of the GJK tetrahedron, extruding that face.");
        let [a, b, c] = [1, 2, 3].map(|k| pts[(opposite + k) % 4]);
        self.from_triangle(a, b, c)
    }

    fn from_triangle(&self, a: CsoPoint, b: CsoPoint, c: CsoPoint) -> Option<[CsoPoint; 4]> {
        let ab = b.point - a.point;
        let ac = c.point - a.point;
        let n = ab.cross(&ac);

        if n.norm_squared() <= self.flatness * ab.norm_squared() * ac.norm_squared() {
            // Collinear vertices: only keep the longest edge.
            let bc = c.point - b.point;
            let (p, q) = if ab.norm_squared() >= ac.norm_squared()
                && ab.norm_squared() >= bc.norm_squared()
            {
                (a, b)
            } else if ac.norm_squared() >= bc.norm_squared() {
                (a, c)
            } else {
                (b, c)
            };
            return self.from_segment(p, q);
        }

        [n, -n].iter().find_map(|dir| {
            let s = (self.support)(dir);
            self.enclose_origin([a, b, c, s], Some(self.tolerance))
        })
    }

    fn from_segment(&self, a: CsoPoint, b: CsoPoint) -> Option<[CsoPoint; 4]> {
        let Some(axis) = Unit::try_new(b.point - a.point, self.flatness) else {
            return self.from_point(a);
        };

        // Three directions orthogonal to the segment, 120 degrees apart.
        let rotate = |v: &Vector<Real>| *v * COS_120 + axis.cross(v) * SIN_120;
        let dir0 = orthonormal(&axis);
        let dir1 = rotate(&dir0);
        let dir2 = rotate(&dir1);
        let s0 = (self.support)(&dir0);
        let s1 = (self.support)(&dir1);
        let s2 = (self.support)(&dir2);

        let candidates = [
            [a, b, s0, s1],
            [a, b, s1, s2],
            [a, b, s2, s0],
            // Reuse only one endpoint of the segment.
            [a, s0, s1, s2],
            [b, s0, s1, s2],
        ];

        candidates
            .into_iter()
            .find_map(|pts| self.enclose_origin(pts, Some(self.tolerance)))
    }

    fn from_point(&self, a: CsoPoint) -> Option<[CsoPoint; 4]> {
        let probes = [
            Vector::x(),
            -Vector::x(),
            Vector::y(),
            -Vector::y(),
            Vector::z(),
            -Vector::z(),
        ];

        probes.iter().find_map(|dir| {
            let s = (self.support)(dir);

            // The segment seeding falls back to this point if it is degenerate.
            if s.id == a.id || (s.point - a.point).norm() <= self.flatness {
                return None;
            }

            self.from_segment(a, s)
        })
    }

    /// Orders `pts` positively if they form a non-flat tetrahedron containing the origin.
    ///
    /// With `tolerance == None`, the origin must lie strictly inside.
    fn enclose_origin(
        &self,
        mut pts: [CsoPoint; 4],
        tolerance: Option<Real>,
    ) -> Option<[CsoPoint; 4]> {
        let (volume, bcoords) = self.barycentric_coordinates(&pts)?;

        let inside = match tolerance {
            None => bcoords.iter().all(|b| *b > 0.0),
            Some(tol) => bcoords.iter().all(|b| *b >= -tol),
        };

        if !inside {
            return None;
        }

        if volume < 0.0 {
            pts.swap(1, 2);
        }

        Some(pts)
    }

    /// The signed volume of `pts` and the barycentric coordinates of the origin.
    ///
    /// `None` if two vertices share the same id or if the tetrahedron is flat.
    fn barycentric_coordinates(&self, pts: &[CsoPoint; 4]) -> Option<(Real, [Real; 4])> {
        for i in 0..4 {
            if pts[i + 1..].iter().any(|pt| pt.id == pts[i].id) {
                return None;
            }
        }

        let [p0, p1, p2, p3] = pts.map(|pt| pt.point);
        let o = Point::origin();
        let volume = orientation(&p0, &p1, &p2, &p3);
        let scale = (p1 - p0).norm() * (p2 - p0).norm() * (p3 - p0).norm();

        if ComplexField::abs(volume) <= self.flatness * scale {
            return None;
        }

        let bcoords = [
            orientation(&o, &p1, &p2, &p3) / volume,
            orientation(&p0, &o, &p2, &p3) / volume,
            orientation(&p0, &p1, &o, &p3) / volume,
            orientation(&p0, &p1, &p2, &o) / volume,
        ];

        Some((volume, bcoords))
    }
}

fn orientation(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, d: &Point<Real>) -> Real {
    (b - a).dot(&(c - a).cross(&(d - a)))
}

fn orthonormal(axis: &Unit<Vector<Real>>) -> Vector<Real> {
    let least_aligned = axis.iamin();
    let mut basis = Vector::zeros();
    basis[least_aligned] = 1.0;
    axis.cross(&basis).normalize()
}

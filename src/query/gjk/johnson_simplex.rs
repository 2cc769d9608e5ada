use crate::math::{Point, Real};
use crate::query::gjk::CsoPoint;
use arrayvec::ArrayVec;

/// A vertex of a [`JohnsonSimplex`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimplexVertex {
    /// The support point of the Minkowski difference.
    pub point: CsoPoint,
    /// The squared norm of `self.point.point`.
    pub sq_norm: Real,
}

impl SimplexVertex {
    fn new(point: CsoPoint) -> Self {
        Self {
            sq_norm: point.point.coords.norm_squared(),
            point,
        }
    }
}

/// A simplex of dimension up to 3 that uses Johnson's sub-simplex algorithm to compute
/// the projection of the origin on it.
///
/// The signed "delta" determinants of every subset of vertices are computed recursively from
/// the determinants of the smaller subsets. The sub-simplex containing the projection of the
/// origin is the one with positive determinants for its own vertices and non-positive
/// determinants for every vertex it could be extended with.
#[derive(Clone, Debug)]
pub struct JohnsonSimplex {
    vertices: ArrayVec<SimplexVertex, 4>,
    lambdas: [Real; 4],
    proj: Point<Real>,
}

impl Default for JohnsonSimplex {
    fn default() -> Self {
        Self {
            vertices: ArrayVec::new(),
            lambdas: [0.0; 4],
            proj: Point::origin(),
        }
    }
}

// Delta determinants, indexed by vertex subset bitmask then by vertex index.
type Determinants = [[Real; 4]; 16];

impl JohnsonSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CsoPoint) {
        self.vertices.clear();
        self.vertices.push(SimplexVertex::new(pt));
        self.lambdas = [1.0, 0.0, 0.0, 0.0];
        self.proj = pt.point;
    }

    /// Does this simplex contain no vertex at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The number of vertices of this simplex.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// The kind of this simplex: 0 for a point, 1 for a segment, 2 for a triangle, 3 for a
    /// tetrahedron.
    #[inline]
    pub fn kind(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// The vertices of this simplex.
    #[inline]
    pub fn vertices(&self) -> &[SimplexVertex] {
        &self.vertices
    }

    /// The i-th vertex of this simplex.
    #[inline]
    pub fn point(&self, i: usize) -> &CsoPoint {
        &self.vertices[i].point
    }

    /// The barycentric coordinate of the i-th vertex on the last projection of the origin.
    #[inline]
    pub fn proj_coord(&self, i: usize) -> Real {
        self.lambdas[i]
    }

    /// The last projection of the origin computed by [`Self::project_origin_and_reduce`].
    #[inline]
    pub fn proj(&self) -> Point<Real> {
        self.proj
    }

    /// Does this simplex contain a vertex with the given combined support point identifier?
    #[inline]
    pub fn contains_id(&self, id: u64) -> bool {
        self.vertices.iter().any(|v| v.point.id == id)
    }

    /// The largest squared norm of the vertices of this simplex.
    pub fn max_sq_norm(&self) -> Real {
        self.vertices
            .iter()
            .map(|v| v.sq_norm)
            .fold(0.0, |a: Real, b| a.max(b))
    }

    /// Adds a vertex to this simplex.
    ///
    /// Returns `false` (and leaves the simplex unchanged) if the simplex is already a
    /// tetrahedron or if a vertex with the same identifier is already part of it.
    pub fn add_point(&mut self, pt: CsoPoint) -> bool {
        if self.vertices.is_full() || self.contains_id(pt.id) {
            return false;
        }

        self.vertices.push(SimplexVertex::new(pt));
        true
    }

    /// Computes the witness points on both shapes from the barycentric coordinates of the
    /// last projection of the origin.
    pub fn witness_points(&self) -> (Point<Real>, Point<Real>) {
        let mut res1 = Point::origin();
        let mut res2 = Point::origin();

        for (v, lambda) in self.vertices.iter().zip(self.lambdas.iter()) {
            res1.coords += v.point.orig1.coords * *lambda;
            res2.coords += v.point.orig2.coords * *lambda;
        }

        (res1, res2)
    }

    /// Projects the origin on this simplex and removes every vertex that doesn't belong to the
    /// smallest sub-simplex containing the projection.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        let n = self.vertices.len();

        if n <= 1 {
            self.lambdas = [1.0, 0.0, 0.0, 0.0];
            self.proj = self
                .vertices
                .first()
                .map(|v| v.point.point)
                .unwrap_or_else(Point::origin);
            return self.proj;
        }

        let det = self.determinants();
        let full = (1usize << n) - 1;

        let subset = (1..=full)
            .find(|s| Self::is_valid_subset(&det, *s, n))
            .unwrap_or_else(|| {
                log::debug!("Johnson subset tests failed, falling back to the backup procedure.");
                self.backup_subset(&det, full)
            });

        self.reduce_to_subset(&det, subset);
        self.proj
    }

    fn determinants(&self) -> Determinants {
        let n = self.vertices.len();
        let mut dp = [[0.0; 4]; 4];

        for i in 0..n {
            for j in i..n {
                let d = self.vertices[i]
                    .point
                    .point
                    .coords
                    .dot(&self.vertices[j].point.point.coords);
                dp[i][j] = d;
                dp[j][i] = d;
            }
        }

        let mut det = [[0.0; 4]; 16];

        // Subsets are visited by increasing bitmask, so every strict subset is computed
        // before the sets containing it.
        for s in 1..(1usize << n) {
            if s.count_ones() == 1 {
                det[s][s.trailing_zeros() as usize] = 1.0;
                continue;
            }

            for j in bits(s) {
                let x = s & !(1 << j);
                let k = x.trailing_zeros() as usize;
                let delta: Real = bits(x).map(|i| det[x][i] * (dp[i][k] - dp[i][j])).sum();
                det[s][j] = delta;
            }
        }

        det
    }

    fn is_valid_subset(det: &Determinants, s: usize, n: usize) -> bool {
        bits(s).all(|i| det[s][i] > 0.0)
            && (0..n)
                .filter(|j| s & (1 << j) == 0)
                .all(|j| det[s | (1 << j)][j] <= 0.0)
    }

    // Among the subsets with positive determinants, pick the one whose affine hull is the
    // closest to the origin. Singletons always qualify.
    fn backup_subset(&self, det: &Determinants, full: usize) -> usize {
        let mut best = 1;
        let mut best_sq_dist = Real::MAX;

        for s in 1..=full {
            if !bits(s).all(|i| det[s][i] > 0.0) {
                continue;
            }

            let sq_dist = self.combination(det, s).coords.norm_squared();

            if sq_dist < best_sq_dist {
                best_sq_dist = sq_dist;
                best = s;
            }
        }

        best
    }

    fn combination(&self, det: &Determinants, s: usize) -> Point<Real> {
        let total: Real = bits(s).map(|i| det[s][i]).sum();
        let mut res = Point::origin();

        for i in bits(s) {
            res.coords += self.vertices[i].point.point.coords * (det[s][i] / total);
        }

        res
    }

    fn reduce_to_subset(&mut self, det: &Determinants, s: usize) {
        let total: Real = bits(s).map(|i| det[s][i]).sum();
        let mut kept = ArrayVec::new();
        let mut lambdas = [0.0; 4];
        let mut proj = Point::origin();

        for i in bits(s) {
            let lambda = det[s][i] / total;
            let vertex = self.vertices[i];
            proj.coords += vertex.point.point.coords * lambda;
            lambdas[kept.len()] = lambda;
            kept.push(vertex);
        }

        self.vertices = kept;
        self.lambdas = lambdas;
        self.proj = proj;
    }
}

fn bits(s: usize) -> impl Iterator<Item = usize> {
    (0..4).filter(move |i| s & (1 << i) != 0)
}

#[cfg(test)]
mod test {
    use super::JohnsonSimplex;
    use crate::math::{Point, Real};
    use crate::query::gjk::CsoPoint;

    fn cso(id: u32, x: Real, y: Real, z: Real) -> CsoPoint {
        CsoPoint::new(Point::new(x, y, z), id, Point::origin(), 0)
    }

    #[test]
    fn segment_projection() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, -1.0, 1.0, 0.0));
        assert!(simplex.add_point(cso(1, 1.0, 1.0, 0.0)));
        assert!(!simplex.add_point(cso(1, 1.0, 1.0, 0.0)));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::new(0.0, 1.0, 0.0));
        assert_eq!(simplex.kind(), 1);
        assert_relative_eq!(simplex.proj_coord(0), 0.5);
        assert_relative_eq!(simplex.proj_coord(1), 0.5);
    }

    #[test]
    fn segment_reduces_to_closest_vertex() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, 1.0, 1.0, 0.0));
        let _ = simplex.add_point(cso(1, 2.0, 1.0, 0.0));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::new(1.0, 1.0, 0.0));
        assert_eq!(simplex.kind(), 0);
        assert_eq!(simplex.point(0).id1(), 0);
    }

    #[test]
    fn triangle_projection() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, -1.0, -1.0, 2.0));
        let _ = simplex.add_point(cso(1, 3.0, -1.0, 2.0));
        let _ = simplex.add_point(cso(2, -1.0, 3.0, 2.0));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::new(0.0, 0.0, 2.0), epsilon = 1.0e-6);
        assert_eq!(simplex.kind(), 2);

        let total: Real = (0..3).map(|i| simplex.proj_coord(i)).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1.0e-6);
    }

    #[test]
    fn triangle_reduces_to_edge() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, -1.0, 1.0, 0.0));
        let _ = simplex.add_point(cso(1, 1.0, 1.0, 0.0));
        let _ = simplex.add_point(cso(2, 0.0, 3.0, 0.0));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::new(0.0, 1.0, 0.0), epsilon = 1.0e-6);
        assert_eq!(simplex.kind(), 1);
        assert!(!simplex.contains_id(CsoPoint::combine_ids(2, 0)));
    }

    #[test]
    fn tetrahedron_enclosing_the_origin() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, 1.0, 1.0, 1.0));
        let _ = simplex.add_point(cso(1, -1.0, -1.0, 1.0));
        let _ = simplex.add_point(cso(2, -1.0, 1.0, -1.0));
        let _ = simplex.add_point(cso(3, 1.0, -1.0, -1.0));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::origin(), epsilon = 1.0e-6);
        assert_eq!(simplex.kind(), 3);
    }

    #[test]
    fn tetrahedron_reduces_to_face() {
        let mut simplex = JohnsonSimplex::new();
        simplex.reset(cso(0, -1.0, -1.0, 1.0));
        let _ = simplex.add_point(cso(1, 3.0, -1.0, 1.0));
        let _ = simplex.add_point(cso(2, -1.0, 3.0, 1.0));
        let _ = simplex.add_point(cso(3, 0.0, 0.0, 5.0));

        let proj = simplex.project_origin_and_reduce();
        assert_relative_eq!(proj, Point::new(0.0, 0.0, 1.0), epsilon = 1.0e-6);
        assert_eq!(simplex.kind(), 2);
        assert!(!simplex.contains_id(CsoPoint::combine_ids(3, 0)));
    }
}

//! Three-dimensional penetration depth queries using the Expanding Polytope Algorithm.
//!
//! Starting from a tetrahedron of support points enclosing the origin, EPA repeatedly picks
//! the polytope face closest to the origin and pushes the polytope outward along its normal,
//! until that face lies on the boundary of the Minkowski difference (within tolerance). The
//! distance from the origin to that face is the penetration depth.

use super::entry::Entry;
use crate::math::{Isometry, Point, Real, Vector};
use crate::query::gjk::{self, CsoPoint, JohnsonSimplex};
use crate::shape::SupportMap;
use crate::utils::{ScratchGuard, ScratchWorkspace, WeightedValue};
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use na::{ComplexField, Unit};
use thunderdome::{Arena, Index};

/// Tolerances and iteration bound of the EPA algorithm.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpaOptions {
    /// EPA stops when the upper bound of the penetration depth is within `rel_tol` times the
    /// depth of the closest face (plus `abs_tol`). Also used as the tolerance on the
    /// barycentric coordinates of the origin while seeding the first tetrahedron.
    pub rel_tol: Real,
    /// Absolute tolerance on the penetration depth, also used to detect flat tetrahedra.
    pub abs_tol: Real,
    /// The maximum number of faces expanded before giving up.
    pub max_iterations: usize,
}

impl Default for EpaOptions {
    fn default() -> Self {
        let abs_tol = gjk::eps_tol();
        Self {
            rel_tol: ComplexField::sqrt(abs_tol),
            abs_tol,
            max_iterations: 100,
        }
    }
}

/// The penetration of two shapes computed by EPA.
///
/// Everything is expressed in the local-space of the first shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpaContact {
    /// The deepest point of the second shape inside of the first one, lying on the first shape.
    pub point1: Point<Real>,
    /// The deepest point of the first shape inside of the second one, lying on the second shape.
    pub point2: Point<Real>,
    /// The direction along which the second shape must be translated by `depth` to stop
    /// penetrating the first one.
    pub normal1: Unit<Vector<Real>>,
    /// The penetration depth (non-negative).
    pub depth: Real,
}

/// Errors raised by EPA.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum EpaError {
    /// The simplex could not be grown into a tetrahedron strictly enclosing the origin.
    #[error("the GJK simplex cannot be grown into a tetrahedron enclosing the origin.")]
    InvalidSeed,
    /// The faces visible from a new support point do not form a disk.
    #[error("the silhouette of the EPA polytope is not a simple loop.")]
    DegenerateHorizon,
    /// The iteration bound was reached. Holds the best estimate found.
    #[error("EPA did not converge within its iteration bound.")]
    NotConverged(EpaContact),
}

impl EpaError {
    /// The best contact estimate available despite this failure.
    ///
    /// This is the last estimate if EPA ran out of iterations, and a zero-depth contact between
    /// the witness points of the GJK simplex otherwise.
    pub fn fallback_contact(&self, pos12: &Isometry<Real>, simplex: &JohnsonSimplex) -> EpaContact {
        match self {
            EpaError::NotConverged(best) => *best,
            EpaError::InvalidSeed | EpaError::DegenerateHorizon => {
                let (point1, point2) = simplex.witness_points();
                EpaContact {
                    point1,
                    point2,
                    normal1: Unit::new_normalize(gjk::initial_direction(pos12)),
                    depth: 0.0,
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct SilhouetteEdge {
    entry: Index,
    edge: usize,
}

/// The Expanding Polytope Algorithm in 3D.
///
/// This structure owns all the scratch memory used by EPA so it can be reused across queries
/// without allocating. It is emptied at the start and at the end of every query.
#[derive(Default)]
pub struct Epa {
    pub(super) vertices: Vec<CsoPoint>,
    entries: Arena<Entry>,
    heap: BinaryHeap<WeightedValue<Index>>,
    silhouette: Vec<SilhouetteEdge>,
    stack: Vec<SilhouetteEdge>,
    removed: Vec<Index>,
    fan: Vec<Index>,
}

impl ScratchWorkspace for Epa {
    fn restore(&mut self) {
        self.vertices.clear();
        self.entries.clear();
        self.heap.clear();
        self.silhouette.clear();
        self.stack.clear();
        self.removed.clear();
        self.fan.clear();
    }
}

impl Epa {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the penetration depth and contact points of two overlapping shapes.
    ///
    /// `pos12` is the position of the second shape relative to the first one and `simplex`
    /// is the terminal simplex of a GJK run that returned
    /// [`GjkResult::Intersection`](crate::query::gjk::GjkResult::Intersection).
    /// The result is expressed in the local-space of the first shape.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &JohnsonSimplex,
        options: &EpaOptions,
    ) -> Result<EpaContact, EpaError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let mut epa = ScratchGuard::new(self);
        epa.seed_tetrahedron(pos12, g1, g2, simplex, options)?;
        epa.init_polytope();
        epa.expand(pos12, g1, g2, options)
    }

    fn init_polytope(&mut self) {
        // Positively oriented tetrahedron: every face is counterclockwise seen from outside.
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]];
        let ids = faces.map(|pts| self.entries.insert(Entry::new(&self.vertices, pts)));

        for a in 0..4 {
            for edge_a in 0..3 {
                let (start, end) = self.entries[ids[a]].edge(edge_a);

                for (b, id_b) in ids.iter().enumerate() {
                    if a == b {
                        continue;
                    }

                    if let Some(edge_b) = (0..3).find(|e| self.entries[*id_b].edge(*e) == (end, start)) {
                        let entry = &mut self.entries[ids[a]];
                        entry.adjacent[edge_a] = *id_b;
                        entry.twin_edge[edge_a] = edge_b;
                    }
                }
            }
        }

        for id in ids {
            let entry = &self.entries[id];

            if entry.is_internal() {
                self.heap.push(WeightedValue::new(id, -entry.dist_sq));
            }
        }

        #[cfg(debug_assertions)]
        self.check_topology();
    }

    fn expand<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        options: &EpaOptions,
    ) -> Result<EpaContact, EpaError>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        // Smallest distance between the origin and a support plane of the Minkowski difference.
        let mut upper_bound = Real::MAX;
        let mut best = None;
        let mut niter = 0;

        while let Some(top) = self.heap.pop() {
            let face_id = top.value;
            let face = match self.entries.get(face_id) {
                Some(face) if face.valid => face.clone(),
                _ => continue,
            };

            let dist = ComplexField::sqrt(face.dist_sq);

            // Every remaining face is farther than the boundary of the Minkowski difference.
            if best.is_some() && dist > upper_bound {
                break;
            }

            let contact = self.contact(&face);
            best = Some(contact);

            if niter == options.max_iterations {
                log::debug!(
                    "EPA did not converge after {} iterations.",
                    options.max_iterations
                );
                return Err(EpaError::NotConverged(contact));
            }
            niter += 1;

            let support = CsoPoint::from_shapes(pos12, g1, g2, &face.normal);
            upper_bound = upper_bound.min(face.normal.dot(&support.point.coords));

            if upper_bound - dist <= options.rel_tol * dist + options.abs_tol {
                return Ok(contact);
            }

            // The support point is already a vertex: the polytope cannot grow anymore.
            if self.vertices.iter().any(|v| v.id == support.id) {
                return Ok(contact);
            }

            let support_id = self.vertices.len();
            self.vertices.push(support);
            self.compute_silhouette(face_id, support_id)?;
            self.fan_silhouette(support_id, upper_bound * upper_bound);

            #[cfg(debug_assertions)]
            self.check_topology();
        }

        best.ok_or(EpaError::InvalidSeed)
    }

    fn contact(&self, face: &Entry) -> EpaContact {
        let (point1, point2) = face.closest_points(&self.vertices);
        EpaContact {
            point1,
            point2,
            normal1: Unit::new_unchecked(face.normal),
            depth: ComplexField::sqrt(face.dist_sq),
        }
    }

    /// Invalidates every face visible from the support point and collects the edges separating
    /// them from the others, in counterclockwise order.
    fn compute_silhouette(&mut self, face_id: Index, support_id: usize) -> Result<(), EpaError> {
        let support = self.vertices[support_id].point;
        self.silhouette.clear();
        self.stack.clear();
        self.removed.clear();

        let face = &mut self.entries[face_id];
        face.valid = false;
        self.removed.push(face_id);

        for edge in (0..3).rev() {
            self.stack.push(SilhouetteEdge {
                entry: face.adjacent[edge],
                edge: face.twin_edge[edge],
            });
        }

        while let Some(curr) = self.stack.pop() {
            let Some(entry) = self.entries.get_mut(curr.entry) else {
                log::debug!("EPA: dangling face adjacency.");
                return Err(EpaError::DegenerateHorizon);
            };

            if !entry.valid {
                continue;
            }

            if !entry.can_be_seen_by(&self.vertices, &support) {
                self.silhouette.push(curr);
                continue;
            }

            entry.valid = false;
            self.removed.push(curr.entry);

            for k in (1..3).rev() {
                let edge = (curr.edge + k) % 3;
                self.stack.push(SilhouetteEdge {
                    entry: entry.adjacent[edge],
                    edge: entry.twin_edge[edge],
                });
            }
        }

        self.check_silhouette()?;

        for id in self.removed.drain(..) {
            let _ = self.entries.remove(id);
        }

        Ok(())
    }

    // The silhouette must be a simple loop: each edge ends where the next one starts
    // (edges are oriented as in the faces kept on the polytope).
    fn check_silhouette(&self) -> Result<(), EpaError> {
        let n = self.silhouette.len();

        if n < 3 {
            log::debug!("EPA: silhouette with only {} edges.", n);
            return Err(EpaError::DegenerateHorizon);
        }

        for (k, curr) in self.silhouette.iter().enumerate() {
            let next = &self.silhouette[(k + 1) % n];
            let (start, _) = self.entries[curr.entry].edge(curr.edge);
            let (_, next_end) = self.entries[next.entry].edge(next.edge);

            if next_end != start {
                log::debug!("EPA: the silhouette is not a closed loop.");
                return Err(EpaError::DegenerateHorizon);
            }

            let repeated = self.silhouette[k + 1..]
                .iter()
                .any(|other| self.entries[other.entry].edge(other.edge).0 == start);

            if repeated {
                log::debug!("EPA: the silhouette goes through the same vertex twice.");
                return Err(EpaError::DegenerateHorizon);
            }
        }

        Ok(())
    }

    /// Closes the polytope with a fan of faces linking the support point to the silhouette.
    fn fan_silhouette(&mut self, support_id: usize, max_dist_sq: Real) {
        self.fan.clear();

        for curr in &self.silhouette {
            let (start, end) = self.entries[curr.entry].edge(curr.edge);
            let mut entry = Entry::new(&self.vertices, [end, start, support_id]);
            entry.adjacent[0] = curr.entry;
            entry.twin_edge[0] = curr.edge;

            let new_id = self.entries.insert(entry);
            let kept = &mut self.entries[curr.entry];
            kept.adjacent[curr.edge] = new_id;
            kept.twin_edge[curr.edge] = 0;
            self.fan.push(new_id);
        }

        let n = self.fan.len();

        for k in 0..n {
            let curr = self.fan[k];
            let next = self.fan[(k + 1) % n];

            let entry = &mut self.entries[curr];
            entry.adjacent[1] = next;
            entry.twin_edge[1] = 2;

            let entry = &mut self.entries[next];
            entry.adjacent[2] = curr;
            entry.twin_edge[2] = 1;
        }

        for id in &self.fan {
            let entry = &self.entries[*id];

            if entry.is_internal() && entry.dist_sq <= max_dist_sq {
                self.heap.push(WeightedValue::new(*id, -entry.dist_sq));
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_topology(&self) {
        for (id, entry) in self.entries.iter() {
            for edge in 0..3 {
                let adj = &self.entries[entry.adjacent[edge]];
                let twin = entry.twin_edge[edge];
                let (start, end) = entry.edge(edge);

                debug_assert_eq!(adj.adjacent[twin], id, "Broken EPA face adjacency.");
                debug_assert_eq!(adj.edge(twin), (end, start), "Broken EPA twin edge.");
            }
        }
    }
}

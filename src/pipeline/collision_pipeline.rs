use crate::math::{Isometry, Real};
use crate::partitioning::{Dbvt, DbvtError, DbvtHandle, DbvtWorkspace};
use crate::query::details::penetration_support_map_support_map;
use crate::query::epa::{Epa, EpaOptions};
use crate::query::gjk::{self, GjkOptions, GjkResult, JohnsonSimplex};
use crate::query::ContactManifold;
use crate::shape::SharedShape;
use crate::utils::SortedPair;
use alloc::vec::Vec;
use slab::Slab;

/// The handle of a proxy registered in a [`CollisionPipeline`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyHandle(pub u32);

/// Errors raised by the collision pipeline.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// The broad-phase cannot hold more proxies.
    #[error(transparent)]
    Dbvt(#[from] DbvtError),
    /// No proxy is registered with this handle.
    #[error("no proxy is registered with the handle {0:?}.")]
    UnknownProxy(ProxyHandle),
}

/// Parameters of the collision pipeline.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PipelineOptions {
    /// Options of the GJK runs.
    pub gjk: GjkOptions,
    /// Options of the EPA runs.
    pub epa: EpaOptions,
    /// The maximum number of broad-phase pairs handed to the narrow-phase by a single step.
    ///
    /// The pairs in excess are dropped for this step.
    pub max_pairs_per_step: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            gjk: GjkOptions::default(),
            epa: EpaOptions::default(),
            max_pairs_per_step: usize::MAX,
        }
    }
}

/// A shape registered in the collision pipeline.
#[derive(Clone)]
pub struct Proxy {
    /// The shape of this proxy.
    pub shape: SharedShape,
    /// The world-space position of this proxy.
    pub position: Isometry<Real>,
    leaf: DbvtHandle,
}

impl Proxy {
    /// The broad-phase leaf of this proxy.
    #[inline]
    pub fn leaf(&self) -> DbvtHandle {
        self.leaf
    }
}

/// The narrow-phase outcome for a pair of proxies with overlapping AABBs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PairEventKind {
    /// The shapes are disjoint.
    Separated {
        /// The distance between both shapes.
        distance: Real,
    },
    /// The shapes are penetrating. The manifold is expressed in world-space, its normal
    /// pointing from the first proxy toward the second one.
    Penetrating(ContactManifold),
}

/// The narrow-phase result for one broad-phase pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairEvent {
    /// The first proxy of the pair (the one with the smallest handle).
    pub proxy1: ProxyHandle,
    /// The second proxy of the pair.
    pub proxy2: ProxyHandle,
    /// What the narrow-phase found.
    pub kind: PairEventKind,
}

/// Broad-phase and narrow-phase collision detection for a set of convex proxies.
///
/// # Example
///
/// ```rust
/// # #[cfg(all(feature = "dim3", feature = "f32"))] {
/// use kollide3d::math::{Isometry, Vector};
/// use kollide3d::pipeline::{CollisionPipeline, PairEventKind, PipelineOptions};
/// use kollide3d::shape::{Cuboid, SharedShape};
/// use std::sync::Arc;
///
/// let cube: SharedShape = Arc::new(Cuboid::new(Vector::repeat(1.0)));
/// let mut pipeline = CollisionPipeline::new(16, PipelineOptions::default());
/// pipeline.insert_proxy(cube.clone(), Isometry::identity()).unwrap();
/// pipeline.insert_proxy(cube, Isometry::translation(1.5, 0.0, 0.0)).unwrap();
///
/// let mut events = Vec::new();
/// pipeline.step(&mut events);
///
/// assert_eq!(events.len(), 1);
/// assert!(matches!(events[0].kind, PairEventKind::Penetrating(_)));
/// # }
/// ```
pub struct CollisionPipeline {
    dbvt: Dbvt,
    proxies: Slab<Proxy>,
    workspace: DbvtWorkspace,
    epa: Epa,
    pairs: Vec<SortedPair<u32>>,
    options: PipelineOptions,
}

impl CollisionPipeline {
    /// Creates an empty pipeline able to hold up to `max_proxies` proxies.
    pub fn new(max_proxies: usize, options: PipelineOptions) -> Self {
        Self {
            dbvt: Dbvt::with_capacity(max_proxies),
            proxies: Slab::with_capacity(max_proxies),
            workspace: DbvtWorkspace::with_capacity(max_proxies),
            epa: Epa::new(),
            pairs: Vec::new(),
            options,
        }
    }

    /// The parameters of this pipeline.
    #[inline]
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Mutable reference to the parameters of this pipeline.
    #[inline]
    pub fn options_mut(&mut self) -> &mut PipelineOptions {
        &mut self.options
    }

    /// The broad-phase tree.
    #[inline]
    pub fn dbvt(&self) -> &Dbvt {
        &self.dbvt
    }

    /// The number of proxies registered in this pipeline.
    #[inline]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Does this pipeline have no proxy?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Registers a new proxy.
    ///
    /// Nothing is modified if the broad-phase is full.
    pub fn insert_proxy(
        &mut self,
        shape: SharedShape,
        position: Isometry<Real>,
    ) -> Result<ProxyHandle, PipelineError> {
        let entry = self.proxies.vacant_entry();
        let key = entry.key() as u32;
        let aabb = shape.compute_aabb(&position);
        let leaf = self.dbvt.insert(key, aabb, &mut self.workspace)?;
        let _ = entry.insert(Proxy {
            shape,
            position,
            leaf,
        });

        Ok(ProxyHandle(key))
    }

    /// Moves a proxy, refitting its broad-phase AABB.
    pub fn set_position(
        &mut self,
        handle: ProxyHandle,
        position: Isometry<Real>,
    ) -> Result<(), PipelineError> {
        let proxy = self
            .proxies
            .get_mut(handle.0 as usize)
            .ok_or(PipelineError::UnknownProxy(handle))?;
        proxy.position = position;
        let aabb = proxy.shape.compute_aabb(&position);
        self.dbvt.refit(proxy.leaf, aabb);
        Ok(())
    }

    /// Unregisters a proxy, returning it if it existed.
    pub fn remove_proxy(&mut self, handle: ProxyHandle) -> Option<Proxy> {
        if !self.proxies.contains(handle.0 as usize) {
            return None;
        }

        let proxy = self.proxies.remove(handle.0 as usize);
        let _ = self.dbvt.remove(proxy.leaf);
        Some(proxy)
    }

    /// The proxy with the given handle.
    #[inline]
    pub fn proxy(&self, handle: ProxyHandle) -> Option<&Proxy> {
        self.proxies.get(handle.0 as usize)
    }

    /// Iterates through every registered proxy.
    pub fn proxies(&self) -> impl Iterator<Item = (ProxyHandle, &Proxy)> {
        self.proxies
            .iter()
            .map(|(key, proxy)| (ProxyHandle(key as u32), proxy))
    }

    /// Runs the broad-phase and the narrow-phase, writing one event per pair of proxies with
    /// overlapping AABBs into `events`.
    ///
    /// `events` is cleared first. At most `max_pairs_per_step` pairs are processed.
    pub fn step(&mut self, events: &mut Vec<PairEvent>) {
        events.clear();
        self.dbvt
            .query_overlap_pairs(&mut self.workspace, &mut self.pairs);

        if self.pairs.len() > self.options.max_pairs_per_step {
            log::debug!(
                "The broad-phase found {} pairs, only {} are handed to the narrow-phase.",
                self.pairs.len(),
                self.options.max_pairs_per_step
            );
        }

        for pair in self.pairs.iter().take(self.options.max_pairs_per_step) {
            let (id1, id2) = pair.as_tuple();
            let (Some(proxy1), Some(proxy2)) = (
                self.proxies.get(id1 as usize),
                self.proxies.get(id2 as usize),
            ) else {
                debug_assert!(false, "Broad-phase leaf without proxy.");
                continue;
            };

            if let Some(kind) = narrow_phase(proxy1, proxy2, &self.options, &mut self.epa) {
                events.push(PairEvent {
                    proxy1: ProxyHandle(id1),
                    proxy2: ProxyHandle(id2),
                    kind,
                });
            }
        }
    }
}

fn narrow_phase(
    proxy1: &Proxy,
    proxy2: &Proxy,
    options: &PipelineOptions,
    epa: &mut Epa,
) -> Option<PairEventKind> {
    let pos12 = proxy1.position.inv_mul(&proxy2.position);
    let mut simplex = JohnsonSimplex::new();

    match gjk::closest_points(
        &pos12,
        &*proxy1.shape,
        &*proxy2.shape,
        &options.gjk,
        true,
        &mut simplex,
    ) {
        GjkResult::Intersection => {
            let manifold = penetration_support_map_support_map(
                &pos12,
                &*proxy1.shape,
                &*proxy2.shape,
                &simplex,
                &options.epa,
                epa,
            );
            Some(PairEventKind::Penetrating(
                manifold.transform_by(&proxy1.position),
            ))
        }
        GjkResult::ClosestPoints { distance, .. } => Some(PairEventKind::Separated { distance }),
        // Not returned when the exact distance is requested.
        GjkResult::Separated => None,
    }
}

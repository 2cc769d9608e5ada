//! Per-frame orchestration of the broad-phase and narrow-phase.
//!
//! The [`CollisionPipeline`] keeps the AABB of every proxy in a [`Dbvt`](crate::partitioning::Dbvt),
//! asks it for the pairs of proxies with overlapping boxes, and runs GJK (then EPA when GJK
//! finds an intersection) on each of these pairs.

pub use self::collision_pipeline::{
    CollisionPipeline, PairEvent, PairEventKind, PipelineError, PipelineOptions, Proxy,
    ProxyHandle,
};

mod collision_pipeline;

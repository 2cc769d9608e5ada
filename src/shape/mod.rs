//! Shapes supported by kollide3d.

pub use self::convex_vertex_set::{ConvexVertexSet, ShapeError};
pub use self::cuboid::Cuboid;
#[doc(inline)]
pub use self::support_map::SupportMap;

mod convex_vertex_set;
mod cuboid;
mod support_map;

/// A reference-counted convex shape, as stored by the collision pipeline.
pub type SharedShape = alloc::sync::Arc<dyn SupportMap + Send + Sync>;

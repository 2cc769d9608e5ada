//! The GJK algorithm for distance computation.

pub use self::cso_point::CsoPoint;
pub use self::gjk::*;
pub use self::johnson_simplex::{JohnsonSimplex, SimplexVertex};

mod cso_point;
mod gjk;
mod johnson_simplex;

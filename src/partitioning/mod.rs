//! Spatial partitioning tools.

pub use self::dbvt::{Dbvt, DbvtError, DbvtHandle, DbvtWorkspace};

mod dbvt;

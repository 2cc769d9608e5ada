//! A dynamic bounding volume tree used as broad-phase.

pub use self::dbvt_tree::{Dbvt, DbvtError, DbvtHandle, DbvtWorkspace};

mod dbvt_insert;
mod dbvt_remove;
mod dbvt_rotate;
mod dbvt_traverse;
mod dbvt_tree;
mod dbvt_validation;

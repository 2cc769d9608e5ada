//! Various unsorted geometrical and logical operators.

pub use self::scratch::{ScratchGuard, ScratchScope, ScratchStack, ScratchWorkspace};
pub use self::sorted_pair::SortedPair;
pub(crate) use self::weighted_value::WeightedValue;

mod scratch;
mod sorted_pair;
mod weighted_value;

//! Implementation details of the `distance` function.

pub use self::distance_support_map_support_map::{distance, distance_support_map_support_map};

mod distance_support_map_support_map;

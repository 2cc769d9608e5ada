//! Implementation details of the `closest_points` function.

pub use self::closest_points::ClosestPoints;
pub use self::closest_points_support_map_support_map::{
    closest_points, closest_points_support_map_support_map,
};

mod closest_points;
mod closest_points_support_map_support_map;

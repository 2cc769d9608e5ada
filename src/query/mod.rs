//! Non-persistent geometric queries.
//!
//! # General cases
//! The most general methods provided by this module are:
//!
//! * [`query::closest_points()`] to compute the closest points between two shapes.
//! * [`query::distance()`] to compute the distance between two shapes.
//! * [`query::contact()`] to compute the penetration depth and contact points of two
//!   overlapping shapes.
//! * [`query::intersection_test()`] to determine if two shapes are intersecting or not.
//!
//! They all take world-space positions and return world-space results.
//!
//! # Specific cases
//! The functions exported by the `details` submodule work in the local-space of the first
//! shape, given the position `pos12` of the second shape relative to the first one. They
//! have the form `[operation]_support_map_support_map()`.
//!
//! [`query::closest_points()`]: crate::query::closest_points()
//! [`query::distance()`]: crate::query::distance()
//! [`query::contact()`]: crate::query::contact()
//! [`query::intersection_test()`]: crate::query::intersection_test()

pub use self::closest_points::{closest_points, ClosestPoints};
pub use self::contact::{contact, ContactManifold};
pub use self::distance::distance;
pub use self::intersection_test::intersection_test;

pub mod closest_points;
pub mod contact;
mod distance;
pub mod epa;
pub mod gjk;
mod intersection_test;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::closest_points_support_map_support_map;
    pub use super::contact::{
        contact_support_map_support_map, penetration_support_map_support_map,
    };
    pub use super::distance::distance_support_map_support_map;
    pub use super::intersection_test::intersection_test_support_map_support_map;
}

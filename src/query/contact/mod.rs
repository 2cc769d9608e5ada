//! Implementation details of the `contact` function.

pub use self::contact_manifold::ContactManifold;
pub use self::contact_support_map_support_map::{
    contact, contact_support_map_support_map, penetration_support_map_support_map,
};

mod contact_manifold;
mod contact_support_map_support_map;

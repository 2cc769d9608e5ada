//! Implementation details of the `intersection_test` function.

pub use self::intersection_test_support_map_support_map::{
    intersection_test, intersection_test_support_map_support_map,
};

mod intersection_test_support_map_support_map;

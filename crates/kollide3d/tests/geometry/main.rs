#[macro_use]
extern crate approx;
extern crate nalgebra as na;

mod dbvt_overlap_pairs;
mod epa3;
mod epa_random_convex;
mod gjk_cuboid_cuboid;
mod pipeline_step;

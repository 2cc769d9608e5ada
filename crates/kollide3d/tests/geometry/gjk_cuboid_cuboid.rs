use kollide3d::math::{Isometry, Real, Vector};
use kollide3d::query::{self, ClosestPoints};
use kollide3d::shape::Cuboid;
use na::Vector3;

#[test]
fn cuboid_cuboid_distance() {
    let c = Cuboid::new(Vector::repeat(1.0));
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(3.0, 0.0, 0.0);
    let options = Default::default();

    assert_relative_eq!(query::distance(&m1, &c, &m2, &c, &options), 1.0, epsilon = 1.0e-5);
    assert!(!query::intersection_test(&m1, &c, &m2, &c, &options));

    match query::closest_points(&m1, &c, &m2, &c, &options) {
        ClosestPoints::Disjoint {
            point1,
            point2,
            distance,
        } => {
            assert_relative_eq!(distance, 1.0, epsilon = 1.0e-5);
            assert_relative_eq!(point1.x, 1.0, epsilon = 1.0e-5);
            assert_relative_eq!(point2.x, 2.0, epsilon = 1.0e-5);
        }
        ClosestPoints::Intersecting => panic!("The cuboids should be disjoint."),
    }
}

#[test]
fn cuboid_cuboid_overlap() {
    let c = Cuboid::new(Vector::repeat(1.0));
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(1.5, 0.0, 0.0);
    let options = Default::default();

    assert!(query::intersection_test(&m1, &c, &m2, &c, &options));
    assert_eq!(query::distance(&m1, &c, &m2, &c, &options), 0.0);
    assert_eq!(
        query::closest_points(&m1, &c, &m2, &c, &options),
        ClosestPoints::Intersecting
    );
}

#[test]
fn distance_is_frame_independent() {
    // The same configuration, expressed in two different world frames.
    let c1 = Cuboid::new(Vector::new(1.0, 0.5, 2.0));
    let c2 = Cuboid::new(Vector::new(0.3, 0.3, 0.3));
    let m1 = Isometry::new(Vector::zeros(), Vector::new(0.1, 0.2, 0.3));
    let m2 = Isometry::new(Vector::new(4.0, 1.0, -1.0), Vector::new(-0.4, 0.0, 0.7));
    let shift = Isometry::new(Vector3::new(-10.0, 3.0, 5.0), Vector3::new(1.0, 0.5, 0.0));
    let options = Default::default();

    let d1 = query::distance(&m1, &c1, &m2, &c2, &options);
    let d2 = query::distance(&(shift * m1), &c1, &(shift * m2), &c2, &options);
    assert!(d1 > 0.0);
    assert_relative_eq!(d1, d2, epsilon = 1.0e-4);

    // Swapping both shapes gives the same distance.
    let d3 = query::distance(&m2, &c2, &m1, &c1, &options);
    assert_relative_eq!(d1, d3, epsilon = 1.0e-4);
}

#[test]
fn distance_to_rotated_cuboid_vertex() {
    // A cuboid rotated by 45° around z exposes its edge to the first one.
    let c = Cuboid::new(Vector::repeat(1.0));
    let angle = core::f64::consts::FRAC_PI_4 as Real;
    let m1 = Isometry::identity();
    let m2 = Isometry::new(Vector::new(4.0, 0.0, 0.0), Vector::z() * angle);

    match query::closest_points(&m1, &c, &m2, &c, &Default::default()) {
        ClosestPoints::Disjoint {
            point2, distance, ..
        } => {
            let expected = 3.0 - (2.0 as Real).sqrt();
            assert_relative_eq!(distance, expected, epsilon = 1.0e-4);
            assert_relative_eq!(point2.x, 4.0 - (2.0 as Real).sqrt(), epsilon = 1.0e-4);
            assert_relative_eq!(point2.y, 0.0, epsilon = 1.0e-4);
        }
        ClosestPoints::Intersecting => panic!("The cuboids should be disjoint."),
    }
}

use kollide3d::math::{Isometry, Point, Real, Vector};
use kollide3d::query::{self, epa::Epa, gjk::GjkOptions};
use kollide3d::shape::{ConvexVertexSet, Cuboid};

#[test]
#[allow(non_snake_case)]
fn cuboid_cuboid_EPA() {
    let c = Cuboid::new(Vector::new(2.0, 1.0, 1.0));
    let m1 = Isometry::translation(3.5, 0.0, 0.0);
    let m2 = Isometry::identity();
    let mut epa = Epa::new();

    let res = query::details::contact_support_map_support_map(
        &m1.inv_mul(&m2),
        &c,
        &c,
        &GjkOptions::default(),
        &Default::default(),
        &mut epa,
    )
    .expect("Penetration not found.");
    assert!(res.converged);
    assert_relative_eq!(res.depth, 0.5, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal1, -Vector::x(), epsilon = 1.0e-5);

    let m1 = Isometry::translation(0.0, 0.2, 0.0);
    let res = query::details::contact_support_map_support_map(
        &m1.inv_mul(&m2),
        &c,
        &c,
        &GjkOptions::default(),
        &Default::default(),
        &mut epa,
    )
    .expect("Penetration not found.");
    assert_relative_eq!(res.depth, 1.8, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal1, -Vector::y(), epsilon = 1.0e-5);
}

#[test]
fn unit_cubes_world_space_contact() {
    let c = Cuboid::new(Vector::repeat(0.5));
    let m1 = Isometry::translation(10.0, -3.0, 2.0);
    let m2 = Isometry::translation(10.5, -3.0, 2.0);
    let mut epa = Epa::new();

    let res = query::contact(
        &m1,
        &c,
        &m2,
        &c,
        &Default::default(),
        &Default::default(),
        &mut epa,
    )
    .expect("Penetration not found.");

    assert!(res.converged);
    assert_relative_eq!(res.depth, 0.5, epsilon = 1.0e-5);
    assert_relative_eq!(*res.normal1, Vector::x(), epsilon = 1.0e-5);
    assert_relative_eq!(res.point1.x, 10.5, epsilon = 1.0e-5);
    assert_relative_eq!(res.point2.x, 10.0, epsilon = 1.0e-5);

    let far = Isometry::translation(12.0, -3.0, 2.0);
    assert!(query::contact(
        &m1,
        &c,
        &far,
        &c,
        &Default::default(),
        &Default::default(),
        &mut epa
    )
    .is_none());
}

#[test]
fn touching_cubes_have_no_depth() {
    let c = Cuboid::new(Vector::repeat(1.0));
    let m1 = Isometry::identity();
    let m2 = Isometry::translation(2.0, 2.0, 2.0);
    let mut epa = Epa::new();

    if let Some(res) = query::contact(
        &m1,
        &c,
        &m2,
        &c,
        &Default::default(),
        &Default::default(),
        &mut epa,
    ) {
        assert!(res.depth.is_finite());
        assert_relative_eq!(res.depth, 0.0, epsilon = 1.0e-3);
    }
}

#[test]
fn crossing_flat_shapes_do_not_crash() {
    // Two crossing segments: their Minkowski difference is flat, so no tetrahedron can
    // enclose the origin.
    let s1 = ConvexVertexSet::new(vec![Point::new(-1.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)])
        .unwrap();
    let s2 = ConvexVertexSet::new(vec![Point::new(0.0, -1.0, 0.0), Point::new(0.0, 1.0, 0.0)])
        .unwrap();
    let pos = Isometry::identity();
    let mut epa = Epa::new();

    let res = query::contact(
        &pos,
        &s1,
        &pos,
        &s2,
        &Default::default(),
        &Default::default(),
        &mut epa,
    )
    .expect("The segments intersect.");

    assert!(res.depth.is_finite());
    assert!(res.depth >= 0.0);
    assert_relative_eq!(res.depth, 0.0, epsilon = 1.0e-3);
}

#[test]
fn unit_cubes_on_a_grid_of_offsets() {
    let c = Cuboid::new(Vector::repeat(0.5));
    let mut epa = Epa::new();

    for i in -4..=4 {
        for j in -4..=4 {
            for k in -4..=4 {
                let offset = Vector::new(i as Real, j as Real, k as Real) * 0.2;
                let res = query::contact(
                    &Isometry::identity(),
                    &c,
                    &Isometry::translation(offset.x, offset.y, offset.z),
                    &c,
                    &Default::default(),
                    &Default::default(),
                    &mut epa,
                )
                .expect("Penetration not found.");

                // The smallest overlap along the three axes.
                let expected = 1.0 - offset.abs().max();
                assert!(res.converged, "offset: {:?}", offset);
                assert_relative_eq!(res.depth, expected, epsilon = 1.0e-4);
            }
        }
    }
}

#[test]
fn unit_cubes_with_the_origin_on_a_simplex_face() {
    let c = Cuboid::new(Vector::repeat(0.5));
    let mut epa = Epa::new();

    let res = query::details::contact_support_map_support_map(
        &Isometry::translation(0.8, 0.4, 0.2),
        &c,
        &c,
        &GjkOptions::default(),
        &Default::default(),
        &mut epa,
    )
    .expect("Penetration not found.");

    assert!(res.converged);
    assert_relative_eq!(res.depth, 0.2, epsilon = 1.0e-4);
    assert_relative_eq!(*res.normal1, Vector::x(), epsilon = 1.0e-4);
}

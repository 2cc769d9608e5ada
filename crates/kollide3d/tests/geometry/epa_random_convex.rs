use kollide3d::math::{Isometry, Point, Real, Vector};
use kollide3d::query::{self, epa::Epa, gjk::GjkOptions};
use kollide3d::shape::{ConvexVertexSet, Cuboid};

fn random_point_cloud(rng: &mut oorandom::Rand32, radius: Real) -> ConvexVertexSet {
    let points = (0..12)
        .map(|_| {
            Point::new(
                (rng.rand_float() as Real * 2.0 - 1.0) * radius,
                (rng.rand_float() as Real * 2.0 - 1.0) * radius,
                (rng.rand_float() as Real * 2.0 - 1.0) * radius,
            )
        })
        .collect();
    ConvexVertexSet::new(points).unwrap()
}

fn random_offset(rng: &mut oorandom::Rand32, extent: Real) -> Vector<Real> {
    Vector::new(
        (rng.rand_float() as Real * 2.0 - 1.0) * extent,
        (rng.rand_float() as Real * 2.0 - 1.0) * extent,
        (rng.rand_float() as Real * 2.0 - 1.0) * extent,
    )
}

#[test]
fn penetration_depth_is_the_minimal_separating_translation() {
    let mut rng = oorandom::Rand32::new(0x5eed);
    let gjk_options = GjkOptions::default();
    let mut epa = Epa::new();
    let mut checked = 0;

    for _ in 0..200 {
        let g1 = random_point_cloud(&mut rng, 1.0);
        let g2 = random_point_cloud(&mut rng, 1.0);
        let pos1 = Isometry::identity();
        let pos2 = Isometry::new(random_offset(&mut rng, 0.5), Vector::zeros());

        let Some(contact) = query::contact(
            &pos1,
            &g1,
            &pos2,
            &g2,
            &gjk_options,
            &Default::default(),
            &mut epa,
        ) else {
            continue;
        };

        assert!(contact.depth.is_finite());
        assert!(contact.depth >= 0.0);

        if !contact.converged || contact.depth < 0.2 {
            continue;
        }

        checked += 1;

        // Pushing the second shape slightly further than the depth separates both shapes.
        let pushed = Isometry::from_parts(
            (pos2.translation.vector + *contact.normal1 * (contact.depth * 1.01 + 1.0e-2)).into(),
            pos2.rotation,
        );
        assert!(!query::intersection_test(
            &pos1,
            &g1,
            &pushed,
            &g2,
            &gjk_options
        ));

        // No shorter translation along the normal does.
        let short = Isometry::from_parts(
            (pos2.translation.vector + *contact.normal1 * (contact.depth * 0.8)).into(),
            pos2.rotation,
        );
        assert!(query::intersection_test(
            &pos1,
            &g1,
            &short,
            &g2,
            &gjk_options
        ));
    }

    assert!(checked > 10, "Too few penetrating configurations: {}", checked);
}

#[test]
fn penetration_is_symmetric() {
    let mut rng = oorandom::Rand32::new(42);
    let c1 = Cuboid::new(Vector::new(1.0, 0.7, 0.4));
    let c2 = Cuboid::new(Vector::new(0.5, 0.9, 0.8));
    let mut epa = Epa::new();

    for _ in 0..50 {
        let pos1 = Isometry::new(random_offset(&mut rng, 0.3), random_offset(&mut rng, 1.0));
        let pos2 = Isometry::new(random_offset(&mut rng, 0.3), random_offset(&mut rng, 1.0));

        let c12 = query::contact(
            &pos1,
            &c1,
            &pos2,
            &c2,
            &Default::default(),
            &Default::default(),
            &mut epa,
        )
        .expect("The cuboids overlap.");
        let c21 = query::contact(
            &pos2,
            &c2,
            &pos1,
            &c1,
            &Default::default(),
            &Default::default(),
            &mut epa,
        )
        .expect("The cuboids overlap.");

        if c12.converged && c21.converged {
            assert_relative_eq!(c12.depth, c21.depth, epsilon = 1.0e-2);
        }
    }
}

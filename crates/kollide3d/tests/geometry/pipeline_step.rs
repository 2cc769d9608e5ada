use kollide3d::math::{Isometry, Point, Real, Vector};
use kollide3d::pipeline::{CollisionPipeline, PairEvent, PairEventKind, PipelineOptions};
use kollide3d::shape::{ConvexVertexSet, Cuboid, SharedShape};
use std::sync::Arc;

fn build_scene() -> (CollisionPipeline, Vec<PairEvent>) {
    let mut rng = oorandom::Rand32::new(1234);
    let mut pipeline = CollisionPipeline::new(128, PipelineOptions::default());
    let cube: SharedShape = Arc::new(Cuboid::new(Vector::repeat(0.5)));
    let tetra: SharedShape = Arc::new(
        ConvexVertexSet::new(vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ])
        .unwrap(),
    );

    for i in 0..100 {
        let shape = if i % 3 == 0 { tetra.clone() } else { cube.clone() };
        let translation = Vector::new(
            rng.rand_float() as Real * 10.0,
            rng.rand_float() as Real * 10.0,
            rng.rand_float() as Real * 2.0,
        );
        let rotation = Vector::new(
            rng.rand_float() as Real,
            rng.rand_float() as Real,
            rng.rand_float() as Real,
        );
        let _ = pipeline
            .insert_proxy(shape, Isometry::new(translation, rotation))
            .unwrap();
    }

    let mut events = Vec::new();
    pipeline.step(&mut events);
    (pipeline, events)
}

#[test]
fn step_is_deterministic() {
    let (_, events1) = build_scene();
    let (mut pipeline, events2) = build_scene();
    assert!(!events1.is_empty());
    assert_eq!(events1, events2);

    // Stepping again without changes gives the same events.
    let mut events3 = Vec::new();
    pipeline.step(&mut events3);
    assert_eq!(events2, events3);
}

#[test]
fn step_events_are_consistent() {
    let (_, events) = build_scene();

    for event in &events {
        assert!(event.proxy1 < event.proxy2);

        match event.kind {
            PairEventKind::Separated { distance } => assert!(distance > 0.0),
            PairEventKind::Penetrating(manifold) => {
                assert!(manifold.depth >= 0.0);
                assert!(manifold.depth.is_finite());
            }
        }
    }
}

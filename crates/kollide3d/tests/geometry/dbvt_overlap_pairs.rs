use kollide3d::bounding_volume::Aabb;
use kollide3d::math::{Point, Real, Vector};
use kollide3d::partitioning::{Dbvt, DbvtError, DbvtHandle, DbvtWorkspace};
use kollide3d::utils::SortedPair;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeSet;

fn random_aabb(rng: &mut StdRng) -> Aabb {
    let center = Point::new(
        rng.gen_range(-30.0..30.0),
        rng.gen_range(-30.0..30.0),
        rng.gen_range(-5.0..5.0),
    );
    let half_extents = Vector::new(
        rng.gen_range(0.5..3.0),
        rng.gen_range(0.5..3.0),
        rng.gen_range(0.5..3.0),
    );
    Aabb::new(center, half_extents)
}

fn brute_force(aabbs: &[Option<(DbvtHandle, Aabb)>]) -> BTreeSet<SortedPair<u32>> {
    let mut pairs = BTreeSet::new();

    for i in 0..aabbs.len() {
        for j in i + 1..aabbs.len() {
            if let (Some((_, a)), Some((_, b))) = (&aabbs[i], &aabbs[j]) {
                if a.intersects(b) {
                    let _ = pairs.insert(SortedPair::new(i as u32, j as u32));
                }
            }
        }
    }

    pairs
}

#[test]
fn overlap_pairs_match_brute_force_over_many_frames() {
    let capacity = 300;
    let mut rng = StdRng::seed_from_u64(0xdb57);
    let mut tree = Dbvt::with_capacity(capacity);
    let mut workspace = DbvtWorkspace::new();
    let mut aabbs: Vec<Option<(DbvtHandle, Aabb)>> = vec![None; capacity];
    let mut pairs = Vec::new();

    for _frame in 0..50 {
        // One mutation pass, then one query pass.
        for _ in 0..40 {
            let i = rng.gen_range(0..capacity);

            match aabbs[i] {
                None => {
                    let aabb = random_aabb(&mut rng);
                    let handle = tree.insert(i as u32, aabb, &mut workspace).unwrap();
                    aabbs[i] = Some((handle, aabb));
                }
                Some((handle, aabb)) => {
                    if rng.gen_bool(0.3) {
                        assert_eq!(tree.remove(handle), i as u32);
                        aabbs[i] = None;
                    } else {
                        let moved = aabb.translated(&Vector::new(
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(-1.0..1.0),
                            0.0,
                        ));
                        tree.refit(handle, moved);
                        aabbs[i] = Some((handle, moved));
                    }
                }
            }
        }

        tree.query_overlap_pairs(&mut workspace, &mut pairs);
        let found: BTreeSet<_> = pairs.iter().copied().collect();
        assert_eq!(found.len(), pairs.len());
        assert_eq!(found, brute_force(&aabbs));

        let live = aabbs.iter().filter(|a| a.is_some()).count();
        assert_eq!(tree.proxy_count(), live);
        assert_eq!(tree.node_count(), (2 * live).saturating_sub(1));
    }

    tree.assert_well_formed();
}

#[test]
fn insert_into_full_tree_fails() {
    let mut tree = Dbvt::with_capacity(3);
    let mut workspace = DbvtWorkspace::new();
    let aabb = Aabb::new(Point::origin(), Vector::repeat(1.0 as Real));

    for i in 0..3 {
        let _ = tree.insert(i, aabb, &mut workspace).unwrap();
    }

    assert_eq!(
        tree.insert(3, aabb, &mut workspace),
        Err(DbvtError::OutOfMemory { capacity: 3 })
    );
    assert_eq!(tree.proxy_count(), 3);
    tree.assert_well_formed();

    // All three boxes coincide.
    let mut pairs = Vec::new();
    tree.query_overlap_pairs(&mut workspace, &mut pairs);
    assert_eq!(pairs.len(), 3);
}

#[test]
fn removing_every_leaf_resets_the_tree() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut tree = Dbvt::with_capacity(64);
    let mut workspace = DbvtWorkspace::new();
    let handles: Vec<_> = (0..64)
        .map(|i| tree.insert(i, random_aabb(&mut rng), &mut workspace).unwrap())
        .collect();

    for handle in handles.into_iter().rev() {
        let _ = tree.remove(handle);
    }

    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 0);
    assert_eq!(tree.root_aabb(), None);

    // The tree is reusable.
    let handle = tree.insert(7, random_aabb(&mut rng), &mut workspace).unwrap();
    assert_eq!(tree.external_id(handle), 7);
    assert_eq!(tree.height(), 1);
}

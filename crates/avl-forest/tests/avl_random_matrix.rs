use std::collections::BTreeMap;

use avl_forest::AvlMap;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn run(seed: u64, ops: usize, key_space: u32) {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut map = AvlMap::new();
    let mut model = BTreeMap::new();

    for step in 0..ops {
        let k = rng.gen_range(0..key_space);
        if rng.gen_bool(0.6) {
            let v = rng.gen::<u64>();
            assert_eq!(map.insert(k, v), model.insert(k, v), "seed {seed} step {step}");
        } else {
            assert_eq!(map.remove(&k), model.remove(&k), "seed {seed} step {step}");
        }
        if step % 64 == 0 {
            map.assert_valid().unwrap();
        }
    }

    map.assert_valid().unwrap();
    assert!(map.iter().map(|(k, v)| (*k, *v)).eq(model.iter().map(|(k, v)| (*k, *v))));

    let keys: Vec<u32> = model.keys().copied().collect();
    for (i, k) in keys.iter().enumerate() {
        if i % 2 == 1 {
            assert_eq!(map.remove(k), model.remove(k));
        }
    }
    map.assert_valid().unwrap();
    for k in keys {
        assert_eq!(map.remove(&k), model.remove(&k));
    }
    assert!(map.is_empty());
}

#[test]
fn seeded_dense_workload() {
    for seed in 0..8 {
        run(seed, 4_000, 256);
    }
}

#[test]
fn seeded_sparse_workload() {
    for seed in 100..104 {
        run(seed, 10_000, 1 << 20);
    }
}

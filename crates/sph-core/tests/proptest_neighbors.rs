use glam::Vec2;
use proptest::prelude::*;
use sph_core::SpatialHashGrid;

fn positions_strategy() -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec((-300.0_f32..300.0, -300.0_f32..300.0), 1..150)
        .prop_map(|pts| pts.into_iter().map(|(x, y)| Vec2::new(x, y)).collect())
}

proptest! {
    #[test]
    fn neighbors_are_within_radius(positions in positions_strategy(), radius in 1.0_f32..48.0) {
        let mut grid = SpatialHashGrid::new(radius, positions.len());
        grid.build(&positions).unwrap();

        for i in 0..positions.len() {
            for j in grid.query_neighbors(i) {
                let d = positions[i].distance(positions[j]);
                prop_assert!(d <= radius * (1.0 + 1e-5), "{j} at {d} returned for {i}, radius {radius}");
            }
        }
    }

    #[test]
    fn every_true_neighbor_is_found_once(positions in positions_strategy(), radius in 1.0_f32..48.0) {
        let mut grid = SpatialHashGrid::new(radius, positions.len());
        grid.build(&positions).unwrap();

        for i in 0..positions.len() {
            let mut found = grid.query_neighbors(i);
            found.sort_unstable();
            let before = found.len();
            found.dedup();
            prop_assert_eq!(before, found.len(), "duplicate neighbors for {}", i);

            for j in 0..positions.len() {
                if positions[i].distance_squared(positions[j]) <= radius * radius {
                    prop_assert!(found.binary_search(&j).is_ok(), "missed neighbor {} of {}", j, i);
                }
            }
        }
    }
}

//! End-to-end behavior of the dynamic update cycle: ray clearing,
//! inflation layering, and revert semantics across sensor cycles.

use std::time::Duration;

use glam::DVec3;
use navgrid::{
    CellRect, Costmap, CostmapConfig, MapInfo, Observation, COST_FREE, COST_INSCRIBED, COST_LETHAL,
};

const WIDTH: u32 = 30;

/// Empty 30×30 grid at 1 m/cell with a single static obstacle at
/// (10, 17), inscribed radius 1 cell, inflation radius 3 cells.
fn corridor_map() -> Costmap {
    let mut data = vec![COST_FREE; (WIDTH * WIDTH) as usize];
    data[(17 * WIDTH + 10) as usize] = COST_LETHAL;
    Costmap::new(
        MapInfo::square(WIDTH, 1.0),
        data,
        &CostmapConfig {
            threshold: 100,
            min_z: 0.0,
            max_z: 2.0,
            inflation_radius_m: 3.0,
            inscribed_radius_m: 1.0,
            circumscribed_radius_m: 1.0,
            weight: 1.0,
            ..Default::default()
        },
    )
    .unwrap()
}

/// Sensor at cell (2, 15) observing the given hit points at z = 1.
fn scan(points: &[(f64, f64)]) -> Observation {
    Observation::new(
        DVec3::new(2.5, 15.5, 1.0),
        points.iter().map(|&(x, y)| DVec3::new(x, y, 1.0)).collect(),
        Duration::ZERO,
    )
}

#[test]
fn hallway_rays_do_not_retract_other_obstacles() {
    let mut map = corridor_map();

    // Two hits down the same corridor row: a near obstacle at (14, 15)
    // and a far one at (25, 15). The far ray passes straight through
    // the near obstacle's cell.
    map.update_dynamic_obstacles(&[scan(&[(14.5, 15.5), (25.5, 15.5)])]);

    // The near obstacle survived the far ray.
    assert_eq!(map.get_cost(14, 15), COST_LETHAL);
    assert_eq!(map.get_cost(25, 15), COST_LETHAL);
    // Its inscribed margin is in place.
    assert!(map.is_blocked(13, 15));
    assert!(map.is_blocked(15, 15));

    // The static obstacle above the corridor kept its cell and margin:
    // the ray only crossed its decay tail, never its safety zone.
    assert_eq!(map.get_cost(10, 17), COST_LETHAL);
    assert_eq!(map.get_cost(10, 16), COST_INSCRIBED);

    // The decay tail on the corridor row itself was sensor-cleared.
    assert_eq!(map.get_cost(10, 15), COST_FREE);

    // Corridor cells far from any obstacle are free.
    assert_eq!(map.get_cost(20, 15), COST_FREE);
    assert_eq!(map.get_cost(5, 15), COST_FREE);
}

#[test]
fn occluded_obstacle_clears_only_when_a_ray_crosses_it() {
    let mut map = corridor_map();
    map.update_dynamic_obstacles(&[scan(&[(14.5, 15.5), (25.5, 15.5)])]);
    assert_eq!(map.get_cost(14, 15), COST_LETHAL);

    // Next cycle the sensor sees through (14, 15) to the far hit only:
    // the stale obstacle is dropped and its cell rides the ray clean.
    map.update_dynamic_obstacles(&[scan(&[(25.5, 15.5)])]);
    assert_eq!(map.get_cost(14, 15), COST_FREE);
    assert!(!map.is_blocked(13, 15));
    assert_eq!(map.get_cost(25, 15), COST_LETHAL);
}

#[test]
fn update_twice_with_identical_batch_changes_nothing() {
    let mut map = corridor_map();
    let batch = [scan(&[(14.5, 15.5), (25.5, 15.5), (20.5, 25.5)])];

    let first = map.update_dynamic_obstacles(&batch);
    assert!(!first.is_empty());

    let second = map.update_dynamic_obstacles(&batch);
    assert!(second.is_empty());
}

#[test]
fn changed_indices_are_sorted_and_minimal() {
    let mut map = corridor_map();
    let changed = map.update_dynamic_obstacles(&[scan(&[(25.5, 15.5)])]);

    assert!(changed.windows(2).all(|pair| pair[0] < pair[1]));
    // Every reported index genuinely differs from the static baseline
    // this cycle started from.
    for &index in &changed {
        assert_ne!(map.data()[index], map.static_data()[index]);
    }
    let terminal = map.index(25, 15);
    assert!(changed.contains(&terminal));
}

#[test]
fn reverting_outside_a_window_keeps_the_local_picture() {
    let mut map = corridor_map();
    map.update_dynamic_obstacles(&[scan(&[(14.5, 15.5), (25.5, 15.5)])]);

    // Keep an 11×11 window around the robot's neighborhood.
    let window = CellRect::new(glam::UVec2::new(9, 10), glam::UVec2::new(20, 21));
    map.revert_to_static(Some(window));

    // Inside the window: the near obstacle and its margin survive.
    assert_eq!(map.get_cost(14, 15), COST_LETHAL);
    assert!(map.is_blocked(15, 15));
    // Outside: the far obstacle reverted to the static baseline.
    assert_eq!(map.get_cost(25, 15), COST_FREE);
    // The static obstacle is identical in baseline and window.
    assert_eq!(map.get_cost(10, 17), COST_LETHAL);
}

#[test]
fn full_revert_restores_the_baseline_exactly() {
    let mut map = corridor_map();
    let pristine = map.data().to_vec();
    map.update_dynamic_obstacles(&[scan(&[(14.5, 15.5), (25.5, 15.5)])]);
    assert_ne!(map.data(), pristine.as_slice());

    map.revert_to_static(None);
    assert_eq!(map.data(), pristine.as_slice());
    assert_eq!(map.data(), map.static_data());
}

#[test]
fn vertical_acceptance_window_filters_evidence_entirely() {
    let mut map = corridor_map();
    // A hit above max_z neither marks an obstacle nor clears the static
    // obstacle's decay tail it would have crossed.
    let tail_before = map.get_cost(10, 15);
    assert_ne!(tail_before, COST_FREE);

    let high = Observation::new(
        DVec3::new(2.5, 15.5, 1.0),
        vec![DVec3::new(25.5, 15.5, 5.0)],
        Duration::ZERO,
    );
    let changed = map.update_dynamic_obstacles(&[high]);
    assert!(changed.is_empty());
    assert_eq!(map.get_cost(10, 15), tail_before);
    assert_eq!(map.get_cost(25, 15), COST_FREE);
}

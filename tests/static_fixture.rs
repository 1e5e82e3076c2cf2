//! Tests against the canonical 10×10 static fixture: three obstacle
//! blocks with raw values 100, 200 and 255, threshold 100.

use glam::UVec2;
use navgrid::{
    Costmap, CostmapConfig, MapInfo, SaveFormat, COST_INSCRIBED, COST_LETHAL, COST_UNKNOWN,
};

const THRESHOLD: u8 = 100;

/// 10×10 map with a 5×2 block of 100s, a 3×2 block of 200s and a 2×2
/// block of 255s: 20 obstacle cells total.
fn fixture_data() -> Vec<u8> {
    let mut data = vec![0u8; 100];
    for y in 1..=2usize {
        for x in 1..=5usize {
            data[y * 10 + x] = 100;
        }
    }
    for y in 4..=5usize {
        for x in 7..=9usize {
            data[y * 10 + x] = 200;
        }
    }
    for y in 7..=8usize {
        for x in 2..=3usize {
            data[y * 10 + x] = 255;
        }
    }
    data
}

fn fixture_map(inflation_radius_m: f64) -> Costmap {
    Costmap::new(
        MapInfo::square(10, 1.0),
        fixture_data(),
        &CostmapConfig {
            threshold: THRESHOLD,
            inflation_radius_m,
            inscribed_radius_m: 1.0,
            circumscribed_radius_m: 1.0,
            weight: 1.0,
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn occupied_cell_count_is_twenty() {
    let map = fixture_map(2.0);
    let occupied = map.occupied_cell_indices();
    assert_eq!(occupied.len(), 20);
    for &index in &occupied {
        assert!(map.static_data()[index] >= THRESHOLD);
    }
}

#[test]
fn occupied_cells_exclude_inflation_halos() {
    let map = fixture_map(2.0);
    let occupied = map.occupied_cell_indices();
    // The halo cell left of the 100-block is inflated but not occupied.
    let halo = map.index(0, 1);
    assert!(map.get_cost(0, 1) >= COST_INSCRIBED);
    assert!(!occupied.contains(&halo));
}

#[test]
fn index_arithmetic_matches_contract() {
    let map = fixture_map(0.0);
    assert_eq!(map.index(8, 3), 38);
    let (x, y) = map.unindex(99);
    assert_eq!(map.cell_to_world(UVec2::new(x, y)).to_array(), [9.5, 9.5]);
}

#[test]
fn coordinate_round_trip_over_the_full_grid() {
    let map = fixture_map(0.0);
    for y in 0..10 {
        for x in 0..10 {
            let cell = UVec2::new(x, y);
            let world = map.cell_to_world(cell);
            assert_eq!(map.world_to_cell(world), Some(cell));
        }
    }
}

#[test]
fn normalization_preserves_unknown_and_promotes_obstacles() {
    let map = fixture_map(0.0);
    assert_eq!(map.get_cost(1, 1), COST_LETHAL); // was 100
    assert_eq!(map.get_cost(8, 4), COST_LETHAL); // was 200
    assert_eq!(map.get_cost(2, 7), COST_UNKNOWN); // was 255
}

#[test]
fn circumscribed_lower_bound_uses_the_decay_formula() {
    let map = Costmap::new(
        MapInfo::square(10, 1.0),
        vec![0u8; 100],
        &CostmapConfig {
            inflation_radius_m: 8.0,
            inscribed_radius_m: 2.0,
            circumscribed_radius_m: 4.0,
            weight: 1.0,
            ..Default::default()
        },
    )
    .unwrap();
    // round(252 * 1.0 / (1 + (4 - 2)^2)) = round(50.4)
    assert_eq!(map.circumscribed_cost_lower_bound(), 50);
}

const GOLDEN_TEXT: &str = "\
0 0 0 0 0 0 0 0 0 0
0 254 254 254 254 254 0 0 0 0
0 254 254 254 254 254 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 254 254 254
0 0 0 0 0 0 0 254 254 254
0 0 0 0 0 0 0 0 0 0
0 0 255 255 0 0 0 0 0 0
0 0 255 255 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
";

#[test]
fn text_serialization_matches_golden() {
    let map = fixture_map(0.0);
    let mut out = Vec::new();
    map.save(SaveFormat::Text, &mut out).unwrap();
    assert_eq!(out, GOLDEN_TEXT.as_bytes());
}

#[test]
fn binary_serialization_is_a_row_major_dump() {
    let map = fixture_map(0.0);
    let mut out = Vec::new();
    map.save(SaveFormat::Binary, &mut out).unwrap();
    assert_eq!(out, map.data());
    assert_eq!(out.len(), 100);
}

#[test]
fn pgm_serialization_has_the_contract_header() {
    let map = fixture_map(0.0);
    let mut out = Vec::new();
    map.save(SaveFormat::Pgm, &mut out).unwrap();
    assert!(out.starts_with(b"P5\n10 10\n255\n"));
    assert_eq!(&out[b"P5\n10 10\n255\n".len()..], map.data());
}

#[test]
fn repeated_saves_are_byte_identical() {
    let map = fixture_map(2.0);
    for format in [SaveFormat::Text, SaveFormat::Binary, SaveFormat::Pgm] {
        let mut first = Vec::new();
        let mut second = Vec::new();
        map.save(format, &mut first).unwrap();
        map.save(format, &mut second).unwrap();
        assert_eq!(first, second);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use infopartition::estimators::approaches::partition::kl_estimate::region_log_ratio;
use infopartition::estimators::approaches::partition::{
    PartitionBuilder, PartitionError, Plane, QuantileInterpolation, Region, kl_estimate,
};
use ndarray::array;
use rstest::rstest;

use crate::test_helpers::unit_square_corners;

fn diagonal_blocks(plane: &Plane) -> Vec<Region> {
    let hi = plane.xlim().hi;
    vec![
        Region::from_bounds([0.0, 2.0], [0.0, 2.0], plane).unwrap(),
        Region::from_bounds([2.0, hi], [2.0, hi], plane).unwrap(),
        Region::from_bounds([0.0, 2.0], [2.0, hi], plane).unwrap(),
        Region::from_bounds([2.0, hi], [0.0, 2.0], plane).unwrap(),
    ]
}

#[test]
fn quadrants_of_the_unit_square_carry_no_information() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let regions = PartitionBuilder::new(&plane)
        .equiprobable_grid([2, 2], QuantileInterpolation::Linear)
        .unwrap();
    assert_abs_diff_eq!(
        kl_estimate(&plane, &regions, std::f64::consts::E).unwrap(),
        0.0,
        epsilon = 1e-12
    );
}

#[test]
fn two_diagonal_blocks_carry_one_bit() {
    let plane = Plane::new(array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
    let regions = diagonal_blocks(&plane);

    // Each occupied block: n = 2, n_x = n_y = 2, N = 4 → ln 2
    assert_abs_diff_eq!(
        kl_estimate(&plane, &regions, std::f64::consts::E).unwrap(),
        std::f64::consts::LN_2,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(kl_estimate(&plane, &regions, 2.0).unwrap(), 1.0, epsilon = 1e-12);
}

#[test]
fn empty_regions_are_skipped() {
    let plane = Plane::new(array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
    let regions = diagonal_blocks(&plane);
    let occupied: Vec<Region> = regions.iter().filter(|r| !r.is_empty()).cloned().collect();
    assert_eq!(occupied.len(), 2);
    assert_abs_diff_eq!(
        kl_estimate(&plane, &regions, 2.0).unwrap(),
        kl_estimate(&plane, &occupied, 2.0).unwrap(),
        epsilon = 1e-15
    );
    assert_eq!(region_log_ratio(&plane, &regions[2]), None);
}

#[test]
fn single_region_over_the_whole_plane_is_zero() {
    let plane = Plane::new(array![[0.0, 3.0], [1.0, 1.0], [2.0, 0.0], [5.0, 2.0]]).unwrap();
    let whole = [Region::whole(&plane)];
    assert_abs_diff_eq!(kl_estimate(&plane, &whole, 2.0).unwrap(), 0.0, epsilon = 1e-15);
}

#[test]
fn region_log_ratio_uses_marginal_strips() {
    let plane = Plane::new(array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.5, 0.5]])
        .unwrap();
    let region = Region::from_bounds([0.0, 0.6], [0.0, 0.6], &plane).unwrap();
    // n = 2, strip counts n_x = 3 and n_y = 3, N = 5
    assert_eq!(region.count(), 2);
    let ratio = region_log_ratio(&plane, &region).unwrap();
    assert_abs_diff_eq!(ratio, (5.0_f64 * 2.0 / 9.0).ln(), epsilon = 1e-12);
}

#[rstest]
#[case(1.0)]
#[case(0.0)]
#[case(-2.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_log_bases_are_rejected(#[case] base: f64) {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let whole = [Region::whole(&plane)];
    assert!(matches!(
        kl_estimate(&plane, &whole, base),
        Err(PartitionError::InvalidLogBase(_))
    ));
}

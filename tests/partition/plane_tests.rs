// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use infopartition::estimators::approaches::partition::plane::BOUND_EPSILON;
use infopartition::estimators::approaches::partition::{
    Interval, PartitionError, Plane, Region,
};
use ndarray::{Array2, array};
use rstest::rstest;

use crate::test_helpers::{independent_uniform_data, unit_square_corners};

#[test]
fn plane_bounds_pad_only_the_maximum() {
    let plane = Plane::new(array![[1.0, -2.0], [3.0, 5.0], [2.0, 0.0]]).unwrap();
    assert_eq!(plane.len(), 3);
    assert_abs_diff_eq!(plane.xlim().lo, 1.0);
    assert_abs_diff_eq!(plane.xlim().hi, 3.0 + BOUND_EPSILON);
    assert_abs_diff_eq!(plane.ylim().lo, -2.0);
    assert_abs_diff_eq!(plane.ylim().hi, 5.0 + BOUND_EPSILON);
}

#[test]
fn plane_contains_its_largest_point_for_large_magnitudes() {
    // 1e17 + 1e-6 rounds back to 1e17
    let plane = Plane::new(array![[0.0, 0.0], [1e17, 1e17]]).unwrap();
    assert!(plane.xlim().hi > 1e17);
    let whole = plane.samples_in(&plane.xlim(), &plane.ylim());
    assert_eq!(whole, vec![0, 1]);
}

#[test]
fn range_query_is_half_open() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let left = Interval::new(0.0, 1.0).unwrap();
    let all_y = plane.ylim();

    // x = 1.0 sits on the upper bound of [0, 1) and is excluded
    assert_eq!(plane.samples_in(&left, &all_y), vec![0, 1]);
    assert_eq!(
        plane.points_in(&left, &all_y),
        vec![[0.0, 0.0], [0.0, 1.0]]
    );

    let right = Interval::new(1.0, plane.xlim().hi).unwrap();
    assert_eq!(plane.samples_in(&right, &all_y), vec![2, 3]);
}

#[test]
fn marginal_strips_are_sorted_slices() {
    let plane = Plane::new(array![[3.0, 0.3], [1.0, 0.1], [2.0, 0.2], [4.0, 0.4]]).unwrap();

    let strip = plane.x_marginal(&Interval::new(1.5, 3.5).unwrap());
    assert_eq!(strip, &[2.0, 3.0]);

    let strip = plane.y_marginal(&Interval::new(0.0, 0.25).unwrap());
    assert_eq!(strip, &[0.1, 0.2]);

    assert!(plane.x_marginal(&Interval::new(10.0, 20.0).unwrap()).is_empty());
}

#[test]
fn marginal_strips_match_range_queries() {
    let plane = Plane::new(independent_uniform_data(500, 3)).unwrap();
    let xlim = Interval::new(0.2, 0.7).unwrap();
    let ylim = Interval::new(0.1, 0.4).unwrap();
    assert_eq!(
        plane.x_marginal(&xlim).len(),
        plane.samples_in(&xlim, &plane.ylim()).len()
    );
    assert_eq!(
        plane.y_marginal(&ylim).len(),
        plane.samples_in(&plane.xlim(), &ylim).len()
    );
}

#[test]
fn from_points_and_array_agree() {
    let from_array = Plane::new(unit_square_corners()).unwrap();
    let from_points =
        Plane::from_points(vec![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
    assert_eq!(from_array.points(), from_points.points());
    assert_eq!(from_array.xlim(), from_points.xlim());
}

#[rstest]
#[case(array![[1.0, 2.0]])]
#[case(Array2::<f64>::zeros((0, 2)))]
fn too_few_points_are_degenerate(#[case] data: Array2<f64>) {
    assert!(matches!(
        Plane::new(data),
        Err(PartitionError::DegenerateSample(_))
    ));
}

#[test]
fn two_points_make_the_smallest_plane() {
    let plane = Plane::new(array![[0.0, 1.0], [1.0, 0.0]]).unwrap();
    assert_eq!(plane.len(), 2);
    assert_eq!(plane.points(), &[[0.0, 1.0], [1.0, 0.0]]);
}

#[rstest]
#[case(array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]])]
#[case(array![[0.0, 5.0], [1.0, 5.0], [2.0, 5.0]])]
fn zero_spread_axis_is_degenerate(#[case] data: Array2<f64>) {
    assert!(matches!(
        Plane::new(data),
        Err(PartitionError::DegenerateSample(_))
    ));
}

#[test]
fn plane_rejects_wrong_shape_and_non_finite_values() {
    assert_eq!(
        Plane::new(Array2::zeros((4, 3))).unwrap_err(),
        PartitionError::DimensionMismatch { ncols: 3 }
    );
    let err = Plane::new(array![[0.0, 0.0], [f64::INFINITY, 1.0]]).unwrap_err();
    assert!(matches!(err, PartitionError::NonFiniteSample { row: 1, .. }));
    let err = Plane::new(array![[0.0, f64::NAN], [1.0, 1.0]]).unwrap_err();
    assert!(matches!(err, PartitionError::NonFiniteSample { row: 0, .. }));
}

#[test]
fn intervals_validate_their_bounds() {
    assert_eq!(
        Interval::new(1.0, 0.0).unwrap_err(),
        PartitionError::InvalidBounds { lo: 1.0, hi: 0.0 }
    );
    assert!(Interval::new(f64::NAN, 1.0).is_err());

    let point = Interval::new(0.5, 0.5).unwrap();
    assert!(point.is_empty());
    assert!(!point.contains(0.5));
    assert_abs_diff_eq!(point.width(), 0.0);

    let unit = Interval::new(0.0, 1.0).unwrap();
    assert!(unit.contains(0.0));
    assert!(!unit.contains(1.0));
    assert!(unit.encloses(&point));
    assert!(!point.encloses(&unit));
}

#[test]
fn region_membership_and_strips() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let region = Region::from_bounds([0.0, 0.5], [0.0, 0.5], &plane).unwrap();
    assert_eq!(region.samples_inside(), &[0]);
    assert_eq!(region.count(), 1);
    assert!(region.contains_point([0.25, 0.25]));
    assert!(!region.contains_point([0.5, 0.25]));

    // Strips extend the region over the full other axis
    assert_eq!(region.x_strip(&plane).samples_inside(), &[0, 1]);
    assert_eq!(region.y_strip(&plane).samples_inside(), &[0, 2]);

    let whole = Region::whole(&plane);
    assert_eq!(whole.count(), 4);
    assert_eq!(whole.xlim(), plane.xlim());

    assert!(matches!(
        Region::from_bounds([0.5, 0.0], [0.0, 1.0], &plane),
        Err(PartitionError::InvalidBounds { .. })
    ));
}

#[test]
fn zero_width_region_is_empty() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let region = Region::from_bounds([0.0, 0.0], [0.0, 2.0], &plane).unwrap();
    assert!(region.is_empty());
    assert_eq!(region.count(), 0);
}

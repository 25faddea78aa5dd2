// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use infopartition::estimators::approaches::partition::builder::{
    cut_intervals, equiprobable_cuts_sorted,
};
use infopartition::estimators::approaches::partition::{
    NonAdaptivePartition, PartitionBuilder, PartitionError, Plane, QuantileInterpolation, Region,
    equiprobable_cuts,
};
use rstest::rstest;

use crate::test_helpers::{assert_tiles, independent_uniform_data, unit_square_corners};

use QuantileInterpolation::{Linear, Lower};

#[rstest]
#[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, Lower, vec![3.0])]
#[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 2, Linear, vec![3.0])]
#[case(&[1.0, 2.0, 3.0, 4.0], 2, Lower, vec![2.0])]
#[case(&[1.0, 2.0, 3.0, 4.0], 2, Linear, vec![2.5])]
#[case(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], 4, Lower, vec![2.0, 4.0, 6.0])]
#[case(&[0.0, 10.0], 3, Linear, vec![10.0 / 3.0, 20.0 / 3.0])]
#[case(&[0.0, 10.0], 3, Lower, vec![0.0, 0.0])]
fn equiprobable_cut_values(
    #[case] values: &[f64],
    #[case] k: usize,
    #[case] interpolation: QuantileInterpolation,
    #[case] expected: Vec<f64>,
) {
    let cuts = equiprobable_cuts(values, k, interpolation).unwrap();
    assert_eq!(cuts.len(), expected.len());
    for (cut, want) in cuts.iter().zip(&expected) {
        assert_abs_diff_eq!(*cut, *want, epsilon = 1e-12);
    }
}

#[test]
fn cuts_do_not_depend_on_input_order() {
    let shuffled = [5.0, 1.0, 4.0, 2.0, 3.0, 0.0];
    let sorted = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    for interpolation in [Lower, Linear] {
        assert_eq!(
            equiprobable_cuts(&shuffled, 3, interpolation).unwrap(),
            equiprobable_cuts_sorted(&sorted, 3, interpolation).unwrap()
        );
    }
}

#[test]
fn lower_cuts_use_exact_integer_indices() {
    // (n-1)·(j/k) evaluates to 56.99999999999999 in floating point for j = 57
    let values: Vec<f64> = (0..=100).map(f64::from).collect();
    let cuts = equiprobable_cuts_sorted(&values, 100, Lower).unwrap();
    assert_eq!(cuts.len(), 99);
    assert_eq!(cuts[56], 57.0);
    for (j, cut) in (1..100).zip(&cuts) {
        assert_eq!(*cut, j as f64);
    }
}

#[test]
fn single_part_needs_no_cuts() {
    assert!(equiprobable_cuts(&[3.0, 1.0, 2.0], 1, Lower).unwrap().is_empty());
}

#[test]
fn invalid_cut_requests() {
    assert!(matches!(
        equiprobable_cuts(&[1.0, 2.0], 0, Lower),
        Err(PartitionError::InvalidGranularity { value: 0, .. })
    ));
    assert_eq!(
        equiprobable_cuts(&[], 2, Lower).unwrap_err(),
        PartitionError::EmptyMarginal
    );
    assert!(matches!(
        cut_intervals(&[1.0]),
        Err(PartitionError::InvalidGranularity { name: "cuts", .. })
    ));
}

#[test]
fn grid_is_x_major_cross_product() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let hi = plane.xlim().hi;
    let regions = PartitionBuilder::new(&plane)
        .grid(&[0.0, 0.5, hi], &[0.0, 0.5, hi])
        .unwrap();
    assert_eq!(regions.len(), 4);
    let counts: Vec<usize> = regions.iter().map(Region::count).collect();
    assert_eq!(counts, vec![1, 1, 1, 1]);
    // (0, 0), (0, 1), (1, 0), (1, 1) in order
    for (i, region) in regions.iter().enumerate() {
        assert_eq!(region.samples_inside(), &[i]);
    }
    assert_abs_diff_eq!(regions[1].xlim().hi, 0.5);
    assert_abs_diff_eq!(regions[1].ylim().lo, 0.5);
}

#[test]
fn decreasing_cuts_are_rejected() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let err = PartitionBuilder::new(&plane)
        .grid(&[0.0, 0.8, 0.5, 2.0], &[0.0, 2.0])
        .unwrap_err();
    assert_eq!(err, PartitionError::InvalidBounds { lo: 0.8, hi: 0.5 });
}

#[test]
fn linear_seed_grid_splits_the_unit_square_into_quadrants() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let regions = PartitionBuilder::new(&plane)
        .equiprobable_grid([2, 2], Linear)
        .unwrap();
    assert_eq!(regions.len(), 4);
    assert!(regions.iter().all(|r| r.count() == 1));
    assert_abs_diff_eq!(regions[0].xlim().hi, 0.5);
}

#[test]
fn lower_seed_grid_on_ties_produces_zero_width_regions() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let regions = PartitionBuilder::new(&plane)
        .equiprobable_grid([2, 2], Lower)
        .unwrap();
    // Both cuts land on 0.0: three zero-width regions and one holding everything
    assert_eq!(regions.len(), 4);
    let counts: Vec<usize> = regions.iter().map(Region::count).collect();
    assert_eq!(counts, vec![0, 0, 0, 4]);
    assert!(regions[0].xlim().is_empty());
}

#[rstest]
#[case(2, Lower)]
#[case(3, Lower)]
#[case(4, Linear)]
fn subdivision_tiles_its_parent(#[case] k: usize, #[case] interpolation: QuantileInterpolation) {
    let plane = Plane::new(independent_uniform_data(400, 11)).unwrap();
    let builder = PartitionBuilder::new(&plane);
    let parent = Region::from_bounds([0.1, 0.8], [0.3, 0.9], &plane).unwrap();

    let children = builder.subdivide(&parent, k, interpolation).unwrap();
    assert_eq!(children.len(), k * k);
    assert_eq!(
        children.iter().map(Region::count).sum::<usize>(),
        parent.count()
    );
    for child in &children {
        assert!(parent.xlim().encloses(&child.xlim()));
        assert!(parent.ylim().encloses(&child.ylim()));
        assert!(child.count() <= parent.count());
        // Cached membership agrees with a fresh range query
        assert_eq!(
            child.samples_inside(),
            plane.samples_in(&child.xlim(), &child.ylim()).as_slice()
        );
    }
}

#[test]
fn subdivision_is_deterministic() {
    let plane = Plane::new(independent_uniform_data(300, 5)).unwrap();
    let builder = PartitionBuilder::new(&plane);
    let whole = Region::whole(&plane);
    let first = builder.subdivide(&whole, 3, Lower).unwrap();
    let second = builder.subdivide(&whole, 3, Lower).unwrap();
    assert_eq!(first, second);
}

#[test]
fn subdividing_an_empty_strip_fails() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let builder = PartitionBuilder::new(&plane);
    let outside = Region::from_bounds([5.0, 6.0], [5.0, 6.0], &plane).unwrap();
    assert_eq!(
        builder.subdivide(&outside, 2, Lower).unwrap_err(),
        PartitionError::EmptyMarginal
    );
}

#[test]
fn non_adaptive_grid_tiles_the_plane() {
    let plane = Plane::new(independent_uniform_data(1000, 8)).unwrap();
    let grid = NonAdaptivePartition::new([10, 5]).unwrap();
    let partition = grid.build(&plane).unwrap();
    assert_eq!(partition.len(), 50);
    assert_tiles(&plane, &partition);
    // Equal-frequency columns hold about N / 10 points
    let first_column: usize = partition.regions()[..5].iter().map(Region::count).sum();
    assert!((90..=110).contains(&first_column), "{first_column}");
}

#[test]
fn non_adaptive_rejects_empty_bins() {
    assert!(matches!(
        NonAdaptivePartition::new([0, 4]),
        Err(PartitionError::InvalidGranularity { name: "bins[0]", .. })
    ));
    assert!(matches!(
        NonAdaptivePartition::new([4, 0]),
        Err(PartitionError::InvalidGranularity { name: "bins[1]", .. })
    ));
    let grid = NonAdaptivePartition::new([3, 3]).unwrap().with_interpolation(Lower);
    assert_eq!(grid.bins(), [3, 3]);
}

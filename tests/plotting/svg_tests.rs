// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::path::Path;

use infopartition::estimators::approaches::partition::{
    AdaptiveConfig, AdaptivePartitioner, ChiSquaredThreshold, NonAdaptivePartition, Plane,
};
use infopartition::plotting::draw_partition;

use crate::test_helpers::{bivariate_normal_data, unit_square_corners};

fn render(name: &str, plane: &Plane, partition_len: usize, draw: impl FnOnce(&Path)) {
    let path = std::env::temp_dir().join(format!("infopartition_{name}_{}.svg", std::process::id()));
    draw(&path);
    assert!(path.exists());
    let contents = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert!(contents.contains("<svg"));
    // One outline per region, plus at most the background fill
    let rects = contents.matches("<rect").count();
    assert!(rects >= partition_len && rects <= partition_len + 1, "{rects} rects");
    assert_eq!(contents.matches("<circle").count(), plane.len());
}

#[test]
fn adaptive_partition_is_drawn_with_every_region() {
    let plane = Plane::new(unit_square_corners()).unwrap();
    let threshold = ChiSquaredThreshold::new(0.97).unwrap();
    let partition = AdaptivePartitioner::new(&plane, AdaptiveConfig::default(), threshold)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(partition.len(), 4);

    render("adaptive", &plane, partition.len(), |path| {
        draw_partition(path, &plane, &partition, "unit square").unwrap();
    });
}

#[test]
fn grid_partition_is_drawn_with_every_region() {
    let plane = Plane::new(bivariate_normal_data(200, 0.5, 61)).unwrap();
    let partition = NonAdaptivePartition::new([3, 4]).unwrap().build(&plane).unwrap();
    assert_eq!(partition.len(), 12);

    render("grid", &plane, partition.len(), |path| {
        draw_partition(path, &plane, &partition, "3 x 4 grid").unwrap();
    });
}

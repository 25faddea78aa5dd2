// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SVG rendering of a sample together with the outlines of a partition.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::estimators::approaches::partition::{Partition, Plane};

/// Pixel size of the rendered square image.
pub const PLOT_SIZE: u32 = 800;

/// Draw all sample points of `plane` and the outline of every region of `partition`.
pub fn draw_partition<P: AsRef<Path>>(
    path: P,
    plane: &Plane,
    partition: &Partition,
    caption: &str,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path.as_ref(), (PLOT_SIZE, PLOT_SIZE)).into_drawing_area();
    root.fill(&WHITE)?;

    let (xlim, ylim) = (plane.xlim(), plane.ylim());
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(xlim.lo..xlim.hi, ylim.lo..ylim.hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("X")
        .y_desc("Y")
        .draw()?;

    chart.draw_series(
        plane
            .points()
            .iter()
            .map(|&[x, y]| Circle::new((x, y), 2, RED.mix(0.5).filled())),
    )?;

    chart.draw_series(partition.iter().map(|region| {
        let (rx, ry) = (region.xlim(), region.ylim());
        Rectangle::new([(rx.lo, ry.lo), (rx.hi, ry.hi)], BLACK.stroke_width(1))
    }))?;

    root.present()?;
    Ok(())
}

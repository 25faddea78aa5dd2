// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infopartition::estimators::approaches::partition::{
    AdaptiveConfig, AdaptivePartitioner, ChiSquaredThreshold, PartitionMutualInformation, Plane,
};
use infopartition::estimators::traits::GlobalValue;
use infopartition::plotting::draw_partition;
use infopartition::sampling::{Joint, JointSampler, RandomVar};
use rand::{SeedableRng, rngs::StdRng};
use std::f64::consts::PI;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Points on the unit circle: X and Y are uncorrelated but fully dependent.
    let angle = RandomVar::uniform(0.0, 2.0 * PI)?;
    let joint = Joint::new(angle.map(f64::cos), angle.map(f64::sin));
    let mut rng = StdRng::seed_from_u64(7);
    let sample = joint.sample_joint(2000, &mut rng);

    let plane = Plane::new(sample)?;
    let threshold = ChiSquaredThreshold::new(0.97)?;
    let mut partitioner = AdaptivePartitioner::new(&plane, AdaptiveConfig::default(), threshold)?;
    partitioner.run_to_completion()?;
    let stats = partitioner.stats();
    let partition = partitioner.final_partition();

    println!(
        "{} regions after {} passes ({} splits)",
        partition.len(),
        stats.passes,
        stats.splits
    );

    let estimator = PartitionMutualInformation::new(plane.clone(), partition.clone());
    println!("Adaptive partition MI: {:.4} nats", estimator.global_value());

    draw_partition(
        "circle_partition.svg",
        &plane,
        &partition,
        "Adaptive partition of the unit circle",
    )?;
    println!("Wrote circle_partition.svg");
    Ok(())
}

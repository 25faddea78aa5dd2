// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infopartition::experiment::report::{estimates_table, granularity_table, timing_table};
use infopartition::experiment::{SweepConfig, run_gaussian_sweep, run_granularity_sweep};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // A lighter grid than the defaults so the demo finishes quickly.
    let config = SweepConfig {
        sample_sizes: vec![250, 1000, 4000],
        correlations: vec![0.0, 0.5, 0.9],
        repetitions: 20,
        bins: [20, 20],
        ..SweepConfig::default()
    };

    let cells = run_gaussian_sweep(&config)?;
    println!("% Estimates");
    println!("{}", estimates_table(&cells));
    println!("% Timings (seconds)");
    println!("{}", timing_table(&cells));

    let granularity_cells = run_granularity_sweep(&config, &[2, 3, 4])?;
    println!("% Granularity");
    println!("{}", granularity_table(&granularity_cells));
    Ok(())
}

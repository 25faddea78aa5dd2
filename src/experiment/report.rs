// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LaTeX `tabular` rendering of sweep results.
//!
//! Rows are grouped by correlation, columns are the sample sizes in the order
//! they first appear. Cells missing from the input are printed as `--`.

use std::fmt::Write;

use super::{GranularityCell, Summary, SweepCell};

/// Adaptive, non-adaptive and Gaussian estimates (`mean ± std`) per correlation.
pub fn estimates_table(cells: &[SweepCell]) -> String {
    let sizes = sample_sizes(cells.iter().map(|c| c.sample_size));
    let rhos = correlations(cells.iter().map(|c| c.correlation));
    let lookup = |rho: f64, n: usize| {
        cells
            .iter()
            .find(|c| c.correlation == rho && c.sample_size == n)
    };

    let mut out = header(&["$\\rho$", "$I$", "estimator"], &sizes);
    for &rho in &rhos {
        let true_mi = cells
            .iter()
            .find(|c| c.correlation == rho)
            .map_or(f64::NAN, |c| c.true_mi);
        let rows: [(&str, fn(&SweepCell) -> Summary); 3] = [
            ("adaptive", |c: &SweepCell| c.adaptive),
            ("non-adaptive", |c: &SweepCell| c.non_adaptive),
            ("gaussian", |c: &SweepCell| c.gaussian),
        ];
        for (i, (name, pick)) in rows.iter().enumerate() {
            let lead = if i == 0 {
                format!("{rho:.2} & {true_mi:.4}")
            } else {
                " & ".to_string()
            };
            let values: Vec<String> = sizes
                .iter()
                .map(|&n| lookup(rho, n).map_or_else(missing, |c| summary_cell(pick(c))))
                .collect();
            row(&mut out, &format!("{lead} & {name}"), &values);
        }
        out.push_str("\\hline\n");
    }
    footer(out)
}

/// Adaptive estimates per granularity, one row per `(ρ, g)` pair.
pub fn granularity_table(cells: &[GranularityCell]) -> String {
    let sizes = sample_sizes(cells.iter().map(|c| c.sample_size));
    let rhos = correlations(cells.iter().map(|c| c.correlation));
    let mut granularities: Vec<usize> = cells
        .iter()
        .flat_map(|c| c.estimates.iter().map(|e| e.granularity))
        .collect();
    granularities.sort_unstable();
    granularities.dedup();

    let mut out = header(&["$\\rho$", "$I$", "$r = s$"], &sizes);
    for &rho in &rhos {
        let true_mi = cells
            .iter()
            .find(|c| c.correlation == rho)
            .map_or(f64::NAN, |c| c.true_mi);
        for (i, &g) in granularities.iter().enumerate() {
            let lead = if i == 0 {
                format!("{rho:.2} & {true_mi:.4}")
            } else {
                " & ".to_string()
            };
            let values: Vec<String> = sizes
                .iter()
                .map(|&n| {
                    cells
                        .iter()
                        .find(|c| c.correlation == rho && c.sample_size == n)
                        .and_then(|c| c.estimates.iter().find(|e| e.granularity == g))
                        .map_or_else(missing, |e| summary_cell(e.summary))
                })
                .collect();
            row(&mut out, &format!("{lead} & {g}"), &values);
        }
        out.push_str("\\hline\n");
    }
    footer(out)
}

/// Mean seconds per estimate, averaged over correlations.
pub fn timing_table(cells: &[SweepCell]) -> String {
    let sizes = sample_sizes(cells.iter().map(|c| c.sample_size));
    let rows: [(&str, fn(&SweepCell) -> f64); 3] = [
        ("adaptive", |c: &SweepCell| c.timing.adaptive),
        ("non-adaptive", |c: &SweepCell| c.timing.non_adaptive),
        ("gaussian", |c: &SweepCell| c.timing.gaussian),
    ];

    let mut out = header(&["estimator"], &sizes);
    for (name, pick) in rows {
        let values: Vec<String> = sizes
            .iter()
            .map(|&n| {
                let secs: Vec<f64> = cells
                    .iter()
                    .filter(|c| c.sample_size == n)
                    .map(pick)
                    .collect();
                if secs.is_empty() {
                    missing()
                } else {
                    format!("{:.2e}", secs.iter().sum::<f64>() / secs.len() as f64)
                }
            })
            .collect();
        row(&mut out, name, &values);
    }
    out.push_str("\\hline\n");
    footer(out)
}

fn sample_sizes(values: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut seen = Vec::new();
    for n in values {
        if !seen.contains(&n) {
            seen.push(n);
        }
    }
    seen
}

fn correlations(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut seen: Vec<f64> = Vec::new();
    for rho in values {
        if !seen.contains(&rho) {
            seen.push(rho);
        }
    }
    seen
}

fn summary_cell(s: Summary) -> String {
    format!("${:.4} \\pm {:.4}$", s.mean, s.std)
}

fn missing() -> String {
    "--".to_string()
}

fn header(leading: &[&str], sizes: &[usize]) -> String {
    let mut out = String::new();
    let columns = "l".repeat(leading.len()) + &"r".repeat(sizes.len());
    let _ = writeln!(out, "\\begin{{tabular}}{{{columns}}}");
    out.push_str("\\hline\n");
    let labels: Vec<String> = sizes.iter().map(|n| format!("$N = {n}$")).collect();
    row(&mut out, &leading.join(" & "), &labels);
    out.push_str("\\hline\n");
    out
}

fn row(out: &mut String, lead: &str, values: &[String]) {
    let _ = write!(out, "{lead}");
    for value in values {
        let _ = write!(out, " & {value}");
    }
    out.push_str(" \\\\\n");
}

fn footer(mut out: String) -> String {
    out.push_str("\\end{tabular}\n");
    out
}

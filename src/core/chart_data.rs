//! Chart inputs derived from a cleaned table.
//!
//! Everything here is pure so the numbers behind each chart can be checked
//! without a font stack or a bitmap backend.

use crate::core::analyze::year_counts_in_order;
use crate::domain::model::CleanedTable;
use std::ops::Range;

/// Row count per distinct year, ascending by year.
pub fn sorted_year_counts(table: &CleanedTable) -> Vec<(i32, usize)> {
    let mut counts = year_counts_in_order(table);
    counts.sort_unstable_by_key(|(year, _)| *year);
    counts
}

/// Tick label for the bar at `index`; only every `step`-th bar gets one.
pub fn year_tick_label(years: &[(i32, usize)], index: usize, step: usize) -> Option<String> {
    if step == 0 || index % step != 0 {
        return None;
    }
    years.get(index).map(|(year, _)| year.to_string())
}

/// Masses at or below the histogram cap, with their mean and median.
#[derive(Debug, Clone, PartialEq)]
pub struct MassDistribution {
    pub masses: Vec<f64>,
    pub mean: f64,
    pub median: f64,
}

impl MassDistribution {
    pub fn from_table(table: &CleanedTable, mass_cap: f64) -> Option<Self> {
        let mut masses: Vec<f64> = table
            .iter()
            .map(|row| row.mass)
            .filter(|mass| *mass <= mass_cap)
            .collect();

        if masses.is_empty() {
            return None;
        }

        let mean = masses.iter().sum::<f64>() / masses.len() as f64;

        masses.sort_unstable_by(f64::total_cmp);
        let mid = masses.len() / 2;
        let median = if masses.len() % 2 == 0 {
            (masses[mid - 1] + masses[mid]) / 2.0
        } else {
            masses[mid]
        };

        Some(Self {
            masses,
            mean,
            median,
        })
    }
}

/// Equal-width bins in log10 space.
#[derive(Debug, Clone, PartialEq)]
pub struct LogHistogram {
    /// `bins + 1` bin edges in linear units.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Width of one bin in log10 units.
    pub log_width: f64,
}

impl LogHistogram {
    pub fn build(values: &[f64], bins: usize) -> Option<Self> {
        let logs: Vec<f64> = values
            .iter()
            .filter(|v| **v > 0.0)
            .map(|v| v.log10())
            .collect();

        if logs.is_empty() || bins == 0 {
            return None;
        }

        let (mut lo, mut hi) = min_max(&logs);
        if hi - lo < f64::EPSILON {
            lo -= 0.5;
            hi += 0.5;
        }

        let log_width = (hi - lo) / bins as f64;
        let edges = (0..=bins)
            .map(|i| 10f64.powf(lo + i as f64 * log_width))
            .collect();

        let mut counts = vec![0; bins];
        for log in logs {
            let index = ((log - lo) / log_width).floor() as usize;
            counts[index.min(bins - 1)] += 1;
        }

        Some(Self {
            edges,
            counts,
            log_width,
        })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn range(&self) -> Range<f64> {
        let first = self.edges.first().copied().unwrap_or(1.0);
        let last = self.edges.last().copied().unwrap_or(10.0);
        first..last
    }
}

/// Gaussian kernel density over log10(values), scaled to histogram counts so
/// the curve sits on top of the bars.
///
/// Bandwidth follows Scott's rule. Fewer than two distinct values produce no
/// curve.
pub fn kde_curve(values: &[f64], histogram: &LogHistogram, points: usize) -> Vec<(f64, f64)> {
    let logs: Vec<f64> = values
        .iter()
        .filter(|v| **v > 0.0)
        .map(|v| v.log10())
        .collect();
    let n = logs.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }

    let mean = logs.iter().sum::<f64>() / n as f64;
    let variance = logs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bandwidth = variance.sqrt() * (n as f64).powf(-0.2);
    if bandwidth <= 0.0 || !bandwidth.is_finite() {
        return Vec::new();
    }

    let range = histogram.range();
    let (lo, hi) = (range.start.log10(), range.end.log10());
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n as f64 * histogram.log_width;

    (0..points)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (points - 1) as f64;
            let density: f64 = logs
                .iter()
                .map(|xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (10f64.powf(x), density * scale)
        })
        .collect()
}

/// (year, mass) for every row with a mass a log axis can show.
pub fn scatter_points(table: &CleanedTable) -> Vec<(f64, f64)> {
    table
        .iter()
        .filter(|row| row.mass > 0.0)
        .map(|row| (row.year as f64, row.mass))
        .collect()
}

/// Log-axis range that covers `values` with a little headroom.
pub fn log_axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let positive: Vec<f64> = values.filter(|v| *v > 0.0).collect();
    if positive.is_empty() {
        return 1.0..10.0;
    }
    let (lo, hi) = min_max(&positive);
    (lo / 2.0)..(hi * 2.0)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}

//! PNG rendering of the three report charts with [`plotters`].
//!
//! Each chart gets its own bitmap canvas which is presented and dropped before
//! the next one is created, so no drawing state leaks between charts.

use crate::core::chart_data::{
    kde_curve, log_axis_range, scatter_points, sorted_year_counts, year_tick_label,
    LogHistogram, MassDistribution,
};
use crate::domain::model::CleanedTable;
use crate::domain::ports::ChartSettings;
use crate::utils::error::{ReportError, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const COUNTS_PER_YEAR_FILE: &str = "meteorite_counts_per_year.png";
pub const MASS_DISTRIBUTION_FILE: &str = "meteorite_mass_distribution.png";
pub const SCATTER_FILE: &str = "meteorite_scatter_mass_vs_year.png";

const FONT: &str = "sans-serif";

/// Renders all three charts into `output_dir` and returns the written paths.
pub fn visualize(
    table: &CleanedTable,
    settings: &ChartSettings,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let counts_path = output_dir.join(COUNTS_PER_YEAR_FILE);
    draw_counts_per_year(table, settings, &counts_path)?;
    tracing::debug!("Wrote {}", counts_path.display());

    let distribution_path = output_dir.join(MASS_DISTRIBUTION_FILE);
    draw_mass_distribution(table, settings, &distribution_path)?;
    tracing::debug!("Wrote {}", distribution_path.display());

    let scatter_path = output_dir.join(SCATTER_FILE);
    draw_mass_vs_year(table, settings, &scatter_path)?;
    tracing::debug!("Wrote {}", scatter_path.display());

    Ok(vec![counts_path, distribution_path, scatter_path])
}

/// Bar per distinct year, labelled every `year_label_step` bars.
pub fn draw_counts_per_year(
    table: &CleanedTable,
    settings: &ChartSettings,
    output_path: &Path,
) -> Result<()> {
    const CHART: &str = "counts per year";

    let years = sorted_year_counts(table);
    let bars = years.len() as u32;
    let max_count = years.iter().map(|(_, count)| *count).max().unwrap_or(0) as u32;

    let root = BitMapBackend::new(output_path, (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| ReportError::plot(CHART, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Meteorite Counts Per Year", (FONT, 30))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0u32..bars).into_segmented(),
            0u32..(max_count + max_count / 10 + 1),
        )
        .map_err(|e| ReportError::plot(CHART, e))?;

    let step = settings.year_label_step;
    let tick_label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(index) => {
            year_tick_label(&years, *index as usize, step).unwrap_or_default()
        }
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(years.len())
        .x_label_formatter(&tick_label)
        .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
        .x_desc("Year")
        .y_desc("Count")
        .draw()
        .map_err(|e| ReportError::plot(CHART, e))?;

    chart
        .draw_series(years.iter().enumerate().map(|(index, (_, count))| {
            let index = index as u32;
            let shade = index as f64 / bars.max(1) as f64;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(index), 0),
                    (SegmentValue::Exact(index + 1), *count as u32),
                ],
                HSLColor(0.75 - 0.5 * shade, 0.6, 0.45).filled(),
            );
            bar.set_margin(0, 0, 1, 1);
            bar
        }))
        .map_err(|e| ReportError::plot(CHART, e))?;

    root.present().map_err(|e| ReportError::plot(CHART, e))?;
    Ok(())
}

/// Log-scaled histogram of capped masses with a density curve and mean/median markers.
pub fn draw_mass_distribution(
    table: &CleanedTable,
    settings: &ChartSettings,
    output_path: &Path,
) -> Result<()> {
    const CHART: &str = "mass distribution";

    let distribution = MassDistribution::from_table(table, settings.histogram_mass_cap);
    let masses = distribution
        .as_ref()
        .map(|d| d.masses.as_slice())
        .unwrap_or(&[]);
    if distribution.is_none() {
        tracing::warn!(
            "No meteorites at or below {}g, mass distribution chart will be empty",
            settings.histogram_mass_cap
        );
    }

    let histogram = LogHistogram::build(masses, settings.histogram_bins);
    let x_range = histogram
        .as_ref()
        .map(LogHistogram::range)
        .unwrap_or_else(|| log_axis_range(std::iter::empty()));
    let curve = histogram
        .as_ref()
        .map(|h| kde_curve(masses, h, settings.kde_points))
        .unwrap_or_default();

    let tallest_bar = histogram.as_ref().map_or(0, LogHistogram::max_count) as f64;
    let curve_peak = curve.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let y_max = (tallest_bar.max(curve_peak) * 1.1).max(1.0);

    let root = BitMapBackend::new(output_path, (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| ReportError::plot(CHART, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Log-Scaled Distribution of Meteorite Masses (Filtered)",
            (FONT, 30),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), 0f64..y_max)
        .map_err(|e| ReportError::plot(CHART, e))?;

    chart
        .configure_mesh()
        .x_desc("Mass (log scale)")
        .y_desc("Frequency")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(|e| ReportError::plot(CHART, e))?;

    if let Some(histogram) = &histogram {
        chart
            .draw_series(
                histogram
                    .edges
                    .windows(2)
                    .zip(&histogram.counts)
                    .filter(|(_, count)| **count > 0)
                    .map(|(edge, count)| {
                        Rectangle::new(
                            [(edge[0], 0.0), (edge[1], *count as f64)],
                            BLUE.mix(0.5).filled(),
                        )
                    }),
            )
            .map_err(|e| ReportError::plot(CHART, e))?;
    }

    if !curve.is_empty() {
        chart
            .draw_series(LineSeries::new(curve, BLUE.stroke_width(2)))
            .map_err(|e| ReportError::plot(CHART, e))?;
    }

    if let Some(distribution) = &distribution {
        let markers = [
            ("Mean", distribution.mean, RED),
            ("Median", distribution.median, GREEN),
        ];
        for (label, value, color) in markers {
            // zero cannot be placed on a log axis
            if value <= 0.0 {
                continue;
            }
            chart
                .draw_series(LineSeries::new(
                    vec![(value, 0.0), (value, y_max)],
                    color.stroke_width(2),
                ))
                .map_err(|e| ReportError::plot(CHART, e))?
                .label(format!("{}: {:.2}g", label, value))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| ReportError::plot(CHART, e))?;
    }

    root.present().map_err(|e| ReportError::plot(CHART, e))?;
    Ok(())
}

/// Every row as a translucent point, mass on a log axis.
pub fn draw_mass_vs_year(
    table: &CleanedTable,
    settings: &ChartSettings,
    output_path: &Path,
) -> Result<()> {
    const CHART: &str = "mass vs year";

    let points = scatter_points(table);
    let skipped = table.len() - points.len();
    if skipped > 0 {
        tracing::debug!("{} rows with non-positive mass left off the log axis", skipped);
    }

    let (first_year, last_year) = table
        .iter()
        .map(|row| row.year)
        .fold((i32::MAX, i32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let x_range = if first_year <= last_year {
        (first_year - 1) as f64..(last_year + 1) as f64
    } else {
        0f64..1f64
    };
    let y_range = log_axis_range(points.iter().map(|(_, mass)| *mass));

    let root = BitMapBackend::new(output_path, (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| ReportError::plot(CHART, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Meteorite Mass vs. Year", (FONT, 30))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range.log_scale())
        .map_err(|e| ReportError::plot(CHART, e))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Mass (grams)")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()
        .map_err(|e| ReportError::plot(CHART, e))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(year, mass)| Circle::new((year, mass), 3, RED.mix(0.7).filled())),
        )
        .map_err(|e| ReportError::plot(CHART, e))?;

    root.present().map_err(|e| ReportError::plot(CHART, e))?;
    Ok(())
}

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail, Result};
use plotters::prelude::*;

use crate::model::sample::BenchmarkSample;

/// Runtime vs input size, one line per strategy.
pub fn render_runtime(samples: &[BenchmarkSample], path: &Path) -> Result<()> {
    render(
        samples,
        path,
        "Runtime vs input size",
        "runtime (seconds)",
        |s| s.elapsed_secs,
    )
}

/// Peak memory vs input size, one line per strategy.
pub fn render_memory(samples: &[BenchmarkSample], path: &Path) -> Result<()> {
    render(
        samples,
        path,
        "Peak memory vs input size",
        "peak memory (MB)",
        |s| s.peak_memory_mb(),
    )
}

fn render<F>(
    samples: &[BenchmarkSample],
    path: &Path,
    title: &str,
    y_label: &str,
    y_value: F,
) -> Result<()>
where
    F: Fn(&BenchmarkSample) -> f64,
{
    if samples.is_empty() {
        bail!("no samples to plot");
    }

    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for s in samples {
        series
            .entry(s.strategy.as_str())
            .or_default()
            .push((s.n_ticks as f64, y_value(s)));
    }
    for points in series.values_mut() {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
    }

    let x_max = samples.iter().map(|s| s.n_ticks).max().unwrap_or(1) as f64;
    let y_max = samples
        .iter()
        .map(&y_value)
        .fold(f64::MIN_POSITIVE, f64::max)
        * 1.1;

    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(|e| anyhow!("{e}"))?;

    chart
        .configure_mesh()
        .x_desc("input size (ticks)")
        .y_desc(y_label)
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    for (idx, (name, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))
            .map_err(|e| anyhow!("{e}"))?
            .label(*name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(|e| anyhow!("{e}"))?;

    root.present().map_err(|e| anyhow!("{e}"))?;
    Ok(())
}

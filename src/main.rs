use std::path::Path;

use anyhow::Result;

use tick_bench::config::Config;
use tick_bench::data::{loader, synthetic};
use tick_bench::profiler::memory::{PeakMemoryProbe, TrackingAllocator};
use tick_bench::profiler::Profiler;
use tick_bench::report;
use tick_bench::runner::{BenchmarkRunner, TrialOutcome};

// Route allocations through the counting allocator so the preferred
// per-trial memory probe is available.
#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load_or_default(Path::new(&config_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .init();

    let max_size = config.benchmark.max_size();
    let csv_path = Path::new(&config.data.csv_path);
    let ticks = if csv_path.exists() {
        let ticks = loader::load_ticks(csv_path)?;
        tracing::info!(count = ticks.len(), path = %csv_path.display(), "Loaded ticks from CSV");
        ticks
    } else {
        tracing::warn!(
            path = %csv_path.display(),
            count = max_size,
            "Tick CSV not found, generating synthetic ticks"
        );
        synthetic::generate(&config.data, max_size)
    };
    let prices: Vec<f64> = ticks.iter().map(|t| t.price).collect();

    let probe = PeakMemoryProbe::detect()?;
    tracing::info!(
        probe = %probe.kind(),
        repeats = config.benchmark.repeats,
        window_size = config.benchmark.window_size,
        "Starting benchmark"
    );

    let profiler = Profiler::new(config.benchmark.repeats, probe)?;
    let runner = BenchmarkRunner::new(
        config.benchmark.sizes.clone(),
        config.benchmark.window_size,
    )?;
    let outcomes = runner.run(&profiler, &prices)?;

    print_summary(&outcomes);

    report::write_markdown(&outcomes, Path::new(&config.report.output_md))?;
    report::write_json(&outcomes, Path::new(&config.report.output_json))?;
    tracing::info!(
        md = %config.report.output_md,
        json = %config.report.output_json,
        "Report written"
    );

    #[cfg(feature = "plots")]
    {
        let samples = tick_bench::runner::completed(&outcomes);
        tick_bench::plot::render_runtime(&samples, Path::new(&config.report.runtime_plot))?;
        tick_bench::plot::render_memory(&samples, Path::new(&config.report.memory_plot))?;
        tracing::info!(
            runtime = %config.report.runtime_plot,
            memory = %config.report.memory_plot,
            "Plots written"
        );
    }

    Ok(())
}

fn print_summary(outcomes: &[TrialOutcome]) {
    println!("benchmark results");
    println!("=================");
    println!(
        "{:<12} {:>10} {:>14} {:>16} {:>8}",
        "strategy", "ticks", "runtime (s)", "peak mem (MB)", "probe"
    );
    for outcome in outcomes {
        match outcome {
            TrialOutcome::Sample(s) => println!(
                "{:<12} {:>10} {:>14.6} {:>16.3} {:>8}",
                s.strategy,
                s.n_ticks,
                s.elapsed_secs,
                s.peak_memory_mb(),
                s.probe.to_string()
            ),
            TrialOutcome::Failed {
                strategy,
                n_ticks,
                error,
            } => println!("{:<12} {:>10} FAILED: {}", strategy, n_ticks, error),
        }
    }
}

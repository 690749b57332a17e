pub mod memory;

use std::time::{Duration, Instant};

use crate::error::AppError;
use crate::model::sample::BenchmarkSample;
use crate::strategy::Strategy;

use memory::PeakMemoryProbe;

/// Measures one (strategy, input size) trial in isolation.
///
/// Timing and memory are taken in separate passes over the same prices, each
/// on a fresh strategy instance, so neither measurement contaminates the
/// other. The instance is built before the clock starts and dropped before
/// the next pass begins.
#[derive(Debug)]
pub struct Profiler {
    repeats: usize,
    probe: PeakMemoryProbe,
}

impl Profiler {
    pub fn new(repeats: usize, probe: PeakMemoryProbe) -> Result<Self, AppError> {
        if repeats == 0 {
            return Err(AppError::InvalidConfiguration(
                "repeats must be >= 1".to_string(),
            ));
        }
        Ok(Self { repeats, probe })
    }

    /// Drive a fresh strategy over `prices` and record elapsed time and peak
    /// memory. Any ingestion error aborts the trial; no partial sample is
    /// ever produced.
    pub fn measure<F>(&self, factory: F, prices: &[f64]) -> Result<BenchmarkSample, AppError>
    where
        F: Fn() -> Result<Box<dyn Strategy>, AppError>,
    {
        let name = factory()?.name();

        // Minimum over repeats filters scheduler noise better than the mean.
        let mut best = Duration::MAX;
        for _ in 0..self.repeats {
            let mut strategy = factory()?;
            let start = Instant::now();
            drive(strategy.as_mut(), prices)?;
            best = best.min(start.elapsed());
        }

        let peak = self.probe.measure(|| {
            let mut strategy = factory()?;
            drive(strategy.as_mut(), prices)
        })?;

        Ok(BenchmarkSample {
            strategy: name.to_string(),
            n_ticks: prices.len(),
            elapsed_secs: best.as_secs_f64(),
            peak_memory_bytes: peak,
            probe: self.probe.kind(),
        })
    }
}

fn drive(strategy: &mut dyn Strategy, prices: &[f64]) -> Result<(), AppError> {
    for &price in prices {
        // black_box keeps the optimizer from eliding the per-tick work.
        std::hint::black_box(strategy.ingest(price)?);
    }
    Ok(())
}

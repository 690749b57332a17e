use anyhow::{bail, Result};

use crate::model::sample::BenchmarkSample;
use crate::profiler::Profiler;
use crate::strategy::StrategyKind;

/// Result of one trial: either a sample or a recorded failure. Failed trials
/// are kept in the result set rather than silently dropped.
#[derive(Debug, Clone)]
pub enum TrialOutcome {
    Sample(BenchmarkSample),
    Failed {
        strategy: String,
        n_ticks: usize,
        error: String,
    },
}

/// Clones out the completed samples, preserving execution order.
pub fn completed(outcomes: &[TrialOutcome]) -> Vec<BenchmarkSample> {
    outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            TrialOutcome::Sample(sample) => Some(sample.clone()),
            TrialOutcome::Failed { .. } => None,
        })
        .collect()
}

/// Enumerates {strategy} x {input size} and hands each combination to the
/// Profiler. Order is strategy-major with sizes ascending, so reports are
/// reproducible run to run.
pub struct BenchmarkRunner {
    sizes: Vec<usize>,
    window_size: usize,
}

impl BenchmarkRunner {
    pub fn new(mut sizes: Vec<usize>, window_size: usize) -> Result<Self> {
        if sizes.is_empty() {
            bail!("benchmark sizes must not be empty");
        }
        if sizes.contains(&0) {
            bail!("benchmark sizes must be positive");
        }
        if window_size == 0 {
            bail!("window_size must be positive");
        }
        sizes.sort_unstable();
        sizes.dedup();
        Ok(Self { sizes, window_size })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Run every trial against slices of the shared price sequence. A failing
    /// trial is recorded and the remaining trials still run.
    pub fn run(&self, profiler: &Profiler, prices: &[f64]) -> Result<Vec<TrialOutcome>> {
        let max_size = self.sizes.last().copied().unwrap_or(0);
        if prices.len() < max_size {
            bail!(
                "not enough ticks: largest trial needs {}, have {}",
                max_size,
                prices.len()
            );
        }

        let mut outcomes = Vec::with_capacity(StrategyKind::ALL.len() * self.sizes.len());
        for kind in StrategyKind::ALL {
            for &n in &self.sizes {
                let subset = &prices[..n];
                let window_size = self.window_size;
                match profiler.measure(|| kind.build(window_size), subset) {
                    Ok(sample) => {
                        tracing::info!(
                            strategy = %kind.label(),
                            n_ticks = n,
                            elapsed_secs = sample.elapsed_secs,
                            peak_memory_bytes = sample.peak_memory_bytes,
                            "trial complete"
                        );
                        outcomes.push(TrialOutcome::Sample(sample));
                    }
                    Err(e) => {
                        tracing::warn!(
                            strategy = %kind.label(),
                            n_ticks = n,
                            error = %e,
                            "trial failed, continuing with remaining trials"
                        );
                        outcomes.push(TrialOutcome::Failed {
                            strategy: kind.label().to_string(),
                            n_ticks: n,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_sorted_and_deduped() {
        let runner = BenchmarkRunner::new(vec![500, 100, 500, 250], 10).unwrap();
        assert_eq!(runner.sizes(), &[100, 250, 500]);
    }

    #[test]
    fn empty_sizes_rejected() {
        assert!(BenchmarkRunner::new(vec![], 10).is_err());
    }

    #[test]
    fn zero_size_rejected() {
        assert!(BenchmarkRunner::new(vec![100, 0], 10).is_err());
    }

    #[test]
    fn zero_window_rejected() {
        assert!(BenchmarkRunner::new(vec![100], 0).is_err());
    }
}

use serde::Serialize;

use crate::profiler::memory::ProbeKind;

/// One completed (strategy, input size) trial.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSample {
    pub strategy: String,
    pub n_ticks: usize,
    /// Best wall-clock time over the configured repeats, in seconds.
    pub elapsed_secs: f64,
    /// Peak memory attributable to the trial, in bytes.
    pub peak_memory_bytes: u64,
    /// Which memory facility produced `peak_memory_bytes`. Absolute values
    /// from different probes are not comparable across environments.
    pub probe: ProbeKind,
}

impl BenchmarkSample {
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / (1024.0 * 1024.0)
    }
}

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub benchmark: BenchmarkConfig,
    pub data: DataConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Input sizes to trial, deduped and sorted ascending at load.
    pub sizes: Vec<usize>,
    /// Timing repeats per trial; the minimum is reported.
    pub repeats: usize,
    /// Window size k for the windowed strategy.
    pub window_size: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1_000, 10_000, 100_000],
            repeats: 3,
            window_size: 50,
        }
    }
}

impl BenchmarkConfig {
    pub fn max_size(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Tick CSV to load; a missing file falls back to synthetic generation.
    pub csv_path: String,
    pub symbol: String,
    /// Random-walk parameters for synthetic ticks.
    pub seed: u64,
    pub start_price: f64,
    pub drift: f64,
    pub volatility: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "market_data.csv".to_string(),
            symbol: "SIM".to_string(),
            seed: 42,
            start_price: 100.0,
            drift: 0.0005,
            volatility: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_md: String,
    pub output_json: String,
    pub runtime_plot: String,
    pub memory_plot: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_md: "complexity_report.md".to_string(),
            output_json: "results.json".to_string(),
            runtime_plot: "runtime_plot.png".to_string(),
            memory_plot: "memory_plot.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to built-in defaults when the file is
    /// absent. A present-but-broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }
        tracing::warn!(path = %path.display(), "config file not found, using defaults");
        let mut config = Config::default();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&mut self) -> Result<()> {
        if self.benchmark.sizes.is_empty() {
            bail!("benchmark.sizes must not be empty");
        }
        if self.benchmark.sizes.contains(&0) {
            bail!("benchmark.sizes must be positive");
        }
        self.benchmark.sizes.sort_unstable();
        self.benchmark.sizes.dedup();

        if self.benchmark.repeats == 0 {
            bail!("benchmark.repeats must be >= 1");
        }
        if self.benchmark.window_size == 0 {
            bail!("benchmark.window_size must be positive");
        }
        if self.data.volatility < 0.0 {
            bail!("data.volatility must not be negative");
        }
        if !self.data.start_price.is_finite() || self.data.start_price <= 0.0 {
            bail!("data.start_price must be a positive finite number");
        }
        Ok(())
    }
}

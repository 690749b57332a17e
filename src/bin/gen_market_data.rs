use std::path::Path;

use anyhow::{Context, Result};

use tick_bench::config::DataConfig;
use tick_bench::data::synthetic;

/// Writes a synthetic random-walk tick CSV for the benchmark to consume.
///
/// Usage: gen_market_data [out_path] [n_ticks] [seed]
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let out = args
        .next()
        .unwrap_or_else(|| "market_data.csv".to_string());
    let n: usize = match args.next() {
        Some(v) => v.parse().context("n_ticks must be a positive integer")?,
        None => 100_000,
    };
    let seed: u64 = match args.next() {
        Some(v) => v.parse().context("seed must be an unsigned integer")?,
        None => 42,
    };

    let cfg = DataConfig {
        seed,
        ..DataConfig::default()
    };
    let ticks = synthetic::generate(&cfg, n);
    synthetic::write_csv(&ticks, Path::new(&out))?;

    println!("wrote {} ticks to {}", n, out);
    Ok(())
}

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DataConfig;
use crate::model::tick::Tick;

// 2026-01-01T00:00:00Z
const START_MS: u64 = 1_767_225_600_000;
const STEP_MS: u64 = 1_000;

/// Seeded random-walk tick stream:
/// `price[t+1] = max(0.01, price[t] + drift + noise)`, noise ~ N(0, volatility).
/// Same seed, same stream.
pub fn generate(cfg: &DataConfig, n: usize) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut price = cfg.start_price;
    let mut ticks = Vec::with_capacity(n);

    for i in 0..n {
        ticks.push(Tick {
            symbol: cfg.symbol.clone(),
            price,
            timestamp_ms: START_MS + i as u64 * STEP_MS,
        });

        let noise = gaussian(&mut rng) * cfg.volatility;
        price = (price + cfg.drift + noise).max(0.01);
    }

    ticks
}

/// Standard normal via Box-Muller from two uniforms.
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Write ticks as `timestamp,symbol,price` CSV, RFC 3339 timestamps.
pub fn write_csv(ticks: &[Tick], path: &Path) -> Result<()> {
    let mut out = String::with_capacity(ticks.len() * 40 + 32);
    out.push_str("timestamp,symbol,price\n");

    for tick in ticks {
        let dt = DateTime::from_timestamp_millis(tick.timestamp_ms as i64)
            .with_context(|| format!("timestamp out of range: {}", tick.timestamp_ms))?;
        let _ = writeln!(
            out,
            "{},{},{:.6}",
            dt.to_rfc3339_opts(SecondsFormat::Secs, true),
            tick.symbol,
            tick.price
        );
    }

    std::fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let cfg = DataConfig::default();
        let a = generate(&cfg, 256);
        let b = generate(&cfg, 256);
        assert_eq!(a.len(), 256);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.price, y.price);
            assert_eq!(x.timestamp_ms, y.timestamp_ms);
        }
    }

    #[test]
    fn different_seed_different_stream() {
        let base = DataConfig::default();
        let other = DataConfig {
            seed: base.seed + 1,
            ..DataConfig::default()
        };
        let a = generate(&base, 64);
        let b = generate(&other, 64);
        assert!(a.iter().zip(&b).skip(1).any(|(x, y)| x.price != y.price));
    }

    #[test]
    fn prices_stay_finite_and_floored() {
        let cfg = DataConfig {
            volatility: 50.0,
            ..DataConfig::default()
        };
        for tick in generate(&cfg, 2_000) {
            assert!(tick.price.is_finite());
            assert!(tick.price >= 0.01);
        }
    }

    #[test]
    fn timestamps_step_one_second() {
        let ticks = generate(&DataConfig::default(), 10);
        for pair in ticks.windows(2) {
            assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 1_000);
        }
    }
}

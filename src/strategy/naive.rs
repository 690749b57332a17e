use crate::error::AppError;
use crate::strategy::{validate_price, Strategy};

/// Full-history average recomputed from scratch on every tick.
///
/// Per tick: O(n) (sums the whole history). Over N ticks: O(N^2) time,
/// O(N) space. This is the complexity baseline the optimized variants are
/// measured against, not a strategy anyone should run for speed.
#[derive(Debug, Clone, Default)]
pub struct NaiveStrategy {
    prices: Vec<f64>,
}

impl NaiveStrategy {
    pub fn new() -> Self {
        Self { prices: Vec::new() }
    }

    pub fn history_len(&self) -> usize {
        self.prices.len()
    }
}

impl Strategy for NaiveStrategy {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn ingest(&mut self, price: f64) -> Result<f64, AppError> {
        let price = validate_price(price)?;
        self.prices.push(price);

        // O(n): full sweep over the stored history.
        let sum: f64 = self.prices.iter().sum();
        Ok(sum / self.prices.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_full_history() {
        let mut strat = NaiveStrategy::new();
        assert_eq!(strat.ingest(1.0).unwrap(), 1.0);
        assert_eq!(strat.ingest(2.0).unwrap(), 1.5);
        assert_eq!(strat.ingest(3.0).unwrap(), 2.0);
        assert_eq!(strat.history_len(), 3);
    }

    #[test]
    fn stores_every_price_seen() {
        let mut strat = NaiveStrategy::new();
        for i in 0..1000 {
            strat.ingest(i as f64).unwrap();
        }
        assert_eq!(strat.history_len(), 1000);
    }

    #[test]
    fn rejects_nan_without_touching_state() {
        let mut strat = NaiveStrategy::new();
        strat.ingest(10.0).unwrap();
        assert!(strat.ingest(f64::NAN).is_err());
        assert_eq!(strat.history_len(), 1);
        assert_eq!(strat.ingest(20.0).unwrap(), 15.0);
    }
}

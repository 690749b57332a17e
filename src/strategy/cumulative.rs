use crate::error::AppError;
use crate::strategy::{validate_price, Strategy};

/// Full-history average via a running sum and count.
///
/// Same output as [`NaiveStrategy`](crate::strategy::NaiveStrategy) at every
/// tick, but O(1) per tick and O(1) space. The average is only reachable as
/// the return value of `ingest`, so a divide-by-zero on an empty state
/// cannot arise through the interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct CumulativeStrategy {
    sum: f64,
    count: u64,
}

impl CumulativeStrategy {
    pub fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Strategy for CumulativeStrategy {
    fn name(&self) -> &'static str {
        "cumulative"
    }

    fn ingest(&mut self, price: f64) -> Result<f64, AppError> {
        let price = validate_price(price)?;
        self.sum += price;
        self.count += 1;
        Ok(self.sum / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_average_scenario() {
        let mut strat = CumulativeStrategy::new();
        let expected = [1.0, 1.5, 2.0, 2.5, 3.0];
        for (i, price) in [1.0, 2.0, 3.0, 4.0, 5.0].iter().enumerate() {
            let avg = strat.ingest(*price).unwrap();
            assert!((avg - expected[i]).abs() < f64::EPSILON, "tick {i}: {avg}");
        }
        assert_eq!(strat.count(), 5);
    }

    #[test]
    fn state_is_constant_size() {
        // No history vector to grow: the struct is Copy.
        let mut strat = CumulativeStrategy::new();
        for i in 0..10_000 {
            strat.ingest((i % 100) as f64 + 1.0).unwrap();
        }
        assert_eq!(strat.count(), 10_000);
        assert_eq!(std::mem::size_of::<CumulativeStrategy>(), 16);
    }

    #[test]
    fn rejects_infinite_price() {
        let mut strat = CumulativeStrategy::new();
        strat.ingest(5.0).unwrap();
        assert!(strat.ingest(f64::INFINITY).is_err());
        // Count unchanged after the rejected tick.
        assert_eq!(strat.count(), 1);
    }
}

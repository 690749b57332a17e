pub mod cumulative;
pub mod naive;
pub mod windowed;

use crate::error::AppError;

pub use cumulative::CumulativeStrategy;
pub use naive::NaiveStrategy;
pub use windowed::WindowedStrategy;

/// Streaming moving-average strategy.
///
/// `ingest` folds one price into internal state and returns the moving
/// average as defined by the variant, after the price is incorporated.
/// Implementations must be deterministic for a fixed input sequence and
/// must never block.
pub trait Strategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    fn ingest(&mut self, price: f64) -> Result<f64, AppError>;
}

/// Reject NaN/infinite prices before they can poison a running sum.
pub(crate) fn validate_price(price: f64) -> Result<f64, AppError> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(AppError::MalformedInput(format!(
            "price is not a finite number: {price}"
        )))
    }
}

/// The three strategy variants under benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Naive,
    Cumulative,
    Windowed,
}

impl StrategyKind {
    /// Benchmark enumeration order: baseline first, then the refactors.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Naive,
        StrategyKind::Cumulative,
        StrategyKind::Windowed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::Naive => "naive",
            StrategyKind::Cumulative => "cumulative",
            StrategyKind::Windowed => "windowed",
        }
    }

    /// Build a fresh instance. `window_size` is only consulted by the
    /// windowed variant.
    pub fn build(&self, window_size: usize) -> Result<Box<dyn Strategy>, AppError> {
        match self {
            StrategyKind::Naive => Ok(Box::new(NaiveStrategy::new())),
            StrategyKind::Cumulative => Ok(Box::new(CumulativeStrategy::new())),
            StrategyKind::Windowed => Ok(Box::new(WindowedStrategy::new(window_size)?)),
        }
    }
}

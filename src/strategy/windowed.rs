use std::collections::VecDeque;

use crate::error::AppError;
use crate::strategy::{validate_price, Strategy};

/// Sliding-window average over the last `k` prices.
///
/// A `VecDeque` gives O(1) push_back and O(1) pop_front, which is what keeps
/// eviction constant-time; a plain Vec with `remove(0)` would silently turn
/// each eviction into O(k). A running sum of the window contents makes the
/// average itself O(1).
///
/// Invariants: `window.len() <= k` at all times, and `sum` equals the
/// arithmetic sum of the prices currently held.
#[derive(Debug, Clone)]
pub struct WindowedStrategy {
    window_size: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl WindowedStrategy {
    pub fn new(window_size: usize) -> Result<Self, AppError> {
        if window_size == 0 {
            return Err(AppError::InvalidConfiguration(
                "window_size must be positive".to_string(),
            ));
        }
        Ok(Self {
            window_size,
            // len peaks at k+1 between push and evict; reserving for it up
            // front keeps the deque from ever reallocating mid-stream.
            window: VecDeque::with_capacity(window_size + 1),
            sum: 0.0,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

impl Strategy for WindowedStrategy {
    fn name(&self) -> &'static str {
        "windowed"
    }

    fn ingest(&mut self, price: f64) -> Result<f64, AppError> {
        let price = validate_price(price)?;

        // O(1): push new
        self.window.push_back(price);
        self.sum += price;

        // O(1): evict oldest once the window overflows
        if self.window.len() > self.window_size {
            if let Some(old) = self.window.pop_front() {
                self.sum -= old;
            }
        }

        // First k-1 ticks average over the partial window, no zero padding.
        Ok(self.sum / self.window.len() as f64)
    }
}

#[derive(Debug, Clone)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub timestamp_ms: u64,
}

impl Tick {
    /// Create a synthetic tick carrying only a price (for benchmark input).
    pub fn from_price(price: f64) -> Self {
        Self {
            symbol: "SYNTH".to_string(),
            price,
            timestamp_ms: 0,
        }
    }
}

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};

use crate::model::tick::Tick;

/// Load all ticks from a delimited file into memory, in row order.
///
/// The header must name at least `timestamp`, `symbol` and `price`; columns
/// are located by name so extra columns and reordering are fine. O(N) time
/// and O(N) space for N rows.
pub fn load_ticks(path: &Path) -> Result<Vec<Tick>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut lines = content.lines();
    let header = match lines.next() {
        Some(h) => h,
        None => bail!("{}: file is empty", path.display()),
    };

    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let ts_idx = column_index(&columns, "timestamp", path)?;
    let symbol_idx = column_index(&columns, "symbol", path)?;
    let price_idx = column_index(&columns, "price", path)?;

    let mut ticks = Vec::new();
    for (i, line) in lines.enumerate() {
        let row = i + 2; // 1-based, after the header
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.len() {
            bail!(
                "{} row {}: expected {} fields, got {}",
                path.display(),
                row,
                columns.len(),
                fields.len()
            );
        }

        let timestamp_ms = parse_timestamp(fields[ts_idx])
            .with_context(|| format!("{} row {}", path.display(), row))?;
        let price: f64 = fields[price_idx]
            .parse()
            .with_context(|| format!("{} row {}: invalid price '{}'", path.display(), row, fields[price_idx]))?;
        if !price.is_finite() {
            bail!("{} row {}: price is not finite: {}", path.display(), row, price);
        }

        ticks.push(Tick {
            symbol: fields[symbol_idx].to_string(),
            price,
            timestamp_ms,
        });
    }

    Ok(ticks)
}

fn column_index(columns: &[&str], name: &str, path: &Path) -> Result<usize> {
    columns
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .with_context(|| format!("{}: missing required column '{}'", path.display(), name))
}

/// RFC 3339 preferred; a bare `YYYY-MM-DDTHH:MM:SS[.frac]` is treated as UTC.
fn parse_timestamp(value: &str) -> Result<u64> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis().max(0) as u64);
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("invalid timestamp '{s}'"))?;
    Ok(naive.and_utc().timestamp_millis().max(0) as u64)
}

use std::fs;
use std::path::PathBuf;

use tick_bench::config::DataConfig;
use tick_bench::data::{loader, synthetic};

fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("ticks.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn generator_output_round_trips_through_the_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("market_data.csv");

    let ticks = synthetic::generate(&DataConfig::default(), 100);
    synthetic::write_csv(&ticks, &path).unwrap();

    let loaded = loader::load_ticks(&path).unwrap();
    assert_eq!(loaded.len(), 100);
    for (orig, read) in ticks.iter().zip(&loaded) {
        // CSV prices carry 6 decimals.
        assert!((orig.price - read.price).abs() < 1e-5);
        assert_eq!(orig.timestamp_ms, read.timestamp_ms);
        assert_eq!(orig.symbol, read.symbol);
    }
}

#[test]
fn columns_are_located_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "symbol,price,timestamp,volume\n\
         BTC,100.5,2026-01-01T00:00:00Z,9\n\
         BTC,101.25,2026-01-01T00:00:01Z,12\n",
    );
    let ticks = loader::load_ticks(&path).unwrap();

    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].symbol, "BTC");
    assert_eq!(ticks[0].price, 100.5);
    assert_eq!(ticks[1].price, 101.25);
    assert_eq!(ticks[1].timestamp_ms - ticks[0].timestamp_ms, 1_000);
}

#[test]
fn blank_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "timestamp,symbol,price\n\
         2026-01-01T00:00:00Z,SIM,100.0\n\
         \n\
         2026-01-01T00:00:01Z,SIM,101.0\n",
    );
    assert_eq!(loader::load_ticks(&path).unwrap().len(), 2);
}

#[test]
fn missing_required_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "timestamp,symbol\n2026-01-01T00:00:00Z,SIM\n");
    let err = loader::load_ticks(&path).unwrap_err();
    assert!(err.to_string().contains("price"));
}

#[test]
fn unparseable_price_is_an_error_with_row_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "timestamp,symbol,price\n\
         2026-01-01T00:00:00Z,SIM,100.0\n\
         2026-01-01T00:00:01Z,SIM,abc\n",
    );
    let err = format!("{:#}", loader::load_ticks(&path).unwrap_err());
    assert!(err.contains("row 3"), "error: {err}");
}

#[test]
fn nan_price_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "timestamp,symbol,price\n2026-01-01T00:00:00Z,SIM,NaN\n",
    );
    let err = loader::load_ticks(&path).unwrap_err();
    assert!(err.to_string().contains("not finite"));
}

#[test]
fn field_count_mismatch_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        &dir,
        "timestamp,symbol,price\n2026-01-01T00:00:00Z,SIM\n",
    );
    assert!(loader::load_ticks(&path).is_err());
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(&dir, "");
    assert!(loader::load_ticks(&path).is_err());
}

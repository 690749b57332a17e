pub mod config;
pub mod data;
pub mod error;
pub mod model;
#[cfg(feature = "plots")]
pub mod plot;
pub mod profiler;
pub mod report;
pub mod runner;
pub mod strategy;

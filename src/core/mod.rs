//! Core domain models for Helsa.
//!
//! This module contains the fundamental types and logic that power
//! the health metrics query pipeline.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ConfigBuilder, LogLevel};
pub use error::{HelsaError, Result};
pub use types::{
    format_timestamp, parse_timestamp, AggregationFunction, Granularity, Metric, MetricId,
    QueryIntent, SeriesPoint, TimeSeries, TimeWindow,
};

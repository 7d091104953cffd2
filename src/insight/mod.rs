//! Renders a retrieved series and a requested aggregation into an answer.

use crate::core::types::{AggregationFunction, TimeSeries};
use crate::stats;

/// Turns a series plus an optional aggregation function into a one-line
/// human-readable summary. Never fails: an empty series yields a fixed
/// no-data message regardless of the requested function.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightEngine;

impl InsightEngine {
    /// Creates a new insight engine
    pub fn new() -> Self {
        Self
    }

    /// Summarize the series under the requested function
    pub fn summarize(&self, series: &TimeSeries, function: Option<AggregationFunction>) -> String {
        if series.is_empty() {
            return "No data available for the selected window.".to_string();
        }

        match function {
            Some(AggregationFunction::Mean) => {
                // Safe after the empty guard; same arithmetic as stats::mean.
                let mean = stats::sum(series) / series.len() as f64;
                format!("Average value: {}", mean.round())
            },
            Some(AggregationFunction::Sum) => {
                format!("Total: {}", stats::sum(series).round())
            },
            Some(AggregationFunction::Min) => {
                let min = series.values().min_by(|a, b| a.total_cmp(b)).unwrap_or(0.0);
                format!("Min: {min}")
            },
            Some(AggregationFunction::Max) => {
                let max = series.values().max_by(|a, b| a.total_cmp(b)).unwrap_or(0.0);
                format!("Max: {max}")
            },
            Some(AggregationFunction::Median) => {
                let mut sorted: Vec<f64> = series.values().collect();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mid = sorted.len() / 2;
                let median = if sorted.len() % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) / 2.0
                } else {
                    sorted[mid]
                };
                format!("Median: {median}")
            },
            // Placeholder output: a real moving mean needs a window-size
            // parameter the intent schema does not carry yet.
            Some(AggregationFunction::MovingMean) => "Moving mean computed".to_string(),
            None => format!("Data points: {}", series.len()),
        }
    }
}

use crate::core::error::{HelsaError, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier for a health metric (e.g. `heart_rate`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId(String);

impl MetricId {
    /// Creates a new MetricId after validation
    pub fn new(id: String) -> Result<Self> {
        if id.is_empty() {
            return Err(HelsaError::metric_unsupported("metric id cannot be empty"));
        }
        if id.len() > 64 {
            return Err(HelsaError::metric_unsupported(format!(
                "metric id cannot exceed 64 characters, got {}",
                id.len()
            )));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(HelsaError::metric_unsupported(format!(
                "metric id cannot contain whitespace: {id:?}"
            )));
        }
        Ok(MetricId(id))
    }

    /// Returns the string representation of the metric id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the inner string value
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MetricId {
    type Err = HelsaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.to_string())
    }
}

/// Bucketing unit at which raw observations collapse into series points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per hour
    Hour,
    /// One point per calendar day
    #[default]
    Day,
    /// One point per week
    Week,
}

impl Granularity {
    /// Returns the chronological step between two adjacent buckets
    pub fn bucket(&self) -> Duration {
        match self {
            Self::Hour => Duration::hours(1),
            Self::Day => Duration::days(1),
            Self::Week => Duration::weeks(1),
        }
    }

    /// Returns the lowercase name used in configs and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a health metric as known to the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Canonical identifier, the registry key
    pub id: MetricId,
    /// Unit the values are expressed in (e.g. `kcal`, `count/min`)
    pub unit: String,
    /// Default bucketing applied when a query does not override it
    pub granularity: Granularity,
}

impl Metric {
    /// Creates a new metric definition
    pub fn new<S: Into<String>>(id: MetricId, unit: S, granularity: Granularity) -> Self {
        Self {
            id,
            unit: unit.into(),
            granularity,
        }
    }
}

/// Inclusive start/end timestamp pair bounding a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant covered by the window
    pub start: DateTime<Utc>,
    /// Last instant covered by the window
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new window after validating that start does not follow end
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(HelsaError::malformed_timestamp(format!(
                "window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window covering the `days` trailing days up to `end`
    pub fn last_days(days: i64, end: DateTime<Utc>) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Returns true if the timestamp falls inside the window, bounds included
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Number of whole days between start and end
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", format_timestamp(self.start), format_timestamp(self.end))
    }
}

/// One observation bucket in a time series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Start of the bucket this point summarizes
    pub timestamp: DateTime<Utc>,
    /// Aggregated observation value for the bucket
    pub value: f64,
}

impl SeriesPoint {
    /// Creates a new series point
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Chronologically ordered sequence of observation buckets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries(Vec<SeriesPoint>);

impl TimeSeries {
    /// Creates an empty series
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a series from points, sorting them by timestamp
    pub fn from_points(mut points: Vec<SeriesPoint>) -> Self {
        points.sort_by_key(|point| point.timestamp);
        Self(points)
    }

    /// Appends a point; callers append in chronological order
    pub fn push(&mut self, point: SeriesPoint) {
        self.0.push(point);
    }

    /// Returns the underlying points in chronological order
    pub fn points(&self) -> &[SeriesPoint] {
        &self.0
    }

    /// Iterates over the raw values in chronological order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|point| point.value)
    }

    /// Number of points in the series
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the series has no points
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Named reduction applied to a series to produce one summary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationFunction {
    /// Arithmetic mean of all values
    Mean,
    /// Arithmetic sum of all values
    Sum,
    /// Smallest value
    Min,
    /// Largest value
    Max,
    /// Middle value over the sorted series
    Median,
    /// Windowed running mean
    MovingMean,
}

impl AggregationFunction {
    /// Returns the interchange name, matching the serde encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Median => "median",
            Self::MovingMean => "movingMean",
        }
    }
}

impl fmt::Display for AggregationFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured query produced by the planner and consumed by the orchestrator.
///
/// The window bounds travel as ISO 8601 strings so the intent can cross a
/// process or service boundary unchanged. Absent bounds mean the planner
/// could not infer a window and the orchestrator applies its own default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    /// Canonical metric identifier the question is about
    pub metric: String,
    /// Requested reduction; `None` means "no aggregation, report point count"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<AggregationFunction>,
    /// Window start, RFC 3339 with seconds precision
    #[serde(rename = "startISO8601", skip_serializing_if = "Option::is_none")]
    pub start_iso8601: Option<String>,
    /// Window end, RFC 3339 with seconds precision
    #[serde(rename = "endISO8601", skip_serializing_if = "Option::is_none")]
    pub end_iso8601: Option<String>,
}

impl QueryIntent {
    /// Creates a bare intent for the given metric with nothing else inferred
    pub fn new<S: Into<String>>(metric: S) -> Self {
        Self {
            metric: metric.into(),
            function: None,
            start_iso8601: None,
            end_iso8601: None,
        }
    }
}

/// Encodes a timestamp in the interchange format used by `QueryIntent`
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decodes an interchange timestamp, accepting any RFC 3339 offset
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| HelsaError::malformed_timestamp(raw))
}

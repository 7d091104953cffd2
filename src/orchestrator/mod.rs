//! Request orchestration: free text in, answer string out.
//!
//! The orchestrator resolves the intent's time window, reads the series from
//! the data source, and hands it to the insight engine. It computes no
//! aggregate itself. Bad or missing window bounds are recovered locally with
//! the default window; source errors propagate to the caller unchanged.

use crate::core::types::{parse_timestamp, MetricId, QueryIntent, TimeWindow};
use crate::core::{HelsaError, Result};
use crate::insight::InsightEngine;
use crate::planner::QueryPlanner;
use crate::registry::MetricRegistry;
use crate::source::HealthDataSource;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

/// Window length applied when an intent carries no usable bound
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Executes structured intents against a data source
pub struct Orchestrator {
    source: Arc<dyn HealthDataSource>,
    registry: Arc<MetricRegistry>,
    insight: InsightEngine,
    read_timeout: std::time::Duration,
}

impl Orchestrator {
    /// Create a new orchestrator over the given source and registry
    pub fn new(
        source: Arc<dyn HealthDataSource>,
        registry: Arc<MetricRegistry>,
        read_timeout: std::time::Duration,
    ) -> Self {
        Self {
            source,
            registry,
            insight: InsightEngine::new(),
            read_timeout,
        }
    }

    /// Execute an intent: resolve the window, read the series, summarize.
    ///
    /// The single awaited suspension point is the source read.
    pub async fn execute(&self, intent: &QueryIntent) -> Result<String> {
        let metric: MetricId = intent.metric.parse()?;
        let window = self.resolve_window(intent, Utc::now());
        let granularity = self.registry.granularity_for(metric.as_str());

        debug!(
            metric = %metric,
            window = %window,
            granularity = %granularity,
            "reading series"
        );

        let series = tokio::time::timeout(
            self.read_timeout,
            self.source.read(&metric, &window, granularity),
        )
        .await
        .map_err(|_| HelsaError::Timeout {
            timeout_ms: self.read_timeout.as_millis() as u64,
        })??;

        Ok(self.insight.summarize(&series, intent.function))
    }

    /// Resolve the intent's window against `now`.
    ///
    /// Missing or malformed bounds fall back individually; bounds that
    /// resolve inverted discard both and take the full default window.
    fn resolve_window(&self, intent: &QueryIntent, now: DateTime<Utc>) -> TimeWindow {
        let start = self
            .parse_bound(intent.start_iso8601.as_deref())
            .unwrap_or_else(|| now - Duration::days(DEFAULT_WINDOW_DAYS));
        let end = self.parse_bound(intent.end_iso8601.as_deref()).unwrap_or(now);

        TimeWindow::new(start, end).unwrap_or_else(|_| {
            debug!(%start, %end, "window bounds inverted, using default window");
            TimeWindow::last_days(DEFAULT_WINDOW_DAYS, now)
        })
    }

    fn parse_bound(&self, raw: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = raw?;
        match parse_timestamp(raw) {
            Ok(timestamp) => Some(timestamp),
            Err(_) => {
                debug!(raw, "malformed window bound, falling back to default");
                None
            },
        }
    }
}

/// End-to-end pipeline: plan a question, then execute the intent
pub struct Assistant {
    planner: Box<dyn QueryPlanner>,
    orchestrator: Orchestrator,
}

impl Assistant {
    /// Create an assistant from a planner and an orchestrator
    pub fn new(planner: Box<dyn QueryPlanner>, orchestrator: Orchestrator) -> Self {
        Self {
            planner,
            orchestrator,
        }
    }

    /// Answer a free-text question
    pub async fn answer(&self, question: &str) -> Result<String> {
        let intent = self.planner.plan(question);
        debug!(metric = %intent.metric, function = ?intent.function, "planned intent");
        self.orchestrator.execute(&intent).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{format_timestamp, Granularity, SeriesPoint, TimeSeries};
    use std::time::Duration as StdDuration;

    /// Ramp source: one point per bucket, values 0, 1, 2, ...
    struct RampSource;

    #[async_trait::async_trait]
    impl HealthDataSource for RampSource {
        async fn read(
            &self,
            _metric: &MetricId,
            window: &TimeWindow,
            granularity: Granularity,
        ) -> Result<TimeSeries> {
            let mut series = TimeSeries::empty();
            let mut timestamp = window.start;
            let mut value = 0.0;
            while timestamp <= window.end {
                series.push(SeriesPoint::new(timestamp, value));
                timestamp += granularity.bucket();
                value += 1.0;
            }
            Ok(series)
        }
    }

    struct DeniedSource;

    #[async_trait::async_trait]
    impl HealthDataSource for DeniedSource {
        async fn read(
            &self,
            metric: &MetricId,
            _window: &TimeWindow,
            _granularity: Granularity,
        ) -> Result<TimeSeries> {
            Err(HelsaError::access_denied(metric.as_str()))
        }
    }

    fn orchestrator(source: Arc<dyn HealthDataSource>) -> Orchestrator {
        Orchestrator::new(
            source,
            Arc::new(MetricRegistry::with_defaults()),
            StdDuration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_execute_with_explicit_window() {
        let orchestrator = orchestrator(Arc::new(RampSource));
        let now = Utc::now();
        let intent = QueryIntent {
            metric: "heart_rate".to_string(),
            function: Some(crate::core::types::AggregationFunction::Mean),
            start_iso8601: Some(format_timestamp(now - Duration::days(4))),
            end_iso8601: Some(format_timestamp(now)),
        };
        // Five whole days inclusive: values 0..=4, mean 2.
        let answer = orchestrator.execute(&intent).await.unwrap();
        assert_eq!(answer, "Average value: 2");
    }

    #[tokio::test]
    async fn test_malformed_bounds_fall_back_to_default_window() {
        let orchestrator = orchestrator(Arc::new(RampSource));
        let mut intent = QueryIntent::new("steps");
        intent.start_iso8601 = Some("not-a-timestamp".to_string());
        // Default 30-day window, inclusive bucket walk: 31 points.
        let answer = orchestrator.execute(&intent).await.unwrap();
        assert_eq!(answer, "Data points: 31");
    }

    #[tokio::test]
    async fn test_inverted_bounds_take_full_default_window() {
        let orchestrator = orchestrator(Arc::new(RampSource));
        let now = Utc::now();
        let intent = QueryIntent {
            metric: "steps".to_string(),
            function: None,
            start_iso8601: Some(format_timestamp(now)),
            end_iso8601: Some(format_timestamp(now - Duration::days(9))),
        };
        let answer = orchestrator.execute(&intent).await.unwrap();
        assert_eq!(answer, "Data points: 31");
    }

    #[tokio::test]
    async fn test_source_error_propagates_verbatim() {
        let orchestrator = orchestrator(Arc::new(DeniedSource));
        let intent = QueryIntent::new("sleep_duration");
        let err = orchestrator.execute(&intent).await.unwrap_err();
        assert!(matches!(err, HelsaError::AccessDenied(ref m) if m == "sleep_duration"));
    }
}

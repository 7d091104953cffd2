//! End-to-end pipeline tests: free-text question in, answer string out,
//! with deterministic stub sources standing in for the health platform.

use helsa_lib::core::types::{
    format_timestamp, Granularity, MetricId, QueryIntent, SeriesPoint, TimeSeries, TimeWindow,
};
use helsa_lib::core::{HelsaError, Result};
use helsa_lib::orchestrator::{Assistant, Orchestrator};
use helsa_lib::planner::{QueryPlanner, RuleBasedPlanner};
use helsa_lib::registry::MetricRegistry;
use helsa_lib::source::{DemoSource, HealthDataSource};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

/// One point per bucket with values 0, 1, 2, ... in bucket order.
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

/// Always denies access, echoing the metric id in the message.
struct DeniedSource;

#[async_trait::async_trait]
impl HealthDataSource for DeniedSource {
    async fn read(
        &self,
        metric: &MetricId,
        _window: &TimeWindow,
        _granularity: Granularity,
    ) -> Result<TimeSeries> {
        Err(HelsaError::access_denied(format!("user revoked {}", metric.as_str())))
    }
}

/// Never answers within any reasonable deadline.
struct StalledSource;

#[async_trait::async_trait]
impl HealthDataSource for StalledSource {
    async fn read(
        &self,
        _metric: &MetricId,
        _window: &TimeWindow,
        _granularity: Granularity,
    ) -> Result<TimeSeries> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(TimeSeries::empty())
    }
}

/// Returns a series with no points at all.
struct BarrenSource;

#[async_trait::async_trait]
impl HealthDataSource for BarrenSource {
    async fn read(
        &self,
        _metric: &MetricId,
        _window: &TimeWindow,
        _granularity: Granularity,
    ) -> Result<TimeSeries> {
        Ok(TimeSeries::empty())
    }
}

fn assistant_over(source: Arc<dyn HealthDataSource>, read_timeout: Duration) -> Assistant {
    let orchestrator =
        Orchestrator::new(source, Arc::new(MetricRegistry::with_defaults()), read_timeout);
    Assistant::new(Box::new(RuleBasedPlanner::default()), orchestrator)
}

#[tokio::test]
async fn test_average_question_over_ramp_series() {
    let assistant = assistant_over(Arc::new(RampSource), Duration::from_secs(5));

    // A 7-day window walked inclusively yields 8 daily buckets with values
    // 0..=7; their mean is 3.5, displayed rounded.
    let answer = assistant
        .answer("What's my average heart rate in the last 7 days?")
        .await
        .unwrap();
    assert_eq!(answer, "Average value: 4");
}

#[tokio::test]
async fn test_count_question_over_ramp_series() {
    let assistant = assistant_over(Arc::new(RampSource), Duration::from_secs(5));

    let answer = assistant.answer("steps last week").await.unwrap();
    assert_eq!(answer, "Data points: 8");
}

#[tokio::test]
async fn test_missing_bounds_take_default_window() {
    let orchestrator = Orchestrator::new(
        Arc::new(RampSource),
        Arc::new(MetricRegistry::with_defaults()),
        Duration::from_secs(5),
    );

    // No bounds at all: the orchestrator substitutes now-30d..now.
    let intent = QueryIntent::new("steps");
    let answer = orchestrator.execute(&intent).await.unwrap();
    assert_eq!(answer, "Data points: 31");
}

#[tokio::test]
async fn test_malformed_bounds_recover_locally() {
    let orchestrator = Orchestrator::new(
        Arc::new(RampSource),
        Arc::new(MetricRegistry::with_defaults()),
        Duration::from_secs(5),
    );

    let mut intent = QueryIntent::new("steps");
    intent.start_iso8601 = Some("three weeks ago".to_string());
    intent.end_iso8601 = Some("2024-13-45T99:99:99Z".to_string());
    let answer = orchestrator.execute(&intent).await.unwrap();
    assert_eq!(answer, "Data points: 31");
}

#[tokio::test]
async fn test_source_error_reaches_caller_verbatim() {
    let assistant = assistant_over(Arc::new(DeniedSource), Duration::from_secs(5));

    let err = assistant.answer("my sleep this week").await.unwrap_err();
    match err {
        HelsaError::AccessDenied(message) => {
            assert_eq!(message, "user revoked sleep_duration");
        },
        other => panic!("expected AccessDenied, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stalled_source_times_out() {
    let assistant = assistant_over(Arc::new(StalledSource), Duration::from_millis(20));

    let err = assistant.answer("steps last week").await.unwrap_err();
    assert!(matches!(err, HelsaError::Timeout { timeout_ms: 20 }));
}

#[tokio::test]
async fn test_empty_series_yields_no_data_answer() {
    let assistant = assistant_over(Arc::new(BarrenSource), Duration::from_secs(5));

    let answer = assistant.answer("average heart rate last week").await.unwrap();
    assert_eq!(answer, "No data available for the selected window.");
}

#[tokio::test]
async fn test_demo_pipeline_is_deterministic_under_seed() {
    let question = "What's my average heart rate in the last 7 days?";

    let first = assistant_over(Arc::new(DemoSource::with_seed(42)), Duration::from_secs(5))
        .answer(question)
        .await
        .unwrap();
    let second = assistant_over(Arc::new(DemoSource::with_seed(42)), Duration::from_secs(5))
        .answer(question)
        .await
        .unwrap();

    assert!(first.starts_with("Average value: "));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unsupported_metric_is_the_sources_verdict() {
    // "glucose" matches no metric rule, so planning falls back to "steps";
    // a source that does not serve steps answers with MetricUnsupported.
    struct HeartOnlySource;

    #[async_trait::async_trait]
    impl HealthDataSource for HeartOnlySource {
        async fn read(
            &self,
            metric: &MetricId,
            _window: &TimeWindow,
            _granularity: Granularity,
        ) -> Result<TimeSeries> {
            Err(HelsaError::metric_unsupported(metric.as_str()))
        }
    }

    let assistant = assistant_over(Arc::new(HeartOnlySource), Duration::from_secs(5));
    let err = assistant.answer("my glucose levels").await.unwrap_err();
    assert!(matches!(err, HelsaError::MetricUnsupported(ref m) if m == "steps"));
}

#[tokio::test]
async fn test_intent_crossing_a_process_boundary() {
    // Plan on one side, serialize, execute on the other.
    let planner = RuleBasedPlanner::default();
    let intent = planner.plan("average steps in the last 7 days");

    let wire = serde_json::to_string(&intent).unwrap();
    let decoded: QueryIntent = serde_json::from_str(&wire).unwrap();

    let orchestrator = Orchestrator::new(
        Arc::new(RampSource),
        Arc::new(MetricRegistry::with_defaults()),
        Duration::from_secs(5),
    );
    let answer = orchestrator.execute(&decoded).await.unwrap();
    assert_eq!(answer, "Average value: 4");
}

#[tokio::test]
async fn test_explicit_window_drives_the_read() {
    use chrono::{Duration as ChronoDuration, Utc};

    let orchestrator = Orchestrator::new(
        Arc::new(RampSource),
        Arc::new(MetricRegistry::with_defaults()),
        Duration::from_secs(5),
    );

    let now = Utc::now();
    let intent = QueryIntent {
        metric: "active_energy".to_string(),
        function: Some(helsa_lib::core::types::AggregationFunction::Sum),
        start_iso8601: Some(format_timestamp(now - ChronoDuration::days(2))),
        end_iso8601: Some(format_timestamp(now)),
    };

    // Three buckets, values 0 + 1 + 2.
    let answer = orchestrator.execute(&intent).await.unwrap();
    assert_eq!(answer, "Total: 3");
}

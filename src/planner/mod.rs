//! Free-text query planning.
//!
//! Turns a natural-language health question into a structured [`QueryIntent`]
//! by walking ordered keyword rule tables: metric first, then aggregation
//! function, then time window. Planning never fails; unmatched text falls
//! back to the configured defaults.

pub mod rules;

use crate::core::types::{format_timestamp, QueryIntent};
use chrono::{DateTime, Duration, Utc};

pub use rules::{FunctionRule, MetricRule, RuleSet, WindowRule};

/// Turns free text into a structured query intent
pub trait QueryPlanner: Send + Sync {
    /// Produces a best-effort intent for the question; never fails
    fn plan(&self, text: &str) -> QueryIntent;
}

/// Planner driven by ordered keyword rule tables
pub struct RuleBasedPlanner {
    rules: RuleSet,
}

impl RuleBasedPlanner {
    /// Create a planner over the given rule tables
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Deterministic core of [`QueryPlanner::plan`], with the clock supplied
    /// by the caller. The window always ends at `now`.
    pub fn plan_at(&self, text: &str, now: DateTime<Utc>) -> QueryIntent {
        let lowered = text.to_lowercase();

        let metric = self
            .rules
            .metrics
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or_else(|| self.rules.fallback_metric.clone(), |rule| rule.metric.clone());

        let function = self
            .rules
            .functions
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.function);

        let days = self
            .rules
            .windows
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map_or(self.rules.fallback_days, |rule| rule.days);
        let start = now - Duration::days(days);

        QueryIntent {
            metric,
            function,
            start_iso8601: Some(format_timestamp(start)),
            end_iso8601: Some(format_timestamp(now)),
        }
    }
}

impl Default for RuleBasedPlanner {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl QueryPlanner for RuleBasedPlanner {
    fn plan(&self, text: &str) -> QueryIntent {
        self.plan_at(text, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AggregationFunction;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_unmatched_text_falls_back() {
        let planner = RuleBasedPlanner::default();
        let intent = planner.plan_at("hello there", fixed_now());
        assert_eq!(intent.metric, "steps");
        assert_eq!(intent.function, None);
        assert_eq!(intent.start_iso8601.as_deref(), Some("2024-04-15T12:00:00Z"));
        assert_eq!(intent.end_iso8601.as_deref(), Some("2024-05-15T12:00:00Z"));
    }

    #[test]
    fn test_metric_function_and_window() {
        let planner = RuleBasedPlanner::default();
        let intent =
            planner.plan_at("What's my average heart rate in the last 7 days?", fixed_now());
        assert_eq!(intent.metric, "heart_rate");
        assert_eq!(intent.function, Some(AggregationFunction::Mean));
        assert_eq!(intent.start_iso8601.as_deref(), Some("2024-05-08T12:00:00Z"));
    }

    #[test]
    fn test_week_alias_maps_to_seven_days() {
        let planner = RuleBasedPlanner::default();
        let intent = planner.plan_at("sleep this week", fixed_now());
        assert_eq!(intent.metric, "sleep_duration");
        assert_eq!(intent.start_iso8601.as_deref(), Some("2024-05-08T12:00:00Z"));
    }
}

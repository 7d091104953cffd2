//! Keyword rule tables driving intent inference.
//!
//! Each table is ordered and evaluated first-match-wins. Predicates are
//! case-insensitive substring tests against the lowered question, so rule
//! keywords must be supplied in lowercase. The tables are plain data and
//! serde-able: swapping the alias vocabulary is a configuration change,
//! not a code change.

use crate::core::types::AggregationFunction;
use crate::core::{HelsaError, Result};
use serde::{Deserialize, Serialize};

/// Maps any of its keywords to a canonical metric id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRule {
    /// Canonical metric id emitted when the rule matches
    pub metric: String,
    /// Alias keywords, any one of which triggers the rule
    pub keywords: Vec<String>,
}

impl MetricRule {
    /// Creates a metric rule from keyword literals
    pub fn new<S: Into<String>>(metric: S, keywords: &[&str]) -> Self {
        Self {
            metric: metric.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// True if any keyword occurs in the lowered text
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Maps any of its keywords to an aggregation function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRule {
    /// Aggregation emitted when the rule matches
    pub function: AggregationFunction,
    /// Alias keywords, any one of which triggers the rule
    pub keywords: Vec<String>,
}

impl FunctionRule {
    /// Creates a function rule from keyword literals
    pub fn new(function: AggregationFunction, keywords: &[&str]) -> Self {
        Self {
            function,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }

    /// True if any keyword occurs in the lowered text
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Maps keyword groups to a trailing window length in days.
///
/// `requires` is a conjunction of alias groups: the rule matches when every
/// group contributes at least one keyword hit. `[["30"], ["day", "天"]]`
/// reads as: the text mentions "30" and some spelling of "day".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRule {
    /// Trailing window length emitted when the rule matches
    pub days: i64,
    /// Conjunction of alias groups
    pub requires: Vec<Vec<String>>,
}

impl WindowRule {
    /// Creates a window rule from keyword-group literals
    pub fn new(days: i64, requires: &[&[&str]]) -> Self {
        Self {
            days,
            requires: requires
                .iter()
                .map(|group| group.iter().map(|k| (*k).to_string()).collect())
                .collect(),
        }
    }

    /// True if every group has at least one keyword in the lowered text
    pub fn matches(&self, lowered: &str) -> bool {
        self.requires
            .iter()
            .all(|group| group.iter().any(|keyword| lowered.contains(keyword.as_str())))
    }
}

/// Ordered rule tables, evaluated first-match-wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Metric selection rules, most specific first
    pub metrics: Vec<MetricRule>,
    /// Aggregation selection rules; no match leaves the intent unaggregated
    pub functions: Vec<FunctionRule>,
    /// Window selection rules, most specific first
    pub windows: Vec<WindowRule>,
    /// Metric emitted when no metric rule matches
    pub fallback_metric: String,
    /// Window length emitted when no window rule matches
    pub fallback_days: i64,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            metrics: vec![
                MetricRule::new("heart_rate", &["heart", "心率"]),
                MetricRule::new("steps", &["step", "步"]),
                MetricRule::new("sleep_duration", &["sleep", "睡"]),
                MetricRule::new("active_energy", &["energy", "能量"]),
            ],
            functions: vec![FunctionRule::new(AggregationFunction::Mean, &["average", "平均"])],
            // Order is load-bearing: 30 days shadows 7 days shadows week.
            windows: vec![
                WindowRule::new(30, &[&["30"], &["day", "天"]]),
                WindowRule::new(7, &[&["7"], &["day", "天"]]),
                WindowRule::new(7, &[&["week", "周"]]),
            ],
            fallback_metric: "steps".to_string(),
            fallback_days: 30,
        }
    }
}

impl RuleSet {
    /// Validate the rule tables
    pub fn validate(&self) -> Result<()> {
        if self.fallback_metric.is_empty() {
            return Err(HelsaError::config("fallback_metric cannot be empty"));
        }
        if self.fallback_days <= 0 {
            return Err(HelsaError::config(format!(
                "fallback_days must be positive, got {}",
                self.fallback_days
            )));
        }
        if self.metrics.is_empty() {
            return Err(HelsaError::config("metric rule table cannot be empty"));
        }
        if self.functions.is_empty() {
            return Err(HelsaError::config("function rule table cannot be empty"));
        }
        if self.windows.is_empty() {
            return Err(HelsaError::config("window rule table cannot be empty"));
        }

        for rule in &self.metrics {
            if rule.metric.is_empty() {
                return Err(HelsaError::config("metric rule has an empty metric id"));
            }
            Self::validate_keywords(&rule.keywords, &rule.metric)?;
        }
        for rule in &self.functions {
            Self::validate_keywords(&rule.keywords, rule.function.as_str())?;
        }
        for rule in &self.windows {
            if rule.days <= 0 {
                return Err(HelsaError::config(format!(
                    "window rule days must be positive, got {}",
                    rule.days
                )));
            }
            if rule.requires.is_empty() {
                return Err(HelsaError::config("window rule has no keyword groups"));
            }
            for group in &rule.requires {
                Self::validate_keywords(group, "window rule group")?;
            }
        }

        Ok(())
    }

    // An empty keyword is a substring of everything and would match any text.
    fn validate_keywords(keywords: &[String], owner: &str) -> Result<()> {
        if keywords.is_empty() {
            return Err(HelsaError::config(format!("rule for '{owner}' has no keywords")));
        }
        if keywords.iter().any(String::is_empty) {
            return Err(HelsaError::config(format!("rule for '{owner}' has an empty keyword")));
        }
        Ok(())
    }
}

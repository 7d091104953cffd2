//! Demo health data source for out-of-box runs.
//!
//! Generates plausible per-bucket values for the built-in metrics so the
//! pipeline can be exercised without a real health platform behind it.

use super::HealthDataSource;
use crate::core::types::{Granularity, MetricId, SeriesPoint, TimeSeries, TimeWindow};
use crate::core::{HelsaError, Result};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Value profile for one demo metric.
#[derive(Debug, Clone)]
struct MetricProfile {
    /// Metric id this profile answers for
    metric: &'static str,
    /// Typical bucket value
    baseline: f64,
    /// Half-width of the uniform jitter band around the baseline
    jitter: f64,
    /// Values never drop below this
    floor: f64,
}

impl MetricProfile {
    const fn new(metric: &'static str, baseline: f64, jitter: f64, floor: f64) -> Self {
        Self {
            metric,
            baseline,
            jitter,
            floor,
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        let value = self.baseline + rng.gen_range(-self.jitter..=self.jitter);
        value.max(self.floor)
    }
}

/// Demo data source producing one value per granularity bucket.
pub struct DemoSource {
    profiles: Vec<MetricProfile>,
    rng: Mutex<StdRng>,
}

impl DemoSource {
    /// Creates a demo source seeded from entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a demo source with a fixed seed for reproducible series
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            profiles: vec![
                MetricProfile::new("steps", 8200.0, 2600.0, 0.0),
                MetricProfile::new("heart_rate", 72.0, 9.0, 40.0),
                MetricProfile::new("resting_heart_rate", 61.0, 4.0, 35.0),
                MetricProfile::new("sleep_duration", 430.0, 70.0, 0.0),
                MetricProfile::new("active_energy", 520.0, 160.0, 0.0),
                MetricProfile::new("weight", 74.0, 0.8, 0.0),
            ],
            rng: Mutex::new(rng),
        }
    }

    fn profile(&self, metric: &MetricId) -> Option<&MetricProfile> {
        self.profiles.iter().find(|profile| profile.metric == metric.as_str())
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl HealthDataSource for DemoSource {
    async fn read(
        &self,
        metric: &MetricId,
        window: &TimeWindow,
        granularity: Granularity,
    ) -> Result<TimeSeries> {
        let profile = self
            .profile(metric)
            .ok_or_else(|| HelsaError::metric_unsupported(metric.as_str()))?;

        let step = granularity.bucket();
        let mut rng = self.rng.lock();
        let mut series = TimeSeries::empty();
        let mut timestamp = window.start;
        // Both window bounds are inclusive: the bucket at `end` is generated.
        while timestamp <= window.end {
            series.push(SeriesPoint::new(timestamp, profile.sample(&mut rng)));
            timestamp += step;
        }
        Ok(series)
    }
}

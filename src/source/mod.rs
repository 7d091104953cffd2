//! Health data source boundary.

pub mod demo;

use crate::core::types::{Granularity, MetricId, TimeSeries, TimeWindow};
use crate::core::{HelsaError, Result};

pub use demo::DemoSource;

/// Trait for health data source implementations.
///
/// Implementations front an external health data backend. Failures surface
/// through the source-opaque error variants (`MetricUnsupported`,
/// `AccessDenied`, `PlatformUnavailable`) and are never translated by the
/// pipeline.
#[async_trait::async_trait]
pub trait HealthDataSource: Send + Sync {
    /// Read one series for a metric, bucketed at `granularity`, covering
    /// `window` with both bounds included.
    async fn read(
        &self,
        metric: &MetricId,
        window: &TimeWindow,
        granularity: Granularity,
    ) -> Result<TimeSeries>;
}

/// Source for builds without a health platform behind them.
///
/// Answers every read with [`HelsaError::PlatformUnavailable`] so the
/// pipeline's error path stays exercised where no real backend exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSource;

impl UnavailableSource {
    /// Creates a new unavailable source
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl HealthDataSource for UnavailableSource {
    async fn read(
        &self,
        _metric: &MetricId,
        _window: &TimeWindow,
        _granularity: Granularity,
    ) -> Result<TimeSeries> {
        Err(HelsaError::platform_unavailable(
            "no health platform on this build",
        ))
    }
}

//! Process-wide catalog of known health metrics.

use crate::core::types::{Granularity, Metric, MetricId};
use dashmap::DashMap;
use parking_lot::RwLock;

/// Catalog mapping a metric id to its unit and default granularity.
///
/// Lookups go through a concurrent map; a separate insertion-order index
/// keeps [`MetricRegistry::metrics`] stable across re-registrations.
pub struct MetricRegistry {
    entries: DashMap<String, Metric>,
    order: RwLock<Vec<String>>,
}

impl MetricRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Creates a registry pre-loaded with the six built-in metrics
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        for (id, unit) in [
            ("steps", "count"),
            ("heart_rate", "count/min"),
            ("resting_heart_rate", "count/min"),
            ("sleep_duration", "minute"),
            ("active_energy", "kcal"),
            ("weight", "kg"),
        ] {
            let id = MetricId::new(id.to_string()).expect("built-in metric id is valid");
            registry.register(Metric::new(id, unit, Granularity::Day));
        }
        registry
    }

    /// Inserts a metric, wholesale-replacing any previous definition under
    /// the same id. First registration appends to the display order;
    /// re-registration never reorders.
    pub fn register(&self, metric: Metric) {
        let key = metric.id.as_str().to_string();
        if self.entries.insert(key.clone(), metric).is_none() {
            self.order.write().push(key);
        }
    }

    /// Looks up a metric definition by id
    pub fn lookup(&self, id: &str) -> Option<Metric> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Returns the default granularity for an id, `Day` when unregistered
    pub fn granularity_for(&self, id: &str) -> Granularity {
        self.entries
            .get(id)
            .map_or_else(Granularity::default, |entry| entry.value().granularity)
    }

    /// Returns all metrics in registration order
    pub fn metrics(&self) -> Vec<Metric> {
        let order = self.order.read();
        order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|entry| entry.value().clone()))
            .collect()
    }

    /// Number of registered metrics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no metric has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_in_registration_order() {
        let registry = MetricRegistry::with_defaults();
        let ids: Vec<String> =
            registry.metrics().into_iter().map(|m| m.id.into_inner()).collect();
        assert_eq!(
            ids,
            vec![
                "steps",
                "heart_rate",
                "resting_heart_rate",
                "sleep_duration",
                "active_energy",
                "weight"
            ]
        );
    }

    #[test]
    fn test_reregistration_replaces_without_reordering() {
        let registry = MetricRegistry::with_defaults();
        let id = MetricId::new("heart_rate".to_string()).unwrap();
        registry.register(Metric::new(id, "bpm", Granularity::Hour));

        assert_eq!(registry.len(), 6);
        let metrics = registry.metrics();
        assert_eq!(metrics[1].id.as_str(), "heart_rate");
        assert_eq!(metrics[1].unit, "bpm");
        assert_eq!(metrics[1].granularity, Granularity::Hour);
    }

    #[test]
    fn test_reregistration_is_idempotent() {
        let registry = MetricRegistry::with_defaults();
        let before = registry.metrics();

        let id = MetricId::new("steps".to_string()).unwrap();
        registry.register(Metric::new(id, "count", Granularity::Day));

        assert_eq!(registry.metrics(), before);
    }

    #[test]
    fn test_lookup_unknown_metric() {
        let registry = MetricRegistry::with_defaults();
        assert!(registry.lookup("blood_glucose").is_none());
        assert_eq!(registry.granularity_for("blood_glucose"), Granularity::Day);
    }
}

//! Helsa - Natural-language health metrics assistant.
//!
//! Helsa answers free-text questions about longitudinal personal health
//! metrics ("What's my average heart rate in the last 7 days?") by planning
//! a structured query, retrieving the matching time series from a pluggable
//! data source, and rendering a one-line textual answer.
//!
//! # Features
//!
//! - **Rule-based planning**: Ordered keyword tables turn free text into a
//!   structured intent; alias vocabularies are configuration, not code
//! - **Pluggable data sources**: Any backend behind one async trait, with a
//!   seedable demo source for out-of-box runs
//! - **Pure statistics**: Mean, sum, and Pearson correlation with explicit
//!   empty-series semantics
//! - **Zero configuration**: Works out of the box with sensible defaults
//!
//! # Architecture
//!
//! Helsa is built with a modular architecture:
//! - `planner`: Free-text to structured intent
//! - `registry`: Catalog of known metrics and their granularities
//! - `source`: Data source boundary and demo implementation
//! - `stats`: Pure aggregation functions
//! - `insight`: Series-to-answer rendering
//! - `orchestrator`: End-to-end request pipeline
//! - `core`: Domain models, errors, and configuration
//! - `cli`: Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use helsa_lib::orchestrator::{Assistant, Orchestrator};
//! use helsa_lib::planner::RuleBasedPlanner;
//! use helsa_lib::registry::MetricRegistry;
//! use helsa_lib::source::DemoSource;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(
//!         Arc::new(DemoSource::new()),
//!         Arc::new(MetricRegistry::with_defaults()),
//!         Duration::from_secs(10),
//!     );
//!     let assistant = Assistant::new(Box::new(RuleBasedPlanner::default()), orchestrator);
//!     let answer = assistant.answer("average heart rate last 7 days").await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod core;
pub mod insight;
pub mod orchestrator;
pub mod planner;
pub mod registry;
pub mod reminders;
pub mod secure;
pub mod source;
pub mod stats;

// Re-export core types for convenience
pub use crate::core::{Config, Result};

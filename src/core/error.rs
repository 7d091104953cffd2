use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelsaError {
    #[error("Cannot aggregate an empty series")]
    EmptySeries,

    #[error("Unsupported metric: {0}")]
    MetricUnsupported(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Health platform unavailable: {0}")]
    PlatformUnavailable(String),

    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("Timeout error: operation took longer than {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Scheduling error: {0}")]
    Schedule(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Helsa operations
pub type Result<T> = std::result::Result<T, HelsaError>;

impl HelsaError {
    /// Creates a new unsupported-metric error
    pub fn metric_unsupported<S: Into<String>>(metric: S) -> Self {
        Self::MetricUnsupported(metric.into())
    }

    /// Creates a new access-denied error
    pub fn access_denied<S: Into<String>>(msg: S) -> Self {
        Self::AccessDenied(msg.into())
    }

    /// Creates a new platform-unavailable error
    pub fn platform_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::PlatformUnavailable(msg.into())
    }

    /// Creates a new malformed-timestamp error
    pub fn malformed_timestamp<S: Into<String>>(raw: S) -> Self {
        Self::MalformedTimestamp(raw.into())
    }

    /// Creates a new scheduling error
    pub fn schedule<S: Into<String>>(msg: S) -> Self {
        Self::Schedule(msg.into())
    }

    /// Creates a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PlatformUnavailable(_) | Self::Timeout { .. })
    }

    /// Returns the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptySeries => "stats",
            Self::MetricUnsupported(_) | Self::AccessDenied(_) | Self::PlatformUnavailable(_) => {
                "source"
            },
            Self::MalformedTimestamp(_) => "validation",
            Self::Timeout { .. } => "timeout",
            Self::Schedule(_) => "schedule",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }
}

//! Command-line interface for Helsa.
//!
//! Ask a question, get an answer. Just run `helsa` with a free-text
//! question (or nothing at all for the built-in demo question).

use crate::core::{Config, HelsaError, Result};
use crate::orchestrator::{Assistant, Orchestrator};
use crate::planner::RuleBasedPlanner;
use crate::registry::MetricRegistry;
use crate::source::{DemoSource, HealthDataSource};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Question asked when the command line carries none
const DEMO_QUESTION: &str = "What's my average heart rate in the last 7 days?";

/// Natural-language health metrics assistant
#[derive(Parser, Debug)]
#[command(name = "helsa")]
#[command(version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Free-text question; words are joined with spaces
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Configuration file path (default: ~/.config/helsa/config.yaml)
    #[arg(short, long, env = "HELSA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, env = "HELSA_DEBUG")]
    pub debug: bool,

    /// Validate configuration and exit
    #[arg(long)]
    pub check_config: bool,

    /// Show version information
    #[arg(short = 'V', long = "show-version")]
    pub version: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns the question to answer, falling back to the demo question
    pub fn question(&self) -> String {
        if self.question.is_empty() {
            DEMO_QUESTION.to_string()
        } else {
            self.question.join(" ")
        }
    }

    /// Load configuration with proper precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables
    /// 3. Config file
    /// 4. Defaults (lowest priority)
    pub async fn load_config(&self) -> Result<Config> {
        use crate::core::config::ConfigBuilder;

        let builder = ConfigBuilder::new();

        // 1. Load from config file if specified or default location
        let config_path = if let Some(path) = &self.config {
            path.clone()
        } else {
            // Check default config location
            let default_path = dirs::config_dir()
                .map(|d| d.join("helsa").join("config.yaml"))
                .unwrap_or_else(|| PathBuf::from("~/.config/helsa/config.yaml"));

            if default_path.exists() {
                default_path
            } else {
                // No config file, use defaults
                return self.build_config_from_args(builder);
            }
        };

        // Try to load config file
        let builder = match tokio::fs::read_to_string(&config_path).await {
            Ok(content) => {
                tracing::info!("Loaded configuration from: {:?}", config_path);
                builder.from_yaml(&content)?
            },
            Err(e) if self.config.is_some() => {
                // User explicitly specified a config file that doesn't exist
                return Err(HelsaError::config(format!(
                    "Failed to read config file {:?}: {}",
                    config_path, e
                )));
            },
            Err(_) => {
                // Default config file doesn't exist, that's OK
                tracing::debug!("No config file found at {:?}, using defaults", config_path);
                builder
            },
        };

        // 2. Apply CLI overrides
        self.build_config_from_args(builder)
    }

    fn build_config_from_args(
        &self,
        builder: crate::core::config::ConfigBuilder,
    ) -> Result<Config> {
        // Apply CLI arguments (these override everything)
        builder.debug(self.debug).build()
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) -> Result<()> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        // Determine log level
        let env_log_level = std::env::var("HELSA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_level = if self.debug {
            "debug"
        } else {
            env_log_level.as_str()
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false).compact();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| HelsaError::config(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }
}

/// Execute the Helsa application.
pub async fn execute(cli: Cli) -> Result<()> {
    // Handle version flag first
    if cli.version {
        println!("helsa {}", env!("CARGO_PKG_VERSION"));
        println!("Natural-language health metrics assistant");
        return Ok(());
    }

    // Initialize logging
    cli.init_logging()?;

    // Load and validate configuration
    let config = cli.load_config().await?;

    // Handle config validation flag
    if cli.check_config {
        config.validate()?;
        println!("Configuration is valid!");
        println!("  Read timeout: {:?}", config.source.read_timeout);
        println!("  Metric rules: {}", config.planner.rules.metrics.len());
        println!("  Window rules: {}", config.planner.rules.windows.len());
        println!("  Fallback metric: {}", config.planner.rules.fallback_metric);
        return Ok(());
    }

    let question = cli.question();
    let answer = answer_question(&config, &question).await?;
    println!("Q:\n{question}\n\nA:\n{answer}");

    Ok(())
}

/// Wire the pipeline from configuration and answer one question.
async fn answer_question(config: &Config, question: &str) -> Result<String> {
    let registry = Arc::new(MetricRegistry::with_defaults());
    let source: Arc<dyn HealthDataSource> = match config.source.demo_seed {
        Some(seed) => Arc::new(DemoSource::with_seed(seed)),
        None => Arc::new(DemoSource::new()),
    };
    let planner = RuleBasedPlanner::new(config.planner.rules.clone());
    let orchestrator = Orchestrator::new(source, registry.clone(), config.source.read_timeout);
    let assistant = Assistant::new(Box::new(planner), orchestrator);

    tracing::info!(metrics = registry.len(), "answering question");

    assistant.answer(question).await.map_err(|err| {
        tracing::error!(category = err.category(), error = %err, "request failed");
        err
    })
}

//! Configuration types for tickflow
//!
//! The whole run is driven by one immutable [`Config`] loaded from TOML and
//! passed by reference to every component that needs it; nothing reads
//! ambient global state.

use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Tick data location and replay range
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Root folder holding one directory per symbol
    pub tick_data_dir: PathBuf,
    /// Symbols to replay, one tick source per (symbol, year)
    pub symbols: Vec<String>,
    /// Years to replay, oldest first
    pub years: Vec<u16>,
}

/// Inter-stage channel tuning
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Bounded channel capacity; the ingestor blocks when this many quotes
    /// are in flight
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    1024
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

/// Execution pricing configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExecutionConfig {
    /// One-shot slippage applied to every opened request's level
    #[serde(default)]
    pub slippage: Decimal,
    /// Per-symbol sizing factors; symbols without an entry trade at 1x
    #[serde(default)]
    pub sizing_factors: HashMap<String, Decimal>,
}

/// Strategy selection
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Strategy name; "random" is the only stock strategy
    #[serde(default = "default_strategy_name")]
    pub name: String,
    /// RNG seed for reproducible runs
    #[serde(default)]
    pub seed: u64,
}

fn default_strategy_name() -> String {
    "random".to_string()
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            name: default_strategy_name(),
            seed: 0,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.data.symbols.is_empty() {
            return Err(EngineError::Config("no symbols configured".to_string()));
        }
        if self.data.years.is_empty() {
            return Err(EngineError::Config("no years configured".to_string()));
        }
        if self.pipeline.channel_capacity == 0 {
            return Err(EngineError::Config(
                "channel capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Compact snapshot attached to stack-level failure reports
    pub fn snapshot(&self) -> String {
        format!(
            "symbols={:?} years={:?} dir={} strategy={} capacity={}",
            self.data.symbols,
            self.data.years,
            self.data.tick_data_dir.display(),
            self.strategy.name,
            self.pipeline.channel_capacity
        )
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            data: DataConfig {
                tick_data_dir: PathBuf::from("./tickdata"),
                symbols: vec!["EURUSD".to_string()],
                years: vec![2018],
            },
            pipeline: PipelineConfig::default(),
            execution: ExecutionConfig::default(),
            strategy: StrategyConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

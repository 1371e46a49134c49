use std::{fmt::Display, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    /// Also write everything to `./logs/fsa_check_<timestamp>.txt`.
    log_file: bool,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Evaluate lines on the rayon thread pool.
    parallel: bool,
    /// Batches shorter than this are always evaluated sequentially.
    parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            parallel: true,
            parallel_threshold: 1024,
        }
    }
}

impl BatchConfig {
    pub fn sequential() -> Self {
        BatchConfig::default().with_parallel(false)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn get_parallel(&self) -> &bool {
        &self.parallel
    }

    pub fn get_parallel_threshold(&self) -> &usize {
        &self.parallel_threshold
    }

    /// Whether a batch of `line_count` lines should be sharded across threads.
    pub fn use_parallel(&self, line_count: usize) -> bool {
        self.parallel && line_count >= self.parallel_threshold
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    batch: BatchConfig,
    logger: LoggerConfig,
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("failed to parse config")
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .with_context(|| format!("failed to read config: {}", file_path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_optional_file<P: AsRef<Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
        match file_path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }

    pub fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}

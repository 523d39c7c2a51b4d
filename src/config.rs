//! Process-level configuration, resolved once at start-up.

use std::env;
use tracing::level_filters::LevelFilter;

/// Table used when `TABLE_NAME` is not set.
pub const DEFAULT_TABLE_NAME: &str = "gearbox_catalog";

/// Log verbosity.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogLevel {
    /// Everything, including received events.
    Debug,
    /// Request routing and notable conditions.
    #[default]
    Info,
    /// Suspicious but handled conditions.
    Warning,
    /// Failed operations.
    Error,
    /// Failures that stop the process.
    Critical,
}

impl LogLevel {
    /// Parse a level name, case-insensitively; unrecognized names map to `Info`.
    ///
    /// ```rust
    /// use gearbox_catalog::config::LogLevel;
    ///
    /// assert_eq!(LogLevel::from_name("warning"), LogLevel::Warning);
    /// assert_eq!(LogLevel::from_name("verbose"), LogLevel::Info);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "CRITICAL" => Self::Critical,
            _ => Self::Info,
        }
    }

    /// Most verbose `tracing` level emitted at this verbosity.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            // tracing has no level above error
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Backend the item store runs on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StoreBackend {
    /// The DynamoDB table named by the configuration.
    #[default]
    DynamoDb,
    /// An in-process store seeded with the sample catalog.
    Memory,
}

impl StoreBackend {
    /// Parse a backend name; anything but `memory` selects DynamoDB.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("memory") {
            Self::Memory
        } else {
            Self::DynamoDb
        }
    }
}

/// Passive configuration shared by every invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Name of the catalog table.
    pub table_name: String,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Backend of the item store.
    pub backend: StoreBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_level: LogLevel::default(),
            backend: StoreBackend::default(),
        }
    }
}

impl Config {
    /// Read `TABLE_NAME`, `LOG_LEVEL` and `STORE_BACKEND` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = lookup("TABLE_NAME")
            .filter(|table_name| !table_name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        let log_level = lookup("LOG_LEVEL")
            .map(|name| LogLevel::from_name(&name))
            .unwrap_or_default();
        let backend = lookup("STORE_BACKEND")
            .map(|name| StoreBackend::from_name(&name))
            .unwrap_or_default();
        Self {
            table_name,
            log_level,
            backend,
        }
    }
}

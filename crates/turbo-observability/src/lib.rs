//! Observability setup for TurboBrowse.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - Serializable logging settings
//! - `LoggingConfig` - The `[logging]` section of the browse config
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;

//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON output on stderr
//! - Optional rolling JSON log files via tracing-appender

pub mod logger;

pub use logger::{LoggerImpl, LOG_FILE_NAME};

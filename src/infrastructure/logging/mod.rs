//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON output on stderr
//! - Optional rotating JSON log files

pub mod logger;

pub use logger::LoggerImpl;

//! Structured diagnostic logging.

mod format;

pub use format::StructuredLogger;

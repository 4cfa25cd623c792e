//! Error types

use thiserror::Error;

/// Returned when a string does not name one of the five severities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown severity '{input}' (expected debug, verbose, info, warn or error)")]
pub struct ParseSeverityError {
    pub input: String,
}

/// Errors a custom transport may report back to the [`Logger`](crate::Logger)
///
/// [`LogSink`](crate::LogSink) never returns one; it swallows its own write
/// failures.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Transport {name} rejected entry: {reason}")]
    Rejected { name: String, reason: String },
}

//! Logger - minimum-level filter with ordered fan-out to transports
//!
//! This is the object handed to the host via [`Host::set_logger`](crate::Host::set_logger).
//! Other plugins on the same host can log through it and get the same
//! formatting.

use log::warn;

use crate::error::TransportError;
use crate::severity::Severity;

/// A destination for log entries
pub trait Transport: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Deliver one entry
    fn log(&self, severity: Severity, message: &str) -> Result<(), TransportError>;
}

/// Leveled logger writing to every registered transport
pub struct Logger {
    level: Severity,
    transports: Vec<Box<dyn Transport>>,
}

impl Logger {
    /// Create a logger passing entries at `level` and above
    pub fn new(level: Severity) -> Self {
        Self {
            level,
            transports: Vec::new(),
        }
    }

    /// Add a transport; entries fan out in registration order
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Minimum level that reaches the transports
    pub fn level(&self) -> Severity {
        self.level
    }

    /// Whether an entry at `severity` would be delivered
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level
    }

    /// Names of the registered transports
    pub fn transport_names(&self) -> Vec<&str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    /// Log an entry; transport failures are reported and never propagated
    pub fn log(&self, severity: Severity, message: &str) {
        if !self.enabled(severity) {
            return;
        }
        for transport in &self.transports {
            if let Err(e) = transport.log(severity, message) {
                warn!("Logger: transport {} failed: {}", transport.name(), e);
            }
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(Severity::Verbose, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("transports", &self.transport_names())
            .finish()
    }
}

//! Log severities
//!
//! Five fixed levels, ordered by verbosity for the logger's minimum-level
//! filter. Each level has its own display color; the sink itself never
//! filters.

use std::fmt;
use std::str::FromStr;

use colored::Color;
use serde::{Deserialize, Serialize};

use crate::error::ParseSeverityError;

/// Named log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Verbose,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// All severities, most verbose first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Verbose,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Label as printed in the level column
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Verbose => "verbose",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Fixed display color of the level label
    pub fn color(&self) -> Color {
        match self {
            Severity::Debug => Color::Blue,
            Severity::Verbose => Color::Cyan,
            Severity::Info => Color::Green,
            Severity::Warn => Color::Yellow,
            Severity::Error => Color::Red,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "verbose" => Ok(Severity::Verbose),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError { input: s.to_string() }),
        }
    }
}

//! Option resolution
//!
//! [`LoggerOptions`] is the permissive caller surface: every field is
//! optional and invalid values fall back to defaults with a warning.
//! [`LoggerOptions::resolve`] merges it with what the host provides into an
//! immutable [`LoggerConfig`].
//!
//! Precedence per field: explicit option > host default > package default.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use colored::Color;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::sink::{Out, stdout_out};
use crate::style::{ColoredStyler, Styler};
use crate::{DEFAULT_COLOR, DEFAULT_LEVEL, DEFAULT_NAME, DEFAULT_PAGE_LOG};

/// Caller-supplied logger options
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggerOptions {
    /// Minimum level passed by the logger
    pub level: Option<String>,

    /// Color of the host-name label
    pub color: Option<String>,

    /// Label overriding the host's own name
    pub name: Option<String>,

    /// Only an explicit `false` disables page event logging
    pub page_log: Option<bool>,

    #[serde(skip)]
    pub out: Option<Out>,

    #[serde(skip)]
    pub styler: Option<Arc<dyn Styler>>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn page_log(mut self, enabled: bool) -> Self {
        self.page_log = Some(enabled);
        self
    }

    pub fn out<F>(mut self, out: F) -> Self
    where
        F: Fn(&str) -> std::io::Result<()> + Send + Sync + 'static,
    {
        self.out = Some(Arc::new(out));
        self
    }

    pub fn styler(mut self, styler: impl Styler + 'static) -> Self {
        self.styler = Some(Arc::new(styler));
        self
    }

    /// Fill unset fields from `fallback`; fields set here win
    pub fn or(self, fallback: LoggerOptions) -> Self {
        Self {
            level: self.level.or(fallback.level),
            color: self.color.or(fallback.color),
            name: self.name.or(fallback.name),
            page_log: self.page_log.or(fallback.page_log),
            out: self.out.or(fallback.out),
            styler: self.styler.or(fallback.styler),
        }
    }

    /// Merge with host-provided defaults into a final configuration
    pub fn resolve(&self, defaults: &HostDefaults) -> LoggerConfig {
        let level = match self.level.as_deref() {
            Some(raw) => raw.parse::<Severity>().unwrap_or_else(|e| {
                warn!("LoggerOptions::resolve: {}, using {}", e, DEFAULT_LEVEL);
                DEFAULT_LEVEL
            }),
            None => DEFAULT_LEVEL,
        };

        let color = match self.color.as_deref() {
            Some(raw) => parse_color(raw).unwrap_or_else(|| {
                warn!("LoggerOptions::resolve: unknown color '{}', using {:?}", raw, DEFAULT_COLOR);
                DEFAULT_COLOR
            }),
            None => DEFAULT_COLOR,
        };

        let name = self
            .name
            .clone()
            .or_else(|| defaults.name.clone())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let config = LoggerConfig {
            level,
            color,
            name,
            out: self.out.clone().unwrap_or_else(stdout_out),
            page_log_enabled: self.page_log.unwrap_or(DEFAULT_PAGE_LOG),
            styler: self
                .styler
                .clone()
                .unwrap_or_else(|| Arc::new(ColoredStyler) as Arc<dyn Styler>),
        };
        debug!("LoggerOptions::resolve: {:?}", config);
        config
    }
}

/// Color names accepted by `colored`, plus `gray`/`grey` for bright black
fn parse_color(raw: &str) -> Option<Color> {
    match raw.trim().to_lowercase().as_str() {
        "gray" | "grey" => Some(Color::BrightBlack),
        _ => Color::from_str(raw).ok(),
    }
}

impl fmt::Debug for LoggerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerOptions")
            .field("level", &self.level)
            .field("color", &self.color)
            .field("name", &self.name)
            .field("page_log", &self.page_log)
            .field("out", &self.out.as_ref().map(|_| "<fn>"))
            .field("styler", &self.styler.as_ref().map(|_| "<styler>"))
            .finish()
    }
}

/// Values the host contributes to resolution
#[derive(Debug, Clone, Default)]
pub struct HostDefaults {
    pub name: Option<String>,
}

impl HostDefaults {
    pub fn from_name(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
        }
    }
}

/// Resolved logger configuration; built once per attachment
#[derive(Clone)]
pub struct LoggerConfig {
    level: Severity,
    color: Color,
    name: String,
    out: Out,
    page_log_enabled: bool,
    styler: Arc<dyn Styler>,
}

impl LoggerConfig {
    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn out(&self) -> &Out {
        &self.out
    }

    pub fn page_log_enabled(&self) -> bool {
        self.page_log_enabled
    }

    pub fn styler(&self) -> &Arc<dyn Styler> {
        &self.styler
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level", &self.level)
            .field("color", &self.color)
            .field("name", &self.name)
            .field("page_log_enabled", &self.page_log_enabled)
            .finish_non_exhaustive()
    }
}

//! Crawlog - colorful console logging for crawler runs
//!
//! Attaches to a running crawler (any type implementing [`Host`]) and renders
//! its lifecycle events as leveled, colorized, column-aligned log lines:
//!
//! ```text
//! MyJawa/info   Scraping http://localhost:3002/basic.html?1
//! MyJawa/warn   Job http://localhost:3002/basic.html?4 failed [Error: invalid-data]
//! MyJawa/verboseRetrying job http://localhost:3002/basic.html?4 (retry 1/3)
//! ```
//!
//! # Architecture
//!
//! ```text
//! LoggerOptions ──resolve──▶ LoggerConfig ──▶ LogSink ──▶ Logger ──▶ host.set_logger
//!                                    │
//!                                    └──▶ attach: BINDINGS ──▶ host.on / host.once
//!
//! host emits Event ──▶ listener builds message ──▶ Logger::log ──▶ LogSink::emit ──▶ out
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crawlog::{Crawler, Event, Job, LoggerOptions, plugin};
//!
//! let mut crawler = Crawler::new("MyJawa");
//! crawler.use_plugin(plugin(LoggerOptions::new().color("cyan")));
//!
//! crawler.emit(&Event::Start);
//! crawler.emit(&Event::JobScrape(Job::new("http://localhost:3002/basic.html?1")));
//! ```

pub mod binder;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod events;
pub mod host;
pub mod logger;
pub mod options;
pub mod severity;
pub mod simulate;
pub mod sink;
pub mod style;

pub use binder::{BINDINGS, Binding, Cardinality, attach, plugin};
pub use crawler::Crawler;
pub use error::{ParseSeverityError, TransportError};
pub use events::{Event, EventKind, HostSettings, Job, JobError, PageData, Request};
pub use host::{Handler, Host};
pub use logger::{Logger, Transport};
pub use options::{HostDefaults, LoggerConfig, LoggerOptions};
pub use severity::Severity;
pub use simulate::{SimulationPlan, SimulationSummary, simulate};
pub use sink::{LogSink, Out, Render, stdout_out};
pub use style::{ColoredStyler, PlainStyler, Styler};

/// Default minimum level (nothing is filtered)
pub const DEFAULT_LEVEL: Severity = Severity::Debug;

/// Default color of the host-name label
pub const DEFAULT_COLOR: colored::Color = colored::Color::Magenta;

/// Default host name when neither the caller nor the host provides one
pub const DEFAULT_NAME: &str = "crawler";

/// Page events are logged unless explicitly disabled
pub const DEFAULT_PAGE_LOG: bool = true;

/// Width of the level column; the longest label ("verbose") fills it exactly
pub const LEVEL_WIDTH: usize = 7;

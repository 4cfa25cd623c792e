//! Event binding - maps host events to leveled log messages
//!
//! [`BINDINGS`] is the single table of which events are logged, at which
//! severity, with which cardinality and message. Every observable event has
//! exactly one row.

use std::sync::Arc;

use colored::Color;
use log::debug;
use serde::Serialize;

use crate::events::{Event, EventKind, HostSettings};
use crate::host::{Handler, Host};
use crate::logger::Logger;
use crate::options::{HostDefaults, LoggerConfig, LoggerOptions};
use crate::severity::Severity;
use crate::sink::LogSink;
use crate::style::Styler;

/// How often a listener fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Removed after the first call
    Once,
    /// Called on every emission
    Every,
}

/// Builds the message for an event, or `None` if the payload does not match
pub type Template = fn(&Event, &HostSettings, &dyn Styler) -> Option<String>;

/// One row of the binding table
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub kind: EventKind,
    pub severity: Severity,
    pub cardinality: Cardinality,
    pub template: Template,
}

pub const BINDINGS: &[Binding] = &[
    Binding {
        kind: EventKind::Start,
        severity: Severity::Info,
        cardinality: Cardinality::Once,
        template: start_message,
    },
    Binding {
        kind: EventKind::Fail,
        severity: Severity::Error,
        cardinality: Cardinality::Once,
        template: fail_message,
    },
    Binding {
        kind: EventKind::Success,
        severity: Severity::Info,
        cardinality: Cardinality::Once,
        template: success_message,
    },
    Binding {
        kind: EventKind::PageLog,
        severity: Severity::Debug,
        cardinality: Cardinality::Every,
        template: page_log_message,
    },
    Binding {
        kind: EventKind::PageError,
        severity: Severity::Debug,
        cardinality: Cardinality::Every,
        template: page_error_message,
    },
    Binding {
        kind: EventKind::JobAdd,
        severity: Severity::Debug,
        cardinality: Cardinality::Every,
        template: job_add_message,
    },
    Binding {
        kind: EventKind::JobScrape,
        severity: Severity::Info,
        cardinality: Cardinality::Every,
        template: job_scrape_message,
    },
    Binding {
        kind: EventKind::JobSuccess,
        severity: Severity::Info,
        cardinality: Cardinality::Every,
        template: job_success_message,
    },
    Binding {
        kind: EventKind::JobRetry,
        severity: Severity::Verbose,
        cardinality: Cardinality::Every,
        template: job_retry_message,
    },
    Binding {
        kind: EventKind::JobDiscard,
        severity: Severity::Warn,
        cardinality: Cardinality::Every,
        template: job_discard_message,
    },
    Binding {
        kind: EventKind::JobFail,
        severity: Severity::Warn,
        cardinality: Cardinality::Every,
        template: job_fail_message,
    },
];

/// Look up the row for an event
pub fn binding_for(kind: EventKind) -> Option<&'static Binding> {
    BINDINGS.iter().find(|b| b.kind == kind)
}

/// Build the plugin: the returned closure attaches a logger to each host it
/// is applied to. Applying it twice to one host registers every listener
/// twice.
pub fn plugin(options: LoggerOptions) -> impl Fn(&mut dyn Host) {
    move |host: &mut dyn Host| {
        let config = options.resolve(&HostDefaults::from_name(host.name()));
        attach(host, config);
    }
}

/// Construct the logger, hand it to the host and subscribe all listeners
pub fn attach(host: &mut dyn Host, config: LoggerConfig) {
    debug!("attach: name={} level={}", config.name(), config.level());

    let sink = LogSink::from_config(&config);
    let logger = Arc::new(Logger::new(config.level()).with_transport(Box::new(sink)));
    host.set_logger(Arc::clone(&logger));

    for binding in BINDINGS {
        if binding.kind.is_page() && !config.page_log_enabled() {
            debug!("attach: page logging disabled, skipping {}", binding.kind);
            continue;
        }
        let handler = listener(binding, Arc::clone(&logger), Arc::clone(config.styler()));
        match binding.cardinality {
            Cardinality::Once => host.once(binding.kind, handler),
            Cardinality::Every => host.on(binding.kind, handler),
        }
    }
}

fn listener(binding: &'static Binding, logger: Arc<Logger>, styler: Arc<dyn Styler>) -> Handler {
    Box::new(move |event: &Event, settings: &HostSettings| {
        match (binding.template)(event, settings, styler.as_ref()) {
            Some(message) => logger.log(binding.severity, &message),
            None => debug!("listener: {} received mismatched payload {:?}", binding.kind, event.kind()),
        }
    })
}

fn url(styler: &dyn Styler, url: &str) -> String {
    styler.bold(Color::BrightBlack, url)
}

fn error_tag(styler: &dyn Styler, message: &str) -> String {
    styler.paint(Color::Red, &format!("[Error: {}]", message))
}

fn start_message(_: &Event, _: &HostSettings, _: &dyn Styler) -> Option<String> {
    Some("Starting...".to_string())
}

fn fail_message(_: &Event, _: &HostSettings, _: &dyn Styler) -> Option<String> {
    Some("Scraper failed.".to_string())
}

fn success_message(_: &Event, _: &HostSettings, _: &dyn Styler) -> Option<String> {
    Some("Scraper ended.".to_string())
}

fn page_log_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::PageLog { data, req } => Some(format!(
            "Page {} logging: {}",
            url(styler, &req.url),
            styler.paint(Color::Cyan, &data.message)
        )),
        _ => None,
    }
}

fn page_error_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::PageError { data, req } => Some(format!(
            "Page {} error: {}",
            url(styler, &req.url),
            styler.paint(Color::Red, &data.message)
        )),
        _ => None,
    }
}

fn job_add_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobAdd(job) => Some(format!("Job {} added to the queue.", url(styler, &job.req.url))),
        _ => None,
    }
}

fn job_scrape_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobScrape(job) => Some(format!("Scraping {}", url(styler, &job.req.url))),
        _ => None,
    }
}

fn job_success_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobSuccess(job) => Some(format!(
            "Job {} completed {}",
            url(styler, &job.req.url),
            styler.paint(Color::Green, "successfully.")
        )),
        _ => None,
    }
}

fn job_retry_message(event: &Event, settings: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobRetry(job) => {
            let count = match settings.max_retries {
                Some(max) => format!("{}/{}", job.req.retries, max),
                None => job.req.retries.to_string(),
            };
            Some(format!("Retrying job {} (retry {})", url(styler, &job.req.url), count))
        }
        _ => None,
    }
}

fn job_discard_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobDiscard { error, job } => Some(format!(
            "Job {} discarded {}",
            url(styler, &job.req.url),
            error_tag(styler, &error.message)
        )),
        _ => None,
    }
}

fn job_fail_message(event: &Event, _: &HostSettings, styler: &dyn Styler) -> Option<String> {
    match event {
        Event::JobFail { error, job } => Some(format!(
            "Job {} failed {}",
            url(styler, &job.req.url),
            error_tag(styler, &error.message)
        )),
        _ => None,
    }
}

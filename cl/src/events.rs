//! Host event vocabulary
//!
//! The crawler emits three lifecycle events (each at most once per run) and
//! any number of page and job events. Payloads carry only the fields the
//! log messages read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of an event a host can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "start")]
    Start,
    #[serde(rename = "fail")]
    Fail,
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "page:log")]
    PageLog,
    #[serde(rename = "page:error")]
    PageError,
    #[serde(rename = "job:add")]
    JobAdd,
    #[serde(rename = "job:scrape")]
    JobScrape,
    #[serde(rename = "job:success")]
    JobSuccess,
    #[serde(rename = "job:retry")]
    JobRetry,
    #[serde(rename = "job:discard")]
    JobDiscard,
    #[serde(rename = "job:fail")]
    JobFail,
}

impl EventKind {
    pub const ALL: [EventKind; 11] = [
        EventKind::Start,
        EventKind::Fail,
        EventKind::Success,
        EventKind::PageLog,
        EventKind::PageError,
        EventKind::JobAdd,
        EventKind::JobScrape,
        EventKind::JobSuccess,
        EventKind::JobRetry,
        EventKind::JobDiscard,
        EventKind::JobFail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::Fail => "fail",
            EventKind::Success => "success",
            EventKind::PageLog => "page:log",
            EventKind::PageError => "page:error",
            EventKind::JobAdd => "job:add",
            EventKind::JobScrape => "job:scrape",
            EventKind::JobSuccess => "job:success",
            EventKind::JobRetry => "job:retry",
            EventKind::JobDiscard => "job:discard",
            EventKind::JobFail => "job:fail",
        }
    }

    /// Fired at most once per host run
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, EventKind::Start | EventKind::Fail | EventKind::Success)
    }

    /// Page-level events, subject to the `page-log` switch
    pub fn is_page(&self) -> bool {
        matches!(self, EventKind::PageLog | EventKind::PageError)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown event '{}'", s))
    }
}

/// The request a job or page belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    /// Number of retries already performed
    pub retries: u32,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            retries: 0,
        }
    }
}

/// A unit of crawl work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub req: Request,
}

impl Job {
    pub fn new(url: impl Into<String>) -> Self {
        Self { req: Request::new(url) }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.req.retries = retries;
        self
    }
}

/// Data a page reported (console message or script error)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub message: String,
}

impl PageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure reason attached to a failed or discarded job; display-only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    pub message: String,
}

impl JobError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An event with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Fail,
    Success,
    PageLog { data: PageData, req: Request },
    PageError { data: PageData, req: Request },
    JobAdd(Job),
    JobScrape(Job),
    JobSuccess(Job),
    JobRetry(Job),
    JobDiscard { error: JobError, job: Job },
    JobFail { error: JobError, job: Job },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Start => EventKind::Start,
            Event::Fail => EventKind::Fail,
            Event::Success => EventKind::Success,
            Event::PageLog { .. } => EventKind::PageLog,
            Event::PageError { .. } => EventKind::PageError,
            Event::JobAdd(_) => EventKind::JobAdd,
            Event::JobScrape(_) => EventKind::JobScrape,
            Event::JobSuccess(_) => EventKind::JobSuccess,
            Event::JobRetry(_) => EventKind::JobRetry,
            Event::JobDiscard { .. } => EventKind::JobDiscard,
            Event::JobFail { .. } => EventKind::JobFail,
        }
    }

    /// The job carried by a job event
    pub fn job(&self) -> Option<&Job> {
        match self {
            Event::JobAdd(job)
            | Event::JobScrape(job)
            | Event::JobSuccess(job)
            | Event::JobRetry(job)
            | Event::JobDiscard { job, .. }
            | Event::JobFail { job, .. } => Some(job),
            _ => None,
        }
    }
}

/// Host-wide settings, handed to listeners as they are at emission time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HostSettings {
    /// Retry ceiling per job; `None` when retries are unbounded or disabled
    pub max_retries: Option<u32>,
}

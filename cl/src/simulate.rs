//! Simulated crawl for exercising the logger by hand
//!
//! Drives a [`Crawler`] through a full run with random outcomes: some jobs
//! are discarded before scraping, some fail afterwards and get retried until
//! the crawler's retry ceiling is reached.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::crawler::Crawler;
use crate::events::{Event, Job, JobError, PageData};

/// What to crawl and how often things go wrong
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub urls: Vec<String>,
    /// Probability a job is discarded before scraping
    pub discard_chance: f64,
    /// Probability a scraped job fails validation
    pub failure_chance: f64,
    /// Probability the page logs something while being scraped
    pub page_log_chance: f64,
}

impl SimulationPlan {
    /// `count` local URLs with the default failure rates
    pub fn with_urls(count: usize) -> Self {
        let urls = (1..=count)
            .map(|i| format!("http://localhost:3002/basic.html?{}", i))
            .collect();
        Self {
            urls,
            ..Default::default()
        }
    }
}

impl Default for SimulationPlan {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            discard_chance: 0.1,
            failure_chance: 0.125,
            page_log_chance: 0.25,
        }
    }
}

/// Outcome counts of a simulated run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub discarded: usize,
    pub retried: usize,
}

impl SimulationSummary {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed + self.discarded
    }
}

/// Run the plan against `crawler`, emitting every event inline
pub fn simulate<R: Rng>(crawler: &mut Crawler, plan: &SimulationPlan, rng: &mut R) -> SimulationSummary {
    debug!("simulate: {} urls", plan.urls.len());
    let mut summary = SimulationSummary::default();

    crawler.emit(&Event::Start);

    let mut queue: VecDeque<Job> = VecDeque::new();
    for url in &plan.urls {
        let job = Job::new(url.as_str());
        crawler.emit(&Event::JobAdd(job.clone()));
        queue.push_back(job);
    }

    while let Some(mut job) = queue.pop_front() {
        if rng.random_bool(plan.discard_chance) {
            crawler.emit(&Event::JobDiscard {
                error: JobError::new("discard"),
                job,
            });
            summary.discarded += 1;
            continue;
        }

        crawler.emit(&Event::JobScrape(job.clone()));

        if rng.random_bool(plan.page_log_chance) {
            crawler.emit(&Event::PageLog {
                data: PageData::new(format!("{} links found", rng.random_range(1..=20))),
                req: job.req.clone(),
            });
        }

        if !rng.random_bool(plan.failure_chance) {
            crawler.emit(&Event::JobSuccess(job));
            summary.succeeded += 1;
            continue;
        }

        let can_retry = crawler.settings().max_retries.is_some_and(|max| job.req.retries < max);
        if can_retry {
            job.req.retries += 1;
            crawler.emit(&Event::JobRetry(job.clone()));
            summary.retried += 1;
            queue.push_back(job);
        } else {
            crawler.emit(&Event::JobFail {
                error: JobError::new("invalid-data"),
                job,
            });
            summary.failed += 1;
        }
    }

    if summary.succeeded > 0 || plan.urls.is_empty() {
        crawler.emit(&Event::Success);
    } else {
        crawler.emit(&Event::Fail);
    }

    debug!("simulate: done {:?}", summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, HostSettings};
    use crate::host::Host;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::{Arc, Mutex};

    fn recorded(crawler: &mut Crawler) -> Arc<Mutex<Vec<Event>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        for kind in EventKind::ALL {
            let captured = Arc::clone(&events);
            crawler.on(
                kind,
                Box::new(move |event: &Event, _: &HostSettings| {
                    captured.lock().unwrap().push(event.clone());
                }),
            );
        }
        events
    }

    fn count(events: &[Event], kind: EventKind) -> usize {
        events.iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn test_with_urls() {
        let plan = SimulationPlan::with_urls(3);
        assert_eq!(plan.urls.len(), 3);
        assert_eq!(plan.urls[0], "http://localhost:3002/basic.html?1");
    }

    #[test]
    fn test_every_job_reaches_a_final_state() {
        let mut crawler = Crawler::new("sim").with_settings(HostSettings { max_retries: Some(3) });
        let events = recorded(&mut crawler);
        let mut rng = StdRng::seed_from_u64(42);

        let summary = simulate(&mut crawler, &SimulationPlan::with_urls(50), &mut rng);

        assert_eq!(summary.total(), 50);
        let events = events.lock().unwrap();
        assert_eq!(count(&events, EventKind::JobAdd), 50);
        assert_eq!(count(&events, EventKind::JobSuccess), summary.succeeded);
        assert_eq!(count(&events, EventKind::JobFail), summary.failed);
        assert_eq!(count(&events, EventKind::JobDiscard), summary.discarded);
        assert_eq!(count(&events, EventKind::JobRetry), summary.retried);
        assert_eq!(events.first(), Some(&Event::Start));
    }

    #[test]
    fn test_retries_respect_ceiling() {
        let plan = SimulationPlan {
            urls: vec!["http://x/1".to_string()],
            discard_chance: 0.0,
            failure_chance: 1.0,
            page_log_chance: 0.0,
        };
        let mut crawler = Crawler::new("sim").with_settings(HostSettings { max_retries: Some(2) });
        let events = recorded(&mut crawler);
        let mut rng = StdRng::seed_from_u64(1);

        let summary = simulate(&mut crawler, &plan, &mut rng);

        assert_eq!(summary.retried, 2);
        assert_eq!(summary.failed, 1);
        let events = events.lock().unwrap();
        assert_eq!(events.last(), Some(&Event::Fail));
        let retries: Vec<u32> = events
            .iter()
            .filter(|e| e.kind() == EventKind::JobRetry)
            .filter_map(|e| e.job().map(|j| j.req.retries))
            .collect();
        assert_eq!(retries, vec![1, 2]);
    }

    #[test]
    fn test_no_retries_without_ceiling() {
        let plan = SimulationPlan {
            urls: vec!["http://x/1".to_string()],
            discard_chance: 0.0,
            failure_chance: 1.0,
            page_log_chance: 0.0,
        };
        let mut crawler = Crawler::new("sim");
        let mut rng = StdRng::seed_from_u64(1);

        let summary = simulate(&mut crawler, &plan, &mut rng);
        assert_eq!(summary.retried, 0);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_empty_plan_succeeds() {
        let mut crawler = Crawler::new("sim");
        let events = recorded(&mut crawler);
        let mut rng = StdRng::seed_from_u64(7);

        let summary = simulate(&mut crawler, &SimulationPlan::default(), &mut rng);

        assert_eq!(summary, SimulationSummary::default());
        assert_eq!(events.lock().unwrap().as_slice(), [Event::Start, Event::Success]);
    }
}

//! Crawler - in-process host that emits events synchronously
//!
//! Listeners run inline, in registration order, before [`Crawler::emit`]
//! returns. One-shot listeners are dropped after their first call.

use std::sync::Arc;

use log::debug;

use crate::events::{Event, EventKind, HostSettings};
use crate::host::{Handler, Host};
use crate::logger::Logger;

struct Listener {
    kind: EventKind,
    once: bool,
    handler: Handler,
}

/// A named crawler with settings and listeners
pub struct Crawler {
    name: String,
    settings: HostSettings,
    listeners: Vec<Listener>,
    logger: Option<Arc<Logger>>,
}

impl Crawler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: HostSettings::default(),
            listeners: Vec::new(),
            logger: None,
        }
    }

    pub fn with_settings(mut self, settings: HostSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the settings; listeners see the new values from the next emission on
    pub fn configure(&mut self, settings: HostSettings) {
        debug!(
            "Crawler::configure: {} max_retries={:?}",
            self.name, settings.max_retries
        );
        self.settings = settings;
    }

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Logger installed by a plugin, if any
    pub fn logger(&self) -> Option<&Arc<Logger>> {
        self.logger.as_ref()
    }

    /// Apply a plugin to this crawler
    pub fn use_plugin<P>(&mut self, plugin: P) -> &mut Self
    where
        P: FnOnce(&mut dyn Host),
    {
        plugin(&mut *self);
        self
    }

    /// Number of listeners currently registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }

    /// Call every listener for the event's kind, in registration order
    pub fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        let settings = self.settings.clone();
        let mut i = 0;
        while i < self.listeners.len() {
            if self.listeners[i].kind != kind {
                i += 1;
                continue;
            }
            if self.listeners[i].once {
                let mut listener = self.listeners.remove(i);
                (listener.handler)(event, &settings);
            } else {
                (self.listeners[i].handler)(event, &settings);
                i += 1;
            }
        }
    }
}

impl Host for Crawler {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn on(&mut self, kind: EventKind, handler: Handler) {
        self.listeners.push(Listener {
            kind,
            once: false,
            handler,
        });
    }

    fn once(&mut self, kind: EventKind, handler: Handler) {
        self.listeners.push(Listener { kind, once: true, handler });
    }

    fn set_logger(&mut self, logger: Arc<Logger>) {
        self.logger = Some(logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Job;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Handler {
        let log = Arc::clone(log);
        let tag = tag.to_string();
        Box::new(move |event: &Event, _: &HostSettings| {
            log.lock().unwrap().push(format!("{}:{}", tag, event.kind()));
        })
    }

    #[test]
    fn test_on_fires_every_time() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut crawler = Crawler::new("test");
        crawler.on(EventKind::JobAdd, recorder(&log, "a"));

        crawler.emit(&Event::JobAdd(Job::new("http://x/1")));
        crawler.emit(&Event::JobAdd(Job::new("http://x/2")));

        assert_eq!(log.lock().unwrap().len(), 2);
        assert_eq!(crawler.listener_count(EventKind::JobAdd), 1);
    }

    #[test]
    fn test_once_fires_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut crawler = Crawler::new("test");
        crawler.once(EventKind::Start, recorder(&log, "a"));

        crawler.emit(&Event::Start);
        crawler.emit(&Event::Start);

        assert_eq!(log.lock().unwrap().as_slice(), ["a:start"]);
        assert_eq!(crawler.listener_count(EventKind::Start), 0);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut crawler = Crawler::new("test");
        crawler.on(EventKind::Start, recorder(&log, "first"));
        crawler.once(EventKind::Start, recorder(&log, "second"));
        crawler.on(EventKind::Start, recorder(&log, "third"));

        crawler.emit(&Event::Start);
        crawler.emit(&Event::Start);

        assert_eq!(
            log.lock().unwrap().as_slice(),
            ["first:start", "second:start", "third:start", "first:start", "third:start"]
        );
    }

    #[test]
    fn test_other_kinds_not_called() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut crawler = Crawler::new("test");
        crawler.on(EventKind::JobFail, recorder(&log, "a"));

        crawler.emit(&Event::Success);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_handlers_see_current_settings() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let mut crawler = Crawler::new("test");
        crawler.on(
            EventKind::JobRetry,
            Box::new(move |_: &Event, settings: &HostSettings| {
                captured.lock().unwrap().push(settings.max_retries);
            }),
        );

        let retry = Event::JobRetry(Job::new("http://x/1").with_retries(1));
        crawler.emit(&retry);
        crawler.configure(HostSettings { max_retries: Some(5) });
        crawler.emit(&retry);

        assert_eq!(seen.lock().unwrap().as_slice(), [None, Some(5)]);
    }

    #[test]
    fn test_use_plugin_receives_host() {
        let mut crawler = Crawler::new("MyJawa");
        crawler.use_plugin(|host: &mut dyn Host| {
            assert_eq!(host.name(), Some("MyJawa"));
            host.set_logger(Arc::new(Logger::new(crate::Severity::Info)));
        });
        assert!(crawler.logger().is_some());
    }
}

//! Host contract
//!
//! The minimal capability set the binder needs from a crawler: named
//! subscriptions with persistent or one-shot cardinality, an optional name,
//! and a slot for the logger.

use std::sync::Arc;

use crate::events::{Event, EventKind, HostSettings};
use crate::logger::Logger;

/// Event listener; receives the payload and the host's current settings
pub type Handler = Box<dyn FnMut(&Event, &HostSettings) + Send>;

pub trait Host {
    /// Identifier of this host instance, if it has one
    fn name(&self) -> Option<&str>;

    /// Register a listener called on every emission of `kind`
    fn on(&mut self, kind: EventKind, handler: Handler);

    /// Register a listener removed after its first call
    fn once(&mut self, kind: EventKind, handler: Handler);

    /// Expose the logger to downstream collaborators
    fn set_logger(&mut self, logger: Arc<Logger>);
}

//! Event emitter contract and the in-process event bus.
//!
//! The router publishes `navigate` and `query` notifications through the
//! [`Emitter`] trait. Applications may plug in any observer implementation;
//! [`EventBus`] is the default one shipped with the framework.
//!
//! # Design
//!
//! - **Thread-safe**: Uses `parking_lot::RwLock` for the subscriber table
//! - **Push-based**: Handlers are invoked synchronously during `emit`
//! - **Re-entrant**: Handlers run outside the lock, so a handler may call `on`/`off`
//! - **Keyed subscriptions**: A subscriber id replaces its previous handler for the same event

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::EmitterError;

/// Handler invoked with the event detail payload.
pub type EventHandler = Arc<dyn Fn(&Value) + Send + Sync>;

/// Identity of a subscriber, used to unsubscribe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(Arc<str>);

impl SubscriberId {
	/// Creates a subscriber id from any string-like value.
	pub fn new(id: impl Into<Arc<str>>) -> Self {
		Self(id.into())
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SubscriberId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SubscriberId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for SubscriberId {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// Publish/subscribe contract consumed by the router.
pub trait Emitter: Send + Sync {
	/// Publishes `event` with the given detail payload to every subscriber.
	///
	/// Returns the number of handlers that were invoked.
	fn emit(&self, event: &str, detail: &Value) -> usize;

	/// Registers `handler` for `event` under `subscriber`.
	///
	/// Registering the same subscriber twice for one event replaces the
	/// previous handler.
	///
	/// # Errors
	///
	/// Returns an [`EmitterError`] when a subscription limit is reached.
	fn on(
		&self,
		event: &str,
		handler: EventHandler,
		subscriber: SubscriberId,
	) -> Result<(), EmitterError>;

	/// Removes the handler `subscriber` registered for `event`.
	///
	/// Returns `true` if a handler was removed.
	fn off(&self, event: &str, subscriber: &SubscriberId) -> bool;
}

/// Default maximum number of handlers a single event may carry.
const DEFAULT_MAX_SUBSCRIBERS_PER_EVENT: usize = 256;

struct Subscription {
	subscriber: SubscriberId,
	handler: EventHandler,
}

/// In-process [`Emitter`] implementation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use wayfinder_core::emitter::{Emitter, EventBus};
///
/// let bus = EventBus::new();
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
///
/// bus.on(
///     "navigate",
///     Arc::new(move |_: &serde_json::Value| {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }),
///     "breadcrumbs".into(),
/// )
/// .unwrap();
///
/// bus.emit("navigate", &serde_json::json!({ "key": "home" }));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct EventBus {
	/// Handlers keyed by event name, in subscription order
	subscriptions: RwLock<HashMap<String, Vec<Subscription>>>,
	/// Maximum number of handlers per event name
	max_subscribers_per_event: usize,
}

impl fmt::Debug for EventBus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let subs = self.subscriptions.read();
		f.debug_struct("EventBus")
			.field("events", &subs.keys().collect::<Vec<_>>())
			.field("max_subscribers_per_event", &self.max_subscribers_per_event)
			.finish()
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new()
	}
}

impl EventBus {
	/// Creates an event bus with default limits.
	pub fn new() -> Self {
		Self::with_max_subscribers(DEFAULT_MAX_SUBSCRIBERS_PER_EVENT)
	}

	/// Creates an event bus with a custom per-event subscriber limit.
	pub fn with_max_subscribers(max_subscribers_per_event: usize) -> Self {
		Self {
			subscriptions: RwLock::new(HashMap::new()),
			max_subscribers_per_event,
		}
	}

	/// Returns the number of handlers registered for `event`.
	pub fn subscriber_count(&self, event: &str) -> usize {
		self.subscriptions
			.read()
			.get(event)
			.map(Vec::len)
			.unwrap_or(0)
	}

	/// Removes every handler registered by `subscriber`, across all events.
	///
	/// Returns the number of handlers removed.
	pub fn remove_subscriber(&self, subscriber: &SubscriberId) -> usize {
		let mut subs = self.subscriptions.write();
		let mut removed = 0;
		for handlers in subs.values_mut() {
			let before = handlers.len();
			handlers.retain(|s| &s.subscriber != subscriber);
			removed += before - handlers.len();
		}
		subs.retain(|_, handlers| !handlers.is_empty());
		removed
	}
}

impl Emitter for EventBus {
	fn emit(&self, event: &str, detail: &Value) -> usize {
		// Snapshot the handlers so they run without holding the lock.
		let handlers: Vec<EventHandler> = match self.subscriptions.read().get(event) {
			Some(subs) => subs.iter().map(|s| Arc::clone(&s.handler)).collect(),
			None => return 0,
		};

		tracing::trace!(event = event, handlers = handlers.len(), "emitting event");
		for handler in &handlers {
			handler(detail);
		}
		handlers.len()
	}

	fn on(
		&self,
		event: &str,
		handler: EventHandler,
		subscriber: SubscriberId,
	) -> Result<(), EmitterError> {
		let mut subs = self.subscriptions.write();
		let handlers = subs.entry(event.to_string()).or_default();

		if let Some(existing) = handlers.iter_mut().find(|s| s.subscriber == subscriber) {
			existing.handler = handler;
			return Ok(());
		}

		if handlers.len() >= self.max_subscribers_per_event {
			return Err(EmitterError::SubscriberLimitExceeded {
				event: event.to_string(),
				limit: self.max_subscribers_per_event,
			});
		}

		handlers.push(Subscription {
			subscriber,
			handler,
		});
		Ok(())
	}

	fn off(&self, event: &str, subscriber: &SubscriberId) -> bool {
		let mut subs = self.subscriptions.write();
		let Some(handlers) = subs.get_mut(event) else {
			return false;
		};
		let before = handlers.len();
		handlers.retain(|s| &s.subscriber != subscriber);
		let removed = handlers.len() != before;
		if handlers.is_empty() {
			subs.remove(event);
		}
		removed
	}
}

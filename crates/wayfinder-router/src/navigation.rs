//! Navigation requests, results, session snapshots and event payloads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wayfinder_core::ViewRef;

use crate::node::RouteNode;

/// Event emitted after every committed navigation.
pub const NAVIGATE_EVENT: &str = "navigate";

/// Event emitted after every query parameter edit.
pub const QUERY_EVENT: &str = "query";

/// A navigation request.
///
/// The target is taken from the first of `by_registration_key`, `to_root`
/// and `target_path` that is set. With none of them set, the router
/// resynchronizes with the current history location.
///
/// ```
/// use wayfinder_router::NavigateOptions;
///
/// let options = NavigateOptions::by_key("user").param("id", "42").force();
/// assert_eq!(options.by_registration_key.as_deref(), Some("user"));
/// assert!(options.force);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Literal path to navigate to.
	pub target_path: Option<String>,
	/// Registration key to navigate to.
	pub by_registration_key: Option<String>,
	/// Values for the dynamic segments of the route named by key.
	pub params: HashMap<String, String>,
	/// Navigate to `/`.
	pub to_root: bool,
	/// Carry the current query and hash over; `None` uses the router default.
	pub preserve_query: Option<bool>,
	/// Run even when the target equals the current path.
	pub force: bool,
	/// Open the target outside the current session instead of navigating.
	pub new_tab: bool,
}

impl NavigateOptions {
	/// Creates a request that resynchronizes with the history location.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a request for a literal path.
	pub fn to(path: impl Into<String>) -> Self {
		Self {
			target_path: Some(path.into()),
			..Default::default()
		}
	}

	/// Creates a request for the route registered under `key`.
	pub fn by_key(key: impl Into<String>) -> Self {
		Self {
			by_registration_key: Some(key.into()),
			..Default::default()
		}
	}

	/// Creates a request for `/`.
	pub fn root() -> Self {
		Self {
			to_root: true,
			..Default::default()
		}
	}

	/// Adds a dynamic segment value for by-key navigation.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());
		self
	}

	/// Sets whether the current query and hash are carried over.
	pub fn preserve_query(mut self, preserve: bool) -> Self {
		self.preserve_query = Some(preserve);
		self
	}

	/// Runs the navigation even if the target is already current.
	pub fn force(mut self) -> Self {
		self.force = true;
		self
	}

	/// Opens the target in a new tab.
	pub fn new_tab(mut self) -> Self {
		self.new_tab = true;
		self
	}
}

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// A new view is mounted and the session replaced.
	Committed {
		/// Normalized path navigated to.
		path: String,
		/// Registration key of the mounted route.
		registration_key: String,
	},
	/// The target already was the current path.
	Unchanged,
	/// The mounted view's guard vetoed the navigation.
	GuardRejected,
	/// Nothing matched and there is no not-found route.
	Unresolved {
		/// Normalized path that failed to resolve.
		path: String,
	},
	/// The target was opened outside the current session.
	OpenedInNewTab {
		/// External URL that was opened.
		url: String,
	},
	/// The history backend will deliver a pop-state event later.
	Deferred,
}

impl NavigationOutcome {
	/// Returns whether a new view was mounted.
	pub fn is_committed(&self) -> bool {
		matches!(self, Self::Committed { .. })
	}
}

/// Snapshot of what is currently mounted.
///
/// The router replaces the whole snapshot at once, so the path, view, route
/// node and params always describe the same navigation.
#[derive(Clone, Default)]
pub struct NavigationSession {
	current_path: String,
	current_route: Option<ViewRef>,
	current_route_config: Option<Arc<RouteNode>>,
	params: HashMap<String, String>,
}

impl NavigationSession {
	pub(crate) fn initial(path: String) -> Self {
		Self {
			current_path: path,
			..Default::default()
		}
	}

	pub(crate) fn mounted(
		path: String,
		view: ViewRef,
		node: Arc<RouteNode>,
		params: HashMap<String, String>,
	) -> Self {
		Self {
			current_path: path,
			current_route: Some(view),
			current_route_config: Some(node),
			params,
		}
	}

	/// Returns the normalized path of the last navigation.
	pub fn current_path(&self) -> &str {
		&self.current_path
	}

	/// Returns the mounted view.
	pub fn current_route(&self) -> Option<&ViewRef> {
		self.current_route.as_ref()
	}

	/// Returns the route node behind the mounted view.
	pub fn current_route_config(&self) -> Option<&Arc<RouteNode>> {
		self.current_route_config.as_ref()
	}

	/// Returns the params captured for the mounted view.
	pub fn params(&self) -> &HashMap<String, String> {
		&self.params
	}
}

impl fmt::Debug for NavigationSession {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavigationSession")
			.field("current_path", &self.current_path)
			.field("has_view", &self.current_route.is_some())
			.field(
				"registration_key",
				&self
					.current_route_config
					.as_ref()
					.map(|node| node.registration_key()),
			)
			.field("params", &self.params)
			.finish()
	}
}

/// Detail of a [`NAVIGATE_EVENT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigateEvent {
	/// Registration key of the mounted route.
	pub key: String,
	/// Normalized path navigated to.
	pub path: String,
	/// The route's custom metadata with the captured params laid over it.
	pub payload: Map<String, Value>,
}

impl NavigateEvent {
	pub(crate) fn new(path: &str, node: &RouteNode, params: &HashMap<String, String>) -> Self {
		let mut payload = node.custom().clone();
		for (name, value) in params {
			payload.insert(name.clone(), Value::String(value.clone()));
		}
		Self {
			key: node.registration_key().to_string(),
			path: path.to_string(),
			payload,
		}
	}
}

/// Detail of a [`QUERY_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEvent {
	/// Keys whose value changed.
	pub keys: Vec<String>,
	/// The resulting query string, without `?`.
	pub query: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_constructors() {
		assert_eq!(NavigateOptions::to("/a").target_path.as_deref(), Some("/a"));
		assert!(NavigateOptions::root().to_root);
		assert_eq!(NavigateOptions::new(), NavigateOptions::default());

		let options = NavigateOptions::to("/a").preserve_query(false).new_tab();
		assert_eq!(options.preserve_query, Some(false));
		assert!(options.new_tab);
		assert!(!options.force);
	}

	#[rstest]
	fn test_navigate_event_params_override_custom() {
		let node = RouteNode::new("user", "user/:id")
			.with_custom("title", "User")
			.with_custom("id", 0);
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());

		let event = NavigateEvent::new("/user/42", &node, &params);

		assert_eq!(
			serde_json::to_value(&event).unwrap(),
			json!({
				"key": "user",
				"path": "/user/42",
				"payload": { "title": "User", "id": "42" }
			})
		);
	}

	#[rstest]
	fn test_session_debug_hides_view() {
		let session = NavigationSession::initial("/".into());
		let debug = format!("{session:?}");
		assert!(debug.contains("has_view: false"));
		assert!(session.current_route().is_none());
	}
}

//! Path resolution against a [`RouteTable`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::node::RouteNode;
use crate::table::{RouteEntry, RouteTable};

/// A resolved route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
	/// The matched route node.
	pub node: Arc<RouteNode>,
	/// Full path the node is registered at (the pattern for dynamic routes).
	pub full_path: String,
	/// Values captured by dynamic segments.
	pub params: HashMap<String, String>,
}

impl RouteMatch {
	fn from_entry(entry: &RouteEntry, params: HashMap<String, String>) -> Self {
		Self {
			node: Arc::clone(entry.node()),
			full_path: entry.full_path().to_string(),
			params,
		}
	}

	/// Returns the registration key of the matched node.
	pub fn registration_key(&self) -> &str {
		self.node.registration_key()
	}
}

/// Resolves a normalized path.
///
/// An exact entry always wins. Otherwise dynamic routes are tried in
/// registration order and the first match wins, regardless of how specific
/// later patterns are. The not-found fallback is left to the caller.
pub fn match_path(path: &str, table: &RouteTable) -> Option<RouteMatch> {
	if let Some(entry) = table.get(path) {
		return Some(RouteMatch::from_entry(entry, HashMap::new()));
	}

	let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
	table.dynamic_routes().find_map(|entry| {
		entry
			.pattern()
			.matches(&segments)
			.map(|params| RouteMatch::from_entry(entry, params))
	})
}

/// Like [`match_path`], falling back to the not-found route.
pub fn match_or_not_found(path: &str, table: &RouteTable) -> Option<RouteMatch> {
	match_path(path, table)
		.or_else(|| table.not_found().map(|entry| RouteMatch::from_entry(entry, HashMap::new())))
}

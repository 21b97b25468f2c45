//! Route tree configuration.
//!
//! Applications describe their routes as a tree of [`RouteNode`]s. A node's
//! full path is its parent's full path joined with its own URL fragment, so
//! the following tree registers `/`, `/about` and `/about/team`:
//!
//! ```
//! use wayfinder_router::RouteNode;
//!
//! let routes = vec![
//!     RouteNode::new("home", ""),
//!     RouteNode::new("about", "about").child(RouteNode::new("team", "team")),
//! ];
//! assert_eq!(routes[1].child_routes()[0].registration_key(), "team");
//! ```
//!
//! Nodes are also deserializable, so a tree can ship as JSON or TOML next to
//! the application bundle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of the route tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteNode {
	#[serde(alias = "key")]
	registration_key: String,
	#[serde(default, alias = "path")]
	url_fragment: String,
	#[serde(default)]
	is_not_found: bool,
	#[serde(default, alias = "children")]
	child_routes: Vec<RouteNode>,
	#[serde(default)]
	custom: Map<String, Value>,
}

impl RouteNode {
	/// Creates a node registered under `key` with the given URL fragment.
	///
	/// The fragment may be empty, may contain several slash-separated
	/// segments, and may contain `:name` or `:name?` dynamic segments.
	pub fn new(key: impl Into<String>, fragment: impl Into<String>) -> Self {
		Self {
			registration_key: key.into(),
			url_fragment: fragment.into(),
			..Default::default()
		}
	}

	/// Appends a child route.
	pub fn child(mut self, node: RouteNode) -> Self {
		self.child_routes.push(node);
		self
	}

	/// Appends several child routes in order.
	pub fn children(mut self, nodes: impl IntoIterator<Item = RouteNode>) -> Self {
		self.child_routes.extend(nodes);
		self
	}

	/// Marks this node as the fallback for unmatched paths.
	pub fn not_found(mut self) -> Self {
		self.is_not_found = true;
		self
	}

	/// Adds one custom metadata entry.
	pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.custom.insert(key.into(), value.into());
		self
	}

	/// Returns the registration key.
	pub fn registration_key(&self) -> &str {
		&self.registration_key
	}

	/// Returns the raw URL fragment.
	pub fn url_fragment(&self) -> &str {
		&self.url_fragment
	}

	/// Returns whether this node is the not-found fallback.
	pub fn is_not_found(&self) -> bool {
		self.is_not_found
	}

	/// Returns the child routes in declaration order.
	pub fn child_routes(&self) -> &[RouteNode] {
		&self.child_routes
	}

	/// Returns the custom metadata.
	pub fn custom(&self) -> &Map<String, Value> {
		&self.custom
	}

	/// Copies the node without its children.
	pub(crate) fn detached(&self) -> RouteNode {
		RouteNode {
			registration_key: self.registration_key.clone(),
			url_fragment: self.url_fragment.clone(),
			is_not_found: self.is_not_found,
			child_routes: Vec::new(),
			custom: self.custom.clone(),
		}
	}
}

/// Entry of the site map derived from the route tree.
///
/// Mirrors the route tree with every node's full path resolved. Intended for
/// menus and breadcrumbs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMapNode {
	/// Registration key of the route.
	pub registration_key: String,
	/// Normalized full path of the route, without the URL prefix.
	pub full_url: String,
	/// Whether the route is the not-found fallback.
	pub is_not_found: bool,
	/// The route's custom metadata.
	pub custom: Map<String, Value>,
	/// Child entries in declaration order.
	pub children: Vec<SiteMapNode>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_builder_collects_children_in_order() {
		let node = RouteNode::new("about", "about")
			.child(RouteNode::new("team", "team"))
			.children([RouteNode::new("history", "history"), RouteNode::new("jobs", "jobs")]);

		let keys: Vec<_> = node
			.child_routes()
			.iter()
			.map(RouteNode::registration_key)
			.collect();
		assert_eq!(keys, ["team", "history", "jobs"]);
	}

	#[rstest]
	fn test_custom_metadata() {
		let node = RouteNode::new("home", "")
			.with_custom("title", "Home")
			.with_custom("order", 1);

		assert_eq!(node.custom().get("title"), Some(&json!("Home")));
		assert_eq!(node.custom().get("order"), Some(&json!(1)));
		assert!(!node.is_not_found());
	}

	#[rstest]
	fn test_deserialize_tree_with_aliases() {
		let tree: Vec<RouteNode> = serde_json::from_value(json!([
			{ "key": "home", "path": "" },
			{
				"registration_key": "about",
				"url_fragment": "about",
				"children": [{ "key": "team", "path": "team", "custom": { "title": "Team" } }]
			},
			{ "key": "missing", "path": "404", "is_not_found": true }
		]))
		.unwrap();

		assert_eq!(tree.len(), 3);
		assert_eq!(tree[0].url_fragment(), "");
		assert_eq!(tree[1].child_routes()[0].custom().get("title"), Some(&json!("Team")));
		assert!(tree[2].is_not_found());
	}
}

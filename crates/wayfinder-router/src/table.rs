//! Route table construction.
//!
//! [`RouteTableBuilder`] flattens a route tree into a [`RouteTable`]: a map
//! from normalized full path to route node, a registration-key index for
//! by-key navigation, the ordered list of dynamic patterns, the root and
//! not-found routes, and a [`SiteMapNode`] tree for UI consumption.
//!
//! The tree is walked with an explicit stack, so arbitrarily deep trees are
//! safe to register.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{RouterError, RouterResult};
use crate::matcher::{self, RouteMatch};
use crate::node::{RouteNode, SiteMapNode};
use crate::normalize::join;
use crate::pattern::RoutePattern;

/// One registered route.
#[derive(Debug, Clone)]
pub struct RouteEntry {
	full_path: String,
	node: Arc<RouteNode>,
	pattern: RoutePattern,
	parent: Option<usize>,
}

impl RouteEntry {
	/// Returns the normalized full path.
	pub fn full_path(&self) -> &str {
		&self.full_path
	}

	/// Returns the route node. Its children are not kept; walk the table's
	/// entries or [`RouteTable::site_map`] for the tree.
	pub fn node(&self) -> &Arc<RouteNode> {
		&self.node
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the registration key.
	pub fn registration_key(&self) -> &str {
		self.node.registration_key()
	}
}

/// Flattened, immutable view of a route tree.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	entries: Vec<RouteEntry>,
	by_path: HashMap<String, usize>,
	dynamic: Vec<usize>,
	registration_index: HashMap<String, usize>,
	root: Option<usize>,
	not_found: Option<usize>,
	site_map: Vec<SiteMapNode>,
}

impl RouteTable {
	/// Builds a table with last-declaration-wins duplicate handling.
	///
	/// # Errors
	///
	/// Returns [`RouterError::PathCollision`] if two nodes share a full path.
	pub fn build(roots: &[RouteNode]) -> RouterResult<Self> {
		RouteTableBuilder::new().build(roots)
	}

	/// Returns the route registered at exactly `path`.
	pub fn get(&self, path: &str) -> Option<&RouteEntry> {
		self.by_path.get(path).map(|&index| &self.entries[index])
	}

	/// Returns the route registered under `key`.
	pub fn by_key(&self, key: &str) -> Option<&RouteEntry> {
		self.registration_index
			.get(key)
			.map(|&index| &self.entries[index])
	}

	/// Returns the full path registered under `key`.
	pub fn path_for_key(&self, key: &str) -> Option<&str> {
		self.by_key(key).map(RouteEntry::full_path)
	}

	/// Builds a concrete internal path for the route registered under `key`.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRegistrationKey`] if `key` is not
	/// registered, or [`RouterError::MissingParameter`] if a required dynamic
	/// segment has no value in `params`.
	pub fn url_for(&self, key: &str, params: &HashMap<String, String>) -> RouterResult<String> {
		let entry = self
			.by_key(key)
			.ok_or_else(|| RouterError::UnknownRegistrationKey(key.to_string()))?;
		entry
			.pattern
			.reverse(params)
			.map_err(|param| RouterError::MissingParameter {
				key: key.to_string(),
				param,
			})
	}

	/// Resolves `path` to a route; see [`matcher::match_path`].
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		matcher::match_path(path, self)
	}

	/// Returns the route whose full path is `/`.
	pub fn root(&self) -> Option<&RouteEntry> {
		self.root.map(|index| &self.entries[index])
	}

	/// Returns the not-found fallback route.
	pub fn not_found(&self) -> Option<&RouteEntry> {
		self.not_found.map(|index| &self.entries[index])
	}

	/// Returns the dynamic routes in registration order.
	pub fn dynamic_routes(&self) -> impl Iterator<Item = &RouteEntry> {
		self.dynamic.iter().map(|&index| &self.entries[index])
	}

	/// Returns every route in registration order (depth-first, pre-order).
	pub fn entries(&self) -> &[RouteEntry] {
		&self.entries
	}

	/// Returns the site map.
	pub fn site_map(&self) -> &[SiteMapNode] {
		&self.site_map
	}

	/// Returns the chain of routes from the top of the tree down to the route
	/// registered under `key`, for breadcrumbs.
	pub fn trail(&self, key: &str) -> Vec<&RouteEntry> {
		let mut trail = Vec::new();
		let mut cursor = self.registration_index.get(key).copied();
		while let Some(index) = cursor {
			let entry = &self.entries[index];
			trail.push(entry);
			cursor = entry.parent;
		}
		trail.reverse();
		trail
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no route is registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Builds [`RouteTable`]s from route trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTableBuilder {
	strict: bool,
}

impl RouteTableBuilder {
	/// Creates a lenient builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rejects duplicate registration keys and not-found nodes instead of
	/// letting the last declaration win.
	pub fn strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Flattens `roots` into a route table.
	///
	/// # Errors
	///
	/// Returns [`RouterError::PathCollision`] if two nodes share a full path.
	/// In strict mode, also returns [`RouterError::DuplicateRegistrationKey`]
	/// or [`RouterError::DuplicateNotFound`].
	pub fn build(&self, roots: &[RouteNode]) -> RouterResult<RouteTable> {
		let mut table = RouteTable::default();
		let mut stack: Vec<(&RouteNode, Option<usize>)> =
			roots.iter().rev().map(|node| (node, None)).collect();

		while let Some((node, parent)) = stack.pop() {
			let parent_path = parent.map_or("/", |index| table.entries[index].full_path.as_str());
			let full_path = join(parent_path, node.url_fragment());
			let index = self.register(&mut table, node, full_path, parent)?;
			stack.extend(
				node.child_routes()
					.iter()
					.rev()
					.map(|child| (child, Some(index))),
			);
		}

		table.site_map = site_map(&table.entries);
		Ok(table)
	}

	fn register(
		&self,
		table: &mut RouteTable,
		node: &RouteNode,
		full_path: String,
		parent: Option<usize>,
	) -> RouterResult<usize> {
		let key = node.registration_key();
		if let Some(&existing) = table.by_path.get(&full_path) {
			return Err(RouterError::PathCollision {
				path: full_path,
				existing: table.entries[existing].registration_key().to_string(),
				incoming: key.to_string(),
			});
		}

		let index = table.entries.len();
		if let Some(&previous) = table.registration_index.get(key) {
			let first = table.entries[previous].full_path.clone();
			if self.strict {
				return Err(RouterError::DuplicateRegistrationKey {
					key: key.to_string(),
					first,
					second: full_path,
				});
			}
			tracing::warn!(
				key = key,
				first = %first,
				second = %full_path,
				"registration key declared twice; last declaration wins"
			);
		}
		// A second root would already have collided on `/`.
		if full_path == "/" {
			table.root = Some(index);
		}
		if node.is_not_found() {
			if let Some(previous) = table.not_found {
				let first = table.entries[previous].registration_key().to_string();
				if self.strict {
					return Err(RouterError::DuplicateNotFound {
						first,
						second: key.to_string(),
					});
				}
				tracing::warn!(first = %first, second = key, "not-found route declared twice; last declaration wins");
			}
			table.not_found = Some(index);
		}

		let pattern = RoutePattern::parse(&full_path);
		if full_path.contains(':') {
			table.dynamic.push(index);
		}
		table.registration_index.insert(key.to_string(), index);
		table.by_path.insert(full_path.clone(), index);
		table.entries.push(RouteEntry {
			full_path,
			node: Arc::new(node.detached()),
			pattern,
			parent,
		});
		tracing::trace!(key = key, path = %table.entries[index].full_path, "route registered");

		Ok(index)
	}
}

/// Reassembles the flat pre-order entry list into a nested site map.
fn site_map(entries: &[RouteEntry]) -> Vec<SiteMapNode> {
	let mut slots: Vec<Option<SiteMapNode>> = entries
		.iter()
		.map(|entry| {
			Some(SiteMapNode {
				registration_key: entry.registration_key().to_string(),
				full_url: entry.full_path.clone(),
				is_not_found: entry.node.is_not_found(),
				custom: entry.node.custom().clone(),
				children: Vec::new(),
			})
		})
		.collect();

	// Parents always precede their children, so walking backwards attaches
	// every node before its parent is moved out.
	let mut top = Vec::new();
	for index in (0..slots.len()).rev() {
		let Some(mut node) = slots[index].take() else {
			continue;
		};
		node.children.reverse();
		match entries[index].parent {
			Some(parent) => {
				if let Some(parent) = slots[parent].as_mut() {
					parent.children.push(node);
				}
			}
			None => top.push(node),
		}
	}
	top.reverse();
	top
}

//! Property-based tests for route table construction and matching
//!
//! Uses proptest to verify properties that should hold for every route tree,
//! including trees with `:name` and `:name?` segments.

use std::collections::HashMap;

use proptest::prelude::*;
use wayfinder_router::normalize::join;
use wayfinder_router::{Direction, PathNormalizer, RouteNode, RouteTable, RouterError};

/// What a generated node's fragment ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tail {
	Literal,
	Param,
	/// Only generated for leaves.
	Optional,
}

/// A generated tree: node `i` hangs under `parents[i]`, or at the top level.
///
/// Every fragment starts with a unique literal, so no two nodes share a full
/// path and no pattern can match another node's concrete path.
#[derive(Debug, Clone)]
struct TreeSpec {
	parents: Vec<Option<usize>>,
	fragments: Vec<String>,
	tails: Vec<Tail>,
}

impl TreeSpec {
	fn key(index: usize) -> String {
		format!("k{index}")
	}

	fn build_node(&self, index: usize) -> RouteNode {
		let children = (0..self.parents.len())
			.filter(|&child| self.parents[child] == Some(index))
			.map(|child| self.build_node(child));
		RouteNode::new(Self::key(index), self.fragments[index].clone()).children(children)
	}

	fn roots(&self) -> Vec<RouteNode> {
		(0..self.parents.len())
			.filter(|&index| self.parents[index].is_none())
			.map(|index| self.build_node(index))
			.collect()
	}

	fn full_path(&self, index: usize) -> String {
		let mut chain = vec![index];
		let mut cursor = self.parents[index];
		while let Some(parent) = cursor {
			chain.push(parent);
			cursor = self.parents[parent];
		}
		chain
			.iter()
			.rev()
			.fold("/".to_string(), |path, &node| join(&path, &self.fragments[node]))
	}
}

/// Trees mixing literal, dynamic and optional fragments.
fn tree_spec() -> impl Strategy<Value = TreeSpec> {
	(1usize..24)
		.prop_flat_map(|len| {
			(
				proptest::collection::vec(any::<prop::sample::Index>(), len),
				proptest::collection::vec(any::<bool>(), len),
				proptest::collection::vec("[a-z]{1,6}", len),
				proptest::collection::vec(0u8..3, len),
			)
		})
		.prop_map(|(picks, top_level, bases, kinds)| {
			let parents: Vec<Option<usize>> = picks
				.iter()
				.enumerate()
				.map(|(index, pick)| {
					if index == 0 || top_level[index] {
						None
					} else {
						Some(pick.index(index))
					}
				})
				.collect();
			let tails: Vec<Tail> = kinds
				.iter()
				.enumerate()
				.map(|(index, &kind)| {
					let is_leaf = !parents.contains(&Some(index));
					match kind {
						0 => Tail::Literal,
						2 if is_leaf => Tail::Optional,
						_ => Tail::Param,
					}
				})
				.collect();
			let fragments = bases
				.into_iter()
				.enumerate()
				.map(|(index, base)| match tails[index] {
					Tail::Literal => format!("{base}-{index}"),
					Tail::Param => format!("{base}-{index}/:p{index}"),
					Tail::Optional => format!("{base}-{index}/:p{index}?"),
				})
				.collect();
			TreeSpec {
				parents,
				fragments,
				tails,
			}
		})
}

/// Sample values never contain `-`, so they never equal a literal segment.
fn sample_params(table: &RouteTable, key: &str) -> HashMap<String, String> {
	table
		.by_key(key)
		.map(|entry| {
			entry
				.pattern()
				.param_names()
				.map(|name| (name.to_string(), format!("{name}value")))
				.collect()
		})
		.unwrap_or_default()
}

proptest! {
	/// Property: every node of a collision-free tree is registered at its full path
	#[test]
	fn prop_every_node_is_registered_at_its_full_path(spec in tree_spec()) {
		let table = RouteTable::build(&spec.roots()).unwrap();

		prop_assert_eq!(table.len(), spec.parents.len());
		for index in 0..spec.parents.len() {
			let key = TreeSpec::key(index);
			let path = spec.full_path(index);
			prop_assert_eq!(table.path_for_key(&key), Some(path.as_str()));
		}
	}

	/// Property: every node resolves at its reversed path with the params it was given
	#[test]
	fn prop_every_node_matches_its_reversed_path(spec in tree_spec()) {
		let table = RouteTable::build(&spec.roots()).unwrap();

		for index in 0..spec.parents.len() {
			let key = TreeSpec::key(index);
			let params = sample_params(&table, &key);
			let path = table.url_for(&key, &params).unwrap();

			let matched = table.match_path(&path).unwrap();
			prop_assert_eq!(matched.registration_key(), key.as_str());
			prop_assert_eq!(matched.params, params);
		}
	}

	/// Property: a trailing optional segment may be left off
	#[test]
	fn prop_optional_leaf_matches_without_its_value(spec in tree_spec()) {
		let table = RouteTable::build(&spec.roots()).unwrap();

		for index in (0..spec.parents.len()).filter(|&i| spec.tails[i] == Tail::Optional) {
			let key = TreeSpec::key(index);
			let mut params = sample_params(&table, &key);
			params.remove(&format!("p{index}"));
			let path = table.url_for(&key, &params).unwrap();

			let matched = table.match_path(&path).unwrap();
			prop_assert_eq!(matched.registration_key(), key.as_str());
			let removed = format!("p{index}");
			prop_assert!(!matched.params.contains_key(&removed));
		}
	}

	/// Property: the site map lists every node exactly once
	#[test]
	fn prop_site_map_covers_every_node(spec in tree_spec()) {
		let table = RouteTable::build(&spec.roots()).unwrap();

		let mut pending: Vec<_> = table.site_map().iter().collect();
		let mut seen = 0;
		while let Some(node) = pending.pop() {
			prop_assert_eq!(table.path_for_key(&node.registration_key), Some(node.full_url.as_str()));
			pending.extend(node.children.iter());
			seen += 1;
		}
		prop_assert_eq!(seen, spec.parents.len());
	}

	/// Property: repeating a top-level fragment always fails the build
	#[test]
	fn prop_colliding_tree_fails(spec in tree_spec()) {
		let mut roots = spec.roots();
		let duplicate = format!("/{}/", spec.fragments[0]);
		roots.push(RouteNode::new("intruder", duplicate));

		let result = RouteTable::build(&roots);

		prop_assert_eq!(
			result.err(),
			Some(RouterError::PathCollision {
				path: spec.full_path(0),
				existing: TreeSpec::key(0),
				incoming: "intruder".to_string(),
			})
		);
	}

	/// Property: normalization without a prefix is idempotent in both directions
	#[test]
	fn prop_normalize_is_idempotent(raw in r"[a-z0-9/?#=&.]{0,40}") {
		let normalizer = PathNormalizer::new(None);
		for direction in [Direction::ToInternal, Direction::ToExternal] {
			let once = normalizer.normalize(&raw, direction);
			prop_assert_eq!(normalizer.normalize(&once, direction), once.clone());
		}
	}
}

//! Query string editing.

use crate::error::{RouterError, RouterResult};

/// What to do with one query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	/// Set the parameter, replacing any existing values.
	Set(String),
	/// Delete the parameter.
	Remove,
	/// Leave the parameter as it is.
	Keep,
}

/// An ordered set of query parameter edits.
///
/// ```
/// use wayfinder_router::query::{apply_patch, QueryPatch};
///
/// let patch = QueryPatch::new().set("a", "1").remove("b");
/// let (query, changed) = apply_patch("b=2", &patch).unwrap();
///
/// assert_eq!(query, "a=1");
/// assert_eq!(changed, ["a", "b"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPatch {
	edits: Vec<(String, QueryValue)>,
}

impl QueryPatch {
	/// Creates an empty patch.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key` to `value`.
	pub fn set(self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.with(key, QueryValue::Set(value.into()))
	}

	/// Removes `key`.
	pub fn remove(self, key: impl Into<String>) -> Self {
		self.with(key, QueryValue::Remove)
	}

	/// Leaves `key` untouched.
	pub fn keep(self, key: impl Into<String>) -> Self {
		self.with(key, QueryValue::Keep)
	}

	/// Adds an arbitrary edit.
	pub fn with(mut self, key: impl Into<String>, value: QueryValue) -> Self {
		self.edits.push((key.into(), value));
		self
	}

	/// Returns the edits in insertion order.
	pub fn edits(&self) -> &[(String, QueryValue)] {
		&self.edits
	}

	/// Returns whether the patch has no edits.
	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}
}

/// Builds a patch from `(key, Some(value))` sets and `(key, None)` removals.
impl<K, V> FromIterator<(K, Option<V>)> for QueryPatch
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
		let edits = iter
			.into_iter()
			.map(|(key, value)| {
				let value = match value {
					Some(value) => QueryValue::Set(value.into()),
					None => QueryValue::Remove,
				};
				(key.into(), value)
			})
			.collect();
		Self { edits }
	}
}

/// Parses a query string (with or without the leading `?`) into ordered pairs.
///
/// # Errors
///
/// Returns [`RouterError::Query`] if the query cannot be decoded.
pub fn parse_query(query: &str) -> RouterResult<Vec<(String, String)>> {
	let query = query.strip_prefix('?').unwrap_or(query);
	serde_urlencoded::from_str(query).map_err(|e| RouterError::Query(e.to_string()))
}

/// Applies `patch` to `query`.
///
/// Existing parameters keep their position; newly set ones are appended.
/// Returns the encoded query (without `?`) and the keys whose value actually
/// changed, in patch order.
///
/// # Errors
///
/// Returns [`RouterError::Query`] if the query cannot be decoded or encoded.
pub fn apply_patch(query: &str, patch: &QueryPatch) -> RouterResult<(String, Vec<String>)> {
	let mut pairs = parse_query(query)?;
	let mut changed = Vec::new();

	for (key, value) in patch.edits() {
		match value {
			QueryValue::Keep => {}
			QueryValue::Remove => {
				let before = pairs.len();
				pairs.retain(|(name, _)| name != key);
				if pairs.len() != before {
					changed.push(key.clone());
				}
			}
			QueryValue::Set(value) => {
				let existing: Vec<&str> = pairs
					.iter()
					.filter(|(name, _)| name == key)
					.map(|(_, v)| v.as_str())
					.collect();
				if existing == [value.as_str()] {
					continue;
				}
				match pairs.iter().position(|(name, _)| name == key) {
					Some(first) => {
						pairs[first].1 = value.clone();
						let mut seen = false;
						pairs.retain(|(name, _)| {
							if name != key {
								return true;
							}
							let keep = !seen;
							seen = true;
							keep
						});
					}
					None => pairs.push((key.clone(), value.clone())),
				}
				changed.push(key.clone());
			}
		}
	}

	let encoded = serde_urlencoded::to_string(&pairs).map_err(|e| RouterError::Query(e.to_string()))?;
	Ok((encoded, changed))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_set_and_remove() {
		let patch: QueryPatch = [("a", Some("1")), ("b", None)].into_iter().collect();

		let (query, changed) = apply_patch("?b=2", &patch).unwrap();

		assert_eq!(query, "a=1");
		assert_eq!(changed, ["a", "b"]);
	}

	#[rstest]
	fn test_existing_order_is_preserved() {
		let patch = QueryPatch::new().set("z", "9").set("a", "new");

		let (query, _) = apply_patch("a=1&m=2", &patch).unwrap();

		assert_eq!(query, "a=new&m=2&z=9");
	}

	#[rstest]
	fn test_set_collapses_repeated_keys() {
		let patch = QueryPatch::new().set("tag", "rust");

		let (query, changed) = apply_patch("tag=a&x=1&tag=b", &patch).unwrap();

		assert_eq!(query, "tag=rust&x=1");
		assert_eq!(changed, ["tag"]);
	}

	#[rstest]
	fn test_keep_and_noop_edits_report_nothing() {
		let patch = QueryPatch::new().keep("a").set("b", "2").remove("c");

		let (query, changed) = apply_patch("a=1&b=2", &patch).unwrap();

		assert_eq!(query, "a=1&b=2");
		assert!(changed.is_empty());
	}

	#[rstest]
	fn test_values_are_encoded() {
		let patch = QueryPatch::new().set("q", "a b&c");

		let (query, _) = apply_patch("", &patch).unwrap();

		assert_eq!(query, "q=a+b%26c");
		assert_eq!(parse_query(&query).unwrap(), [("q".to_string(), "a b&c".to_string())]);
	}

	#[rstest]
	fn test_removing_everything_yields_empty_query() {
		let patch = QueryPatch::new().remove("a");

		let (query, changed) = apply_patch("?a=1", &patch).unwrap();

		assert_eq!(query, "");
		assert_eq!(changed, ["a"]);
	}
}

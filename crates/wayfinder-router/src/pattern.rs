//! Dynamic route patterns.
//!
//! A full path containing `:` compiles to a [`RoutePattern`]:
//!
//! - `about` - literal segment, matched byte-for-byte
//! - `:id` - required segment, captured under `id`
//! - `:id?` - optional segment, captured under `id` only when present
//!
//! Captured values are URL-decoded; a value that does not decode is captured
//! as written.

use std::collections::HashMap;
use std::fmt;

/// One compiled segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Fixed text.
	Literal(String),
	/// `:name`, must be present.
	Param(String),
	/// `:name?`, may be absent.
	OptionalParam(String),
}

impl Segment {
	fn parse(raw: &str) -> Self {
		match raw.strip_prefix(':') {
			Some(name) if name.len() > 1 && name.ends_with('?') => {
				Self::OptionalParam(name[..name.len() - 1].to_string())
			}
			Some(name) if !name.is_empty() && name != "?" => Self::Param(name.to_string()),
			_ => Self::Literal(raw.to_string()),
		}
	}

	/// Returns the parameter name for dynamic segments.
	pub fn param_name(&self) -> Option<&str> {
		match self {
			Self::Literal(_) => None,
			Self::Param(name) | Self::OptionalParam(name) => Some(name),
		}
	}
}

/// Compiled form of a normalized full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	path: String,
	segments: Vec<Segment>,
	required: usize,
}

impl RoutePattern {
	/// Compiles a normalized full path.
	pub fn parse(path: &str) -> Self {
		let segments: Vec<Segment> = path
			.split('/')
			.filter(|s| !s.is_empty())
			.map(Segment::parse)
			.collect();
		let required = segments
			.iter()
			.filter(|s| !matches!(s, Segment::OptionalParam(_)))
			.count();

		Self {
			path: path.to_string(),
			segments,
			required,
		}
	}

	/// Returns the path this pattern was compiled from.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the compiled segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Returns whether the pattern has any dynamic segment.
	pub fn is_dynamic(&self) -> bool {
		self.segments.iter().any(|s| s.param_name().is_some())
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(Segment::param_name)
	}

	/// Matches already-split path segments against this pattern.
	///
	/// A path with more segments than the pattern, or fewer than its
	/// required segments, never matches. Optional segments consume a path
	/// segment whenever one remains.
	pub fn matches(&self, path: &[&str]) -> Option<HashMap<String, String>> {
		if path.len() > self.segments.len() || path.len() < self.required {
			return None;
		}

		let mut params = HashMap::new();
		let mut position = 0;
		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => {
					if path.get(position).copied() != Some(literal.as_str()) {
						return None;
					}
					position += 1;
				}
				Segment::Param(name) => {
					let value = path.get(position)?;
					params.insert(name.clone(), decode(value));
					position += 1;
				}
				Segment::OptionalParam(name) => {
					if let Some(value) = path.get(position) {
						params.insert(name.clone(), decode(value));
						position += 1;
					}
				}
			}
		}

		(position == path.len()).then_some(params)
	}

	/// Builds a concrete path from parameter values.
	///
	/// Values are URL-encoded. Optional segments without a value are left out.
	///
	/// # Errors
	///
	/// Returns the name of the first required parameter missing from `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, String> {
		let mut parts = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			match segment {
				Segment::Literal(literal) => parts.push(literal.clone()),
				Segment::Param(name) => {
					let value = params.get(name).ok_or_else(|| name.clone())?;
					parts.push(urlencoding::encode(value).into_owned());
				}
				Segment::OptionalParam(name) => {
					if let Some(value) = params.get(name) {
						parts.push(urlencoding::encode(value).into_owned());
					}
				}
			}
		}

		if parts.is_empty() {
			Ok("/".to_string())
		} else {
			Ok(format!("/{}", parts.join("/")))
		}
	}
}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.path)
	}
}

fn decode(raw: &str) -> String {
	urlencoding::decode(raw)
		.map(|value| value.into_owned())
		.unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn split(path: &str) -> Vec<&str> {
		path.split('/').filter(|s| !s.is_empty()).collect()
	}

	#[rstest]
	#[case(":id", Segment::Param("id".into()))]
	#[case(":id?", Segment::OptionalParam("id".into()))]
	#[case("users", Segment::Literal("users".into()))]
	#[case(":", Segment::Literal(":".into()))]
	#[case(":?", Segment::Literal(":?".into()))]
	fn test_segment_parse(#[case] raw: &str, #[case] expected: Segment) {
		assert_eq!(Segment::parse(raw), expected);
	}

	#[rstest]
	fn test_static_pattern() {
		let pattern = RoutePattern::parse("/about/team");
		assert!(!pattern.is_dynamic());
		assert!(pattern.matches(&split("/about/team")).is_some());
		assert!(pattern.matches(&split("/about")).is_none());
	}

	#[rstest]
	fn test_required_param() {
		let pattern = RoutePattern::parse("/user/:id");

		let params = pattern.matches(&split("/user/42")).unwrap();
		assert_eq!(params.get("id").map(String::as_str), Some("42"));
		assert!(pattern.matches(&split("/user")).is_none());
		assert!(pattern.matches(&split("/user/42/extra")).is_none());
		assert!(pattern.matches(&split("/member/42")).is_none());
	}

	#[rstest]
	fn test_optional_param() {
		let pattern = RoutePattern::parse("/list/:page?");

		let params = pattern.matches(&split("/list")).unwrap();
		assert!(params.is_empty());
		let params = pattern.matches(&split("/list/3")).unwrap();
		assert_eq!(params.get("page").map(String::as_str), Some("3"));
	}

	#[rstest]
	fn test_captures_are_decoded() {
		let pattern = RoutePattern::parse("/tag/:name");

		let params = pattern.matches(&split("/tag/rust%20lang")).unwrap();
		assert_eq!(params.get("name").map(String::as_str), Some("rust lang"));
	}

	#[rstest]
	fn test_undecodable_capture_is_kept_raw() {
		let pattern = RoutePattern::parse("/tag/:name");

		let params = pattern.matches(&split("/tag/%FF")).unwrap();
		assert_eq!(params.get("name").map(String::as_str), Some("%FF"));
	}

	#[rstest]
	fn test_param_names_in_order() {
		let pattern = RoutePattern::parse("/a/:x/b/:y/:z?");
		assert_eq!(pattern.param_names().collect::<Vec<_>>(), ["x", "y", "z"]);
	}

	#[rstest]
	fn test_reverse() {
		let pattern = RoutePattern::parse("/user/:id/posts/:page?");
		let mut params = HashMap::new();
		params.insert("id".to_string(), "a b".to_string());

		assert_eq!(pattern.reverse(&params).unwrap(), "/user/a%20b/posts");

		params.insert("page".to_string(), "2".to_string());
		assert_eq!(pattern.reverse(&params).unwrap(), "/user/a%20b/posts/2");
	}

	#[rstest]
	fn test_reverse_missing_param() {
		let pattern = RoutePattern::parse("/user/:id");
		assert_eq!(pattern.reverse(&HashMap::new()), Err("id".to_string()));
	}

	#[rstest]
	fn test_display() {
		assert_eq!(RoutePattern::parse("/user/:id").to_string(), "/user/:id");
	}
}

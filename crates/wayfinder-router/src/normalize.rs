//! Path normalization.
//!
//! Every path the router compares is in canonical form: a leading slash, no
//! trailing slash (except the root `/`), no repeated slashes, and no query or
//! hash. [`PathNormalizer`] additionally strips or applies the configured URL
//! prefix so route tables never see it.

/// Which way a path crosses the prefix boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Browser path to router path: the prefix is stripped.
	ToInternal,
	/// Router path to browser path: the prefix is applied.
	ToExternal,
}

/// Reduces `raw` to canonical path form.
///
/// Absolute URLs lose their scheme and authority. Query strings and hashes are
/// dropped, and so is whitespace around each segment. Input that contains no
/// path at all becomes `/`.
///
/// ```
/// use wayfinder_router::normalize::clean;
///
/// assert_eq!(clean("about/team/"), "/about/team");
/// assert_eq!(clean("//about///team?tab=1#top"), "/about/team");
/// assert_eq!(clean("https://example.com/about"), "/about");
/// assert_eq!(clean(""), "/");
/// ```
pub fn clean(raw: &str) -> String {
	let mut rest = raw;
	if let Some(scheme_end) = rest.find("://") {
		let after_scheme = &rest[scheme_end + 3..];
		rest = after_scheme
			.find(['/', '?', '#'])
			.map_or("", |start| &after_scheme[start..]);
	}
	let end = rest.find(['?', '#']).unwrap_or(rest.len());

	let segments: Vec<&str> = rest[..end]
		.split('/')
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.collect();
	if segments.is_empty() {
		"/".to_string()
	} else {
		format!("/{}", segments.join("/"))
	}
}

/// Joins a parent route path and a child fragment into a canonical route path.
///
/// Unlike [`clean`], `?` and `#` are ordinary characters here: route
/// fragments carry optional segments such as `:id?`. Only slashes collapse
/// and whitespace around each segment is dropped.
///
/// ```
/// use wayfinder_router::normalize::join;
///
/// assert_eq!(join("/", "teams/:id?"), "/teams/:id?");
/// assert_eq!(join("/x", "/:a?/edit/"), "/x/:a?/edit");
/// assert_eq!(join("/", ""), "/");
/// ```
pub fn join(parent: &str, fragment: &str) -> String {
	let segments: Vec<&str> = parent
		.split('/')
		.chain(fragment.split('/'))
		.map(str::trim)
		.filter(|s| !s.is_empty())
		.collect();
	if segments.is_empty() {
		"/".to_string()
	} else {
		format!("/{}", segments.join("/"))
	}
}

/// Converts paths between browser form and router form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNormalizer {
	prefix: Option<String>,
}

impl PathNormalizer {
	/// Creates a normalizer for the given URL prefix.
	///
	/// The prefix is cleaned first; an empty or `/` prefix means no prefix.
	pub fn new(prefix: Option<&str>) -> Self {
		let prefix = prefix.map(clean).filter(|p| p != "/");
		Self { prefix }
	}

	/// Returns the cleaned prefix, if any.
	pub fn prefix(&self) -> Option<&str> {
		self.prefix.as_deref()
	}

	/// Normalizes `raw` and strips or applies the prefix.
	///
	/// Stripping only happens on a segment boundary, so with prefix `/app`
	/// the path `/apple` is left untouched. Applying never checks whether the
	/// prefix is already present.
	pub fn normalize(&self, raw: &str, direction: Direction) -> String {
		let cleaned = clean(raw);
		let Some(prefix) = self.prefix.as_deref() else {
			return cleaned;
		};

		match direction {
			Direction::ToInternal => match cleaned.strip_prefix(prefix) {
				Some("") => "/".to_string(),
				Some(rest) if rest.starts_with('/') => rest.to_string(),
				_ => cleaned,
			},
			Direction::ToExternal => {
				if cleaned == "/" {
					prefix.to_string()
				} else {
					format!("{prefix}{cleaned}")
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("   ", "/")]
	#[case("about", "/about")]
	#[case("/about/", "/about")]
	#[case("//about//team//", "/about/team")]
	#[case("/search?q=rust", "/search")]
	#[case("/docs#install", "/docs")]
	#[case("?only=query", "/")]
	#[case("http://localhost:8080", "/")]
	#[case("http://localhost:8080/app/x?y=1", "/app/x")]
	fn test_clean(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(clean(raw), expected);
	}

	#[rstest]
	#[case("/", "", "/")]
	#[case("/", "teams/:id?", "/teams/:id?")]
	#[case("/x", "/:a?/edit/", "/x/:a?/edit")]
	#[case("/about", " team ", "/about/team")]
	#[case("/docs", "faq#top", "/docs/faq#top")]
	fn test_join_keeps_route_syntax(#[case] parent: &str, #[case] fragment: &str, #[case] expected: &str) {
		assert_eq!(join(parent, fragment), expected);
	}

	#[rstest]
	#[case("/app", "/")]
	#[case("/app/", "/")]
	#[case("/app/about", "/about")]
	#[case("/apple", "/apple")]
	#[case("/other/app", "/other/app")]
	fn test_strip_prefix(#[case] raw: &str, #[case] expected: &str) {
		let normalizer = PathNormalizer::new(Some("/app"));
		assert_eq!(normalizer.normalize(raw, Direction::ToInternal), expected);
	}

	#[rstest]
	#[case("/", "/app")]
	#[case("about", "/app/about")]
	#[case("/about/team/", "/app/about/team")]
	fn test_apply_prefix(#[case] raw: &str, #[case] expected: &str) {
		let normalizer = PathNormalizer::new(Some("app/"));
		assert_eq!(normalizer.normalize(raw, Direction::ToExternal), expected);
	}

	#[rstest]
	#[case(None)]
	#[case(Some(""))]
	#[case(Some("/"))]
	fn test_empty_prefix_is_no_prefix(#[case] prefix: Option<&str>) {
		let normalizer = PathNormalizer::new(prefix);
		assert_eq!(normalizer.prefix(), None);
		assert_eq!(normalizer.normalize("/about/", Direction::ToExternal), "/about");
		assert_eq!(normalizer.normalize("/about/", Direction::ToInternal), "/about");
	}

	proptest! {
		#[test]
		fn prop_clean_is_idempotent(raw in "[a-z/?#:. ]{0,24}") {
			let once = clean(&raw);
			prop_assert_eq!(clean(&once), once.clone());
		}

		#[test]
		fn prop_clean_is_canonical(raw in "[a-z/]{0,24}") {
			let path = clean(&raw);
			prop_assert!(path.starts_with('/'));
			prop_assert!(!path.contains("//"));
			prop_assert!(path == "/" || !path.ends_with('/'));
		}

		#[test]
		fn prop_prefix_round_trip(path in "(/[a-z]{1,5}){0,4}") {
			let normalizer = PathNormalizer::new(Some("/app"));
			let external = normalizer.normalize(&path, Direction::ToExternal);
			prop_assert_eq!(
				normalizer.normalize(&external, Direction::ToInternal),
				clean(&path)
			);
		}
	}
}

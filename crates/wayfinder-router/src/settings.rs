//! Router configuration.

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

/// Router configuration.
///
/// Settings can be built in code or loaded from TOML:
///
/// ```
/// use wayfinder_router::RouterSettings;
///
/// let settings = RouterSettings::from_toml_str(r#"
///     prefix = "/app"
///     strict_registration = true
/// "#).unwrap();
///
/// assert_eq!(settings.prefix.as_deref(), Some("/app"));
/// assert!(settings.strict_registration);
/// assert!(!settings.preserve_query_by_default);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterSettings {
	/// Fixed URL prefix the application is mounted under (for example `/app`).
	///
	/// Stripped from browser paths before matching and re-applied to every URL
	/// the router writes.
	pub prefix: Option<String>,
	/// Reject duplicate registration keys and not-found nodes instead of
	/// letting the last declaration win.
	pub strict_registration: bool,
	/// Carry the current query string and hash over to the next URL when a
	/// navigation does not say otherwise.
	pub preserve_query_by_default: bool,
}

impl RouterSettings {
	/// Creates settings with every option at its default.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the URL prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Enables or disables strict registration.
	pub fn with_strict_registration(mut self, strict: bool) -> Self {
		self.strict_registration = strict;
		self
	}

	/// Sets whether navigations preserve the query string by default.
	pub fn with_preserve_query_by_default(mut self, preserve: bool) -> Self {
		self.preserve_query_by_default = preserve;
		self
	}

	/// Parses settings from a TOML document.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Settings`] if the document is not valid TOML or
	/// does not describe router settings.
	pub fn from_toml_str(source: &str) -> RouterResult<Self> {
		toml::from_str(source).map_err(|e| RouterError::Settings(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = RouterSettings::new();
		assert_eq!(settings.prefix, None);
		assert!(!settings.strict_registration);
		assert!(!settings.preserve_query_by_default);
	}

	#[rstest]
	fn test_builder() {
		let settings = RouterSettings::new()
			.with_prefix("/app")
			.with_strict_registration(true)
			.with_preserve_query_by_default(true);

		assert_eq!(settings.prefix.as_deref(), Some("/app"));
		assert!(settings.strict_registration);
		assert!(settings.preserve_query_by_default);
	}

	#[rstest]
	fn test_from_empty_toml_uses_defaults() {
		let settings = RouterSettings::from_toml_str("").unwrap();
		assert_eq!(settings, RouterSettings::default());
	}

	#[rstest]
	fn test_from_toml_rejects_wrong_types() {
		let err = RouterSettings::from_toml_str("strict_registration = \"yes\"").unwrap_err();
		assert!(matches!(err, RouterError::Settings(_)));
	}
}

//! Error types for the routing engine.

use wayfinder_core::ViewError;

/// Result alias for router operations.
pub type RouterResult<T> = Result<T, RouterError>;

/// Error type for router operations.
///
/// Configuration errors (`PathCollision` and the strict-mode duplicates) are
/// raised while building the route table and must stop application startup.
/// Everything else is raised per navigation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// Two route nodes resolve to the same full path.
	#[error("route path collision at '{path}': '{incoming}' conflicts with '{existing}'")]
	PathCollision {
		/// The colliding full path.
		path: String,
		/// Registration key of the node registered first.
		existing: String,
		/// Registration key of the node that collided.
		incoming: String,
	},

	/// A registration key is declared twice (strict registration only).
	#[error("registration key '{key}' declared at both '{first}' and '{second}'")]
	DuplicateRegistrationKey {
		/// The duplicated key.
		key: String,
		/// Full path of the first declaration.
		first: String,
		/// Full path of the second declaration.
		second: String,
	},

	/// Two nodes carry the not-found flag (strict registration only).
	#[error("not-found route declared by both '{first}' and '{second}'")]
	DuplicateNotFound {
		/// Registration key of the first not-found node.
		first: String,
		/// Registration key of the second not-found node.
		second: String,
	},

	/// Navigation by key referenced a key that is not registered.
	#[error("unknown registration key: {0}")]
	UnknownRegistrationKey(String),

	/// Reverse URL generation is missing a required parameter.
	#[error("missing parameter '{param}' for route '{key}'")]
	MissingParameter {
		/// Registration key of the route being reversed.
		key: String,
		/// Name of the missing dynamic segment.
		param: String,
	},

	/// The view failed to instantiate, attach, become ready or render.
	///
	/// The browser history has already been written when this is returned.
	#[error("view '{key}' failed to mount at '{path}': {source}")]
	Mount {
		/// Registration key of the route being mounted.
		key: String,
		/// Normalized path being navigated to.
		path: String,
		/// Underlying view failure.
		#[source]
		source: ViewError,
	},

	/// The history backend rejected an operation.
	#[error("history operation failed: {0}")]
	History(String),

	/// The query string could not be encoded or decoded.
	#[error("invalid query string: {0}")]
	Query(String),

	/// Router settings are invalid or incomplete.
	#[error("invalid router settings: {0}")]
	Settings(String),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_path_collision_display() {
		let err = RouterError::PathCollision {
			path: "/about".into(),
			existing: "about".into(),
			incoming: "about-us".into(),
		};
		assert_eq!(
			err.to_string(),
			"route path collision at '/about': 'about-us' conflicts with 'about'"
		);
	}

	#[rstest]
	fn test_mount_error_keeps_source() {
		let err = RouterError::Mount {
			key: "team".into(),
			path: "/about/team".into(),
			source: ViewError::UnknownView("team".into()),
		};

		assert!(err.to_string().contains("/about/team"));
		let source = std::error::Error::source(&err).map(ToString::to_string);
		assert_eq!(
			source.as_deref(),
			Some("no view registered under key 'team'")
		);
	}

	#[rstest]
	#[case(RouterError::UnknownRegistrationKey("x".into()), "unknown registration key: x")]
	#[case(
		RouterError::MissingParameter { key: "user".into(), param: "id".into() },
		"missing parameter 'id' for route 'user'"
	)]
	#[case(RouterError::History("denied".into()), "history operation failed: denied")]
	fn test_router_error_display(#[case] err: RouterError, #[case] expected: &str) {
		assert_eq!(err.to_string(), expected);
	}
}

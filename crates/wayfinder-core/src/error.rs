//! Error types shared by the collaborator contracts.

/// Result alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Error raised by a view, a view factory, or a render target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
	/// No constructor is registered under the requested key.
	#[error("no view registered under key '{0}'")]
	UnknownView(String),

	/// The view failed while preparing itself.
	#[error("view '{key}' failed to become ready: {message}")]
	NotReady {
		/// Registration key of the failing view.
		key: String,
		/// Description of the failure.
		message: String,
	},

	/// The view failed to render.
	#[error("view '{key}' failed to render: {message}")]
	Render {
		/// Registration key of the failing view.
		key: String,
		/// Description of the failure.
		message: String,
	},

	/// The render target refused the view.
	#[error("render target rejected view: {0}")]
	Attach(String),

	/// Any other view failure.
	#[error("{0}")]
	Custom(String),
}

/// Error raised by an [`Emitter`](crate::emitter::Emitter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitterError {
	/// The event already carries the maximum number of handlers.
	#[error("event '{event}' has reached subscriber limit ({limit})")]
	SubscriberLimitExceeded {
		/// Event the subscriber tried to join.
		event: String,
		/// Maximum handlers per event.
		limit: usize,
	},
}

//! View contracts consumed by the router.
//!
//! The router never builds views itself. It asks a [`ViewFactory`] for an
//! instance, hands it to a [`RenderTarget`], then awaits [`View::ready`] and
//! [`View::render`]. A mounted view may veto the next navigation by exposing a
//! [`NavigationGuard`] through [`View::guard`].

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{ViewError, ViewResult};

/// Shared handle to a mounted view.
pub type ViewRef = Arc<dyn View>;

/// A renderable unit produced by a [`ViewFactory`].
#[async_trait]
pub trait View: Send + Sync {
	/// Resolves once the view finished its internal initialization.
	///
	/// The default implementation is ready immediately.
	async fn ready(&self) -> ViewResult<()> {
		Ok(())
	}

	/// Renders the view into whatever it was attached to.
	async fn render(&self) -> ViewResult<()>;

	/// Releases everything the view holds. Called before its replacement is built.
	fn destroy(&self);

	/// Returns the pre-navigation guard, if this view has one.
	fn guard(&self) -> Option<&dyn NavigationGuard> {
		None
	}
}

/// Pre-navigation hook a mounted view can expose.
#[async_trait]
pub trait NavigationGuard: Send + Sync {
	/// Decides whether navigation to `next_path` may proceed.
	async fn before_navigate(&self, next_path: &str) -> bool;
}

/// Options passed to a factory when instantiating a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
	/// Registration key of the route being mounted.
	pub registration_key: String,
	/// Normalized path that resolved to the route.
	pub path: String,
	/// Dynamic segment values extracted from the path.
	pub params: HashMap<String, String>,
	/// The route's custom metadata.
	pub custom: Map<String, Value>,
}

/// Async facility producing views from registration keys.
#[async_trait]
pub trait ViewFactory: Send + Sync {
	/// Builds the view registered under `key`.
	///
	/// # Errors
	///
	/// Returns a [`ViewError`] if no view is registered under `key` or the
	/// view cannot be constructed.
	async fn instantiate(&self, key: &str, options: ViewOptions) -> ViewResult<ViewRef>;
}

/// Mount point a freshly instantiated view attaches to.
pub trait RenderTarget: Send + Sync {
	/// Attaches `view` to this target.
	///
	/// # Errors
	///
	/// Returns [`ViewError::Attach`] if the target cannot host the view.
	fn attach(&self, view: &ViewRef) -> ViewResult<()>;
}

type Constructor = Arc<dyn Fn(&ViewOptions) -> ViewResult<ViewRef> + Send + Sync>;

/// [`ViewFactory`] backed by a table of constructor closures.
///
/// # Example
///
/// ```ignore
/// use wayfinder_core::view::ViewRegistry;
///
/// let views = ViewRegistry::new()
///     .register("home", |_| Ok(Arc::new(HomeView::default())))
///     .register("user", |opts| Ok(Arc::new(UserView::new(&opts.params["id"]))));
/// ```
#[derive(Default, Clone)]
pub struct ViewRegistry {
	constructors: HashMap<String, Constructor>,
}

impl fmt::Debug for ViewRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewRegistry")
			.field("keys", &self.constructors.keys().collect::<Vec<_>>())
			.finish()
	}
}

impl ViewRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a constructor under `key`, replacing any previous one.
	pub fn register<F>(mut self, key: impl Into<String>, constructor: F) -> Self
	where
		F: Fn(&ViewOptions) -> ViewResult<ViewRef> + Send + Sync + 'static,
	{
		self.constructors.insert(key.into(), Arc::new(constructor));
		self
	}

	/// Checks if a constructor is registered under `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.constructors.contains_key(key)
	}

	/// Returns the number of registered constructors.
	pub fn len(&self) -> usize {
		self.constructors.len()
	}

	/// Returns whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.constructors.is_empty()
	}
}

#[async_trait]
impl ViewFactory for ViewRegistry {
	async fn instantiate(&self, key: &str, options: ViewOptions) -> ViewResult<ViewRef> {
		let constructor = self
			.constructors
			.get(key)
			.ok_or_else(|| ViewError::UnknownView(key.to_string()))?;
		constructor(&options)
	}
}

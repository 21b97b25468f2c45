//! # Wayfinder
//!
//! A client-side single-page application framework for Rust with a
//! tree-configured routing engine.
//!
//! Wayfinder keeps the browser URL and the mounted view in sync. Pages are
//! declared as a tree of routes, each route names the view it mounts, and the
//! router drives the whole lifecycle: guard, resolve, push history, tear down
//! the old view, build and render the new one, publish an event.
//!
//! ## Feature Flags
//!
//! - `core` - collaborator contracts ([`View`], [`ViewFactory`],
//!   [`RenderTarget`], [`Emitter`]) and the in-process [`EventBus`]
//! - `router` (default) - the routing engine, implies `core`
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wayfinder::prelude::*;
//!
//! let views = ViewRegistry::new()
//!     .register("home", |_| Ok(Arc::new(HomePage::default()) as ViewRef))
//!     .register("user", |opts| Ok(Arc::new(UserPage::new(&opts.params["id"])) as ViewRef));
//!
//! let router = Router::builder()
//!     .settings(RouterSettings::new().with_prefix("/app"))
//!     .routes(vec![
//!         RouteNode::new("home", ""),
//!         RouteNode::new("user", "user/:id"),
//!         RouteNode::new("missing", "404").not_found(),
//!     ])
//!     .views(Arc::new(views))
//!     .target(Arc::new(outlet))
//!     .build()?;
//!
//! router.start().await?;
//! router.navigate(NavigateOptions::by_key("user").param("id", "7")).await?;
//! ```

#![warn(missing_docs)]

#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "router")]
pub mod router;

#[cfg(feature = "core")]
pub use wayfinder_core::{
	Emitter, EmitterError, EventBus, NavigationGuard, RenderTarget, SubscriberId, View,
	ViewError, ViewFactory, ViewOptions, ViewRef, ViewRegistry, ViewResult,
};

#[cfg(feature = "router")]
pub use wayfinder_router::{
	History, Location, MemoryHistory, NAVIGATE_EVENT, NavigateOptions, NavigationOutcome,
	QUERY_EVENT, QueryPatch, RouteNode, Router, RouterError, RouterResult, RouterSettings,
	SiteMapNode,
};

/// Re-exports commonly used types for convenience.
pub mod prelude {
	// Core feature - collaborator contracts
	#[cfg(feature = "core")]
	pub use crate::{
		Emitter, EventBus, NavigationGuard, RenderTarget, View, ViewError, ViewFactory,
		ViewOptions, ViewRef, ViewRegistry, ViewResult,
	};

	// Router feature - routing engine
	#[cfg(feature = "router")]
	pub use crate::{
		MemoryHistory, NavigateOptions, NavigationOutcome, QueryPatch, RouteNode, Router,
		RouterError, RouterSettings,
	};

	// External
	#[cfg(feature = "core")]
	pub use async_trait::async_trait;
}

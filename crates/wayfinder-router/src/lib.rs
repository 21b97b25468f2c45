//! Wayfinder Router - tree-configured client-side routing
//!
//! Applications declare their pages as a tree of [`RouteNode`]s. The router
//! flattens the tree into a [`RouteTable`], keeps the browser URL and the
//! mounted view in sync, and publishes `navigate` and `query` events through
//! an [`Emitter`](wayfinder_core::Emitter).
//!
//! ## Modules
//!
//! - [`normalize`]: canonical path form and URL prefix handling
//! - [`table`]: route tree flattening, site map and reverse lookups
//! - [`pattern`] / [`matcher`]: `:name` and `:name?` dynamic segments
//! - [`router`]: the navigation state machine
//! - [`query`]: in-place query string edits
//! - [`history`]: session history backends
//!
//! ## Example
//!
//! ```ignore
//! use wayfinder_router::{NavigateOptions, RouteNode, Router};
//!
//! let router = Router::builder()
//!     .routes(vec![
//!         RouteNode::new("home", ""),
//!         RouteNode::new("user", "user/:id"),
//!         RouteNode::new("missing", "404").not_found(),
//!     ])
//!     .views(views)
//!     .target(target)
//!     .build()?;
//!
//! router.start().await?;
//! router
//!     .navigate(NavigateOptions::by_key("user").param("id", "42"))
//!     .await?;
//! assert_eq!(router.current_path(), "/user/42");
//! ```

#![warn(missing_docs)]

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod error;
pub mod history;
pub mod matcher;
pub mod navigation;
pub mod node;
pub mod normalize;
pub mod pattern;
pub mod query;
pub mod router;
pub mod settings;
pub mod table;

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserHistory, listen_for_pop_state};
pub use error::{RouterError, RouterResult};
pub use history::{History, Location, MemoryHistory, Traversal};
pub use matcher::{RouteMatch, match_or_not_found, match_path};
pub use navigation::{
	NAVIGATE_EVENT, NavigateEvent, NavigateOptions, NavigationOutcome, NavigationSession,
	QUERY_EVENT, QueryEvent,
};
pub use node::{RouteNode, SiteMapNode};
pub use normalize::{Direction, PathNormalizer};
pub use pattern::{RoutePattern, Segment};
pub use query::{QueryPatch, QueryValue};
pub use router::{Router, RouterBuilder};
pub use settings::RouterSettings;
pub use table::{RouteEntry, RouteTable, RouteTableBuilder};

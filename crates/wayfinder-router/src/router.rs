//! The navigation state machine.
//!
//! A navigation walks through four phases:
//!
//! 1. Guarding: the mounted view may veto the target.
//! 2. Resolving: the target is matched, falling back to the not-found route.
//! 3. Committing: the URL is pushed, the old view destroyed, the new view
//!    instantiated, attached, readied and rendered, then the session is
//!    replaced and [`NAVIGATE_EVENT`] emitted.
//! 4. Idle again.
//!
//! Concurrent navigations are not queued. Each one reads the session and
//! route table snapshots it started with; the last commit wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use wayfinder_core::{Emitter, EventBus, RenderTarget, ViewFactory, ViewOptions, ViewRef, ViewResult};

use crate::error::{RouterError, RouterResult};
use crate::history::{History, Traversal};
use crate::matcher::{self, RouteMatch};
use crate::navigation::{
	NAVIGATE_EVENT, NavigateEvent, NavigateOptions, NavigationOutcome, NavigationSession,
	QUERY_EVENT, QueryEvent,
};
use crate::node::{RouteNode, SiteMapNode};
use crate::normalize::{Direction, PathNormalizer};
use crate::query::{self, QueryPatch};
use crate::settings::RouterSettings;
use crate::table::{RouteTable, RouteTableBuilder};

/// Client-side router.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use wayfinder_router::{NavigateOptions, RouteNode, Router, MemoryHistory};
///
/// let router = Router::builder()
///     .routes(vec![
///         RouteNode::new("home", ""),
///         RouteNode::new("about", "about").child(RouteNode::new("team", "team")),
///     ])
///     .history(Arc::new(MemoryHistory::new("/")))
///     .views(Arc::new(views))
///     .target(Arc::new(target))
///     .build()?;
///
/// router.start().await?;
/// router.navigate(NavigateOptions::to("/about/team")).await?;
/// ```
pub struct Router {
	settings: RouterSettings,
	normalizer: PathNormalizer,
	table: RwLock<Arc<RouteTable>>,
	session: RwLock<Arc<NavigationSession>>,
	history: Arc<dyn History>,
	views: Arc<dyn ViewFactory>,
	target: Arc<dyn RenderTarget>,
	emitter: Arc<dyn Emitter>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("settings", &self.settings)
			.field("routes", &self.table.read().len())
			.field("session", &self.session.read())
			.finish()
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::default()
	}

	/// Runs a navigation.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRegistrationKey`] or
	/// [`RouterError::MissingParameter`] for a bad by-key request,
	/// [`RouterError::History`] if the history backend fails, and
	/// [`RouterError::Mount`] if the new view fails to mount. A mount failure
	/// happens after the URL was pushed and the old view destroyed; neither is
	/// undone.
	pub async fn navigate(&self, options: NavigateOptions) -> RouterResult<NavigationOutcome> {
		let table = self.table();
		let session = self.session();
		let target = self.resolve_target(&table, &options)?;
		let preserve_query = options
			.preserve_query
			.unwrap_or(self.settings.preserve_query_by_default);

		if options.new_tab {
			let url = self.external_url(&target, preserve_query);
			self.history.open_new_tab(&url)?;
			tracing::debug!(url = %url, "opened in new tab");
			return Ok(NavigationOutcome::OpenedInNewTab { url });
		}

		if !options.force && target == session.current_path() {
			tracing::debug!(path = %target, "already at target");
			return Ok(NavigationOutcome::Unchanged);
		}

		if let Some(guard) = session.current_route().and_then(|view| view.guard()) {
			if !guard.before_navigate(&target).await {
				tracing::debug!(path = %target, "navigation rejected by guard");
				return Ok(NavigationOutcome::GuardRejected);
			}
		}

		let Some(route_match) = matcher::match_or_not_found(&target, &table) else {
			tracing::warn!(path = %target, "no route matches and no not-found route is registered");
			return Ok(NavigationOutcome::Unresolved { path: target });
		};

		let url = self.external_url(&target, preserve_query);
		if url != self.history.location().to_url() {
			self.history.push(&url)?;
		}

		if let Some(previous) = session.current_route() {
			previous.destroy();
		}

		let key = route_match.registration_key().to_string();
		let view = match self.mount(&route_match, &target).await {
			Ok(view) => view,
			Err(source) => {
				tracing::error!(key = %key, path = %target, error = %source, "view failed to mount");
				return Err(RouterError::Mount {
					key,
					path: target,
					source,
				});
			}
		};

		let event = NavigateEvent::new(&target, &route_match.node, &route_match.params);
		*self.session.write() = Arc::new(NavigationSession::mounted(
			target.clone(),
			view,
			route_match.node,
			route_match.params,
		));
		self.emitter.emit(
			NAVIGATE_EVENT,
			&serde_json::to_value(&event).unwrap_or(Value::Null),
		);
		tracing::debug!(key = %key, path = %target, "navigation committed");

		Ok(NavigationOutcome::Committed {
			path: target,
			registration_key: key,
		})
	}

	/// Navigates to a literal path.
	///
	/// # Errors
	///
	/// See [`Router::navigate`].
	pub async fn navigate_to(&self, path: &str) -> RouterResult<NavigationOutcome> {
		self.navigate(NavigateOptions::to(path)).await
	}

	/// Goes one entry back in history.
	///
	/// With a backend that traverses synchronously the router resynchronizes
	/// immediately; otherwise the pop-state listener does it later and this
	/// returns [`NavigationOutcome::Deferred`].
	///
	/// # Errors
	///
	/// See [`Router::navigate`].
	pub async fn back(&self) -> RouterResult<NavigationOutcome> {
		match self.history.back()? {
			Traversal::Completed => self.on_pop_state().await,
			Traversal::Pending => Ok(NavigationOutcome::Deferred),
			Traversal::NoEntry => Ok(NavigationOutcome::Unchanged),
		}
	}

	/// Resynchronizes with the history location after it changed underneath
	/// the router (back/forward buttons).
	///
	/// The current query and hash are kept, so no history entry is written.
	///
	/// # Errors
	///
	/// See [`Router::navigate`].
	pub async fn on_pop_state(&self) -> RouterResult<NavigationOutcome> {
		self.navigate(NavigateOptions::new().force().preserve_query(true))
			.await
	}

	/// Mounts the route for the initial history location.
	///
	/// # Errors
	///
	/// See [`Router::navigate`].
	pub async fn start(&self) -> RouterResult<NavigationOutcome> {
		self.on_pop_state().await
	}

	/// Re-mounts the current path.
	///
	/// # Errors
	///
	/// See [`Router::navigate`].
	pub async fn refresh(&self) -> RouterResult<NavigationOutcome> {
		let path = self.current_path();
		self.navigate(NavigateOptions::to(path).force().preserve_query(true))
			.await
	}

	/// Replaces the route table with one built from `roots`.
	///
	/// The mounted view is left alone; call [`Router::refresh`] to re-resolve
	/// the current path against the new table.
	///
	/// # Errors
	///
	/// Returns the build error and keeps the previous table if `roots` is
	/// invalid.
	pub fn register_routes(&self, roots: &[RouteNode]) -> RouterResult<()> {
		let table = RouteTableBuilder::new()
			.strict(self.settings.strict_registration)
			.build(roots)?;
		tracing::debug!(routes = table.len(), "route table replaced");
		*self.table.write() = Arc::new(table);
		Ok(())
	}

	/// Edits the query string in place.
	///
	/// The current history entry is replaced; nothing is matched or mounted.
	/// Emits [`QUERY_EVENT`] and returns the keys that changed.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Query`] for an undecodable query and
	/// [`RouterError::History`] if the entry cannot be replaced.
	pub fn set_query_params(&self, patch: &QueryPatch) -> RouterResult<Vec<String>> {
		let mut location = self.history.location();
		let (query, keys) = query::apply_patch(&location.query, patch)?;
		location.query = query;
		self.history.replace(&location.to_url())?;

		let event = QueryEvent {
			keys: keys.clone(),
			query: location.query,
		};
		self.emitter.emit(
			QUERY_EVENT,
			&serde_json::to_value(&event).unwrap_or(Value::Null),
		);
		tracing::debug!(keys = ?keys, "query parameters updated");

		Ok(keys)
	}

	/// Returns the current query parameters in order.
	///
	/// # Errors
	///
	/// Returns [`RouterError::Query`] if the query cannot be decoded.
	pub fn query_params(&self) -> RouterResult<Vec<(String, String)>> {
		query::parse_query(&self.history.location().query)
	}

	/// Builds the external URL (prefix applied) of the route under `key`.
	///
	/// # Errors
	///
	/// See [`RouteTable::url_for`].
	pub fn url_for(&self, key: &str, params: &HashMap<String, String>) -> RouterResult<String> {
		let path = self.table().url_for(key, params)?;
		Ok(self.normalizer.normalize(&path, Direction::ToExternal))
	}

	/// Returns the session snapshot.
	pub fn session(&self) -> Arc<NavigationSession> {
		self.session.read().clone()
	}

	/// Returns the normalized path of the last navigation.
	pub fn current_path(&self) -> String {
		self.session.read().current_path().to_string()
	}

	/// Returns the mounted view.
	pub fn current_route(&self) -> Option<ViewRef> {
		self.session.read().current_route().cloned()
	}

	/// Returns the route node behind the mounted view.
	pub fn current_route_config(&self) -> Option<Arc<RouteNode>> {
		self.session.read().current_route_config().cloned()
	}

	/// Returns the params captured for the mounted view.
	pub fn params(&self) -> HashMap<String, String> {
		self.session.read().params().clone()
	}

	/// Returns the route table snapshot.
	pub fn table(&self) -> Arc<RouteTable> {
		self.table.read().clone()
	}

	/// Returns the site map.
	pub fn site_map(&self) -> Vec<SiteMapNode> {
		self.table.read().site_map().to_vec()
	}

	/// Returns the settings.
	pub fn settings(&self) -> &RouterSettings {
		&self.settings
	}

	/// Returns the emitter, for subscribing to router events.
	pub fn emitter(&self) -> &Arc<dyn Emitter> {
		&self.emitter
	}

	/// Returns the history backend.
	pub fn history(&self) -> &Arc<dyn History> {
		&self.history
	}

	fn resolve_target(&self, table: &RouteTable, options: &NavigateOptions) -> RouterResult<String> {
		if let Some(key) = &options.by_registration_key {
			return table.url_for(key, &options.params);
		}
		if options.to_root {
			return Ok("/".to_string());
		}
		let raw = match &options.target_path {
			Some(path) => path.clone(),
			None => self.history.location().path,
		};
		Ok(self.normalizer.normalize(&raw, Direction::ToInternal))
	}

	fn external_url(&self, path: &str, preserve_query: bool) -> String {
		let mut url = self.normalizer.normalize(path, Direction::ToExternal);
		if preserve_query {
			url.push_str(&self.history.location().suffix());
		}
		url
	}

	async fn mount(&self, route_match: &RouteMatch, path: &str) -> ViewResult<ViewRef> {
		let key = route_match.registration_key();
		let options = ViewOptions {
			registration_key: key.to_string(),
			path: path.to_string(),
			params: route_match.params.clone(),
			custom: route_match.node.custom().clone(),
		};

		let view = self.views.instantiate(key, options).await?;
		self.target.attach(&view)?;
		view.ready().await?;
		view.render().await?;
		Ok(view)
	}
}

/// Builder for [`Router`].
#[derive(Default)]
pub struct RouterBuilder {
	settings: RouterSettings,
	routes: Vec<RouteNode>,
	history: Option<Arc<dyn History>>,
	views: Option<Arc<dyn ViewFactory>>,
	target: Option<Arc<dyn RenderTarget>>,
	emitter: Option<Arc<dyn Emitter>>,
}

impl RouterBuilder {
	/// Sets the router settings.
	pub fn settings(mut self, settings: RouterSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Sets the route tree.
	pub fn routes(mut self, routes: Vec<RouteNode>) -> Self {
		self.routes = routes;
		self
	}

	/// Sets the history backend.
	///
	/// Defaults to the browser history on `wasm32` and to an in-memory
	/// history starting at `/` elsewhere.
	pub fn history(mut self, history: Arc<dyn History>) -> Self {
		self.history = Some(history);
		self
	}

	/// Sets the view factory. Required.
	pub fn views(mut self, views: Arc<dyn ViewFactory>) -> Self {
		self.views = Some(views);
		self
	}

	/// Sets the render target. Required.
	pub fn target(mut self, target: Arc<dyn RenderTarget>) -> Self {
		self.target = Some(target);
		self
	}

	/// Sets the emitter. Defaults to a fresh [`EventBus`].
	pub fn emitter(mut self, emitter: Arc<dyn Emitter>) -> Self {
		self.emitter = Some(emitter);
		self
	}

	/// Builds the route table and the router.
	///
	/// The session starts at the history location but nothing is mounted
	/// until [`Router::start`].
	///
	/// # Errors
	///
	/// Returns [`RouterError::Settings`] if the view factory or render target
	/// is missing, or the route table build error.
	pub fn build(self) -> RouterResult<Router> {
		let views = self
			.views
			.ok_or_else(|| RouterError::Settings("a view factory is required".into()))?;
		let target = self
			.target
			.ok_or_else(|| RouterError::Settings("a render target is required".into()))?;
		let history = self.history.unwrap_or_else(default_history);
		let emitter = self
			.emitter
			.unwrap_or_else(|| Arc::new(EventBus::new()) as Arc<dyn Emitter>);

		let table = RouteTableBuilder::new()
			.strict(self.settings.strict_registration)
			.build(&self.routes)?;
		let normalizer = PathNormalizer::new(self.settings.prefix.as_deref());
		let initial_path = normalizer.normalize(&history.location().path, Direction::ToInternal);

		Ok(Router {
			settings: self.settings,
			normalizer,
			table: RwLock::new(Arc::new(table)),
			session: RwLock::new(Arc::new(NavigationSession::initial(initial_path))),
			history,
			views,
			target,
			emitter,
		})
	}
}

#[cfg(target_arch = "wasm32")]
fn default_history() -> Arc<dyn History> {
	Arc::new(crate::browser::BrowserHistory::new())
}

#[cfg(not(target_arch = "wasm32"))]
fn default_history() -> Arc<dyn History> {
	Arc::new(crate::history::MemoryHistory::default())
}

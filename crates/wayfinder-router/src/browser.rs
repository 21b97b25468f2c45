//! Browser history backend (`wasm32` only).

use std::sync::Arc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::error::{RouterError, RouterResult};
use crate::history::{History, Location, Traversal};
use crate::router::Router;

/// [`History`] backend over `window.history` and `window.location`.
///
/// Holds no browser handles; every call looks the window up again, which
/// keeps the type `Send + Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHistory;

impl BrowserHistory {
	/// Creates the backend.
	pub fn new() -> Self {
		Self
	}
}

fn window() -> RouterResult<web_sys::Window> {
	web_sys::window().ok_or_else(|| RouterError::History("no global window".into()))
}

fn js_error(err: JsValue) -> RouterError {
	RouterError::History(format!("{err:?}"))
}

impl History for BrowserHistory {
	fn location(&self) -> Location {
		let Ok(window) = window() else {
			return Location::default();
		};
		let location = window.location();
		let search = location.search().unwrap_or_default();
		let hash = location.hash().unwrap_or_default();
		Location {
			path: location.pathname().unwrap_or_default(),
			query: search.strip_prefix('?').unwrap_or(&search).to_string(),
			hash: hash.strip_prefix('#').unwrap_or(&hash).to_string(),
		}
	}

	fn push(&self, url: &str) -> RouterResult<()> {
		window()?
			.history()
			.map_err(js_error)?
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(js_error)
	}

	fn replace(&self, url: &str) -> RouterResult<()> {
		window()?
			.history()
			.map_err(js_error)?
			.replace_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(js_error)
	}

	fn back(&self) -> RouterResult<Traversal> {
		window()?.history().map_err(js_error)?.back().map_err(js_error)?;
		Ok(Traversal::Pending)
	}

	fn open_new_tab(&self, url: &str) -> RouterResult<()> {
		window()?
			.open_with_url_and_target(url, "_blank")
			.map_err(js_error)?;
		Ok(())
	}

	fn len(&self) -> usize {
		window()
			.ok()
			.and_then(|window| window.history().ok())
			.and_then(|history| history.length().ok())
			.map_or(0, |length| length as usize)
	}
}

/// Resynchronizes `router` with the browser on every `popstate` event.
///
/// The listener lives for the rest of the page.
///
/// # Errors
///
/// Returns [`RouterError::History`] if the listener cannot be registered.
pub fn listen_for_pop_state(router: Arc<Router>) -> RouterResult<()> {
	let closure = Closure::wrap(Box::new(move |_event: web_sys::PopStateEvent| {
		let router = Arc::clone(&router);
		wasm_bindgen_futures::spawn_local(async move {
			if let Err(err) = router.on_pop_state().await {
				tracing::error!(error = %err, "pop-state navigation failed");
			}
		});
	}) as Box<dyn FnMut(_)>);

	window()?
		.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		.map_err(js_error)?;
	closure.forget();
	Ok(())
}

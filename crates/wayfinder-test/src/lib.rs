//! Wayfinder Test - recording doubles for the collaborator traits
//!
//! Every double writes what happened to it into a shared [`Journal`], so a
//! test can assert on the exact order of guard, instantiate, attach, ready,
//! render and destroy calls across the whole navigation.
//!
//! ```
//! use wayfinder_test::{Journal, RecordingFactory, RecordingTarget};
//!
//! let journal = Journal::new();
//! let views = RecordingFactory::new(journal.clone());
//! let target = RecordingTarget::new(journal.clone());
//! views.fail_on("broken");
//! views.guard("editor", false);
//! assert!(journal.is_empty());
//! # let _ = target;
//! ```

#![warn(missing_docs)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use wayfinder_core::{
	NavigationGuard, RenderTarget, View, ViewError, ViewFactory, ViewOptions, ViewRef, ViewResult,
};

/// Ordered log shared by the recording doubles.
#[derive(Debug, Clone, Default)]
pub struct Journal {
	entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
	/// Creates an empty journal.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends an entry.
	pub fn record(&self, entry: impl Into<String>) {
		self.entries.lock().push(entry.into());
	}

	/// Returns every entry, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.entries.lock().clone()
	}

	/// Returns and clears every entry.
	pub fn take(&self) -> Vec<String> {
		std::mem::take(&mut *self.entries.lock())
	}

	/// Returns whether nothing was recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

type Guards = Arc<Mutex<HashMap<String, bool>>>;

/// View that records its lifecycle.
#[derive(Debug)]
pub struct RecordingView {
	key: String,
	options: ViewOptions,
	journal: Journal,
	guards: Guards,
}

impl RecordingView {
	/// Returns the registration key the view was built for.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Returns the options the view was built with.
	pub fn options(&self) -> &ViewOptions {
		&self.options
	}
}

#[async_trait]
impl View for RecordingView {
	async fn ready(&self) -> ViewResult<()> {
		self.journal.record(format!("ready:{}", self.key));
		Ok(())
	}

	async fn render(&self) -> ViewResult<()> {
		self.journal.record(format!("render:{}", self.key));
		Ok(())
	}

	fn destroy(&self) {
		self.journal.record(format!("destroy:{}", self.key));
	}

	fn guard(&self) -> Option<&dyn NavigationGuard> {
		if self.guards.lock().contains_key(&self.key) {
			Some(self as &dyn NavigationGuard)
		} else {
			None
		}
	}
}

#[async_trait]
impl NavigationGuard for RecordingView {
	async fn before_navigate(&self, next_path: &str) -> bool {
		self.journal
			.record(format!("guard:{}->{}", self.key, next_path));
		self.guards.lock().get(&self.key).copied().unwrap_or(true)
	}
}

/// [`ViewFactory`] producing [`RecordingView`]s for any key.
#[derive(Debug, Default)]
pub struct RecordingFactory {
	journal: Journal,
	guards: Guards,
	failing: Mutex<HashSet<String>>,
	created: Mutex<Vec<Arc<RecordingView>>>,
}

impl RecordingFactory {
	/// Creates a factory recording into `journal`.
	pub fn new(journal: Journal) -> Self {
		Self {
			journal,
			..Default::default()
		}
	}

	/// Makes views for `key` answer their guard with `allow`.
	///
	/// Applies to views already mounted as well as future ones.
	pub fn guard(&self, key: impl Into<String>, allow: bool) {
		self.guards.lock().insert(key.into(), allow);
	}

	/// Removes the guard for `key`.
	pub fn clear_guard(&self, key: &str) {
		self.guards.lock().remove(key);
	}

	/// Makes instantiation fail for `key`.
	pub fn fail_on(&self, key: impl Into<String>) {
		self.failing.lock().insert(key.into());
	}

	/// Returns every view built so far, oldest first.
	pub fn created(&self) -> Vec<Arc<RecordingView>> {
		self.created.lock().clone()
	}
}

#[async_trait]
impl ViewFactory for RecordingFactory {
	async fn instantiate(&self, key: &str, options: ViewOptions) -> ViewResult<ViewRef> {
		self.journal.record(format!("instantiate:{key}"));
		if self.failing.lock().contains(key) {
			return Err(ViewError::Custom(format!("{key} refused to build")));
		}

		let view = Arc::new(RecordingView {
			key: key.to_string(),
			options,
			journal: self.journal.clone(),
			guards: Arc::clone(&self.guards),
		});
		self.created.lock().push(Arc::clone(&view));
		Ok(view as ViewRef)
	}
}

/// [`RenderTarget`] that records every attach.
#[derive(Debug, Default)]
pub struct RecordingTarget {
	journal: Journal,
	refuse: Mutex<bool>,
}

impl RecordingTarget {
	/// Creates a target recording into `journal`.
	pub fn new(journal: Journal) -> Self {
		Self {
			journal,
			refuse: Mutex::new(false),
		}
	}

	/// Makes every following attach fail.
	pub fn refuse(&self) {
		*self.refuse.lock() = true;
	}
}

impl RenderTarget for RecordingTarget {
	fn attach(&self, _view: &ViewRef) -> ViewResult<()> {
		self.journal.record("attach");
		if *self.refuse.lock() {
			return Err(ViewError::Attach("target is detached".into()));
		}
		Ok(())
	}
}

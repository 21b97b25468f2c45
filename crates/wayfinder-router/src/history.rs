//! Session history backends.
//!
//! The router reads and writes the browser URL through the [`History`] trait.
//! [`MemoryHistory`] keeps the entry stack in memory and is what native code
//! and tests use; on `wasm32` the `browser` module provides a backend over the
//! real `window.history`.

use parking_lot::Mutex;

use crate::error::{RouterError, RouterResult};

/// A URL split into path, query and hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
	/// Path component, as found in the URL.
	pub path: String,
	/// Query string without the leading `?`.
	pub query: String,
	/// Fragment without the leading `#`.
	pub hash: String,
}

impl Location {
	/// Splits `url` into its components.
	///
	/// ```
	/// use wayfinder_router::Location;
	///
	/// let location = Location::parse("/search?q=rust#results");
	/// assert_eq!(location.path, "/search");
	/// assert_eq!(location.query, "q=rust");
	/// assert_eq!(location.hash, "results");
	/// assert_eq!(location.to_url(), "/search?q=rust#results");
	/// ```
	pub fn parse(url: &str) -> Self {
		let (rest, hash) = url.split_once('#').unwrap_or((url, ""));
		let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
		Self {
			path: path.to_string(),
			query: query.to_string(),
			hash: hash.to_string(),
		}
	}

	/// Returns the `?query#hash` suffix, empty parts omitted.
	pub fn suffix(&self) -> String {
		let mut suffix = String::new();
		if !self.query.is_empty() {
			suffix.push('?');
			suffix.push_str(&self.query);
		}
		if !self.hash.is_empty() {
			suffix.push('#');
			suffix.push_str(&self.hash);
		}
		suffix
	}

	/// Reassembles the URL.
	pub fn to_url(&self) -> String {
		format!("{}{}", self.path, self.suffix())
	}
}

/// Result of asking a history backend to traverse the session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
	/// The location already changed; the caller must resynchronize now.
	Completed,
	/// The backend will report the change later through a pop-state event.
	Pending,
	/// There is no entry in that direction.
	NoEntry,
}

/// Session history backend.
pub trait History: Send + Sync {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Appends a new entry and makes it current.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if the backend refuses the write.
	fn push(&self, url: &str) -> RouterResult<()>;

	/// Overwrites the current entry.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if the backend refuses the write.
	fn replace(&self, url: &str) -> RouterResult<()>;

	/// Moves one entry back.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if the backend refuses the traversal.
	fn back(&self) -> RouterResult<Traversal>;

	/// Opens `url` outside the current session history.
	///
	/// # Errors
	///
	/// Returns [`RouterError::History`] if the URL cannot be opened.
	fn open_new_tab(&self, url: &str) -> RouterResult<()>;

	/// Returns the number of entries in the session history.
	fn len(&self) -> usize;

	/// Returns whether the session history is empty.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[derive(Debug)]
struct MemoryState {
	entries: Vec<String>,
	index: usize,
	opened: Vec<String>,
}

/// In-memory [`History`] backend.
///
/// Behaves like a browser tab: pushing discards forward entries, and going
/// back completes synchronously.
#[derive(Debug)]
pub struct MemoryHistory {
	state: Mutex<MemoryState>,
}

impl MemoryHistory {
	/// Creates a history with a single entry.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			state: Mutex::new(MemoryState {
				entries: vec![initial_url.into()],
				index: 0,
				opened: Vec::new(),
			}),
		}
	}

	/// Moves one entry forward, if there is one.
	pub fn forward(&self) -> Traversal {
		let mut state = self.state.lock();
		if state.index + 1 < state.entries.len() {
			state.index += 1;
			Traversal::Completed
		} else {
			Traversal::NoEntry
		}
	}

	/// Returns every entry, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.state.lock().entries.clone()
	}

	/// Returns the URLs opened through [`History::open_new_tab`].
	pub fn opened_tabs(&self) -> Vec<String> {
		self.state.lock().opened.clone()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Location {
		let state = self.state.lock();
		state
			.entries
			.get(state.index)
			.map(|url| Location::parse(url))
			.unwrap_or_default()
	}

	fn push(&self, url: &str) -> RouterResult<()> {
		let mut state = self.state.lock();
		let next = state.index + 1;
		state.entries.truncate(next);
		state.entries.push(url.to_string());
		state.index = next;
		Ok(())
	}

	fn replace(&self, url: &str) -> RouterResult<()> {
		let mut state = self.state.lock();
		let index = state.index;
		let entry = state
			.entries
			.get_mut(index)
			.ok_or_else(|| RouterError::History("no current entry".into()))?;
		*entry = url.to_string();
		Ok(())
	}

	fn back(&self) -> RouterResult<Traversal> {
		let mut state = self.state.lock();
		if state.index == 0 {
			return Ok(Traversal::NoEntry);
		}
		state.index -= 1;
		Ok(Traversal::Completed)
	}

	fn open_new_tab(&self, url: &str) -> RouterResult<()> {
		self.state.lock().opened.push(url.to_string());
		Ok(())
	}

	fn len(&self) -> usize {
		self.state.lock().entries.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/", "", "")]
	#[case("/a?x=1", "/a", "x=1", "")]
	#[case("/a#top", "/a", "", "top")]
	#[case("/a?x=1#top?", "/a", "x=1", "top?")]
	fn test_location_parse(
		#[case] url: &str,
		#[case] path: &str,
		#[case] query: &str,
		#[case] hash: &str,
	) {
		let location = Location::parse(url);
		assert_eq!(location.path, path);
		assert_eq!(location.query, query);
		assert_eq!(location.hash, hash);
		assert_eq!(location.to_url(), url);
	}

	#[rstest]
	fn test_push_and_back() {
		let history = MemoryHistory::new("/");

		history.push("/about").unwrap();
		history.push("/about/team").unwrap();
		assert_eq!(history.len(), 3);
		assert_eq!(history.location().path, "/about/team");

		assert_eq!(history.back().unwrap(), Traversal::Completed);
		assert_eq!(history.location().path, "/about");
		assert_eq!(history.back().unwrap(), Traversal::Completed);
		assert_eq!(history.back().unwrap(), Traversal::NoEntry);
		assert_eq!(history.location().path, "/");
	}

	#[rstest]
	fn test_push_discards_forward_entries() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.back().unwrap();

		history.push("/c").unwrap();

		assert_eq!(history.entries(), ["/", "/a", "/c"]);
		assert_eq!(history.forward(), Traversal::NoEntry);
	}

	#[rstest]
	fn test_forward() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.back().unwrap();

		assert_eq!(history.forward(), Traversal::Completed);
		assert_eq!(history.location().path, "/a");
	}

	#[rstest]
	fn test_replace_keeps_length() {
		let history = MemoryHistory::new("/a?x=1");

		history.replace("/a?x=2").unwrap();

		assert_eq!(history.len(), 1);
		assert_eq!(history.location().query, "x=2");
	}

	#[rstest]
	fn test_open_new_tab_leaves_session_alone() {
		let history = MemoryHistory::default();

		history.open_new_tab("/report").unwrap();

		assert_eq!(history.len(), 1);
		assert_eq!(history.opened_tabs(), ["/report"]);
	}
}

//! History backends.
//!
//! A [`HistoryBackend`] owns the current [`Location`] and is the single
//! source of truth for both the main route and the sidebar parameter.
//! [`MemoryHistory`] keeps the entry stack in memory and is what tests and
//! non-browser hosts use; the browser implementation lives in
//! `parallel-router-pages::platform`.

use crate::error::Result;
use crate::query::QueryParams;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// How a location change was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry was pushed.
	Push,
	/// The current entry was replaced.
	Replace,
	/// The user moved through existing entries (back/forward).
	Pop,
}

/// The path, query and fragment of the current URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	/// Path component, always starting with `/`.
	pub pathname: String,
	/// Query component including the leading `?`, or empty.
	pub search: String,
	/// Fragment including the leading `#`, or empty.
	pub hash: String,
}

impl Default for Location {
	fn default() -> Self {
		Self {
			pathname: "/".to_string(),
			search: String::new(),
			hash: String::new(),
		}
	}
}

impl Location {
	/// Parses an absolute href such as `/users/?tab=2#top`.
	pub fn parse(href: &str) -> Self {
		let (rest, hash) = match href.find('#') {
			Some(i) => (&href[..i], href[i..].to_string()),
			None => (href, String::new()),
		};
		let (pathname, search) = match rest.find('?') {
			Some(i) => (&rest[..i], &rest[i..]),
			None => (rest, ""),
		};

		let pathname = if pathname.is_empty() {
			"/".to_string()
		} else if pathname.starts_with('/') {
			pathname.to_string()
		} else {
			format!("/{}", pathname)
		};

		Self {
			pathname,
			search: if search == "?" {
				String::new()
			} else {
				search.to_string()
			},
			hash: if hash == "#" { String::new() } else { hash },
		}
	}

	/// Resolves `to` against this location.
	///
	/// - `?a=1` keeps the pathname and replaces the query
	/// - `#top` keeps pathname and query and replaces the fragment
	/// - `/abs` is taken as-is
	/// - anything else is resolved relative to the current directory
	pub fn resolve(&self, to: &str) -> Self {
		if to.is_empty() {
			return self.clone();
		}
		if to.starts_with('?') {
			let parsed = Self::parse(&format!("{}{}", self.pathname, to));
			return parsed;
		}
		if to.starts_with('#') {
			return Self {
				hash: if to == "#" { String::new() } else { to.to_string() },
				..self.clone()
			};
		}
		if to.starts_with('/') {
			return Self::parse(to);
		}

		let base = match self.pathname.rfind('/') {
			Some(i) => &self.pathname[..=i],
			None => "/",
		};
		let mut parsed = Self::parse(&format!("{}{}", base, to));
		parsed.pathname = normalize_dots(&parsed.pathname);
		parsed
	}

	/// Returns the parsed query parameters.
	pub fn search_params(&self) -> QueryParams {
		QueryParams::parse(&self.search)
	}

	/// Returns a copy with the query replaced, keeping pathname and fragment.
	pub fn with_search_params(&self, params: &QueryParams) -> Self {
		Self {
			pathname: self.pathname.clone(),
			search: params.to_search(),
			hash: self.hash.clone(),
		}
	}

	/// Returns the full href.
	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}{}", self.pathname, self.search, self.hash)
	}
}

fn normalize_dots(path: &str) -> String {
	let mut segments: Vec<&str> = Vec::new();
	for segment in path.split('/').skip(1) {
		match segment {
			"." => {}
			".." => {
				segments.pop();
			}
			other => segments.push(other),
		}
	}
	format!("/{}", segments.join("/"))
}

/// Identifier returned by [`HistoryBackend::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked after every location change.
pub type HistoryListener = Rc<dyn Fn(&Location, NavigationType)>;

/// Shared handle to a history backend.
pub type HistoryHandle = Rc<dyn HistoryBackend>;

/// A source of truth for the current location.
///
/// Implementations use interior mutability: every consumer holds the same
/// [`HistoryHandle`] and mutations are visible on the next read.
pub trait HistoryBackend {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Moves to `location`, pushing or replacing the current entry.
	///
	/// # Errors
	///
	/// Returns [`ParallelRouterError::Navigation`](crate::ParallelRouterError::Navigation)
	/// if the platform rejects the change.
	fn navigate(&self, location: Location, navigation: NavigationType) -> Result<()>;

	/// Registers a listener for location changes.
	fn subscribe(&self, listener: HistoryListener) -> ListenerId;

	/// Removes a previously registered listener.
	fn unsubscribe(&self, id: ListenerId);
}

/// Listener bookkeeping shared by history implementations.
#[derive(Default)]
pub struct ListenerRegistry {
	listeners: RefCell<Vec<(ListenerId, HistoryListener)>>,
	next_id: Cell<u64>,
}

impl ListenerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a listener.
	pub fn add(&self, listener: HistoryListener) -> ListenerId {
		let id = ListenerId(self.next_id.get());
		self.next_id.set(self.next_id.get() + 1);
		self.listeners.borrow_mut().push((id, listener));
		id
	}

	/// Removes a listener.
	pub fn remove(&self, id: ListenerId) {
		self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
	}

	/// Notifies every listener.
	///
	/// The list is snapshotted first so a listener may subscribe or
	/// unsubscribe while being called.
	pub fn notify(&self, location: &Location, navigation: NavigationType) {
		let snapshot: Vec<HistoryListener> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, l)| Rc::clone(l))
			.collect();
		for listener in snapshot {
			listener(location, navigation);
		}
	}

	/// Returns the number of registered listeners.
	pub fn len(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Returns whether no listener is registered.
	pub fn is_empty(&self) -> bool {
		self.listeners.borrow().is_empty()
	}
}

impl fmt::Debug for ListenerRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListenerRegistry")
			.field("listeners", &self.len())
			.finish()
	}
}

#[derive(Debug)]
struct MemoryState {
	entries: Vec<Location>,
	index: usize,
}

/// In-memory history with back/forward support.
#[derive(Debug)]
pub struct MemoryHistory {
	state: RefCell<MemoryState>,
	listeners: ListenerRegistry,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial`.
	pub fn new(initial: &str) -> Self {
		Self {
			state: RefCell::new(MemoryState {
				entries: vec![Location::parse(initial)],
				index: 0,
			}),
			listeners: ListenerRegistry::new(),
		}
	}

	/// Creates a shared handle.
	pub fn handle(initial: &str) -> Rc<Self> {
		Rc::new(Self::new(initial))
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Always false: a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Returns the index of the current entry.
	pub fn index(&self) -> usize {
		self.state.borrow().index
	}

	/// Returns a copy of every entry.
	pub fn entries(&self) -> Vec<Location> {
		self.state.borrow().entries.clone()
	}

	/// Moves one entry back. Returns false at the start of the stack.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward. Returns false at the end of the stack.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Moves `delta` entries, clamped to nothing if out of range.
	pub fn go(&self, delta: isize) -> bool {
		let location = {
			let mut state = self.state.borrow_mut();
			let target = state.index as isize + delta;
			if delta == 0 || target < 0 || target as usize >= state.entries.len() {
				return false;
			}
			state.index = target as usize;
			state.entries[state.index].clone()
		};

		tracing::debug!(href = %location, "history pop");
		self.listeners.notify(&location, NavigationType::Pop);
		true
	}
}

impl HistoryBackend for MemoryHistory {
	fn location(&self) -> Location {
		let state = self.state.borrow();
		state.entries[state.index].clone()
	}

	fn navigate(&self, location: Location, navigation: NavigationType) -> Result<()> {
		{
			let mut state = self.state.borrow_mut();
			match navigation {
				NavigationType::Push => {
					let next = state.index + 1;
					state.entries.truncate(next);
					state.entries.push(location.clone());
					state.index = next;
				}
				NavigationType::Replace | NavigationType::Pop => {
					let index = state.index;
					state.entries[index] = location.clone();
				}
			}
		}

		tracing::debug!(href = %location, ?navigation, "history navigate");
		self.listeners.notify(&location, navigation);
		Ok(())
	}

	fn subscribe(&self, listener: HistoryListener) -> ListenerId {
		self.listeners.add(listener)
	}

	fn unsubscribe(&self, id: ListenerId) {
		self.listeners.remove(id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/", "", "")]
	#[case("", "/", "", "")]
	#[case("/users/?tab=2", "/users/", "?tab=2", "")]
	#[case("/a?x=1#top", "/a", "?x=1", "#top")]
	#[case("/a?", "/a", "", "")]
	#[case("a/b", "/a/b", "", "")]
	fn test_location_parse(
		#[case] href: &str,
		#[case] pathname: &str,
		#[case] search: &str,
		#[case] hash: &str,
	) {
		let location = Location::parse(href);
		assert_eq!(location.pathname, pathname);
		assert_eq!(location.search, search);
		assert_eq!(location.hash, hash);
	}

	#[rstest]
	#[case("?parallel=%2Fx", "/docs/intro?parallel=%2Fx")]
	#[case("#faq", "/docs/intro?v=1#faq")]
	#[case("/about", "/about")]
	#[case("guide", "/docs/guide")]
	#[case("../blog", "/blog")]
	#[case("", "/docs/intro?v=1")]
	fn test_location_resolve(#[case] to: &str, #[case] expected: &str) {
		let base = Location::parse("/docs/intro?v=1");
		assert_eq!(base.resolve(to).href(), expected);
	}

	#[rstest]
	fn test_with_search_params_keeps_path_and_hash() {
		let location = Location::parse("/a?x=1#h");
		let mut params = location.search_params();
		params.set("parallel", "/settings");

		let next = location.with_search_params(&params);

		assert_eq!(next.href(), "/a?x=1&parallel=%2Fsettings#h");
	}

	#[rstest]
	fn test_memory_push_truncates_forward_entries() {
		// Arrange
		let history = MemoryHistory::new("/");
		history
			.navigate(Location::parse("/a"), NavigationType::Push)
			.unwrap();
		history
			.navigate(Location::parse("/b"), NavigationType::Push)
			.unwrap();
		assert!(history.back());

		// Act
		history
			.navigate(Location::parse("/c"), NavigationType::Push)
			.unwrap();

		// Assert
		let hrefs: Vec<String> = history.entries().iter().map(Location::href).collect();
		assert_eq!(hrefs, vec!["/", "/a", "/c"]);
		assert_eq!(history.index(), 2);
	}

	#[rstest]
	fn test_memory_replace_keeps_length() {
		let history = MemoryHistory::new("/");
		history
			.navigate(Location::parse("/x"), NavigationType::Replace)
			.unwrap();

		assert_eq!(history.len(), 1);
		assert_eq!(history.location().pathname, "/x");
	}

	#[rstest]
	fn test_memory_back_forward_bounds() {
		let history = MemoryHistory::new("/");
		assert!(!history.back());
		assert!(!history.forward());

		history
			.navigate(Location::parse("/a"), NavigationType::Push)
			.unwrap();
		assert!(history.back());
		assert_eq!(history.location().pathname, "/");
		assert!(history.forward());
		assert_eq!(history.location().pathname, "/a");
	}

	#[rstest]
	fn test_listeners_notified_and_removed() {
		// Arrange
		let history = MemoryHistory::new("/");
		let seen: Rc<RefCell<Vec<(String, NavigationType)>>> = Rc::default();
		let sink = Rc::clone(&seen);
		let id = history.subscribe(Rc::new(move |location, navigation| {
			sink.borrow_mut().push((location.href(), navigation));
		}));

		// Act
		history
			.navigate(Location::parse("/a"), NavigationType::Push)
			.unwrap();
		history.back();
		history.unsubscribe(id);
		history.forward();

		// Assert
		assert_eq!(
			*seen.borrow(),
			vec![
				("/a".to_string(), NavigationType::Push),
				("/".to_string(), NavigationType::Pop),
			]
		);
	}
}

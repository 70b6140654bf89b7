//! Parallel navigation controller.
//!
//! [`ParallelNavigation`] is the host-facing API: it derives the sidebar's
//! open state from one query parameter and opens or closes the sidebar by
//! rewriting that parameter. It holds no state of its own; every read goes
//! to the history backend.

use parallel_router_core::{
	DEFAULT_PARAM_NAME, HistoryHandle, HistoryListener, ListenerId, Location, NavigationType,
	ParallelRouterConfig, Result, SearchParamState,
};
use std::fmt;

/// Opens, closes and inspects the parallel sidebar route.
#[derive(Clone)]
pub struct ParallelNavigation {
	state: SearchParamState,
	param_name: String,
}

impl fmt::Debug for ParallelNavigation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ParallelNavigation")
			.field("param_name", &self.param_name)
			.field("sidebar_path", &self.current_sidebar_path())
			.finish()
	}
}

impl ParallelNavigation {
	/// Creates a controller for `param_name`.
	pub fn new(history: HistoryHandle, param_name: impl Into<String>) -> Self {
		Self {
			state: SearchParamState::new(history),
			param_name: param_name.into(),
		}
	}

	/// Creates a controller for the default `parallel` parameter.
	pub fn with_default_param(history: HistoryHandle) -> Self {
		Self::new(history, DEFAULT_PARAM_NAME)
	}

	/// Creates a controller using the configured parameter name.
	pub fn from_config(history: HistoryHandle, config: &ParallelRouterConfig) -> Self {
		Self::new(history, config.param_name.clone())
	}

	/// Returns a controller over the same history for another parameter.
	pub fn for_param(&self, param_name: impl Into<String>) -> Self {
		Self {
			state: self.state.clone(),
			param_name: param_name.into(),
		}
	}

	/// Returns the query parameter name.
	pub fn param_name(&self) -> &str {
		&self.param_name
	}

	/// Returns the underlying history handle.
	pub fn history(&self) -> &HistoryHandle {
		self.state.history()
	}

	/// Returns the current location.
	pub fn location(&self) -> Location {
		self.state.history().location()
	}

	/// Returns the sidebar path exactly as stored, including an empty value.
	pub fn current_sidebar_path(&self) -> Option<String> {
		self.state.get(&self.param_name)
	}

	/// Returns whether the sidebar route is set to a non-empty path.
	pub fn is_sidebar_open(&self) -> bool {
		self.current_sidebar_path()
			.is_some_and(|path| !path.is_empty())
	}

	/// Shows `path` in the sidebar.
	///
	/// Calling this while already open replaces the sidebar route in place.
	/// An empty `path` is stored and reads back, but the sidebar stays closed.
	pub fn open_sidebar(&self, path: &str) -> Result<()> {
		tracing::debug!(param = %self.param_name, path, "open sidebar");
		self.state.set(&self.param_name, path)
	}

	/// Clears the sidebar route.
	///
	/// Idempotent with respect to the query parameters.
	pub fn close_sidebar(&self) -> Result<()> {
		tracing::debug!(param = %self.param_name, "close sidebar");
		self.state.delete(&self.param_name)
	}

	/// Navigates the main view to `to`, resolved against the current location.
	pub fn navigate(&self, to: &str, replace: bool) -> Result<()> {
		let location = self.location().resolve(to);
		let navigation = if replace {
			NavigationType::Replace
		} else {
			NavigationType::Push
		};
		tracing::debug!(href = %location, ?navigation, "navigate main view");
		self.state.history().navigate(location, navigation)
	}

	/// Registers a listener for location changes.
	pub fn subscribe(&self, listener: HistoryListener) -> ListenerId {
		self.state.history().subscribe(listener)
	}

	/// Removes a location listener.
	pub fn unsubscribe(&self, id: ListenerId) {
		self.state.history().unsubscribe(id);
	}
}

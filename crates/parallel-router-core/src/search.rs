//! Named query-parameter state over a history backend.

use crate::error::Result;
use crate::history::{HistoryHandle, NavigationType};
use crate::query::QueryParams;
use std::fmt;
use std::rc::Rc;

/// Reads and writes individual query parameters of the current location.
///
/// Every write pushes a new history entry that keeps the pathname, the
/// fragment and all other parameters untouched.
#[derive(Clone)]
pub struct SearchParamState {
	history: HistoryHandle,
}

impl fmt::Debug for SearchParamState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchParamState")
			.field("location", &self.history.location())
			.finish()
	}
}

impl SearchParamState {
	/// Creates an accessor over `history`.
	pub fn new(history: HistoryHandle) -> Self {
		Self { history }
	}

	/// Returns the underlying history handle.
	pub fn history(&self) -> &HistoryHandle {
		&self.history
	}

	/// Returns the current parameters.
	pub fn params(&self) -> QueryParams {
		self.history.location().search_params()
	}

	/// Returns the first value of `name`.
	pub fn get(&self, name: &str) -> Option<String> {
		self.params().get(name).map(str::to_string)
	}

	/// Sets `name` to `value`, preserving every other parameter.
	pub fn set(&self, name: &str, value: &str) -> Result<()> {
		self.update(|params| params.set(name, value))
	}

	/// Removes `name`, preserving every other parameter.
	pub fn delete(&self, name: &str) -> Result<()> {
		self.update(|params| params.delete(name))
	}

	fn update(&self, f: impl FnOnce(&mut QueryParams)) -> Result<()> {
		let location = self.history.location();
		let mut params = location.search_params();
		f(&mut params);
		self.history
			.navigate(location.with_search_params(&params), NavigationType::Push)
	}
}

impl From<HistoryHandle> for SearchParamState {
	fn from(history: HistoryHandle) -> Self {
		Self::new(history)
	}
}

impl<H> From<Rc<H>> for SearchParamState
where
	H: crate::history::HistoryBackend + 'static,
{
	fn from(history: Rc<H>) -> Self {
		Self::new(history)
	}
}

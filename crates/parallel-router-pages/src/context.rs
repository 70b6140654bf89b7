//! Provider scope for the parallel router.
//!
//! Components deep in a tree often need to close the sidebar or check
//! whether they are rendering inside it without the controller being
//! threaded through every call. [`ParallelRouterProvider::provide`] makes a
//! [`ParallelRouterContext`] available for the duration of a closure, and
//! [`use_parallel_router`] reads it back.
//!
//! Scopes nest: the innermost provider wins, and leaving a scope (even by
//! unwinding) restores the outer one.
//!
//! # Example
//!
//! ```
//! use parallel_router_core::MemoryHistory;
//! use parallel_router_pages::context::{ParallelRouterProvider, use_parallel_router};
//!
//! let history = MemoryHistory::handle("/?parallel=%2Fsettings");
//!
//! ParallelRouterProvider::new(history).provide(|| {
//! 	let router = use_parallel_router();
//! 	assert!(router.is_parallel_route());
//! 	router.close_parallel().unwrap();
//! 	assert!(!router.is_parallel_route());
//! });
//! ```

use crate::navigation::ParallelNavigation;
use parallel_router_core::{
	HistoryHandle, ParallelRouterConfig, ParallelRouterError, Result,
};
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
	/// Stack of active provider scopes, innermost last.
	static ROUTER_CONTEXTS: RefCell<Vec<ParallelRouterContext>> = const { RefCell::new(Vec::new()) };
}

/// Values exposed to components inside a provider scope.
#[derive(Debug, Clone)]
pub struct ParallelRouterContext {
	navigation: ParallelNavigation,
	config: Rc<ParallelRouterConfig>,
}

impl ParallelRouterContext {
	/// Returns the query parameter name.
	pub fn parallel_param(&self) -> &str {
		self.navigation.param_name()
	}

	/// Returns whether a sidebar route is currently set.
	pub fn is_parallel_route(&self) -> bool {
		self.navigation.is_sidebar_open()
	}

	/// Closes the sidebar.
	pub fn close_parallel(&self) -> Result<()> {
		self.navigation.close_sidebar()
	}

	/// Returns the navigation controller.
	pub fn navigation(&self) -> &ParallelNavigation {
		&self.navigation
	}

	/// Returns the provider's configuration.
	pub fn config(&self) -> &ParallelRouterConfig {
		&self.config
	}
}

/// Establishes a [`ParallelRouterContext`] for a scope.
#[derive(Debug, Clone)]
pub struct ParallelRouterProvider {
	context: ParallelRouterContext,
}

impl ParallelRouterProvider {
	/// Creates a provider with the default configuration.
	pub fn new(history: HistoryHandle) -> Self {
		Self::with_config(history, ParallelRouterConfig::default())
	}

	/// Creates a provider with `config`.
	pub fn with_config(history: HistoryHandle, config: ParallelRouterConfig) -> Self {
		let navigation = ParallelNavigation::from_config(history, &config);
		Self {
			context: ParallelRouterContext {
				navigation,
				config: Rc::new(config),
			},
		}
	}

	/// Overrides the query parameter name.
	pub fn param_name(mut self, name: impl Into<String>) -> Self {
		let name = name.into();
		self.context.navigation = self.context.navigation.for_param(name.clone());
		Rc::make_mut(&mut self.context.config).param_name = name;
		self
	}

	/// Returns the context this provider exposes.
	pub fn context(&self) -> &ParallelRouterContext {
		&self.context
	}

	/// Runs `f` with this provider's context in scope.
	pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
		ROUTER_CONTEXTS.with(|stack| stack.borrow_mut().push(self.context.clone()));
		let _guard = ScopeGuard;
		f()
	}
}

struct ScopeGuard;

impl Drop for ScopeGuard {
	fn drop(&mut self) {
		ROUTER_CONTEXTS.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}

/// Reads the innermost router context.
///
/// # Errors
///
/// Returns [`ParallelRouterError::MissingProvider`] outside a provider scope.
pub fn try_use_parallel_router() -> Result<ParallelRouterContext> {
	ROUTER_CONTEXTS
		.with(|stack| stack.borrow().last().cloned())
		.ok_or(ParallelRouterError::MissingProvider)
}

/// Reads the innermost router context.
///
/// # Panics
///
/// Panics outside a provider scope. Reaching for the router without a
/// provider is a setup bug, not a runtime condition.
pub fn use_parallel_router() -> ParallelRouterContext {
	try_use_parallel_router().unwrap_or_else(|e| panic!("{}", e))
}

/// Returns the navigation controller of the innermost provider, optionally
/// retargeted to another parameter name.
pub fn use_parallel_navigation(param_name: Option<&str>) -> Result<ParallelNavigation> {
	let context = try_use_parallel_router()?;
	Ok(match param_name {
		Some(name) => context.navigation.for_param(name),
		None => context.navigation,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use parallel_router_core::{HistoryBackend, MemoryHistory};
	use rstest::rstest;

	#[rstest]
	fn test_missing_provider_is_error() {
		let result = try_use_parallel_router();
		assert_eq!(result.unwrap_err(), ParallelRouterError::MissingProvider);
	}

	#[rstest]
	#[should_panic(expected = "use_parallel_router must be used within ParallelRouterProvider")]
	fn test_missing_provider_panics() {
		use_parallel_router();
	}

	#[rstest]
	fn test_context_reflects_history() {
		// Arrange
		let history = MemoryHistory::handle("/");
		let provider = ParallelRouterProvider::new(history.clone());

		// Act & Assert
		provider.provide(|| {
			let router = use_parallel_router();
			assert_eq!(router.parallel_param(), "parallel");
			assert!(!router.is_parallel_route());

			router.navigation().open_sidebar("/user/1").unwrap();
			assert!(router.is_parallel_route());

			router.close_parallel().unwrap();
			assert!(!router.is_parallel_route());
		});
		assert_eq!(history.location().search, "");
	}

	#[rstest]
	fn test_scope_is_restored_after_exit() {
		let provider = ParallelRouterProvider::new(MemoryHistory::handle("/"));

		provider.provide(|| assert!(try_use_parallel_router().is_ok()));

		assert!(try_use_parallel_router().is_err());
	}

	#[rstest]
	fn test_nested_providers_innermost_wins() {
		let outer = ParallelRouterProvider::new(MemoryHistory::handle("/"));
		let inner = ParallelRouterProvider::new(MemoryHistory::handle("/")).param_name("drawer");

		outer.provide(|| {
			inner.provide(|| {
				assert_eq!(use_parallel_router().parallel_param(), "drawer");
				assert_eq!(use_parallel_router().config().param_name, "drawer");
			});
			assert_eq!(use_parallel_router().parallel_param(), "parallel");
		});
	}

	#[rstest]
	fn test_scope_is_restored_after_panic() {
		let provider = ParallelRouterProvider::new(MemoryHistory::handle("/"));

		let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
			provider.provide(|| panic!("boom"));
		}));

		assert!(result.is_err());
		assert!(try_use_parallel_router().is_err());
	}

	#[rstest]
	fn test_use_parallel_navigation_retargets() {
		let history = MemoryHistory::handle("/");
		let provider = ParallelRouterProvider::new(history.clone());

		provider.provide(|| {
			let nav = use_parallel_navigation(Some("side")).unwrap();
			nav.open_sidebar("/x").unwrap();
			assert!(!use_parallel_router().is_parallel_route());
			assert_eq!(nav.param_name(), "side");
		});
		assert_eq!(history.location().search, "?side=%2Fx");
	}
}

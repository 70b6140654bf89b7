//! # parallel-router
//!
//! Parallel sidebar routing: the main view follows the URL path while a
//! second, independent route is named by one query parameter
//! (`?parallel=/user/123`) and rendered in a sidebar.
//!
//! ## Feature Flags
//!
//! - `core` - route matching, query state and the phase machine
//! - `pages` (default) - navigation controller, provider context, sidebar
//!   and links
//!
//! ## Quick Example
//!
//! ```rust
//! use parallel_router::prelude::*;
//! use std::rc::Rc;
//!
//! let history = MemoryHistory::handle("/inbox?folder=2");
//! let scheduler = Rc::new(ManualScheduler::new());
//! let routes = RouteTable::List(vec![
//! 	RouteDefinition::new("/user/:id", "profile"),
//! 	RouteDefinition::new("/settings", "settings"),
//! ]);
//!
//! let mut sidebar = ParallelSidebar::new(
//! 	ParallelNavigation::with_default_param(history.clone()),
//! 	&routes,
//! 	scheduler,
//! );
//!
//! sidebar.open("/user/123").unwrap();
//! assert_eq!(history.location().href(), "/inbox?folder=2&parallel=%2Fuser%2F123");
//!
//! let render = sidebar.render();
//! let frame = render.frame().unwrap();
//! assert_eq!(frame.content.view(), Some(&"profile"));
//! assert_eq!(frame.content.param("id"), Some("123"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: framework-independent primitives
//! - [`pages`]: components built on them

#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "core")]
pub use parallel_router_core::{
	HistoryBackend, HistoryHandle, Location, ManualScheduler, MemoryHistory, ParallelRouterConfig,
	ParallelRouterError, Result, RouteDefinition, RouteManifest, RouteMatcher, RouteNode,
	RouteTable, SidebarOptions, SidebarPhase,
};

#[cfg(feature = "pages")]
pub use parallel_router_pages::{
	Link, LinkTarget, ParallelNavigation, ParallelRouterProvider, ParallelSidebar, SidebarEvent,
	use_parallel_router,
};

/// Commonly used types.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use parallel_router_core::{
		HistoryBackend, HistoryHandle, ManualScheduler, MatchOutcome, MemoryHistory,
		ParallelRouterConfig, ParallelRouterError, RouteDefinition, RouteManifest, RouteMatcher,
		RouteNode, RouteTable, SidebarOptions, SidebarPhase,
	};

	#[cfg(feature = "pages")]
	pub use parallel_router_pages::prelude::*;
}

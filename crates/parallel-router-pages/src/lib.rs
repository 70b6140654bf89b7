//! # parallel-router-pages
//!
//! Sidebar, provider context and link components for parallel routing.
//!
//! ## Modules
//!
//! - [`navigation`]: the host-facing controller (`open_sidebar`,
//!   `close_sidebar`, `is_sidebar_open`, `current_sidebar_path`)
//! - [`context`]: provider scope and `use_parallel_router`
//! - [`sidebar`]: the animated sidebar and its render description
//! - [`link`]: links that open in the main view or the sidebar
//! - [`events`]: keyboard and mouse input consumed by the sidebar
//! - [`platform`]: browser bindings (wasm32 only)
//!
//! ## Example
//!
//! ```
//! use parallel_router_core::{ManualScheduler, MemoryHistory, RouteDefinition, RouteTable, SidebarPhase};
//! use parallel_router_pages::{ParallelNavigation, ParallelSidebar, SidebarEvent};
//! use std::rc::Rc;
//!
//! let history = MemoryHistory::handle("/inbox");
//! let scheduler = Rc::new(ManualScheduler::new());
//! let routes = RouteTable::List(vec![RouteDefinition::new("/user/:id", "user")]);
//!
//! let mut sidebar = ParallelSidebar::new(
//! 	ParallelNavigation::with_default_param(history),
//! 	&routes,
//! 	scheduler,
//! );
//!
//! sidebar.open("/user/123").unwrap();
//! assert_eq!(sidebar.phase(), SidebarPhase::Opening);
//!
//! sidebar.handle_event(&SidebarEvent::key("Escape")).unwrap();
//! assert_eq!(sidebar.phase(), SidebarPhase::Closing);
//! ```

pub mod context;
pub mod events;
pub mod link;
pub mod navigation;
pub mod platform;
pub mod prelude;
pub mod sidebar;

pub use context::{
	ParallelRouterContext, ParallelRouterProvider, try_use_parallel_router,
	use_parallel_navigation, use_parallel_router,
};
pub use events::{Key, SidebarEvent};
#[allow(deprecated)]
pub use link::ParallelLink;
pub use link::{Link, LinkAction, LinkTarget};
pub use navigation::ParallelNavigation;
pub use sidebar::{
	CloseCallback, OVERLAY_CLASS, ParallelSidebar, SIDEBAR_CLASS, SidebarContent, SidebarFrame,
	SidebarRender,
};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use platform::{BrowserHistory, KeyListener, TimeoutScheduler};

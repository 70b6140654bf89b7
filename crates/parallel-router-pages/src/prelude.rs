//! Commonly used types.
//!
//! ```
//! use parallel_router_pages::prelude::*;
//! ```

pub use crate::context::{ParallelRouterProvider, try_use_parallel_router, use_parallel_router};
pub use crate::events::{Key, SidebarEvent};
pub use crate::link::{Link, LinkAction, LinkTarget};
pub use crate::navigation::ParallelNavigation;
pub use crate::sidebar::{ParallelSidebar, SidebarContent, SidebarRender};

pub use parallel_router_core::{
	HistoryBackend, HistoryHandle, ManualScheduler, MemoryHistory, ParallelRouterConfig,
	ParallelRouterError, RouteDefinition, RouteNode, RouteTable, SidebarOptions, SidebarPhase,
};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use crate::platform::{BrowserHistory, KeyListener, TimeoutScheduler};

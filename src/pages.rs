//! Sidebar, provider context and link components.
//!
//! ## Example
//!
//! ```rust
//! use parallel_router::pages::prelude::*;
//!
//! let history = MemoryHistory::handle("/dashboard");
//! let nav = ParallelNavigation::with_default_param(history);
//!
//! nav.open_sidebar("/settings").unwrap();
//! assert_eq!(nav.current_sidebar_path().as_deref(), Some("/settings"));
//! ```

pub use parallel_router_pages::*;

//! Framework-independent routing primitives.
//!
//! Query-string state, history backends, route tables and matching, the
//! sidebar phase machine and configuration.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "core")]
//! use parallel_router::core::{PhaseMachine, RouteMatcher, RouteTable};
//! ```

#[cfg(feature = "core")]
pub use parallel_router_core::*;

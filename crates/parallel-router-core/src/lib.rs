//! # parallel-router-core
//!
//! Framework-independent building blocks for parallel sidebar routing: the
//! main view follows the URL path while a second route, named by one query
//! parameter (`?parallel=/user/123`), renders inside a sidebar.
//!
//! ## Modules
//!
//! - [`query`] / [`search`]: ordered query-string parameters and the named
//!   parameter accessor
//! - [`history`]: the location source of truth ([`MemoryHistory`] and the
//!   [`HistoryBackend`] trait)
//! - [`pattern`] / [`routes`] / [`matcher`]: route declaration,
//!   normalization and first-match-wins matching
//! - [`phase`]: the open/close presentation state machine
//! - [`config`]: serde-backed configuration
//!
//! ## Example
//!
//! ```
//! use parallel_router_core::{RouteDefinition, RouteMatcher, RouteTable};
//!
//! let matcher = RouteMatcher::new(&RouteTable::List(vec![
//! 	RouteDefinition::new("/user/:id", "user"),
//! 	RouteDefinition::new("/settings", "settings"),
//! ]));
//!
//! let m = matcher.match_path("/user/123").unwrap();
//! assert_eq!(*m.view(), "user");
//! assert_eq!(m.param("id"), Some("123"));
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod matcher;
pub mod pattern;
pub mod phase;
pub mod query;
pub mod routes;
pub mod search;

pub use config::{
	DEFAULT_PARAM_NAME, ParallelRouterConfig, SidebarOptions, SidebarPosition, SidebarWidth,
};
pub use error::{ParallelRouterError, Result};
pub use history::{
	HistoryBackend, HistoryHandle, HistoryListener, ListenerId, ListenerRegistry, Location,
	MemoryHistory, NavigationType,
};
pub use matcher::{MatchOutcome, RouteMatch, RouteMatcher, match_routes};
pub use pattern::{PathPattern, SPLAT_PARAM};
pub use phase::{
	DEFAULT_TRANSITION, MachineId, ManualScheduler, PhaseEvent, PhaseMachine, ScheduledTransition,
	Scheduler, SidebarPhase, TransitionToken,
};
pub use query::QueryParams;
pub use routes::{
	ManifestNode, ManifestRoute, NormalizedRoute, RouteDefinition, RouteManifest, RouteNode,
	RouteTable,
};
pub use search::SearchParamState;

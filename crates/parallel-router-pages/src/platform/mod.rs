//! Platform bindings.
//!
//! On `wasm32-unknown-unknown` the [`browser`] module provides a
//! [`HistoryBackend`](parallel_router_core::HistoryBackend) over the
//! browser History API, a timer-backed
//! [`Scheduler`](parallel_router_core::Scheduler) and a global keydown
//! listener. Other targets use
//! [`MemoryHistory`](parallel_router_core::MemoryHistory) and
//! [`ManualScheduler`](parallel_router_core::ManualScheduler).

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub mod browser;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use browser::{BrowserHistory, KeyListener, TimeoutScheduler};

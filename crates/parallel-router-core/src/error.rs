//! Error types for parallel routing.

use thiserror::Error;

/// Result type for parallel router operations
pub type Result<T> = std::result::Result<T, ParallelRouterError>;

/// Errors raised by the parallel router.
///
/// Unmatched sidebar paths are not errors: they surface as a not-found
/// placeholder inside the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParallelRouterError {
	/// The router context was read outside of a provider scope.
	#[error("use_parallel_router must be used within ParallelRouterProvider")]
	MissingProvider,

	/// A route pattern could not be compiled.
	#[error("Invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// Why compilation failed.
		reason: String,
	},

	/// Configuration failed to parse or validate.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// The history backend rejected a navigation.
	#[error("Navigation failed: {0}")]
	Navigation(String),
}

impl ParallelRouterError {
	pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
		Self::InvalidPattern {
			pattern: pattern.to_string(),
			reason: reason.into(),
		}
	}
}

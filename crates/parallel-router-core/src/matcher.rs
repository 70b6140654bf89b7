//! Route matching for the sidebar path.
//!
//! Routes are tried in declaration order and the first match wins. There is
//! no specificity ranking: `/a/:x` declared before `/a/fixed` shadows it.

use crate::routes::{NormalizedRoute, RouteTable};
use std::collections::HashMap;

/// A matched route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a, V> {
	/// The matched route.
	pub route: &'a NormalizedRoute<V>,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

impl<V> RouteMatch<'_, V> {
	/// Returns the matched view.
	pub fn view(&self) -> &V {
		self.route.view()
	}

	/// Returns the matched pattern string.
	pub fn pattern(&self) -> &str {
		self.route.pattern().pattern()
	}

	/// Returns a single parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}
}

/// The result of resolving an optional sidebar path.
#[derive(Debug, Clone)]
pub enum MatchOutcome<'a, V> {
	/// No sidebar path is set; nothing should mount.
	NoPath,
	/// A path is set but no route matches it.
	NotFound(String),
	/// A route matched.
	Matched(RouteMatch<'a, V>),
}

impl<V> MatchOutcome<'_, V> {
	/// Returns whether a route matched.
	pub fn is_matched(&self) -> bool {
		matches!(self, Self::Matched(_))
	}
}

/// Matches `path` against `routes`.
///
/// Any query or fragment on `path` is ignored.
pub fn match_routes<'a, V>(routes: &'a [NormalizedRoute<V>], path: &str) -> Option<RouteMatch<'a, V>> {
	let path = strip_query(path);
	routes.iter().find_map(|route| {
		route
			.pattern()
			.matches(path)
			.map(|params| RouteMatch { route, params })
	})
}

fn strip_query(path: &str) -> &str {
	match path.find(['?', '#']) {
		Some(i) => &path[..i],
		None => path,
	}
}

/// A normalized route table ready for matching.
#[derive(Debug, Clone)]
pub struct RouteMatcher<V> {
	routes: Vec<NormalizedRoute<V>>,
}

impl<V> Default for RouteMatcher<V> {
	fn default() -> Self {
		Self { routes: Vec::new() }
	}
}

impl<V: Clone> RouteMatcher<V> {
	/// Normalizes `table` and builds a matcher over it.
	pub fn new(table: &RouteTable<V>) -> Self {
		Self {
			routes: table.normalize(),
		}
	}
}

impl<V> RouteMatcher<V> {
	/// Builds a matcher over already-normalized routes.
	pub fn from_routes(routes: Vec<NormalizedRoute<V>>) -> Self {
		Self { routes }
	}

	/// Returns the routes in match order.
	pub fn routes(&self) -> &[NormalizedRoute<V>] {
		&self.routes
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Matches a path against the table.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, V>> {
		match_routes(&self.routes, path)
	}

	/// Resolves an optional sidebar path.
	///
	/// `None` never reaches the matcher and yields [`MatchOutcome::NoPath`].
	pub fn resolve(&self, path: Option<&str>) -> MatchOutcome<'_, V> {
		let Some(path) = path else {
			return MatchOutcome::NoPath;
		};

		match self.match_path(path) {
			Some(route_match) => {
				tracing::debug!(path, pattern = route_match.pattern(), "sidebar route matched");
				MatchOutcome::Matched(route_match)
			}
			None => {
				tracing::debug!(path, "no sidebar route matched");
				MatchOutcome::NotFound(path.to_string())
			}
		}
	}
}

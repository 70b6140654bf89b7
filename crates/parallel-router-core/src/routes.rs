//! Route table declaration and normalization.
//!
//! Applications declare sidebar routes either as a flat list or as a nested
//! tree. Both normalize into one ordered list of [`NormalizedRoute`]s, which
//! is all the matcher ever sees. A pre-flattened list is simply the
//! [`RouteTable::List`] variant.
//!
//! [`RouteManifest`] is the data-driven form: route tables loaded from JSON
//! with views named by string keys. An unrecognized manifest yields an empty
//! table, so every path renders the not-found placeholder instead of
//! failing the host page.

use crate::pattern::{PathPattern, join_patterns};
use serde::{Deserialize, Serialize};

/// One entry of a flat route list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition<V> {
	/// The path pattern, e.g. `/user/:id`.
	pub path: String,
	/// The view rendered when the pattern matches.
	pub view: V,
}

impl<V> RouteDefinition<V> {
	/// Creates a route definition.
	pub fn new(path: impl Into<String>, view: V) -> Self {
		Self {
			path: path.into(),
			view,
		}
	}
}

/// A node of a nested route tree.
///
/// Child paths are relative to their parent unless they start with `/`.
/// A node without a view only groups its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNode<V> {
	/// The path pattern, relative to the parent node.
	pub path: String,
	/// The view, if this node renders anything itself.
	pub view: Option<V>,
	/// Nested routes, in declaration order.
	pub children: Vec<RouteNode<V>>,
}

impl<V> RouteNode<V> {
	/// Creates a node that renders `view`.
	pub fn new(path: impl Into<String>, view: V) -> Self {
		Self {
			path: path.into(),
			view: Some(view),
			children: Vec::new(),
		}
	}

	/// Creates a node that only groups children.
	pub fn layout(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			view: None,
			children: Vec::new(),
		}
	}

	/// Appends a child node.
	pub fn child(mut self, child: RouteNode<V>) -> Self {
		self.children.push(child);
		self
	}
}

/// A route table in either declaration shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTable<V> {
	/// A flat, ordered list.
	List(Vec<RouteDefinition<V>>),
	/// A nested tree, flattened pre-order.
	Tree(Vec<RouteNode<V>>),
}

impl<V> Default for RouteTable<V> {
	fn default() -> Self {
		Self::List(Vec::new())
	}
}

impl<V> From<Vec<RouteDefinition<V>>> for RouteTable<V> {
	fn from(routes: Vec<RouteDefinition<V>>) -> Self {
		Self::List(routes)
	}
}

impl<V> From<Vec<RouteNode<V>>> for RouteTable<V> {
	fn from(nodes: Vec<RouteNode<V>>) -> Self {
		Self::Tree(nodes)
	}
}

impl<V> From<RouteNode<V>> for RouteTable<V> {
	fn from(node: RouteNode<V>) -> Self {
		Self::Tree(vec![node])
	}
}

/// A route in canonical form.
#[derive(Debug, Clone)]
pub struct NormalizedRoute<V> {
	pattern: PathPattern,
	view: V,
	child_patterns: Vec<String>,
}

impl<V> NormalizedRoute<V> {
	/// Creates a normalized route from a compiled pattern.
	pub fn new(pattern: PathPattern, view: V) -> Self {
		Self {
			pattern,
			view,
			child_patterns: Vec::new(),
		}
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the view.
	pub fn view(&self) -> &V {
		&self.view
	}

	/// Returns the full patterns of the direct children in the source tree.
	pub fn child_patterns(&self) -> &[String] {
		&self.child_patterns
	}
}

impl<V: Clone> RouteTable<V> {
	/// Flattens the table into declaration order.
	///
	/// Patterns that fail to compile are dropped with a warning.
	pub fn normalize(&self) -> Vec<NormalizedRoute<V>> {
		let mut out = Vec::new();
		match self {
			Self::List(routes) => {
				for route in routes {
					if let Some(pattern) = compile_or_warn(&route.path) {
						out.push(NormalizedRoute::new(pattern, route.view.clone()));
					}
				}
			}
			Self::Tree(nodes) => flatten(nodes, "", &mut out),
		}

		tracing::debug!(routes = out.len(), "route table normalized");
		out
	}
}

impl<V> RouteTable<V> {
	/// Returns whether the table declares no routes at all.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::List(routes) => routes.is_empty(),
			Self::Tree(nodes) => nodes.is_empty(),
		}
	}

	/// Maps every view, dropping routes whose view cannot be resolved.
	///
	/// In a tree, an unresolved node becomes a layout node so its children
	/// survive.
	pub fn map_views<W, F>(self, mut f: F) -> RouteTable<W>
	where
		F: FnMut(V) -> Option<W>,
	{
		match self {
			Self::List(routes) => RouteTable::List(
				routes
					.into_iter()
					.filter_map(|r| f(r.view).map(|view| RouteDefinition { path: r.path, view }))
					.collect(),
			),
			Self::Tree(nodes) => {
				RouteTable::Tree(nodes.into_iter().map(|n| map_node(n, &mut f)).collect())
			}
		}
	}
}

fn map_node<V, W, F>(node: RouteNode<V>, f: &mut F) -> RouteNode<W>
where
	F: FnMut(V) -> Option<W>,
{
	RouteNode {
		path: node.path,
		view: node.view.and_then(|v| f(v)),
		children: node.children.into_iter().map(|c| map_node(c, f)).collect(),
	}
}

fn flatten<V: Clone>(nodes: &[RouteNode<V>], parent: &str, out: &mut Vec<NormalizedRoute<V>>) {
	for node in nodes {
		let full = join_patterns(parent, &node.path);

		if let Some(view) = &node.view {
			if let Some(pattern) = compile_or_warn(&full) {
				let mut route = NormalizedRoute::new(pattern, view.clone());
				route.child_patterns = node
					.children
					.iter()
					.map(|c| join_patterns(&full, &c.path))
					.collect();
				out.push(route);
			}
		}

		flatten(&node.children, &full, out);
	}
}

fn compile_or_warn(pattern: &str) -> Option<PathPattern> {
	match PathPattern::new(pattern) {
		Ok(compiled) => Some(compiled),
		Err(e) => {
			tracing::warn!(pattern, error = %e, "dropping invalid route pattern");
			None
		}
	}
}

/// A flat manifest entry: `{"path": "/user/:id", "view": "user"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestRoute {
	/// Path pattern.
	pub path: String,
	/// View key.
	pub view: String,
}

/// A nested manifest node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestNode {
	/// Path pattern, relative to the parent.
	#[serde(default)]
	pub path: String,
	/// View key, absent for layout nodes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub view: Option<String>,
	/// Nested nodes.
	#[serde(default)]
	pub children: Vec<ManifestNode>,
}

/// A route table loaded from data.
///
/// Accepted JSON shapes:
/// - an array of `{path, view}` objects
/// - an array of nodes with `children`
/// - a single root node object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteManifest {
	/// Flat list.
	List(Vec<ManifestRoute>),
	/// Forest of nodes.
	Forest(Vec<ManifestNode>),
	/// Single root node.
	Root(ManifestNode),
}

impl RouteManifest {
	/// Parses a manifest, falling back to an empty table.
	pub fn from_json(json: &str) -> RouteTable<String> {
		match serde_json::from_str::<RouteManifest>(json) {
			Ok(manifest) => manifest.into_table(),
			Err(e) => {
				tracing::warn!(error = %e, "unrecognized route manifest, using empty route table");
				RouteTable::default()
			}
		}
	}

	/// Converts an already-parsed JSON value, falling back to an empty table.
	pub fn from_value(value: serde_json::Value) -> RouteTable<String> {
		match serde_json::from_value::<RouteManifest>(value) {
			Ok(manifest) => manifest.into_table(),
			Err(e) => {
				tracing::warn!(error = %e, "unrecognized route manifest, using empty route table");
				RouteTable::default()
			}
		}
	}

	/// Converts into a route table keyed by view name.
	pub fn into_table(self) -> RouteTable<String> {
		match self {
			Self::List(routes) => RouteTable::List(
				routes
					.into_iter()
					.map(|r| RouteDefinition::new(r.path, r.view))
					.collect(),
			),
			Self::Forest(nodes) => RouteTable::Tree(nodes.into_iter().map(node_from_manifest).collect()),
			Self::Root(node) => RouteTable::Tree(vec![node_from_manifest(node)]),
		}
	}
}

fn node_from_manifest(node: ManifestNode) -> RouteNode<String> {
	RouteNode {
		path: node.path,
		view: node.view,
		children: node.children.into_iter().map(node_from_manifest).collect(),
	}
}

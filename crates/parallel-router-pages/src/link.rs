//! Link components.
//!
//! [`Link`] behaves like a regular client-side link unless its target is
//! [`LinkTarget::Parallel`], in which case activating it opens the
//! destination in the sidebar instead of navigating the main view.

use crate::context::use_parallel_navigation;
use crate::navigation::ParallelNavigation;
use parallel_router_core::Result;
use std::fmt;

/// Where a link opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkTarget {
	/// Client-side navigation of the main view.
	#[default]
	SelfTarget,
	/// The parallel sidebar.
	Parallel,
	/// A new browsing context (`_blank`).
	Blank,
	/// The parent browsing context (`_parent`).
	Parent,
	/// The top-level browsing context (`_top`).
	Top,
}

impl LinkTarget {
	/// Parses an anchor `target` value.
	///
	/// Unknown values fall back to [`LinkTarget::SelfTarget`].
	pub fn parse(value: &str) -> Self {
		match value {
			"parallel" => Self::Parallel,
			"_blank" => Self::Blank,
			"_parent" => Self::Parent,
			"_top" => Self::Top,
			_ => Self::SelfTarget,
		}
	}

	/// Returns the anchor `target` value.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::SelfTarget => "_self",
			Self::Parallel => "parallel",
			Self::Blank => "_blank",
			Self::Parent => "_parent",
			Self::Top => "_top",
		}
	}
}

impl fmt::Display for LinkTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What activating a link did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
	/// The sidebar was opened at `path`.
	OpenedParallel {
		/// The sidebar path.
		path: String,
	},
	/// The main view navigated to `href`.
	Navigated {
		/// The resolved destination.
		href: String,
	},
	/// The host should follow the link natively.
	Delegated {
		/// Link destination.
		href: String,
		/// Anchor target.
		target: LinkTarget,
	},
}

/// A link that can open its destination in the main view or the sidebar.
///
/// # Example
///
/// ```
/// use parallel_router_core::MemoryHistory;
/// use parallel_router_pages::{Link, LinkAction, LinkTarget, ParallelNavigation};
///
/// let nav = ParallelNavigation::with_default_param(MemoryHistory::handle("/"));
/// let link = Link::new("/user/123", "View profile").target(LinkTarget::Parallel);
///
/// let action = link.activate(&nav).unwrap();
/// assert_eq!(action, LinkAction::OpenedParallel { path: "/user/123".to_string() });
/// assert!(nav.is_sidebar_open());
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	/// The destination path.
	to: String,
	/// The link text.
	content: String,
	/// Where the link opens.
	target: LinkTarget,
	/// Query parameter override for parallel links.
	param_name: Option<String>,
	/// Additional CSS classes.
	class: Option<String>,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Custom attributes.
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a link that navigates the main view.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: content.into(),
			target: LinkTarget::default(),
			param_name: None,
			class: None,
			replace: false,
			attrs: Vec::new(),
		}
	}

	/// Sets the target.
	pub fn target(mut self, target: LinkTarget) -> Self {
		self.target = target;
		self
	}

	/// Sets the query parameter used by parallel links.
	pub fn param_name(mut self, name: impl Into<String>) -> Self {
		self.param_name = Some(name.into());
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns the content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Returns the target.
	pub fn link_target(&self) -> LinkTarget {
		self.target
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Returns the anchor attributes, in render order.
	pub fn attributes(&self) -> Vec<(String, String)> {
		let mut attrs = vec![("href".to_string(), self.to.clone())];

		if let Some(ref class) = self.class {
			attrs.push(("class".to_string(), class.clone()));
		}

		match self.target {
			LinkTarget::SelfTarget => {
				attrs.push(("data-link".to_string(), "true".to_string()));
				if self.replace {
					attrs.push(("data-replace".to_string(), "true".to_string()));
				}
			}
			LinkTarget::Parallel => {
				attrs.push(("data-parallel".to_string(), "true".to_string()));
				if let Some(ref name) = self.param_name {
					attrs.push(("data-param".to_string(), name.clone()));
				}
			}
			LinkTarget::Blank => {
				attrs.push(("target".to_string(), "_blank".to_string()));
				attrs.push(("rel".to_string(), "noopener noreferrer".to_string()));
			}
			LinkTarget::Parent | LinkTarget::Top => {
				attrs.push(("target".to_string(), self.target.to_string()));
			}
		}

		attrs.extend(self.attrs.iter().cloned());
		attrs
	}

	/// Activates the link against `navigation`.
	pub fn activate(&self, navigation: &ParallelNavigation) -> Result<LinkAction> {
		match self.target {
			LinkTarget::Parallel => {
				let navigation = match self.param_name {
					Some(ref name) => navigation.for_param(name.clone()),
					None => navigation.clone(),
				};
				navigation.open_sidebar(&self.to)?;
				Ok(LinkAction::OpenedParallel {
					path: self.to.clone(),
				})
			}
			LinkTarget::SelfTarget => {
				navigation.navigate(&self.to, self.replace)?;
				Ok(LinkAction::Navigated {
					href: navigation.location().href(),
				})
			}
			target => Ok(LinkAction::Delegated {
				href: self.to.clone(),
				target,
			}),
		}
	}

	/// Activates the link against the innermost provider scope.
	pub fn activate_in_scope(&self) -> Result<LinkAction> {
		let navigation = use_parallel_navigation(self.param_name.as_deref())?;
		self.activate(&navigation)
	}
}

/// A link that always opens in the sidebar.
#[deprecated(note = "use `Link` with `LinkTarget::Parallel` instead")]
#[derive(Debug, Clone)]
pub struct ParallelLink {
	inner: Link,
}

#[allow(deprecated)]
impl ParallelLink {
	/// Creates a sidebar link.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			inner: Link::new(to, content).target(LinkTarget::Parallel),
		}
	}

	/// Sets the query parameter.
	pub fn param_name(mut self, name: impl Into<String>) -> Self {
		self.inner = self.inner.param_name(name);
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.inner = self.inner.attr(name, value);
		self
	}

	/// Returns the anchor attributes.
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.inner.attributes()
	}

	/// Opens the sidebar at the link's destination.
	pub fn activate(&self, navigation: &ParallelNavigation) -> Result<LinkAction> {
		self.inner.activate(navigation)
	}
}

#[allow(deprecated)]
impl From<ParallelLink> for Link {
	fn from(link: ParallelLink) -> Self {
		link.inner
	}
}

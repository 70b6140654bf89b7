//! Router and sidebar configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! param_name = "drawer"
//! transition_ms = 250
//!
//! [sidebar]
//! width = "32rem"
//! position = "left"
//! overlay = false
//! ```

use crate::error::{ParallelRouterError, Result};
use crate::phase::DEFAULT_TRANSITION;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default query parameter name.
pub const DEFAULT_PARAM_NAME: &str = "parallel";

/// Default accessible label of the close button.
pub const DEFAULT_CLOSE_LABEL: &str = "Close sidebar";

/// Which edge the sidebar is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarPosition {
	/// Left edge.
	Left,
	/// Right edge.
	#[default]
	Right,
}

impl SidebarPosition {
	/// Returns the CSS edge name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Left => "left",
			Self::Right => "right",
		}
	}
}

/// Sidebar width, either in pixels or as any CSS length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarWidth {
	/// Pixels.
	Px(u32),
	/// A CSS length such as `40vw`.
	Css(String),
}

impl Default for SidebarWidth {
	fn default() -> Self {
		Self::Px(400)
	}
}

impl fmt::Display for SidebarWidth {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Px(px) => write!(f, "{}px", px),
			Self::Css(css) => f.write_str(css),
		}
	}
}

/// Presentation options handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarOptions {
	/// Sidebar width.
	pub width: SidebarWidth,
	/// Attached edge.
	pub position: SidebarPosition,
	/// Whether a backdrop overlay is rendered (and dismisses on click).
	pub overlay: bool,
	/// Extra class for the sidebar element.
	pub class_name: String,
	/// Extra class for the overlay element.
	pub overlay_class_name: String,
	/// Accessible label of the close button.
	pub close_label: String,
}

impl Default for SidebarOptions {
	fn default() -> Self {
		Self {
			width: SidebarWidth::default(),
			position: SidebarPosition::default(),
			overlay: true,
			class_name: String::new(),
			overlay_class_name: String::new(),
			close_label: DEFAULT_CLOSE_LABEL.to_string(),
		}
	}
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelRouterConfig {
	/// Query parameter that carries the sidebar path.
	pub param_name: String,
	/// Open/close transition length in milliseconds.
	pub transition_ms: u64,
	/// Sidebar presentation.
	pub sidebar: SidebarOptions,
}

impl Default for ParallelRouterConfig {
	fn default() -> Self {
		Self {
			param_name: DEFAULT_PARAM_NAME.to_string(),
			transition_ms: DEFAULT_TRANSITION.as_millis() as u64,
			sidebar: SidebarOptions::default(),
		}
	}
}

impl ParallelRouterConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the query parameter name.
	pub fn with_param_name(mut self, name: impl Into<String>) -> Self {
		self.param_name = name.into();
		self
	}

	/// Sets the transition length.
	pub fn with_transition(mut self, transition: Duration) -> Self {
		self.transition_ms = transition.as_millis() as u64;
		self
	}

	/// Sets the sidebar options.
	pub fn with_sidebar(mut self, sidebar: SidebarOptions) -> Self {
		self.sidebar = sidebar;
		self
	}

	/// Returns the transition length.
	pub fn transition(&self) -> Duration {
		Duration::from_millis(self.transition_ms)
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self =
			toml::from_str(source).map_err(|e| ParallelRouterError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Parses and validates a JSON document.
	pub fn from_json_str(source: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(source)
			.map_err(|e| ParallelRouterError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Checks invariants that serde cannot express.
	///
	/// # Errors
	///
	/// Returns [`ParallelRouterError::InvalidConfig`] if the parameter name
	/// is empty or the sidebar width is zero or blank.
	pub fn validate(&self) -> Result<()> {
		if self.param_name.trim().is_empty() {
			return Err(ParallelRouterError::InvalidConfig(
				"param_name must not be empty".to_string(),
			));
		}
		match &self.sidebar.width {
			SidebarWidth::Px(0) => Err(ParallelRouterError::InvalidConfig(
				"sidebar width must be greater than zero".to_string(),
			)),
			SidebarWidth::Css(css) if css.trim().is_empty() => Err(
				ParallelRouterError::InvalidConfig("sidebar width must not be blank".to_string()),
			),
			_ => Ok(()),
		}
	}
}

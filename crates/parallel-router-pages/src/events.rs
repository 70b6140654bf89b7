//! User input consumed by the sidebar.

/// A keyboard key, reduced to what the sidebar cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
	/// The Escape key.
	Escape,
	/// Any other key, by its DOM `key` name.
	Other(String),
}

impl Key {
	/// Maps a DOM `KeyboardEvent.key` value.
	///
	/// Legacy browsers report `"Esc"`.
	pub fn from_key_name(name: &str) -> Self {
		match name {
			"Escape" | "Esc" => Self::Escape,
			other => Self::Other(other.to_string()),
		}
	}

	/// Returns whether this is the Escape key.
	pub fn is_escape(&self) -> bool {
		matches!(self, Self::Escape)
	}
}

/// Input events that may dismiss the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
	/// A global key press.
	Key(Key),
	/// A click on the backdrop overlay.
	BackdropClick,
	/// A click on the sidebar's close button.
	CloseButtonClick,
}

impl SidebarEvent {
	/// Builds a key event from a DOM key name.
	pub fn key(name: &str) -> Self {
		Self::Key(Key::from_key_name(name))
	}
}

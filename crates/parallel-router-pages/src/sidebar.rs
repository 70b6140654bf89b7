//! The parallel sidebar.
//!
//! [`ParallelSidebar`] ties the pieces together: it reads the sidebar path
//! through a [`ParallelNavigation`], resolves it against a [`RouteMatcher`],
//! and drives a [`PhaseMachine`] so the view stays mounted while the closing
//! transition plays.
//!
//! The sidebar is renderer-agnostic. [`ParallelSidebar::render`] returns a
//! [`SidebarRender`] describing what should be on screen; the host maps it
//! onto its own view tree.
//!
//! ## Driving the sidebar
//!
//! - Call [`ParallelSidebar::sync`] whenever the location changes.
//! - Call [`ParallelSidebar::poll`] when the scheduler fires.
//! - Route user input through [`ParallelSidebar::handle_event`].

use crate::events::{Key, SidebarEvent};
use crate::navigation::ParallelNavigation;
use parallel_router_core::{
	HistoryHandle, ListenerId, MatchOutcome, ParallelRouterConfig, PhaseEvent, PhaseMachine,
	Result, RouteMatcher, RouteTable, Scheduler, SidebarOptions, SidebarPhase, SidebarPosition,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Base CSS class of the sidebar element.
pub const SIDEBAR_CLASS: &str = "parallel-sidebar";

/// Base CSS class of the backdrop overlay.
pub const OVERLAY_CLASS: &str = "parallel-sidebar-overlay";

/// Callback run after the sidebar is dismissed.
pub type CloseCallback = Rc<dyn Fn()>;

/// A sidebar that renders the route named by the parallel query parameter.
pub struct ParallelSidebar<V> {
	navigation: ParallelNavigation,
	matcher: RouteMatcher<V>,
	options: SidebarOptions,
	machine: PhaseMachine,
	scheduler: Rc<dyn Scheduler>,
	on_close: Option<CloseCallback>,
	/// Path shown while mounted; outlives the query parameter during closing.
	last_path: Option<String>,
	/// Last unmatched path that was logged.
	warned_path: Option<String>,
}

impl<V> fmt::Debug for ParallelSidebar<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ParallelSidebar")
			.field("navigation", &self.navigation)
			.field("routes", &self.matcher.len())
			.field("options", &self.options)
			.field("phase", &self.machine.phase())
			.field("last_path", &self.last_path)
			.finish()
	}
}

impl<V: Clone> ParallelSidebar<V> {
	/// Creates a sidebar over `routes`.
	///
	/// The sidebar starts [`SidebarPhase::Closed`]; call
	/// [`sync`](Self::sync) to pick up a sidebar path already in the URL.
	pub fn new(
		navigation: ParallelNavigation,
		routes: &RouteTable<V>,
		scheduler: Rc<dyn Scheduler>,
	) -> Self {
		Self {
			navigation,
			matcher: RouteMatcher::new(routes),
			options: SidebarOptions::default(),
			machine: PhaseMachine::default(),
			scheduler,
			on_close: None,
			last_path: None,
			warned_path: None,
		}
	}

	/// Creates a sidebar using `config` for the parameter name, transition
	/// length and presentation options.
	pub fn from_config(
		history: HistoryHandle,
		config: &ParallelRouterConfig,
		routes: &RouteTable<V>,
		scheduler: Rc<dyn Scheduler>,
	) -> Self {
		let navigation = ParallelNavigation::from_config(history, config);
		let mut sidebar = Self::new(navigation, routes, scheduler)
			.options(config.sidebar.clone());
		sidebar.machine = PhaseMachine::new(config.transition());
		sidebar
	}
}

impl<V> ParallelSidebar<V> {
	/// Sets the presentation options.
	pub fn options(mut self, options: SidebarOptions) -> Self {
		self.options = options;
		self
	}

	/// Sets a callback run after every dismissal.
	pub fn on_close(mut self, callback: impl Fn() + 'static) -> Self {
		self.on_close = Some(Rc::new(callback));
		self
	}

	/// Returns the presentation options.
	pub fn sidebar_options(&self) -> &SidebarOptions {
		&self.options
	}

	/// Returns the navigation controller.
	pub fn navigation(&self) -> &ParallelNavigation {
		&self.navigation
	}

	/// Returns the route matcher.
	pub fn matcher(&self) -> &RouteMatcher<V> {
		&self.matcher
	}

	/// Returns the current phase.
	pub fn phase(&self) -> SidebarPhase {
		self.machine.phase()
	}

	/// Returns whether the sidebar view is mounted.
	pub fn is_mounted(&self) -> bool {
		self.machine.phase().is_mounted()
	}

	/// Reconciles the phase with the current sidebar path.
	///
	/// Only open/closed changes drive the phase machine. Switching from one
	/// path to another while open swaps the content in place.
	pub fn sync(&mut self) -> SidebarPhase {
		let path = self.open_path();

		if let Some(path) = &path {
			self.warn_if_unmatched(path);
			self.last_path = Some(path.clone());
		}

		if let Some(scheduled) = self.machine.sync_open(path.is_some()) {
			self.scheduler.schedule(scheduled);
		}
		self.machine.phase()
	}

	/// Delivers due transitions from the scheduler.
	pub fn poll(&mut self) -> SidebarPhase {
		for token in self.scheduler.take_due(self.machine.id()) {
			self.machine.handle(PhaseEvent::TransitionElapsed(token));
		}
		if self.machine.phase() == SidebarPhase::Closed {
			self.last_path = None;
		}
		self.machine.phase()
	}

	/// Opens the sidebar at `path`.
	pub fn open(&mut self, path: &str) -> Result<()> {
		self.navigation.open_sidebar(path)?;
		self.sync();
		Ok(())
	}

	/// Closes the sidebar.
	///
	/// The close callback runs only when a sidebar path was actually cleared.
	pub fn close(&mut self) -> Result<()> {
		let was_open = self.navigation.is_sidebar_open();
		self.navigation.close_sidebar()?;
		if let Some(callback) = self.on_close.as_ref().filter(|_| was_open) {
			callback();
		}
		self.sync();
		Ok(())
	}

	/// Applies a user input event.
	///
	/// Returns `true` when the event dismissed the sidebar.
	pub fn handle_event(&mut self, event: &SidebarEvent) -> Result<bool> {
		let phase = self.machine.phase();
		let dismiss = match event {
			SidebarEvent::Key(Key::Escape) => phase.accepts_dismiss(),
			SidebarEvent::Key(Key::Other(_)) => false,
			SidebarEvent::BackdropClick => self.options.overlay && phase.is_mounted(),
			SidebarEvent::CloseButtonClick => phase.is_mounted(),
		};

		if dismiss {
			tracing::debug!(?event, %phase, "sidebar dismissed");
			self.close()?;
		}
		Ok(dismiss)
	}

	/// Describes what should be on screen.
	pub fn render(&self) -> SidebarRender<'_, V> {
		let phase = self.machine.phase();
		if !phase.is_mounted() {
			return SidebarRender::Unmounted;
		}

		let Some(path) = self.open_path().or_else(|| self.last_path.clone())
		else {
			return SidebarRender::Unmounted;
		};

		let content = match self.matcher.resolve(Some(path.as_str())) {
			MatchOutcome::Matched(route_match) => SidebarContent::Route {
				pattern: route_match.route.pattern().pattern(),
				view: route_match.route.view(),
				params: route_match.params,
			},
			MatchOutcome::NotFound(path) => SidebarContent::NotFound { path },
			MatchOutcome::NoPath => return SidebarRender::Unmounted,
		};

		SidebarRender::Mounted(SidebarFrame {
			phase,
			position: self.options.position,
			width: self.options.width.to_string(),
			class: self.sidebar_class(phase),
			overlay_class: self.overlay_class(),
			close_label: &self.options.close_label,
			path,
			content,
		})
	}

	fn open_path(&self) -> Option<String> {
		self.navigation
			.current_sidebar_path()
			.filter(|path| !path.is_empty())
	}

	fn warn_if_unmatched(&mut self, path: &str) {
		if self.warned_path.as_deref() == Some(path) {
			return;
		}
		self.warned_path = None;
		if self.matcher.match_path(path).is_none() {
			tracing::warn!(
				param = self.navigation.param_name(),
				path,
				"no parallel route matches sidebar path"
			);
			self.warned_path = Some(path.to_string());
		}
	}

	fn sidebar_class(&self, phase: SidebarPhase) -> String {
		let mut class = format!(
			"{SIDEBAR_CLASS} {SIDEBAR_CLASS}--{} {SIDEBAR_CLASS}--{}",
			self.options.position.as_str(),
			phase.as_str()
		);
		push_class(&mut class, &self.options.class_name);
		class
	}

	fn overlay_class(&self) -> Option<String> {
		if !self.options.overlay {
			return None;
		}
		let mut class = OVERLAY_CLASS.to_string();
		push_class(&mut class, &self.options.overlay_class_name);
		Some(class)
	}
}

impl<V: 'static> ParallelSidebar<V> {
	/// Subscribes a shared sidebar to its history so that back/forward and
	/// external navigations call [`sync`](Self::sync).
	///
	/// Changes made through the sidebar itself already sync; the listener
	/// skips them while the sidebar is borrowed.
	pub fn attach(sidebar: &Rc<RefCell<Self>>) -> ListenerId {
		let weak = Rc::downgrade(sidebar);
		let navigation = sidebar.borrow().navigation.clone();
		navigation.subscribe(Rc::new(move |_location, _navigation| {
			let Some(sidebar) = weak.upgrade() else {
				return;
			};
			if let Ok(mut sidebar) = sidebar.try_borrow_mut() {
				sidebar.sync();
			}
		}))
	}
}

fn push_class(class: &mut String, extra: &str) {
	let extra = extra.trim();
	if !extra.is_empty() {
		class.push(' ');
		class.push_str(extra);
	}
}

/// Rendering instructions for a sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRender<'a, V> {
	/// Nothing is mounted.
	Unmounted,
	/// The sidebar is mounted.
	Mounted(SidebarFrame<'a, V>),
}

impl<'a, V> SidebarRender<'a, V> {
	/// Returns the frame if mounted.
	pub fn frame(&self) -> Option<&SidebarFrame<'a, V>> {
		match self {
			Self::Unmounted => None,
			Self::Mounted(frame) => Some(frame),
		}
	}

	/// Returns whether anything is mounted.
	pub fn is_mounted(&self) -> bool {
		matches!(self, Self::Mounted(_))
	}
}

/// A mounted sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarFrame<'a, V> {
	/// Current phase, for transition styling.
	pub phase: SidebarPhase,
	/// Attached edge.
	pub position: SidebarPosition,
	/// CSS width, e.g. `400px`.
	pub width: String,
	/// Class list of the sidebar element.
	pub class: String,
	/// Class list of the backdrop, or `None` when no backdrop is rendered.
	pub overlay_class: Option<String>,
	/// Accessible label of the close button.
	pub close_label: &'a str,
	/// The sidebar path being shown.
	pub path: String,
	/// Resolved content.
	pub content: SidebarContent<'a, V>,
}

/// What the sidebar body shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarContent<'a, V> {
	/// A matched route.
	Route {
		/// Pattern that matched.
		pattern: &'a str,
		/// The route's view.
		view: &'a V,
		/// Extracted path parameters.
		params: HashMap<String, String>,
	},
	/// No route matched `path`.
	NotFound {
		/// The unmatched path.
		path: String,
	},
}

impl<V> SidebarContent<'_, V> {
	/// Returns the matched view, if any.
	pub fn view(&self) -> Option<&V> {
		match self {
			Self::Route { view, .. } => Some(view),
			Self::NotFound { .. } => None,
		}
	}

	/// Returns a path parameter of the matched route.
	pub fn param(&self, name: &str) -> Option<&str> {
		match self {
			Self::Route { params, .. } => params.get(name).map(String::as_str),
			Self::NotFound { .. } => None,
		}
	}
}

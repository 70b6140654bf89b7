//! Browser bindings (wasm32 only).

use crate::events::{Key, SidebarEvent};
use crate::sidebar::ParallelSidebar;
use parallel_router_core::{
	HistoryBackend, HistoryHandle, HistoryListener, ListenerId, ListenerRegistry, Location,
	MachineId, NavigationType, ParallelRouterError, Result, ScheduledTransition, Scheduler,
	TransitionToken,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

fn window() -> Result<web_sys::Window> {
	web_sys::window()
		.ok_or_else(|| ParallelRouterError::Navigation("window is not available".to_string()))
}

fn js_error(context: &str, value: JsValue) -> ParallelRouterError {
	ParallelRouterError::Navigation(format!("{}: {:?}", context, value))
}

fn read_location(window: &web_sys::Window) -> Location {
	let location = window.location();
	let pathname = location.pathname().unwrap_or_else(|_| "/".to_string());
	let search = location.search().unwrap_or_default();
	let hash = location.hash().unwrap_or_default();
	Location::parse(&format!("{}{}{}", pathname, search, hash))
}

/// [`HistoryBackend`] over `window.history`.
///
/// Pushes and replaces go through `pushState`/`replaceState`, so the page
/// never reloads. Back and forward arrive as `popstate` events and are
/// forwarded to subscribers as [`NavigationType::Pop`].
pub struct BrowserHistory {
	window: web_sys::Window,
	listeners: Rc<ListenerRegistry>,
	popstate: EventClosure,
}

impl std::fmt::Debug for BrowserHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserHistory")
			.field("location", &self.location())
			.field("listeners", &self.listeners)
			.finish()
	}
}

impl BrowserHistory {
	/// Binds to the current window and starts listening for `popstate`.
	pub fn new() -> Result<Self> {
		let window = window()?;
		let listeners = Rc::new(ListenerRegistry::new());

		let registry = Rc::clone(&listeners);
		let source = window.clone();
		let popstate = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			let location = read_location(&source);
			tracing::debug!(href = %location, "popstate");
			registry.notify(&location, NavigationType::Pop);
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())
			.map_err(|e| js_error("failed to add popstate listener", e))?;

		Ok(Self {
			window,
			listeners,
			popstate,
		})
	}

	/// Creates a shared handle.
	pub fn handle() -> Result<HistoryHandle> {
		Ok(Rc::new(Self::new()?))
	}
}

impl Drop for BrowserHistory {
	fn drop(&mut self) {
		let _ = self.window.remove_event_listener_with_callback(
			"popstate",
			self.popstate.as_ref().unchecked_ref(),
		);
	}
}

impl HistoryBackend for BrowserHistory {
	fn location(&self) -> Location {
		read_location(&self.window)
	}

	fn navigate(&self, location: Location, navigation: NavigationType) -> Result<()> {
		let history = self
			.window
			.history()
			.map_err(|e| js_error("history is not available", e))?;
		let href = location.href();

		match navigation {
			NavigationType::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&href)),
			NavigationType::Replace | NavigationType::Pop => {
				history.replace_state_with_url(&JsValue::NULL, "", Some(&href))
			}
		}
		.map_err(|e| js_error("history update rejected", e))?;

		tracing::debug!(%href, ?navigation, "history navigate");
		self.listeners.notify(&location, navigation);
		Ok(())
	}

	fn subscribe(&self, listener: HistoryListener) -> ListenerId {
		self.listeners.add(listener)
	}

	fn unsubscribe(&self, id: ListenerId) {
		self.listeners.remove(id);
	}
}

/// [`Scheduler`] backed by `window.setTimeout`.
///
/// Fired tokens are queued until [`Scheduler::take_due`] drains them; the
/// `on_due` callback tells the owners to do so. One scheduler can serve
/// several sidebars.
pub struct TimeoutScheduler {
	window: web_sys::Window,
	due: Rc<RefCell<Vec<TransitionToken>>>,
	on_due: Rc<dyn Fn()>,
}

impl std::fmt::Debug for TimeoutScheduler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TimeoutScheduler")
			.field("due", &self.due.borrow().len())
			.finish()
	}
}

impl TimeoutScheduler {
	/// Creates a scheduler that calls `on_due` whenever a timer fires.
	pub fn new(on_due: impl Fn() + 'static) -> Result<Self> {
		Ok(Self {
			window: window()?,
			due: Rc::new(RefCell::new(Vec::new())),
			on_due: Rc::new(on_due),
		})
	}
}

impl Scheduler for TimeoutScheduler {
	fn schedule(&self, transition: ScheduledTransition) {
		let due = Rc::clone(&self.due);
		let on_due = Rc::clone(&self.on_due);
		let callback: js_sys::Function = Closure::once_into_js(move || {
			due.borrow_mut().push(transition.token);
			on_due();
		})
		.unchecked_into();

		let delay = i32::try_from(transition.delay.as_millis()).unwrap_or(i32::MAX);
		if let Err(e) = self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(&callback, delay)
		{
			tracing::warn!(error = ?e, "failed to schedule sidebar transition");
		}
	}

	fn take_due(&self, machine: MachineId) -> Vec<TransitionToken> {
		let mut due = self.due.borrow_mut();
		let (mine, others): (Vec<_>, Vec<_>) = std::mem::take(&mut *due)
			.into_iter()
			.partition(|token| token.machine() == machine);
		*due = others;
		mine
	}
}

/// A global `keydown` listener, removed on drop.
pub struct KeyListener {
	window: web_sys::Window,
	closure: EventClosure,
}

impl std::fmt::Debug for KeyListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("KeyListener").finish_non_exhaustive()
	}
}

impl KeyListener {
	/// Calls `handler` for every key press on the window.
	pub fn new(mut handler: impl FnMut(Key) + 'static) -> Result<Self> {
		let window = window()?;
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			if let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() {
				handler(Key::from_key_name(&event.key()));
			}
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
			.map_err(|e| js_error("failed to add keydown listener", e))?;

		Ok(Self { window, closure })
	}

	/// Routes key presses to `sidebar`, so Escape dismisses it.
	pub fn for_sidebar<V: 'static>(sidebar: &Rc<RefCell<ParallelSidebar<V>>>) -> Result<Self> {
		let weak = Rc::downgrade(sidebar);
		Self::new(move |key| {
			let Some(sidebar) = weak.upgrade() else {
				return;
			};
			let Ok(mut sidebar) = sidebar.try_borrow_mut() else {
				return;
			};
			if let Err(e) = sidebar.handle_event(&SidebarEvent::Key(key)) {
				tracing::warn!(error = %e, "failed to dismiss sidebar");
			}
		})
	}
}

impl Drop for KeyListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
	}
}

//! Integration tests for the parallel sidebar
//!
//! These tests verify the pieces working together:
//! 1. Links inside a provider scope open and close the sidebar
//! 2. The sidebar follows history changes it did not make itself
//! 3. Dismissal input closes the sidebar and runs the close callback
//! 4. A custom parameter name isolates two sidebars on one page
//! 5. Sidebars sharing one scheduler each finish their own transitions

use parallel_router_core::{
	DEFAULT_TRANSITION, HistoryBackend, ManualScheduler, MemoryHistory, ParallelRouterConfig,
	RouteDefinition, RouteTable, SidebarPhase,
};
use parallel_router_pages::{
	Link, LinkAction, LinkTarget, ParallelNavigation, ParallelRouterProvider, ParallelSidebar,
	SidebarContent, SidebarEvent, use_parallel_router,
};
use rstest::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
	UserProfile,
	ProductDetail,
	Settings,
}

fn routes() -> RouteTable<Page> {
	RouteTable::List(vec![
		RouteDefinition::new("/user/:id", Page::UserProfile),
		RouteDefinition::new("/product/:id", Page::ProductDetail),
		RouteDefinition::new("/settings", Page::Settings),
	])
}

struct App {
	history: Rc<MemoryHistory>,
	scheduler: Rc<ManualScheduler>,
	sidebar: Rc<RefCell<ParallelSidebar<Page>>>,
}

impl App {
	fn tick(&self) -> SidebarPhase {
		self.scheduler.advance(DEFAULT_TRANSITION);
		self.sidebar.borrow_mut().poll()
	}

	fn phase(&self) -> SidebarPhase {
		self.sidebar.borrow().phase()
	}
}

#[fixture]
fn app() -> App {
	let history = MemoryHistory::handle("/products?sort=price");
	let scheduler = Rc::new(ManualScheduler::new());
	let sidebar = Rc::new(RefCell::new(ParallelSidebar::new(
		ParallelNavigation::with_default_param(history.clone()),
		&routes(),
		scheduler.clone(),
	)));
	ParallelSidebar::attach(&sidebar);
	App {
		history,
		scheduler,
		sidebar,
	}
}

/// Success Criterion 1: a parallel link opens the sidebar without touching
/// the main view
#[rstest]
fn test_link_in_provider_opens_sidebar(app: App) {
	// Arrange
	let provider = ParallelRouterProvider::new(app.history.clone());
	let link = Link::new("/product/42", "Details").target(LinkTarget::Parallel);

	// Act
	let action = provider.provide(|| link.activate_in_scope()).unwrap();

	// Assert
	assert_eq!(
		action,
		LinkAction::OpenedParallel {
			path: "/product/42".to_string()
		}
	);
	assert_eq!(app.history.location().pathname, "/products");
	assert_eq!(app.phase(), SidebarPhase::Opening);
	assert_eq!(app.tick(), SidebarPhase::Open);

	let sidebar = app.sidebar.borrow();
	let render = sidebar.render();
	let frame = render.frame().unwrap();
	assert_eq!(frame.content.view(), Some(&Page::ProductDetail));
	assert_eq!(frame.content.param("id"), Some("42"));
}

/// Success Criterion 1: closing from inside the provider scope
#[rstest]
fn test_close_parallel_from_context(app: App) {
	// Arrange
	let provider = ParallelRouterProvider::new(app.history.clone());
	app.sidebar.borrow_mut().open("/settings").unwrap();
	app.tick();

	// Act
	provider.provide(|| {
		let router = use_parallel_router();
		assert!(router.is_parallel_route());
		router.close_parallel().unwrap();
	});

	// Assert
	assert_eq!(app.phase(), SidebarPhase::Closing);
	assert!(app.sidebar.borrow().render().is_mounted());
	assert_eq!(app.tick(), SidebarPhase::Closed);
	assert!(!app.sidebar.borrow().render().is_mounted());
	assert_eq!(app.history.location().href(), "/products?sort=price");
}

/// Success Criterion 2: back and forward drive the sidebar
#[rstest]
fn test_back_and_forward(app: App) {
	app.sidebar.borrow_mut().open("/user/1").unwrap();
	app.tick();

	app.history.back();
	assert_eq!(app.phase(), SidebarPhase::Closing);

	app.history.forward();
	assert_eq!(app.phase(), SidebarPhase::Opening);
	assert_eq!(app.tick(), SidebarPhase::Open);
}

/// Success Criterion 2: a main-view navigation that keeps the parameter
/// keeps the sidebar open
#[rstest]
fn test_main_view_navigation_keeps_sidebar(app: App) {
	// Arrange
	let nav = ParallelNavigation::with_default_param(app.history.clone());
	nav.open_sidebar("/settings").unwrap();
	app.tick();

	// Act
	nav.navigate("?sort=name&parallel=%2Fsettings", false).unwrap();

	// Assert
	assert_eq!(app.phase(), SidebarPhase::Open);
	assert_eq!(app.history.location().pathname, "/products");
	assert_eq!(nav.current_sidebar_path().as_deref(), Some("/settings"));
}

/// Success Criterion 3: backdrop and close button dismiss, running on_close
#[rstest]
#[case(SidebarEvent::BackdropClick)]
#[case(SidebarEvent::CloseButtonClick)]
#[case(SidebarEvent::key("Escape"))]
fn test_dismissal_runs_callback(#[case] event: SidebarEvent) {
	// Arrange
	let closed = Rc::new(Cell::new(false));
	let flag = Rc::clone(&closed);
	let history = MemoryHistory::handle("/");
	let mut sidebar = ParallelSidebar::new(
		ParallelNavigation::with_default_param(history.clone()),
		&routes(),
		Rc::new(ManualScheduler::new()),
	)
	.on_close(move || flag.set(true));
	sidebar.open("/user/3").unwrap();

	// Act
	let dismissed = sidebar.handle_event(&event).unwrap();

	// Assert
	assert!(dismissed);
	assert!(closed.get());
	assert_eq!(history.location().search, "");
}

/// Success Criterion 3: unmatched sidebar paths render a placeholder
#[rstest]
fn test_unknown_route_is_contained(app: App) {
	app.sidebar.borrow_mut().open("/does/not/exist").unwrap();

	let sidebar = app.sidebar.borrow();
	let render = sidebar.render();

	assert_eq!(
		render.frame().unwrap().content,
		SidebarContent::NotFound {
			path: "/does/not/exist".to_string()
		}
	);
	assert_eq!(app.history.location().pathname, "/products");
}

/// Success Criterion 4: two sidebars with different parameter names
#[rstest]
fn test_independent_parameters() {
	// Arrange
	let history = MemoryHistory::handle("/");
	let scheduler = Rc::new(ManualScheduler::new());
	let config = ParallelRouterConfig::default().with_param_name("drawer");
	let mut main = ParallelSidebar::new(
		ParallelNavigation::with_default_param(history.clone()),
		&routes(),
		scheduler.clone(),
	);
	let mut drawer =
		ParallelSidebar::from_config(history.clone(), &config, &routes(), scheduler.clone());

	// Act
	main.open("/settings").unwrap();
	drawer.open("/user/8").unwrap();
	main.close().unwrap();
	drawer.sync();
	scheduler.advance(DEFAULT_TRANSITION);

	// Assert
	assert_eq!(main.phase(), SidebarPhase::Closing);
	assert_eq!(drawer.phase(), SidebarPhase::Opening);
	assert_eq!(drawer.poll(), SidebarPhase::Open);
	assert_eq!(main.poll(), SidebarPhase::Closed);
	assert_eq!(history.location().search, "?drawer=%2Fuser%2F8");
}

fn shared_pair() -> (Rc<ManualScheduler>, ParallelSidebar<Page>, ParallelSidebar<Page>) {
	let history = MemoryHistory::handle("/");
	let scheduler = Rc::new(ManualScheduler::new());
	let config = ParallelRouterConfig::default().with_param_name("drawer");
	let main = ParallelSidebar::new(
		ParallelNavigation::with_default_param(history.clone()),
		&routes(),
		scheduler.clone(),
	);
	let drawer = ParallelSidebar::from_config(history, &config, &routes(), scheduler.clone());
	(scheduler, main, drawer)
}

/// Sidebars on one scheduler both settle, whichever polls first
#[rstest]
fn test_shared_scheduler_open_and_close() {
	// Arrange
	let (scheduler, mut main, mut drawer) = shared_pair();
	main.open("/settings").unwrap();
	drawer.open("/user/8").unwrap();
	scheduler.advance(DEFAULT_TRANSITION);

	// Act
	let main_opened = main.poll();
	let drawer_opened = drawer.poll();
	main.close().unwrap();
	drawer.close().unwrap();
	scheduler.advance(DEFAULT_TRANSITION);
	let drawer_closed = drawer.poll();
	let main_closed = main.poll();

	// Assert
	assert_eq!(main_opened, SidebarPhase::Open);
	assert_eq!(drawer_opened, SidebarPhase::Open);
	assert_eq!(drawer_closed, SidebarPhase::Closed);
	assert_eq!(main_closed, SidebarPhase::Closed);
	assert_eq!(scheduler.pending_len(), 0);
}

/// A sidebar polling first never consumes another sidebar's pending close
#[rstest]
fn test_shared_scheduler_interleaved_close() {
	// Arrange
	let (scheduler, mut main, mut drawer) = shared_pair();
	main.open("/settings").unwrap();
	scheduler.advance(DEFAULT_TRANSITION);
	main.poll();
	main.close().unwrap();

	// Act
	drawer.open("/user/8").unwrap();
	drawer.close().unwrap();
	scheduler.advance(DEFAULT_TRANSITION);
	let drawer_phase = drawer.poll();
	let main_phase = main.poll();

	// Assert
	assert_eq!(drawer_phase, SidebarPhase::Closed);
	assert_eq!(main_phase, SidebarPhase::Closed);
	assert!(!main.render().is_mounted());
}

//! Sidebar presentation phases.
//!
//! The sidebar animates in and out, so whether it is mounted cannot follow
//! the sidebar path directly: once the path is cleared the view must stay
//! mounted until the closing transition finishes. [`PhaseMachine`] models
//! this as an explicit state machine with timed transitions.
//!
//! ```text
//!            PathOpened                elapsed
//!   Closed ─────────────▶ Opening ─────────────▶ Open
//!     ▲                    │   ▲                  │
//!     │ elapsed  PathCleared│   │PathOpened       │ PathCleared
//!     │                    ▼   │                  ▼
//!     └──────────────────── Closing ◀─────────────┘
//! ```
//!
//! Every entry into `Opening` or `Closing` issues a fresh
//! [`TransitionToken`]. The owner hands the returned
//! [`ScheduledTransition`] to a [`Scheduler`] and feeds the token back as
//! [`PhaseEvent::TransitionElapsed`] when it fires. Tokens from superseded
//! transitions are ignored, which is how a reopen cancels a pending close.
//! Tokens also carry the [`MachineId`] of the machine that issued them, so
//! several machines can share one scheduler.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::time::Duration;

/// Default transition length, matching the sidebar's CSS transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Presentation phase of a sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SidebarPhase {
	/// Not mounted.
	#[default]
	Closed,
	/// Mounted and animating in.
	Opening,
	/// Mounted and fully visible.
	Open,
	/// Mounted and animating out.
	Closing,
}

impl SidebarPhase {
	/// Returns whether the sidebar view should be mounted.
	pub fn is_mounted(self) -> bool {
		self != Self::Closed
	}

	/// Returns whether dismissal input (Escape) is accepted.
	pub fn accepts_dismiss(self) -> bool {
		matches!(self, Self::Opening | Self::Open)
	}

	/// Lowercase name, suitable for a CSS modifier class.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Closed => "closed",
			Self::Opening => "opening",
			Self::Open => "open",
			Self::Closing => "closing",
		}
	}
}

impl fmt::Display for SidebarPhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

thread_local! {
	static NEXT_MACHINE_ID: Cell<u64> = const { Cell::new(0) };
}

/// Identifies one [`PhaseMachine`] on the current thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MachineId(u64);

impl MachineId {
	fn next() -> Self {
		NEXT_MACHINE_ID.with(|next| {
			let id = next.get() + 1;
			next.set(id);
			Self(id)
		})
	}
}

/// Identifies one scheduled transition of one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionToken {
	machine: MachineId,
	generation: u64,
}

impl TransitionToken {
	/// Returns the machine that issued this token.
	pub fn machine(self) -> MachineId {
		self.machine
	}
}

/// Inputs to the phase machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
	/// The sidebar path became non-empty.
	PathOpened,
	/// The sidebar path was cleared or close was invoked.
	PathCleared,
	/// A scheduled transition fired.
	TransitionElapsed(TransitionToken),
}

/// A request to deliver `token` back to the machine after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
	/// How long to wait.
	pub delay: Duration,
	/// Token to deliver as [`PhaseEvent::TransitionElapsed`].
	pub token: TransitionToken,
}

/// The sidebar phase state machine.
#[derive(Debug)]
pub struct PhaseMachine {
	id: MachineId,
	phase: SidebarPhase,
	transition: Duration,
	generation: u64,
	pending: Option<TransitionToken>,
}

impl Default for PhaseMachine {
	fn default() -> Self {
		Self::new(DEFAULT_TRANSITION)
	}
}

impl PhaseMachine {
	/// Creates a machine in [`SidebarPhase::Closed`].
	pub fn new(transition: Duration) -> Self {
		Self {
			id: MachineId::next(),
			phase: SidebarPhase::Closed,
			transition,
			generation: 0,
			pending: None,
		}
	}

	/// Returns the id stamped on every token this machine issues.
	pub fn id(&self) -> MachineId {
		self.id
	}

	/// Returns the current phase.
	pub fn phase(&self) -> SidebarPhase {
		self.phase
	}

	/// Returns the transition length.
	pub fn transition(&self) -> Duration {
		self.transition
	}

	/// Returns the token of the transition currently awaited, if any.
	pub fn pending(&self) -> Option<TransitionToken> {
		self.pending
	}

	/// Feeds the current open state, translating it to an event.
	pub fn sync_open(&mut self, is_open: bool) -> Option<ScheduledTransition> {
		self.handle(if is_open {
			PhaseEvent::PathOpened
		} else {
			PhaseEvent::PathCleared
		})
	}

	/// Applies an event, returning a transition to schedule if one began.
	pub fn handle(&mut self, event: PhaseEvent) -> Option<ScheduledTransition> {
		use SidebarPhase::*;

		match (self.phase, event) {
			(Closed | Closing, PhaseEvent::PathOpened) => Some(self.begin(Opening)),
			(Opening | Open, PhaseEvent::PathCleared) => Some(self.begin(Closing)),
			(Opening, PhaseEvent::TransitionElapsed(token)) if self.pending == Some(token) => {
				self.settle(Open);
				None
			}
			(Closing, PhaseEvent::TransitionElapsed(token)) if self.pending == Some(token) => {
				self.settle(Closed);
				None
			}
			(_, PhaseEvent::TransitionElapsed(token)) => {
				tracing::debug!(?token, phase = %self.phase, "ignoring stale sidebar transition");
				None
			}
			_ => None,
		}
	}

	fn begin(&mut self, phase: SidebarPhase) -> ScheduledTransition {
		self.generation += 1;
		let token = TransitionToken {
			machine: self.id,
			generation: self.generation,
		};
		tracing::debug!(from = %self.phase, to = %phase, "sidebar phase");
		self.phase = phase;
		self.pending = Some(token);
		ScheduledTransition {
			delay: self.transition,
			token,
		}
	}

	fn settle(&mut self, phase: SidebarPhase) {
		tracing::debug!(from = %self.phase, to = %phase, "sidebar phase");
		self.phase = phase;
		self.pending = None;
	}
}

/// Delivers scheduled transitions back to their owner.
///
/// A scheduler only queues tokens; each owner drains its own due tokens
/// with [`Scheduler::take_due`] and feeds them to its [`PhaseMachine`].
/// Tokens of other machines stay queued.
pub trait Scheduler {
	/// Queues `transition` to become due after its delay.
	fn schedule(&self, transition: ScheduledTransition);

	/// Removes and returns every due token issued by `machine`, in schedule
	/// order.
	fn take_due(&self, machine: MachineId) -> Vec<TransitionToken>;
}

/// A scheduler driven by an explicit clock, for tests and headless hosts.
#[derive(Debug, Default)]
pub struct ManualScheduler {
	now: Cell<Duration>,
	queue: RefCell<Vec<(Duration, TransitionToken)>>,
}

impl ManualScheduler {
	/// Creates a scheduler at time zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the elapsed clock time.
	pub fn now(&self) -> Duration {
		self.now.get()
	}

	/// Moves the clock forward.
	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get() + by);
	}

	/// Returns the number of queued tokens, due or not.
	pub fn pending_len(&self) -> usize {
		self.queue.borrow().len()
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, transition: ScheduledTransition) {
		let deadline = self.now.get() + transition.delay;
		self.queue.borrow_mut().push((deadline, transition.token));
	}

	fn take_due(&self, machine: MachineId) -> Vec<TransitionToken> {
		let now = self.now.get();
		let mut queue = self.queue.borrow_mut();
		let mut due = Vec::new();
		queue.retain(|(deadline, token)| {
			if *deadline <= now && token.machine == machine {
				due.push(*token);
				false
			} else {
				true
			}
		});
		due
	}
}

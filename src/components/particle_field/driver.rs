//! Frame-loop lifecycle for the particle field.
//!
//! The driver owns the [`SimulationContext`] and decides whether a frame may
//! run. Scheduling itself goes through [`FrameScheduler`] so the loop can be
//! exercised without a browser: the component plugs in
//! `requestAnimationFrame`, tests plug in a recorder.
//!
//! ```text
//! Uninitialized --mount--> Running <--pause/resume--> Paused
//!                              \                        /
//!                               +-------teardown-------+--> TornDown
//! ```

use log::info;

use super::config::FieldConfig;
use super::state::SimulationContext;
use super::types::CanvasSize;

/// Handle returned by the host's frame scheduler.
pub type FrameHandle = i32;

/// Elapsed time used when there is no previous frame to measure against.
const NOMINAL_FRAME_SECS: f64 = 1.0 / 60.0;
/// Longest gap fed to the animation clock (e.g. after a stalled tab).
const MAX_FRAME_SECS: f64 = 0.1;

/// Host primitive that runs a callback right before the next repaint.
pub trait FrameScheduler {
	/// Schedule the next frame; `None` if the host refused.
	fn request_frame(&mut self) -> Option<FrameHandle>;
	/// Cancel a previously scheduled frame.
	fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Lifecycle of a mounted field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	/// Created but not yet sized.
	Uninitialized,
	/// Ticking once per frame.
	Running,
	/// Page hidden; no frame is pending.
	Paused,
	/// Unmounted. Terminal.
	TornDown,
}

/// Owns the simulation and its frame loop.
#[derive(Debug)]
pub struct FieldDriver {
	sim: SimulationContext,
	state: LoopState,
	pending: Option<FrameHandle>,
	last_timestamp: Option<f64>,
	frames: u64,
}

impl FieldDriver {
	/// An unmounted driver. `config` is sanitized, `seed` fixes the layout.
	pub fn new(config: FieldConfig, seed: u64) -> Self {
		Self {
			sim: SimulationContext::new(config, seed),
			state: LoopState::Uninitialized,
			pending: None,
			last_timestamp: None,
			frames: 0,
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> LoopState {
		self.state
	}

	/// Number of frames simulated so far.
	pub fn frame_count(&self) -> u64 {
		self.frames
	}

	/// Read-only view of the simulation.
	pub fn simulation(&self) -> &SimulationContext {
		&self.sim
	}

	/// True while a frame callback is outstanding.
	pub fn has_pending_frame(&self) -> bool {
		self.pending.is_some()
	}

	/// Size the field and start the loop. Only valid once.
	pub fn mount<S: FrameScheduler>(&mut self, size: CanvasSize, scheduler: &mut S) {
		if self.state != LoopState::Uninitialized {
			return;
		}
		self.sim.resize(size);
		self.state = LoopState::Running;
		self.schedule(scheduler);
		info!(
			"particle-field: mounted with {} particles",
			self.sim.store.foreground.len()
		);
	}

	/// Replace the population for a new canvas size.
	pub fn resize(&mut self, size: CanvasSize) {
		if self.state == LoopState::TornDown {
			return;
		}
		self.sim.resize(size);
	}

	/// Record a pointer move; picked up by the next frame.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.sim.pointer.move_to(x, y);
	}

	/// Record the pointer leaving the canvas.
	pub fn pointer_left(&mut self) {
		self.sim.pointer.leave();
	}

	/// Run one frame at host timestamp `timestamp_ms`.
	///
	/// Steps the simulation, hands it to `render`, then schedules the next
	/// frame. Returns `false` without doing anything unless the loop is running.
	pub fn on_frame<S, R>(&mut self, timestamp_ms: f64, scheduler: &mut S, render: R) -> bool
	where
		S: FrameScheduler,
		R: FnOnce(&SimulationContext),
	{
		// The callback that got us here has fired.
		self.pending = None;
		if self.state != LoopState::Running {
			return false;
		}

		let dt = match self.last_timestamp {
			Some(last) => ((timestamp_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS),
			None => NOMINAL_FRAME_SECS,
		};
		self.last_timestamp = Some(timestamp_ms);

		self.sim.step(dt);
		render(&self.sim);
		self.frames += 1;
		self.schedule(scheduler);
		true
	}

	/// Stop ticking while the page is hidden.
	pub fn pause<S: FrameScheduler>(&mut self, scheduler: &mut S) {
		if self.state != LoopState::Running {
			return;
		}
		self.cancel(scheduler);
		self.state = LoopState::Paused;
	}

	/// Restart after [`pause`](Self::pause). The first frame back uses a
	/// nominal elapsed time instead of the whole hidden interval.
	pub fn resume<S: FrameScheduler>(&mut self, scheduler: &mut S) {
		if self.state != LoopState::Paused {
			return;
		}
		self.last_timestamp = None;
		self.state = LoopState::Running;
		self.schedule(scheduler);
	}

	/// Cancel the pending frame and stop for good. Safe to call repeatedly.
	pub fn teardown<S: FrameScheduler>(&mut self, scheduler: &mut S) {
		self.cancel(scheduler);
		if self.state != LoopState::TornDown {
			self.state = LoopState::TornDown;
			info!("particle-field: torn down after {} frames", self.frames);
		}
	}

	fn schedule<S: FrameScheduler>(&mut self, scheduler: &mut S) {
		if self.pending.is_none() {
			self.pending = scheduler.request_frame();
		}
	}

	fn cancel<S: FrameScheduler>(&mut self, scheduler: &mut S) {
		if let Some(handle) = self.pending.take() {
			scheduler.cancel_frame(handle);
		}
	}
}

//! Simulation context shared by the physics phases and the renderer.
//!
//! Owns everything that survives between frames: both particle populations,
//! the pointer, the canvas size, the animation clock, and the RNG used to
//! seed new populations. The driver holds exactly one of these and lends it
//! out by reference; nothing here knows about the browser.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleStore;
use super::physics;
use super::types::{CanvasSize, PointerState};

/// Complete mutable state of one particle field.
#[derive(Clone, Debug)]
pub struct SimulationContext {
	/// Sanitized tunables.
	pub config: FieldConfig,
	/// Both particle populations.
	pub store: ParticleStore,
	/// Latest pointer position, written by input handlers.
	pub pointer: PointerState,
	/// Current canvas size in CSS pixels.
	pub size: CanvasSize,
	/// Seconds of animation time, drives glow and twinkle only.
	pub clock: f64,
	rng: SmallRng,
}

impl SimulationContext {
	/// An empty field; call [`resize`](Self::resize) to populate it.
	///
	/// `config` is sanitized here, so out-of-range values from JSON can never
	/// reach the physics.
	pub fn new(config: FieldConfig, seed: u64) -> Self {
		Self {
			config: config.sanitized(),
			store: ParticleStore::default(),
			pointer: PointerState::default(),
			size: CanvasSize::default(),
			clock: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Adopt a new canvas size and replace both populations.
	pub fn resize(&mut self, size: CanvasSize) {
		self.size = size;
		self.store = ParticleStore::initialize(&size, &self.config, &mut self.rng);
		debug!(
			"particle-field: {}x{} @{} -> {} foreground, {} background",
			size.width,
			size.height,
			size.pixel_ratio,
			self.store.foreground.len(),
			self.store.background.len()
		);
	}

	/// Advance one tick: forces, collisions, integration.
	///
	/// `dt` only advances the animation clock; physics constants are per tick.
	pub fn step(&mut self, dt: f64) {
		physics::apply_forces(&mut self.store.foreground, &self.pointer, &self.config);
		physics::resolve_collisions(&mut self.store.foreground, &self.config);
		physics::integrate(&mut self.store, &self.size, &self.config);
		self.clock += dt;
	}
}

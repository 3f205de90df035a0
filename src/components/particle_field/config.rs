//! Tunable constants for the particle field simulation.
//!
//! Every value has a named default so the physics can be reasoned about (and
//! tested) without a browser. At runtime the app shell may override any subset
//! of them with a JSON blob; missing keys fall back to these defaults.
//!
//! All velocity-affecting constants are **per tick**: one animation frame
//! advances the simulation by exactly one step regardless of elapsed time.

use log::warn;
use serde::Deserialize;

/// Foreground particles per square CSS pixel.
pub const DEFAULT_FOREGROUND_DENSITY: f64 = 1.5e-4;
/// Background particles per square CSS pixel (about a third of the foreground).
pub const DEFAULT_BACKGROUND_DENSITY: f64 = 5.0e-5;
/// Distance within which the pointer pushes particles away.
pub const DEFAULT_POINTER_RADIUS: f64 = 180.0;
/// Velocity added per tick at zero distance from the pointer.
pub const DEFAULT_REPULSION_STRENGTH: f64 = 2.0;
/// Fraction of the offset to origin added to velocity each tick.
pub const DEFAULT_RETURN_SPEED: f64 = 0.01;
/// Per-tick velocity retention for foreground particles.
pub const DEFAULT_DAMPING: f64 = 0.90;
/// Collision elasticity (1.0 = perfectly elastic).
pub const DEFAULT_RESTITUTION: f64 = 0.85;
/// Chance that a foreground particle is tagged with the accent color.
pub const DEFAULT_ACCENT_PROBABILITY: f64 = 0.1;
/// Foreground radius range.
pub const DEFAULT_FOREGROUND_RADIUS: (f64, f64) = (1.0, 2.5);
/// Background radius range.
pub const DEFAULT_BACKGROUND_RADIUS: (f64, f64) = (0.5, 1.5);
/// Background base alpha range.
pub const DEFAULT_BACKGROUND_ALPHA: (f64, f64) = (0.1, 0.4);
/// Maximum drift speed of background particles, per tick.
pub const DEFAULT_BACKGROUND_SPEED: f64 = 0.2;
/// Angular speed of the background twinkle (radians per second).
pub const DEFAULT_TWINKLE_SPEED: f64 = 1.5;
/// Angular speed of the breathing glow (radians per second).
pub const DEFAULT_GLOW_SPEED: f64 = 0.5;
/// Upper bound on the device pixel ratio used for the backing store.
pub const DEFAULT_MAX_PIXEL_RATIO: f64 = 2.0;

/// Complete simulation and presentation configuration.
///
/// Deserializes from partial JSON: `{"damping": 0.8}` keeps every other default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Foreground particles per square CSS pixel.
	pub foreground_density: f64,
	/// Background particles per square CSS pixel.
	pub background_density: f64,
	/// Pointer influence radius in CSS pixels.
	pub pointer_radius: f64,
	/// Repulsion velocity at the pointer center.
	pub repulsion_strength: f64,
	/// Spring constant pulling particles back to their origin.
	pub return_speed: f64,
	/// Velocity multiplier applied every tick (0.0..=1.0).
	pub damping: f64,
	/// Collision restitution coefficient (0.0..=1.0).
	pub restitution: f64,
	/// Probability of the accent color tag (0.0..=1.0).
	pub accent_probability: f64,
	/// `(min, max)` foreground particle radius.
	pub foreground_radius: (f64, f64),
	/// `(min, max)` background particle radius.
	pub background_radius: (f64, f64),
	/// `(min, max)` background base alpha.
	pub background_alpha: (f64, f64),
	/// Maximum background drift speed.
	pub background_speed: f64,
	/// Twinkle oscillation speed.
	pub twinkle_speed: f64,
	/// Glow breathing speed.
	pub glow_speed: f64,
	/// Cap for `window.devicePixelRatio`.
	pub max_pixel_ratio: f64,
	/// Theme preset name (see [`FieldTheme::by_name`](super::theme::FieldTheme::by_name)).
	pub theme: String,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			foreground_density: DEFAULT_FOREGROUND_DENSITY,
			background_density: DEFAULT_BACKGROUND_DENSITY,
			pointer_radius: DEFAULT_POINTER_RADIUS,
			repulsion_strength: DEFAULT_REPULSION_STRENGTH,
			return_speed: DEFAULT_RETURN_SPEED,
			damping: DEFAULT_DAMPING,
			restitution: DEFAULT_RESTITUTION,
			accent_probability: DEFAULT_ACCENT_PROBABILITY,
			foreground_radius: DEFAULT_FOREGROUND_RADIUS,
			background_radius: DEFAULT_BACKGROUND_RADIUS,
			background_alpha: DEFAULT_BACKGROUND_ALPHA,
			background_speed: DEFAULT_BACKGROUND_SPEED,
			twinkle_speed: DEFAULT_TWINKLE_SPEED,
			glow_speed: DEFAULT_GLOW_SPEED,
			max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
			theme: "canopy".to_string(),
		}
	}
}

impl FieldConfig {
	/// Parse a (possibly partial) JSON override.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Clamp every value into a range the simulation can run with.
	///
	/// Each correction is logged at `warn`; a config that is already valid
	/// comes back unchanged.
	pub fn sanitized(mut self) -> Self {
		let defaults = Self::default();

		self.foreground_density =
			non_negative("foreground_density", self.foreground_density, defaults.foreground_density);
		self.background_density =
			non_negative("background_density", self.background_density, defaults.background_density);
		self.pointer_radius =
			non_negative("pointer_radius", self.pointer_radius, defaults.pointer_radius);
		self.repulsion_strength = non_negative(
			"repulsion_strength",
			self.repulsion_strength,
			defaults.repulsion_strength,
		);
		self.return_speed = non_negative("return_speed", self.return_speed, defaults.return_speed);
		self.background_speed =
			non_negative("background_speed", self.background_speed, defaults.background_speed);
		self.twinkle_speed = non_negative("twinkle_speed", self.twinkle_speed, defaults.twinkle_speed);
		self.glow_speed = non_negative("glow_speed", self.glow_speed, defaults.glow_speed);

		self.damping = unit_interval("damping", self.damping, defaults.damping);
		self.restitution = unit_interval("restitution", self.restitution, defaults.restitution);
		self.accent_probability = unit_interval(
			"accent_probability",
			self.accent_probability,
			defaults.accent_probability,
		);

		self.foreground_radius = ordered_range(
			"foreground_radius",
			self.foreground_radius,
			defaults.foreground_radius,
		);
		self.background_radius = ordered_range(
			"background_radius",
			self.background_radius,
			defaults.background_radius,
		);
		self.background_alpha = ordered_range(
			"background_alpha",
			self.background_alpha,
			defaults.background_alpha,
		);
		// Collisions use radius as mass; a zero radius would divide by zero.
		if self.foreground_radius.0 <= 0.0 {
			warn!(
				"particle-field: foreground_radius must be positive, using {:?}",
				defaults.foreground_radius
			);
			self.foreground_radius = defaults.foreground_radius;
		}

		if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio < 1.0 {
			warn!(
				"particle-field: max_pixel_ratio {} below 1.0, using {}",
				self.max_pixel_ratio, defaults.max_pixel_ratio
			);
			self.max_pixel_ratio = defaults.max_pixel_ratio;
		}

		self
	}
}

fn non_negative(name: &str, value: f64, fallback: f64) -> f64 {
	if value.is_finite() && value >= 0.0 {
		value
	} else {
		warn!("particle-field: {name} must be a non-negative number, using {fallback}");
		fallback
	}
}

fn unit_interval(name: &str, value: f64, fallback: f64) -> f64 {
	if !value.is_finite() {
		warn!("particle-field: {name} is not finite, using {fallback}");
		return fallback;
	}
	let clamped = value.clamp(0.0, 1.0);
	if clamped != value {
		warn!("particle-field: {name} {value} clamped to {clamped}");
	}
	clamped
}

fn ordered_range(name: &str, (lo, hi): (f64, f64), fallback: (f64, f64)) -> (f64, f64) {
	if !lo.is_finite() || !hi.is_finite() || lo < 0.0 {
		warn!("particle-field: {name} ({lo}, {hi}) is invalid, using {fallback:?}");
		return fallback;
	}
	if lo > hi {
		warn!("particle-field: {name} bounds reversed, swapping");
		(hi, lo)
	} else {
		(lo, hi)
	}
}

//! Particle data and population initialization.
//!
//! Two collections live side by side: interactive foreground particles that
//! the physics steps move around, and ambient background particles that only
//! drift and twinkle. Both are rebuilt wholesale whenever the canvas changes
//! size; nothing is added or removed individually.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::FieldConfig;
use super::types::{CanvasSize, ColorTag};

/// An interactive particle anchored to the point where it was spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct ForegroundParticle {
	/// Horizontal position in CSS pixels.
	pub x: f64,
	/// Vertical position in CSS pixels.
	pub y: f64,
	/// Horizontal velocity per tick.
	pub vx: f64,
	/// Vertical velocity per tick.
	pub vy: f64,
	origin_x: f64,
	origin_y: f64,
	radius: f64,
	tag: ColorTag,
}

impl ForegroundParticle {
	/// A particle at rest, with its origin fixed at `(x, y)`.
	pub fn new(x: f64, y: f64, radius: f64, tag: ColorTag) -> Self {
		Self {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			origin_x: x,
			origin_y: y,
			radius,
			tag,
		}
	}

	/// Rest position the spring pulls towards. Never changes.
	pub fn origin(&self) -> (f64, f64) {
		(self.origin_x, self.origin_y)
	}

	/// Collision radius, also used as the particle's mass.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Color category chosen at creation.
	pub fn tag(&self) -> ColorTag {
		self.tag
	}

	/// Velocity magnitude.
	pub fn speed(&self) -> f64 {
		self.vx.hypot(self.vy)
	}
}

/// A decorative particle with constant drift and a fixed twinkle phase.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundParticle {
	/// Horizontal position in CSS pixels.
	pub x: f64,
	/// Vertical position in CSS pixels.
	pub y: f64,
	/// Horizontal drift per tick.
	pub vx: f64,
	/// Vertical drift per tick.
	pub vy: f64,
	radius: f64,
	base_alpha: f64,
	phase: f64,
}

impl BackgroundParticle {
	/// A drifting particle with the given twinkle parameters.
	pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64, base_alpha: f64, phase: f64) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			radius,
			base_alpha,
			phase,
		}
	}

	/// Draw radius.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Peak opacity of the twinkle.
	pub fn base_alpha(&self) -> f64 {
		self.base_alpha
	}

	/// Twinkle phase offset in radians.
	pub fn phase(&self) -> f64 {
		self.phase
	}

	/// Twinkled opacity at animation time `time` (seconds).
	pub fn twinkle_alpha(&self, time: f64, twinkle_speed: f64) -> f64 {
		let twinkle = 0.5 + 0.5 * (time * twinkle_speed + self.phase).sin();
		self.base_alpha * twinkle
	}
}

/// Both particle populations for one canvas size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleStore {
	/// Interactive particles.
	pub foreground: Vec<ForegroundParticle>,
	/// Ambient particles.
	pub background: Vec<BackgroundParticle>,
}

impl ParticleStore {
	/// Build fresh populations sized from the canvas area.
	///
	/// Counts are `floor(area * density)`, so they scale linearly with area and
	/// a zero-area canvas yields empty collections.
	pub fn initialize<R: Rng + ?Sized>(size: &CanvasSize, config: &FieldConfig, rng: &mut R) -> Self {
		let area = size.area();
		let foreground_count = population(area, config.foreground_density);
		let background_count = population(area, config.background_density);

		let mut foreground = Vec::with_capacity(foreground_count);
		for _ in 0..foreground_count {
			let x = rng.gen_range(0.0..size.width);
			let y = rng.gen_range(0.0..size.height);
			let radius = sample(rng, config.foreground_radius);
			let tag = if rng.gen_bool(config.accent_probability) {
				ColorTag::Accent
			} else {
				ColorTag::Neutral
			};
			foreground.push(ForegroundParticle::new(x, y, radius, tag));
		}

		let mut background = Vec::with_capacity(background_count);
		for _ in 0..background_count {
			let angle = rng.gen_range(0.0..TAU);
			let speed = config.background_speed * rng.gen_range(0.3..=1.0);
			background.push(BackgroundParticle::new(
				rng.gen_range(0.0..size.width),
				rng.gen_range(0.0..size.height),
				angle.cos() * speed,
				angle.sin() * speed,
				sample(rng, config.background_radius),
				sample(rng, config.background_alpha),
				rng.gen_range(0.0..TAU),
			));
		}

		Self {
			foreground,
			background,
		}
	}

	/// True when both populations are empty.
	pub fn is_empty(&self) -> bool {
		self.foreground.is_empty() && self.background.is_empty()
	}
}

fn population(area: f64, density: f64) -> usize {
	let count = (area * density).floor();
	if count.is_finite() && count > 0.0 {
		count as usize
	} else {
		0
	}
}

/// Uniform sample from an inclusive `(min, max)` range; a collapsed range
/// returns `min` instead of panicking.
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
	if max > min {
		rng.gen_range(min..=max)
	} else {
		min
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::config::DEFAULT_BACKGROUND_SPEED;
	use super::*;

	fn store(width: f64, height: f64) -> ParticleStore {
		let mut rng = SmallRng::seed_from_u64(7);
		ParticleStore::initialize(
			&CanvasSize::new(width, height, 1.0),
			&FieldConfig::default(),
			&mut rng,
		)
	}

	#[test]
	fn counts_follow_density() {
		let s = store(1000.0, 800.0);
		assert!((119..=120).contains(&s.foreground.len()));
		assert!((39..=40).contains(&s.background.len()));
	}

	#[test]
	fn zero_area_is_empty() {
		assert!(store(0.0, 800.0).is_empty());
		assert!(store(1000.0, 0.0).is_empty());
		assert!(store(-10.0, -10.0).is_empty());
	}

	#[test]
	fn foreground_starts_at_rest_on_origin() {
		for p in &store(600.0, 400.0).foreground {
			assert_eq!(p.origin(), (p.x, p.y));
			assert_eq!((p.vx, p.vy), (0.0, 0.0));
			assert!((1.0..=2.5).contains(&p.radius()));
			assert!(p.x >= 0.0 && p.x < 600.0);
			assert!(p.y >= 0.0 && p.y < 400.0);
		}
	}

	#[test]
	fn background_attributes_in_range() {
		let s = store(1200.0, 900.0);
		assert!(!s.background.is_empty());
		for p in &s.background {
			assert!((0.5..=1.5).contains(&p.radius()));
			assert!((0.1..=0.4).contains(&p.base_alpha()));
			assert!((0.0..TAU).contains(&p.phase()));
			assert!(p.vx.hypot(p.vy) <= DEFAULT_BACKGROUND_SPEED + 1e-9);
		}
	}

	#[test]
	fn accent_tag_is_rare() {
		let s = store(2000.0, 2000.0);
		let accents = s
			.foreground
			.iter()
			.filter(|p| p.tag() == ColorTag::Accent)
			.count();
		let share = accents as f64 / s.foreground.len() as f64;
		assert!(share > 0.05 && share < 0.15, "accent share {share}");
	}

	#[test]
	fn twinkle_stays_within_base_alpha() {
		let p = BackgroundParticle::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.3, 1.2);
		for step in 0..200 {
			let alpha = p.twinkle_alpha(step as f64 * 0.05, 1.5);
			assert!((0.0..=0.3 + 1e-12).contains(&alpha));
		}
	}

	#[test]
	fn twinkle_depends_on_phase() {
		let a = BackgroundParticle::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.3, 0.0);
		let b = BackgroundParticle::new(0.0, 0.0, 0.0, 0.0, 1.0, 0.3, 2.0);
		assert_ne!(a.twinkle_alpha(1.0, 1.5), b.twinkle_alpha(1.0, 1.5));
		assert_eq!(a.twinkle_alpha(1.0, 1.5), a.twinkle_alpha(1.0, 1.5));
	}
}

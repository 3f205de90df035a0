//! Per-tick physics for the particle field.
//!
//! One simulation step runs three phases in a fixed order:
//!
//! 1. [`apply_forces`]: pointer repulsion plus spring return, velocity only.
//! 2. [`resolve_collisions`]: pairwise overlap correction and elastic impulses.
//! 3. [`integrate`]: damping, position update, background drift and wrap.
//!
//! Collision correction moves positions directly, so it has to run before the
//! integrator or the displacement would be applied twice.

use super::config::FieldConfig;
use super::particles::{BackgroundParticle, ForegroundParticle, ParticleStore};
use super::types::{CanvasSize, PointerState};

/// Distances below this are treated as coincident.
const MIN_DISTANCE: f64 = 1e-9;

/// Add pointer repulsion and spring return to every foreground velocity.
pub fn apply_forces(particles: &mut [ForegroundParticle], pointer: &PointerState, config: &FieldConfig) {
	let radius = config.pointer_radius;

	for p in particles.iter_mut() {
		if pointer.active && radius > 0.0 {
			let (dx, dy) = (p.x - pointer.x, p.y - pointer.y);
			let dist = dx.hypot(dy);
			if dist > MIN_DISTANCE && dist < radius {
				let force = (radius - dist) / radius;
				p.vx += dx / dist * force * config.repulsion_strength;
				p.vy += dy / dist * force * config.repulsion_strength;
			}
		}

		let (ox, oy) = p.origin();
		p.vx += (ox - p.x) * config.return_speed;
		p.vy += (oy - p.y) * config.return_speed;
	}
}

/// Separate every overlapping pair and exchange momentum along the normal.
///
/// Radius doubles as mass. Coincident pairs are pushed apart along +x but get
/// no impulse, since their normal is undefined.
pub fn resolve_collisions(particles: &mut [ForegroundParticle], config: &FieldConfig) {
	let n = particles.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let (head, tail) = particles.split_at_mut(j);
			resolve_pair(&mut head[i], &mut tail[0], config.restitution);
		}
	}
}

fn resolve_pair(a: &mut ForegroundParticle, b: &mut ForegroundParticle, restitution: f64) {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let min_dist = a.radius() + b.radius();
	let dist_sq = dx * dx + dy * dy;
	if dist_sq >= min_dist * min_dist {
		return;
	}

	let dist = dist_sq.sqrt();
	let coincident = dist < MIN_DISTANCE;
	let (nx, ny) = if coincident {
		(1.0, 0.0)
	} else {
		(dx / dist, dy / dist)
	};

	let half_overlap = (min_dist - dist) / 2.0;
	a.x -= nx * half_overlap;
	a.y -= ny * half_overlap;
	b.x += nx * half_overlap;
	b.y += ny * half_overlap;

	if coincident {
		return;
	}

	// Positive when a is moving into b.
	let closing = (a.vx - b.vx) * nx + (a.vy - b.vy) * ny;
	if closing <= 0.0 {
		return;
	}

	let (inv_a, inv_b) = (1.0 / a.radius(), 1.0 / b.radius());
	let impulse = -(1.0 + restitution) * closing / (inv_a + inv_b);
	a.vx += impulse * nx * inv_a;
	a.vy += impulse * ny * inv_a;
	b.vx -= impulse * nx * inv_b;
	b.vy -= impulse * ny * inv_b;
}

/// Damp and move foreground particles; drift and wrap background particles.
pub fn integrate(store: &mut ParticleStore, size: &CanvasSize, config: &FieldConfig) {
	for p in &mut store.foreground {
		p.vx *= config.damping;
		p.vy *= config.damping;
		p.x += p.vx;
		p.y += p.vy;
	}

	for p in &mut store.background {
		drift(p, size);
	}
}

fn drift(p: &mut BackgroundParticle, size: &CanvasSize) {
	p.x += p.vx;
	p.y += p.vy;
	if size.is_empty() {
		return;
	}
	p.x = wrap(p.x, size.width);
	p.y = wrap(p.y, size.height);
}

/// Fold `value` into `[0, extent)`.
fn wrap(value: f64, extent: f64) -> f64 {
	if (0.0..extent).contains(&value) {
		return value;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid can round up to exactly `extent` for tiny negatives.
	if wrapped >= extent { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::types::ColorTag;

	fn particle(x: f64, y: f64, radius: f64) -> ForegroundParticle {
		ForegroundParticle::new(x, y, radius, ColorTag::Neutral)
	}

	fn kinetic_energy(particles: &[ForegroundParticle]) -> f64 {
		particles
			.iter()
			.map(|p| 0.5 * p.radius() * (p.vx * p.vx + p.vy * p.vy))
			.sum()
	}

	fn no_spring() -> FieldConfig {
		FieldConfig {
			return_speed: 0.0,
			..FieldConfig::default()
		}
	}

	#[test]
	fn pointer_pushes_particles_away() {
		let mut ps = vec![particle(110.0, 100.0, 1.0), particle(100.0, 90.0, 1.0)];
		let mut pointer = PointerState::default();
		pointer.move_to(100.0, 100.0);

		apply_forces(&mut ps, &pointer, &no_spring());

		assert!(ps[0].vx > 0.0);
		assert!(ps[0].vy.abs() < 1e-12);
		assert!(ps[1].vy < 0.0);
		assert!(ps[1].vx.abs() < 1e-12);
	}

	#[test]
	fn repulsion_falls_off_with_distance() {
		let mut ps = vec![particle(120.0, 100.0, 1.0), particle(250.0, 100.0, 1.0)];
		let mut pointer = PointerState::default();
		pointer.move_to(100.0, 100.0);

		apply_forces(&mut ps, &pointer, &no_spring());

		assert!(ps[0].vx > ps[1].vx);
		assert!(ps[1].vx > 0.0);
	}

	#[test]
	fn no_repulsion_outside_radius_or_when_inactive() {
		let mut pointer = PointerState::default();
		pointer.move_to(0.0, 0.0);
		let mut far = vec![particle(500.0, 0.0, 1.0)];
		apply_forces(&mut far, &pointer, &no_spring());
		assert_eq!((far[0].vx, far[0].vy), (0.0, 0.0));

		pointer.move_to(10.0, 0.0);
		pointer.leave();
		let mut near = vec![particle(12.0, 0.0, 1.0)];
		apply_forces(&mut near, &pointer, &no_spring());
		assert_eq!((near[0].vx, near[0].vy), (0.0, 0.0));
	}

	#[test]
	fn pointer_on_particle_does_not_produce_nan() {
		let mut ps = vec![particle(50.0, 50.0, 1.0)];
		let mut pointer = PointerState::default();
		pointer.move_to(50.0, 50.0);

		apply_forces(&mut ps, &pointer, &FieldConfig::default());

		assert!(ps[0].vx.is_finite() && ps[0].vy.is_finite());
		assert_eq!((ps[0].vx, ps[0].vy), (0.0, 0.0));
	}

	#[test]
	fn spring_pulls_towards_origin() {
		let mut ps = vec![particle(0.0, 0.0, 1.0)];
		ps[0].x = 10.0;
		ps[0].y = -4.0;

		apply_forces(&mut ps, &PointerState::default(), &FieldConfig::default());

		assert!(ps[0].vx < 0.0);
		assert!(ps[0].vy > 0.0);
		assert_eq!(ps[0].origin(), (0.0, 0.0));
	}

	#[test]
	fn overlapping_pair_is_separated_in_one_pass() {
		let mut ps = vec![particle(10.0, 10.0, 2.0), particle(11.0, 10.5, 1.5)];
		resolve_collisions(&mut ps, &FieldConfig::default());

		let dist = (ps[1].x - ps[0].x).hypot(ps[1].y - ps[0].y);
		assert!(dist >= 3.5 - 1e-9, "distance {dist}");
	}

	#[test]
	fn correction_is_symmetric() {
		let mut ps = vec![particle(0.0, 0.0, 2.0), particle(2.0, 0.0, 2.0)];
		resolve_collisions(&mut ps, &FieldConfig::default());

		assert!((ps[0].x + 1.0).abs() < 1e-12);
		assert!((ps[1].x - 3.0).abs() < 1e-12);
	}

	#[test]
	fn separating_pair_keeps_velocity() {
		let mut ps = vec![particle(0.0, 0.0, 2.0), particle(3.0, 0.0, 2.0)];
		ps[0].vx = -1.0;
		ps[1].vx = 1.0;

		resolve_collisions(&mut ps, &FieldConfig::default());

		assert_eq!(ps[0].vx, -1.0);
		assert_eq!(ps[1].vx, 1.0);
	}

	#[test]
	fn closing_pair_bounces_apart() {
		let mut ps = vec![particle(0.0, 0.0, 2.0), particle(3.0, 0.0, 2.0)];
		ps[0].vx = 1.0;
		ps[1].vx = -1.0;

		resolve_collisions(&mut ps, &FieldConfig::default());

		assert!(ps[0].vx < 0.0);
		assert!(ps[1].vx > 0.0);
		// Restitution below one loses a little speed.
		assert!(ps[0].vx.abs() < 1.0);
	}

	#[test]
	fn elastic_head_on_collision_conserves_energy() {
		let config = FieldConfig {
			restitution: 1.0,
			..FieldConfig::default()
		};
		let mut ps = vec![particle(0.0, 0.0, 2.5), particle(3.0, 0.0, 1.0)];
		ps[0].vx = 0.8;
		ps[1].vx = -1.3;
		let before = kinetic_energy(&ps);
		let momentum_before: f64 = ps.iter().map(|p| p.radius() * p.vx).sum();

		resolve_collisions(&mut ps, &config);

		let after = kinetic_energy(&ps);
		let momentum_after: f64 = ps.iter().map(|p| p.radius() * p.vx).sum();
		assert!(after <= before + 1e-9, "energy grew: {before} -> {after}");
		assert!((after - before).abs() < 1e-9);
		assert!((momentum_after - momentum_before).abs() < 1e-9);
	}

	#[test]
	fn inelastic_collision_loses_energy() {
		let mut ps = vec![particle(0.0, 0.0, 2.0), particle(3.0, 0.0, 2.0)];
		ps[0].vx = 1.0;
		let before = kinetic_energy(&ps);

		resolve_collisions(&mut ps, &FieldConfig::default());

		assert!(kinetic_energy(&ps) < before);
	}

	#[test]
	fn coincident_particles_do_not_produce_nan() {
		let mut ps = vec![particle(5.0, 5.0, 1.0), particle(5.0, 5.0, 1.0)];
		ps[0].vx = 0.3;

		resolve_collisions(&mut ps, &FieldConfig::default());

		for p in &ps {
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.vx.is_finite() && p.vy.is_finite());
		}
		assert!((ps[1].x - ps[0].x - 2.0).abs() < 1e-12);
		assert_eq!(ps[0].vx, 0.3);
	}

	#[test]
	fn integrate_damps_then_moves() {
		let mut store = ParticleStore {
			foreground: vec![particle(0.0, 0.0, 1.0)],
			background: Vec::new(),
		};
		store.foreground[0].vx = 10.0;

		integrate(&mut store, &CanvasSize::new(100.0, 100.0, 1.0), &FieldConfig::default());

		let p = &store.foreground[0];
		assert!((p.vx - 9.0).abs() < 1e-12);
		assert!((p.x - 9.0).abs() < 1e-12);
	}

	#[test]
	fn background_wraps_on_every_edge() {
		let size = CanvasSize::new(200.0, 100.0, 1.0);
		let mut store = ParticleStore {
			foreground: Vec::new(),
			background: vec![
				BackgroundParticle::new(199.9, 50.0, 0.2, 0.0, 1.0, 0.2, 0.0),
				BackgroundParticle::new(0.1, 50.0, -0.2, 0.0, 1.0, 0.2, 0.0),
				BackgroundParticle::new(100.0, 99.9, 0.0, 0.2, 1.0, 0.2, 0.0),
				BackgroundParticle::new(100.0, 0.1, 0.0, -0.2, 1.0, 0.2, 0.0),
			],
		};

		integrate(&mut store, &size, &FieldConfig::default());

		let bg = &store.background;
		assert!(bg[0].x < 1.0, "right edge -> {}", bg[0].x);
		assert!(bg[1].x > 199.0, "left edge -> {}", bg[1].x);
		assert!(bg[2].y < 1.0, "bottom edge -> {}", bg[2].y);
		assert!(bg[3].y > 99.0, "top edge -> {}", bg[3].y);
		for p in bg {
			assert!((0.0..200.0).contains(&p.x));
			assert!((0.0..100.0).contains(&p.y));
		}
	}

	#[test]
	fn wrap_handles_large_overshoot() {
		assert!((wrap(530.0, 200.0) - 130.0).abs() < 1e-9);
		assert!((wrap(-450.0, 200.0) - 150.0).abs() < 1e-9);
		assert_eq!(wrap(-1e-20, 200.0), 0.0);
	}
}

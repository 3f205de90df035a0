//! Canvas rendering for the particle field.
//!
//! Reads the simulation context and draws one frame, back to front:
//! 1. Clear (the hero section shows through)
//! 2. Breathing radial glow
//! 3. Ambient background particles with twinkle
//! 4. Foreground particles, brighter when moving fast
//!
//! Drawing calls that fail are skipped; a decorative background should never
//! take the page down.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::config::FieldConfig;
use super::particles::ForegroundParticle;
use super::state::SimulationContext;
use super::theme::{FieldTheme, GlowStyle};

/// Foreground opacity at rest.
const FOREGROUND_REST_ALPHA: f64 = 0.55;
/// Extra opacity per unit of speed.
const FOREGROUND_SPEED_ALPHA: f64 = 0.15;
/// Opacity cap for fast particles.
const FOREGROUND_MAX_ALPHA: f64 = 0.95;

/// Renders the complete field to the canvas.
pub fn render(sim: &SimulationContext, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	ctx.clear_rect(0.0, 0.0, sim.size.width, sim.size.height);
	if sim.size.is_empty() {
		return;
	}

	draw_glow(sim, ctx, theme);
	draw_background_particles(sim, ctx, theme);
	draw_foreground_particles(sim, ctx, theme);

	ctx.set_global_alpha(1.0);
}

/// Glow opacity at animation time `clock`.
pub(crate) fn glow_alpha(glow: &GlowStyle, clock: f64, config: &FieldConfig) -> f64 {
	(glow.base + glow.amplitude * (clock * config.glow_speed).sin()).clamp(0.0, 1.0)
}

/// Foreground opacity for a particle moving at `speed`.
pub(crate) fn foreground_alpha(speed: f64) -> f64 {
	(FOREGROUND_REST_ALPHA + speed * FOREGROUND_SPEED_ALPHA).min(FOREGROUND_MAX_ALPHA)
}

fn draw_glow(sim: &SimulationContext, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	let (cx, cy) = (sim.size.width / 2.0, sim.size.height / 2.0);
	let reach = sim.size.width.max(sim.size.height) * theme.glow.reach;
	let Ok(gradient) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, reach) else {
		return;
	};

	let alpha = glow_alpha(&theme.glow, sim.clock, &sim.config);
	let color = theme.glow.color;
	if gradient
		.add_color_stop(0.0, &color.with_alpha(alpha).to_css())
		.is_err()
		|| gradient
			.add_color_stop(1.0, &color.with_alpha(0.0).to_css())
			.is_err()
	{
		return;
	}

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, sim.size.width, sim.size.height);
}

fn draw_background_particles(sim: &SimulationContext, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	let color = theme.ambient;
	ctx.set_global_alpha(1.0);

	for p in &sim.store.background {
		let alpha = p.twinkle_alpha(sim.clock, sim.config.twinkle_speed);
		ctx.set_fill_style_str(&color.with_alpha(alpha).to_css());

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius(), 0.0, TAU);
		ctx.fill();
	}
}

fn draw_foreground_particles(sim: &SimulationContext, ctx: &CanvasRenderingContext2d, theme: &FieldTheme) {
	for p in &sim.store.foreground {
		draw_particle(ctx, p, theme);
	}
}

fn draw_particle(ctx: &CanvasRenderingContext2d, p: &ForegroundParticle, theme: &FieldTheme) {
	let color = theme.particle_color(p.tag());
	ctx.set_global_alpha(foreground_alpha(p.speed()));
	ctx.set_fill_style_str(&color.to_css());

	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, p.radius(), 0.0, TAU);
	ctx.fill();
}

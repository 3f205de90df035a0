//! Visual theming for the particle field.
//!
//! Colors only; nothing here influences the simulation.

use super::types::ColorTag;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color string; alpha is clamped to `[0, 1]`.
	pub fn to_css(self) -> String {
		let a = self.a.clamp(0.0, 1.0);
		if (a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, a)
		}
	}
}

/// Breathing glow behind the particles.
#[derive(Clone, Debug)]
pub struct GlowStyle {
	/// Glow color at the center; fades to transparent at the edge.
	pub color: Color,
	/// Mean opacity.
	pub base: f64,
	/// Opacity swing either side of `base`.
	pub amplitude: f64,
	/// Gradient radius as a fraction of the larger canvas side.
	pub reach: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct FieldTheme {
	/// Preset name, as accepted by [`by_name`](Self::by_name).
	pub name: &'static str,
	/// Background glow.
	pub glow: GlowStyle,
	/// Ambient particle color (alpha comes from the twinkle).
	pub ambient: Color,
	/// Foreground color for [`ColorTag::Accent`].
	pub accent: Color,
	/// Foreground color for [`ColorTag::Neutral`].
	pub neutral: Color,
}

impl FieldTheme {
	/// Leafy greens on a transparent hero (default)
	pub fn canopy() -> Self {
		Self {
			name: "canopy",
			glow: GlowStyle {
				color: Color::rgb(74, 222, 128),
				base: 0.12,
				amplitude: 0.05,
				reach: 0.6,
			},
			ambient: Color::rgb(187, 247, 208),
			accent: Color::rgb(250, 204, 21),
			neutral: Color::rgb(134, 239, 172),
		}
	}

	/// Warmer evening palette
	pub fn dusk() -> Self {
		Self {
			name: "dusk",
			glow: GlowStyle {
				color: Color::rgb(251, 146, 60),
				base: 0.10,
				amplitude: 0.04,
				reach: 0.7,
			},
			ambient: Color::rgb(254, 215, 170),
			accent: Color::rgb(45, 212, 191),
			neutral: Color::rgb(253, 186, 116),
		}
	}

	/// Look up a preset by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"canopy" => Some(Self::canopy()),
			"dusk" => Some(Self::dusk()),
			_ => None,
		}
	}

	/// Foreground color for `tag`.
	pub fn particle_color(&self, tag: ColorTag) -> Color {
		match tag {
			ColorTag::Accent => self.accent,
			ColorTag::Neutral => self.neutral,
		}
	}
}

impl Default for FieldTheme {
	fn default() -> Self {
		Self::canopy()
	}
}

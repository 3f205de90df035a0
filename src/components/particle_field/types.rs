//! Small value types shared by the simulation, renderer, and driver.

/// Sentinel coordinate for a pointer that has not entered the canvas yet.
pub const POINTER_OFFSCREEN: f64 = -10_000.0;

/// Categorical color assigned to a foreground particle at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorTag {
	/// Rare highlight color.
	Accent,
	/// Default particle color.
	Neutral,
}

/// Last known pointer location in canvas-local CSS pixels.
///
/// `active` is true only while the pointer is over the canvas. Before the
/// first move the position is [`POINTER_OFFSCREEN`] on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
	/// Canvas-local x.
	pub x: f64,
	/// Canvas-local y.
	pub y: f64,
	/// Pointer is over the canvas.
	pub active: bool,
}

impl Default for PointerState {
	fn default() -> Self {
		Self {
			x: POINTER_OFFSCREEN,
			y: POINTER_OFFSCREEN,
			active: false,
		}
	}
}

impl PointerState {
	/// Record a move event inside the canvas.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.x = x;
		self.y = y;
		self.active = true;
	}

	/// Record the pointer leaving the canvas. The last position is kept.
	pub fn leave(&mut self) {
		self.active = false;
	}
}

/// Canvas dimensions in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub pixel_ratio: f64,
}

impl Default for CanvasSize {
	fn default() -> Self {
		Self {
			width: 0.0,
			height: 0.0,
			pixel_ratio: 1.0,
		}
	}
}

impl CanvasSize {
	/// Size from CSS dimensions and a pixel ratio.
	pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
		Self {
			width,
			height,
			pixel_ratio,
		}
	}

	/// Area in square CSS pixels, or 0.0 for degenerate sizes.
	pub fn area(&self) -> f64 {
		if self.is_empty() {
			0.0
		} else {
			self.width * self.height
		}
	}

	/// True when either dimension is zero, negative, or not a finite number.
	pub fn is_empty(&self) -> bool {
		!(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
	}

	/// Backing-store size in device pixels.
	pub fn device_pixels(&self) -> (u32, u32) {
		if self.is_empty() {
			return (0, 0);
		}
		let ratio = if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
			self.pixel_ratio
		} else {
			1.0
		};
		(
			(self.width * ratio).round() as u32,
			(self.height * ratio).round() as u32,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pointer_starts_offscreen_and_inactive() {
		let pointer = PointerState::default();
		assert!(!pointer.active);
		assert_eq!(pointer.x, POINTER_OFFSCREEN);
	}

	#[test]
	fn pointer_leave_keeps_position() {
		let mut pointer = PointerState::default();
		pointer.move_to(12.0, 34.0);
		assert!(pointer.active);
		pointer.leave();
		assert!(!pointer.active);
		assert_eq!((pointer.x, pointer.y), (12.0, 34.0));
	}

	#[test]
	fn degenerate_sizes_have_no_area() {
		assert_eq!(CanvasSize::new(0.0, 100.0, 1.0).area(), 0.0);
		assert_eq!(CanvasSize::new(100.0, -5.0, 1.0).area(), 0.0);
		assert_eq!(CanvasSize::new(f64::NAN, 100.0, 1.0).area(), 0.0);
		assert_eq!(CanvasSize::new(10.0, 20.0, 1.0).area(), 200.0);
	}

	#[test]
	fn device_pixels_scale_by_ratio() {
		assert_eq!(CanvasSize::new(300.0, 150.0, 2.0).device_pixels(), (600, 300));
		assert_eq!(CanvasSize::new(300.0, 150.0, 0.0).device_pixels(), (300, 150));
		assert_eq!(CanvasSize::default().device_pixels(), (0, 0));
	}
}

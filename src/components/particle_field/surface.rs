//! Canvas acquisition and device-pixel-ratio sizing.

use std::fmt;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::types::CanvasSize;

/// Fallback size when the canvas has no parent to measure.
const DETACHED_SIZE: (f64, f64) = (800.0, 600.0);

/// Errors that can occur while acquiring or measuring the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
	/// No `window` global (not running in a browser).
	NoWindow,
	/// `getContext("2d")` failed or returned null.
	ContextUnavailable(String),
	/// The returned context was not a `CanvasRenderingContext2D`.
	NotCanvas2d,
}

impl fmt::Display for SurfaceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SurfaceError::NoWindow => write!(f, "no browser window available"),
			SurfaceError::ContextUnavailable(msg) => {
				write!(f, "2d canvas context unavailable: {}", msg)
			}
			SurfaceError::NotCanvas2d => write!(f, "canvas context is not a 2d context"),
		}
	}
}

impl std::error::Error for SurfaceError {}

/// A canvas element paired with its 2D drawing context.
pub struct Surface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl Surface {
	/// Acquire the 2D context of `canvas`.
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| SurfaceError::ContextUnavailable(format!("{:?}", e)))?
			.ok_or_else(|| SurfaceError::ContextUnavailable("getContext returned null".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| SurfaceError::NotCanvas2d)?;
		Ok(Self { canvas, ctx })
	}

	/// The 2D drawing context.
	pub fn context(&self) -> &CanvasRenderingContext2d {
		&self.ctx
	}

	/// Current target size: the viewport when `fullscreen`, otherwise the
	/// parent element. The pixel ratio is capped at `max_pixel_ratio`.
	pub fn measure(&self, fullscreen: bool, max_pixel_ratio: f64) -> Result<CanvasSize, SurfaceError> {
		let window: Window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let ratio = window.device_pixel_ratio().clamp(1.0, max_pixel_ratio.max(1.0));

		let (width, height) = if fullscreen {
			(
				window
					.inner_width()
					.ok()
					.and_then(|v| v.as_f64())
					.unwrap_or(DETACHED_SIZE.0),
				window
					.inner_height()
					.ok()
					.and_then(|v| v.as_f64())
					.unwrap_or(DETACHED_SIZE.1),
			)
		} else {
			self.canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or(DETACHED_SIZE)
		};

		Ok(CanvasSize::new(width, height, ratio))
	}

	/// Resize the backing store to `size` in device pixels and scale the
	/// context so drawing happens in CSS pixels.
	pub fn apply(&self, size: &CanvasSize) {
		let (device_w, device_h) = size.device_pixels();
		self.canvas.set_width(device_w);
		self.canvas.set_height(device_h);

		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", size.width.max(0.0)));
		let _ = style.set_property("height", &format!("{}px", size.height.max(0.0)));

		// Setting width/height reset the transform; reapply the ratio.
		let ratio = if size.pixel_ratio > 0.0 {
			size.pixel_ratio
		} else {
			1.0
		};
		let _ = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}
}

//! Leptos component wrapping the particle field canvas.
//!
//! The component creates an HTML canvas element, sizes it to its container
//! (times the device pixel ratio), and runs the simulation from a
//! `requestAnimationFrame` loop. Pointer handlers only record the pointer; the
//! next frame picks it up. On unmount every listener is removed and the
//! pending frame is cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::config::FieldConfig;
use super::driver::{FieldDriver, FrameHandle, FrameScheduler, LoopState};
use super::render;
use super::surface::Surface;
use super::theme::FieldTheme;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type EventCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Bundles the driver with the surface it draws on and the resolved theme.
struct FieldRuntime {
	driver: FieldDriver,
	surface: Surface,
	theme: FieldTheme,
	fullscreen: bool,
}

impl FieldRuntime {
	/// Re-measure the container and rebuild the population if the size changed.
	fn resize(&mut self) {
		let size = match self
			.surface
			.measure(self.fullscreen, self.driver.simulation().config.max_pixel_ratio)
		{
			Ok(size) => size,
			Err(e) => {
				warn!("particle-field: resize skipped: {}", e);
				return;
			}
		};
		if size == self.driver.simulation().size {
			return;
		}
		self.surface.apply(&size);
		self.driver.resize(size);
	}
}

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
struct AnimationFrames {
	callback: FrameCallback,
}

impl FrameScheduler for AnimationFrames {
	fn request_frame(&mut self) -> Option<FrameHandle> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		window
			.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

/// Everything `on_cleanup` needs to release.
struct Handles {
	runtime: Rc<RefCell<Option<FieldRuntime>>>,
	animate: FrameCallback,
	resize_cb: EventCallback,
	visibility_cb: EventCallback,
}

impl Handles {
	fn release(self) {
		let mut frames = AnimationFrames {
			callback: self.animate.clone(),
		};
		if let Some(ref mut rt) = *self.runtime.borrow_mut() {
			rt.driver.teardown(&mut frames);
		}

		if let Some(window) = web_sys::window() {
			if let Some(cb) = self.resize_cb.borrow_mut().take() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
			if let Some(document) = window.document() {
				if let Some(cb) = self.visibility_cb.borrow_mut().take() {
					let _ = document.remove_event_listener_with_callback(
						"visibilitychange",
						cb.as_ref().unchecked_ref(),
					);
				}
			}
		}

		// The frame closure holds a clone of its own cell; dropping it here
		// breaks the cycle.
		self.animate.borrow_mut().take();
		self.runtime.borrow_mut().take();
	}
}

/// Seed for a new population. Different on every page load.
fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

/// Renders the interactive particle field on a canvas element.
///
/// The canvas sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport instead. Either way it follows
/// window resizes and pauses while the page is hidden.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(optional)] config: FieldConfig,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime: Rc<RefCell<Option<FieldRuntime>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: EventCallback = Rc::new(RefCell::new(None));
	let visibility_cb: EventCallback = Rc::new(RefCell::new(None));
	let (runtime_init, animate_init, resize_cb_init, visibility_cb_init) = (
		runtime.clone(),
		animate.clone(),
		resize_cb.clone(),
		visibility_cb.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let surface = match Surface::acquire(canvas) {
			Ok(surface) => surface,
			Err(e) => {
				warn!("particle-field: {}; rendering disabled", e);
				return;
			}
		};
		let driver = FieldDriver::new(config.clone(), random_seed());
		let config = &driver.simulation().config;
		let theme = FieldTheme::by_name(&config.theme).unwrap_or_else(|| {
			let fallback = FieldTheme::default();
			warn!(
				"particle-field: unknown theme {:?}, using {}",
				config.theme, fallback.name
			);
			fallback
		});
		let size = match surface.measure(fullscreen, config.max_pixel_ratio) {
			Ok(size) => size,
			Err(e) => {
				warn!("particle-field: {}; rendering disabled", e);
				return;
			}
		};
		surface.apply(&size);

		*runtime_init.borrow_mut() = Some(FieldRuntime {
			driver,
			surface,
			theme,
			fullscreen,
		});

		let (runtime_anim, animate_inner) = (runtime_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let mut frames = AnimationFrames {
				callback: animate_inner.clone(),
			};
			if let Some(ref mut rt) = *runtime_anim.borrow_mut() {
				let FieldRuntime {
					driver,
					surface,
					theme,
					..
				} = rt;
				driver.on_frame(timestamp, &mut frames, |sim| {
					render::render(sim, surface.context(), theme)
				});
			}
		}));

		let runtime_resize = runtime_init.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut rt) = *runtime_resize.borrow_mut() {
				rt.resize();
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		if let Some(document) = window.document() {
			let (runtime_vis, animate_vis) = (runtime_init.clone(), animate_init.clone());
			let doc = document.clone();
			*visibility_cb_init.borrow_mut() = Some(Closure::new(move || {
				let mut frames = AnimationFrames {
					callback: animate_vis.clone(),
				};
				if let Some(ref mut rt) = *runtime_vis.borrow_mut() {
					if doc.hidden() {
						rt.driver.pause(&mut frames);
					} else if rt.driver.state() == LoopState::Paused {
						rt.driver.resume(&mut frames);
					}
				}
			}));
			if let Some(ref cb) = *visibility_cb_init.borrow() {
				let _ = document
					.add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
			}
		}

		let mut frames = AnimationFrames {
			callback: animate_init.clone(),
		};
		if let Some(ref mut rt) = *runtime_init.borrow_mut() {
			rt.driver.mount(size, &mut frames);
		}
	});

	// Cleanup runs on the thread that created these handles.
	let handles = SendWrapper::new(Handles {
		runtime: runtime.clone(),
		animate,
		resize_cb,
		visibility_cb,
	});
	on_cleanup(move || handles.take().release());

	let runtime_mm = runtime.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut rt) = *runtime_mm.borrow_mut() {
			rt.driver.pointer_moved(x, y);
		}
	};

	let runtime_ml = runtime.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut rt) = *runtime_ml.borrow_mut() {
			rt.driver.pointer_left();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
			aria-hidden="true"
		/>
	}
}

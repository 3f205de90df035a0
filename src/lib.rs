//! particle-field: Interactive particle hero background for the green club site.
//!
//! This crate provides a WASM-based canvas component that renders a
//! pointer-reactive particle field with spring-return physics, elastic
//! collisions, and a twinkling ambient layer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load configuration overrides from a script element with
/// id="particle-field-config".
/// Expected format: JSON object with any subset of [`FieldConfig`] keys.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config overrides ({} theme)", config.theme);
			Some(config)
		}
		Err(e) => {
			warn!("particle-field: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the hero section with the particle field behind the headline.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Green Club" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero">
			<ParticleFieldCanvas config=config />
			<div class="hero-overlay">
				<h1>"Green Club"</h1>
				<p class="subtitle">"Students looking after the planet, one project at a time."</p>
			</div>
		</section>
	}
}

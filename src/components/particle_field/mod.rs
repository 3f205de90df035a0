//! Interactive particle field hero background.
//!
//! Renders a field of softly glowing particles on an HTML canvas:
//! - Foreground particles spring back to their rest positions, bounce off
//!   each other, and scatter away from the pointer
//! - Ambient background particles drift across the canvas and twinkle
//! - A slow breathing radial glow sits behind everything
//!
//! The simulation ([`SimulationContext`], [`physics`]) and its frame-loop
//! lifecycle ([`FieldDriver`]) are plain Rust and run without a browser; only
//! [`ParticleFieldCanvas`], [`Surface`], and the renderer touch the DOM.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! let config = FieldConfig { damping: 0.85, ..FieldConfig::default() };
//! view! { <ParticleFieldCanvas config=config /> }
//! ```

mod component;
pub mod config;
pub mod driver;
pub mod particles;
pub mod physics;
mod render;
pub mod state;
mod surface;
pub mod theme;
pub mod types;

pub use component::ParticleFieldCanvas;
pub use config::FieldConfig;
pub use driver::{FieldDriver, FrameHandle, FrameScheduler, LoopState};
pub use particles::{BackgroundParticle, ForegroundParticle, ParticleStore};
pub use state::SimulationContext;
pub use surface::{Surface, SurfaceError};
pub use theme::FieldTheme;
pub use types::{CanvasSize, ColorTag, PointerState};

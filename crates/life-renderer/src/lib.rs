//! # Life Renderer
//!
//! Draws the particle population as flat, kind-colored squares over the
//! torus domain.

pub mod camera;
pub mod palette;
pub mod renderer;

pub use camera::*;
pub use palette::*;
pub use renderer::*;

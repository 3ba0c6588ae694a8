//! # Particle Life Simulation
//!
//! World state, the per-frame force integrator, frame pacing and run control
//! for a population of typed particles on a torus.

pub mod control;
pub mod error;
pub mod integrator;
pub mod pacer;
pub mod params;
pub mod simulation;
pub mod world;

pub use control::*;
pub use error::*;
pub use integrator::*;
pub use pacer::*;
pub use params::*;
pub use simulation::*;
pub use world::*;

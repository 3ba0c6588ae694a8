//! # Particle Life Physics
//!
//! Particle kinds, the kind-by-kind interaction matrix, and the pairwise
//! displacement kernel for a periodic 2D domain.

pub mod constants;
pub mod forces;
pub mod matrix;
pub mod particle;

pub use constants::*;
pub use forces::*;
pub use matrix::*;
pub use particle::*;

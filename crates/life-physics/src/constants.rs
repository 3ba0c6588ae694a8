//! Reference constants for the particle-life world
//!
//! These are the values the default configuration is built from. Everything
//! here can be overridden at startup through `SimulationParams`.

/// Number of particle kinds (rows/columns of the interaction matrix)
pub const KIND_COUNT: usize = 3;

/// Default particle population
pub const PARTICLE_COUNT: usize = 600;

/// Domain width in simulation units
pub const DOMAIN_WIDTH: f32 = 1000.0;

/// Domain height in simulation units
pub const DOMAIN_HEIGHT: f32 = 1000.0;

/// Global multiplier on every pair interaction
pub const COUPLING_CONSTANT: f32 = 5.0e-3;

/// Squared separation below which negative-coefficient pairs are skipped
pub const MIN_SQUARED_DISTANCE: f32 = 100.0;

/// Magnitude applied to the sign pattern of the interaction matrix
pub const COEFFICIENT_SCALE: f32 = 1.0e4;

/// Seed for reproducible initial placement
pub const SEED: u64 = 42;

/// Target frame rate (frames per second)
pub const TARGET_FPS: f32 = 30.0;

/// Default epsilon when coincident particles are clamped instead of skipped
pub const SINGULARITY_EPSILON: f32 = 1.0e-6;

/// Reference sign pattern, indexed `[kind_i][kind_j]`.
///
/// Alpha flees Beta while Beta chases Alpha, Beta flees Gamma while Gamma
/// chases Beta, and every kind pulls toward its own. Alpha and Gamma ignore
/// each other.
pub const REFERENCE_SIGNS: [[f32; KIND_COUNT]; KIND_COUNT] = [
    [-1.0, 1.0, 0.0],
    [-1.0, -1.0, 1.0],
    [0.0, -1.0, -1.0],
];

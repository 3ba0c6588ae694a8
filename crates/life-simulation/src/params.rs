//! Simulation parameters
//!
//! Defaults reproduce the reference world. Any subset can be overridden from
//! a TOML file:
//!
//! ```toml
//! particle_count = 900
//! seed = 7
//! coupling_constant = 4.0e-3
//! interaction_matrix = [
//!     [-1.0, 1.0, 0.0],
//!     [-1.0, -1.0, 1.0],
//!     [0.0, -1.0, -1.0],
//! ]
//!
//! [singularity_guard]
//! mode = "clamp"
//! epsilon = 1.0e-6
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec2;
use life_physics::{constants::*, ForceLaw, InteractionMatrix, SingularityGuard};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    /// Number of particles created by seeded initialization
    pub particle_count: usize,
    pub domain_width: f32,
    pub domain_height: f32,
    /// Global multiplier on every pair interaction
    pub coupling_constant: f32,
    /// Negative-coefficient pairs closer than this (squared) are skipped
    pub min_squared_distance: f32,
    /// Magnitude applied to the matrix entries
    pub coefficient_scale: f32,
    pub interaction_matrix: InteractionMatrix,
    pub singularity_guard: SingularityGuard,
    /// Seed for initial placement
    pub seed: u64,
    /// Frames per second the pacer aims for
    pub target_fps: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            domain_width: DOMAIN_WIDTH,
            domain_height: DOMAIN_HEIGHT,
            coupling_constant: COUPLING_CONSTANT,
            min_squared_distance: MIN_SQUARED_DISTANCE,
            coefficient_scale: COEFFICIENT_SCALE,
            interaction_matrix: InteractionMatrix::default(),
            singularity_guard: SingularityGuard::default(),
            seed: SEED,
            target_fps: TARGET_FPS,
        }
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SimulationParams {
    pub fn from_toml_str(source: &str) -> Result<Self, SimulationError> {
        let params: Self = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject parameters that would make the first frame meaningless
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.particle_count == 0 {
            return Err(SimulationError::InvalidParams(
                "particle_count must be non-zero",
            ));
        }
        if !positive(self.domain_width) || !positive(self.domain_height) {
            return Err(SimulationError::InvalidParams(
                "domain extents must be positive",
            ));
        }
        if !positive(self.coupling_constant) {
            return Err(SimulationError::InvalidParams(
                "coupling_constant must be positive",
            ));
        }
        if !self.min_squared_distance.is_finite() || self.min_squared_distance < 0.0 {
            return Err(SimulationError::InvalidParams(
                "min_squared_distance must be non-negative",
            ));
        }
        if !self.coefficient_scale.is_finite() {
            return Err(SimulationError::InvalidParams(
                "coefficient_scale must be finite",
            ));
        }
        if !self.interaction_matrix.is_finite() {
            return Err(SimulationError::InvalidParams(
                "interaction_matrix entries must be finite",
            ));
        }
        if let SingularityGuard::Clamp { epsilon } = self.singularity_guard {
            if !positive(epsilon) {
                return Err(SimulationError::InvalidParams(
                    "singularity epsilon must be positive",
                ));
            }
        }
        if !positive(self.target_fps) {
            return Err(SimulationError::InvalidParams(
                "target_fps must be positive",
            ));
        }
        Ok(())
    }

    /// Domain extents as a vector
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.domain_width, self.domain_height)
    }

    pub fn force_law(&self) -> ForceLaw {
        ForceLaw {
            coupling_constant: self.coupling_constant,
            min_squared_distance: self.min_squared_distance,
            coefficient_scale: self.coefficient_scale,
            matrix: self.interaction_matrix,
            singularity_guard: self.singularity_guard,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }
}

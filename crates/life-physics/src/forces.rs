//! Pairwise displacement kernel on a periodic domain
//!
//! The model is overdamped: the "force" a pair exerts in a frame is consumed
//! immediately as a position delta, there is no velocity carried between
//! frames.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::matrix::InteractionMatrix;
use crate::particle::{Particle, ParticleKind};

/// What to do with a pair whose squared separation is zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SingularityGuard {
    /// The pair contributes nothing
    #[default]
    Skip,
    /// Squared separation is floored at `epsilon` before dividing
    Clamp { epsilon: f32 },
}

/// Shortest signed separation `a - b` along one periodic axis.
///
/// Picks whichever of `d`, `d + extent`, `d - extent` has the smallest
/// magnitude. Ties keep the unwrapped difference.
pub fn minimum_image_axis(d: f32, extent: f32) -> f32 {
    let mut best = d;
    for candidate in [d + extent, d - extent] {
        if candidate * candidate < best * best {
            best = candidate;
        }
    }
    best
}

/// Minimum-image separation `a - b`, each axis resolved independently
pub fn minimum_image(a: Vec2, b: Vec2, extent: Vec2) -> Vec2 {
    let d = a - b;
    Vec2::new(
        minimum_image_axis(d.x, extent.x),
        minimum_image_axis(d.y, extent.y),
    )
}

/// Fold a coordinate back into `[0, extent)`
pub fn wrap_axis(x: f32, extent: f32) -> f32 {
    let wrapped = x.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

/// Fold a position back into the domain, axis by axis
pub fn wrap(position: Vec2, extent: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(position.x, extent.x), wrap_axis(position.y, extent.y))
}

/// Everything the pair kernel needs, bundled so it can be shared across
/// worker threads by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceLaw {
    pub coupling_constant: f32,
    pub min_squared_distance: f32,
    pub coefficient_scale: f32,
    pub matrix: InteractionMatrix,
    pub singularity_guard: SingularityGuard,
}

impl Default for ForceLaw {
    fn default() -> Self {
        Self {
            coupling_constant: COUPLING_CONSTANT,
            min_squared_distance: MIN_SQUARED_DISTANCE,
            coefficient_scale: COEFFICIENT_SCALE,
            matrix: InteractionMatrix::default(),
            singularity_guard: SingularityGuard::default(),
        }
    }
}

impl ForceLaw {
    /// Scaled coefficient for a kind-`a` particle displaced by a kind-`b` one
    pub fn coefficient(&self, a: ParticleKind, b: ParticleKind) -> f32 {
        self.matrix.get(a, b) * self.coefficient_scale
    }

    /// Displacement of particle `i` caused by particle `j`.
    ///
    /// speed = coupling / r², applied along the normalized minimum-image
    /// separation and scaled by the coefficient. Negative-coefficient pairs
    /// closer than the cutoff contribute nothing.
    pub fn pair_displacement(
        &self,
        kind_i: ParticleKind,
        pos_i: Vec2,
        kind_j: ParticleKind,
        pos_j: Vec2,
        extent: Vec2,
    ) -> Vec2 {
        let coeff = self.coefficient(kind_i, kind_j);
        if coeff == 0.0 {
            return Vec2::ZERO;
        }

        let d = minimum_image(pos_i, pos_j, extent);
        let r2 = d.length_squared();

        if coeff < 0.0 && r2 < self.min_squared_distance {
            return Vec2::ZERO;
        }

        let r2 = match self.singularity_guard {
            SingularityGuard::Skip if r2 == 0.0 => return Vec2::ZERO,
            SingularityGuard::Skip => r2,
            SingularityGuard::Clamp { epsilon } => r2.max(epsilon),
        };

        let speed = self.coupling_constant / r2;
        d * (coeff * speed / r2.sqrt())
    }

    /// Net displacement of `particles[i]` from every other particle.
    ///
    /// The sum runs over `j` in ascending order, so the result does not depend
    /// on which thread evaluates it.
    pub fn net_displacement(&self, i: usize, particles: &[Particle], extent: Vec2) -> Vec2 {
        let pi = &particles[i];
        let kind_i = pi.kind();
        let pos_i = pi.position();

        let mut delta = Vec2::ZERO;
        for (j, pj) in particles.iter().enumerate() {
            if j == i {
                continue;
            }
            delta += self.pair_displacement(kind_i, pos_i, pj.kind(), pj.position(), extent);
        }
        delta
    }
}

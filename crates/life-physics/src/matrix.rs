//! Kind-by-kind interaction coefficients

use serde::{Deserialize, Serialize};

use crate::constants::{KIND_COUNT, REFERENCE_SIGNS};
use crate::particle::ParticleKind;

/// Signed coefficient table, `M[a][b]` is the multiplier applied when a
/// kind-`a` particle is displaced by a kind-`b` particle.
///
/// The table is not required to be symmetric; `M[a][b] != M[b][a]` is what
/// makes one kind chase another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionMatrix {
    rows: [[f32; KIND_COUNT]; KIND_COUNT],
}

impl InteractionMatrix {
    pub const fn new(rows: [[f32; KIND_COUNT]; KIND_COUNT]) -> Self {
        Self { rows }
    }

    /// Matrix with every entry zero (no interactions)
    pub const fn zeros() -> Self {
        Self::new([[0.0; KIND_COUNT]; KIND_COUNT])
    }

    pub fn get(&self, from: ParticleKind, to: ParticleKind) -> f32 {
        self.rows[from.index()][to.index()]
    }

    pub fn set(&mut self, from: ParticleKind, to: ParticleKind, value: f32) {
        self.rows[from.index()][to.index()] = value;
    }

    pub fn rows(&self) -> &[[f32; KIND_COUNT]; KIND_COUNT] {
        &self.rows
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|c| c.is_finite())
    }

    pub fn is_symmetric(&self) -> bool {
        ParticleKind::ALL.iter().all(|&a| {
            ParticleKind::ALL
                .iter()
                .all(|&b| self.get(a, b) == self.get(b, a))
        })
    }
}

impl Default for InteractionMatrix {
    fn default() -> Self {
        Self::new(REFERENCE_SIGNS)
    }
}

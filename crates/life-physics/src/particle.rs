//! Particle kinds and the GPU-compatible particle record

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::KIND_COUNT;

/// The three particle categories
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Alpha = 0,
    Beta = 1,
    Gamma = 2,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; KIND_COUNT] =
        [ParticleKind::Alpha, ParticleKind::Beta, ParticleKind::Gamma];

    /// Kind assigned to the particle at `index` (`index mod 3`)
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % KIND_COUNT]
    }

    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(ParticleKind::Alpha),
            1 => Some(ParticleKind::Beta),
            2 => Some(ParticleKind::Gamma),
            _ => None,
        }
    }

    /// Row/column of this kind in the interaction matrix
    pub fn index(self) -> usize {
        self as usize
    }
}

/// GPU-compatible particle record
///
/// Laid out to match the WGSL `Particle` struct in the renderer: a `vec2<f32>`
/// position followed by the kind and one word of padding (16 bytes total).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Particle {
    /// Position on the torus, each coordinate in `[0, extent)`
    pub position: [f32; 2],
    /// Particle kind (as u32, maps to `ParticleKind`)
    pub kind: u32,
    pub _padding: u32,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Vec2) -> Self {
        Self {
            position: position.to_array(),
            kind: kind as u32,
            _padding: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    /// Kind tag decoded, `None` if the raw tag is out of range
    pub fn try_kind(&self) -> Option<ParticleKind> {
        ParticleKind::from_u32(self.kind)
    }

    /// Kind of this particle.
    ///
    /// A `World` refuses records whose tag does not decode, so inside a world
    /// the `Alpha` fallback is never taken.
    pub fn kind(&self) -> ParticleKind {
        self.try_kind().unwrap_or(ParticleKind::Alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cycle_by_index() {
        let kinds: Vec<_> = (0..7).map(ParticleKind::for_index).collect();
        assert_eq!(
            kinds,
            vec![
                ParticleKind::Alpha,
                ParticleKind::Beta,
                ParticleKind::Gamma,
                ParticleKind::Alpha,
                ParticleKind::Beta,
                ParticleKind::Gamma,
                ParticleKind::Alpha,
            ]
        );
    }

    #[test]
    fn record_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<Particle>(), 16);
    }

    #[test]
    fn record_keeps_kind_and_position() {
        let p = Particle::new(ParticleKind::Gamma, Vec2::new(3.0, 4.5));
        assert_eq!(p.kind(), ParticleKind::Gamma);
        assert_eq!(p.position(), Vec2::new(3.0, 4.5));
        assert_eq!(ParticleKind::from_u32(7), None);

        let bad = Particle { kind: 7, ..p };
        assert_eq!(bad.try_kind(), None);
        assert_eq!(p.try_kind(), Some(ParticleKind::Gamma));
    }
}

//! World state: the particle population and the parameters it runs under
//!
//! The world never mutates a single particle in place. A frame's new
//! positions are computed into a separate buffer and handed over in one
//! [`World::commit_positions`] call.

use glam::Vec2;
use life_physics::{wrap_axis, ForceLaw, Particle, ParticleKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::SimulationError;
use crate::params::SimulationParams;

#[derive(Debug, Clone)]
pub struct World {
    params: SimulationParams,
    particles: Vec<Particle>,
}

impl World {
    /// Seeded world: `kind = index mod 3`, positions uniform over the domain.
    ///
    /// Draws are consumed in a fixed order (x then y, ascending index), so the
    /// same seed always yields the same population.
    pub fn new(params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;

        let mut rng = SmallRng::seed_from_u64(params.seed);
        let (width, height) = (params.domain_width, params.domain_height);

        let particles: Vec<Particle> = (0..params.particle_count)
            .map(|i| {
                let x = wrap_axis(rng.random_range(0.0..width), width);
                let y = wrap_axis(rng.random_range(0.0..height), height);
                Particle::new(ParticleKind::for_index(i), Vec2::new(x, y))
            })
            .collect();

        log::info!(
            "✓ Seeded {} particles on a {}x{} torus (seed {})",
            particles.len(),
            width,
            height,
            params.seed
        );

        Ok(Self { params, particles })
    }

    /// World with an explicit population.
    ///
    /// `params.particle_count` is replaced by the population size. Every
    /// record must carry a valid kind tag and lie inside the domain.
    pub fn from_particles(
        mut params: SimulationParams,
        particles: Vec<Particle>,
    ) -> Result<Self, SimulationError> {
        params.particle_count = particles.len();
        params.validate()?;

        for (index, p) in particles.iter().enumerate() {
            if p.try_kind().is_none() {
                return Err(SimulationError::InvalidKind {
                    index,
                    kind: p.kind,
                });
            }
            let [x, y] = p.position;
            let inside = |v: f32, extent: f32| (0.0..extent).contains(&v);
            if !inside(x, params.domain_width) || !inside(y, params.domain_height) {
                return Err(SimulationError::ParticleOutOfDomain { index, x, y });
            }
        }

        Ok(Self { params, particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read-only view of every particle, castable with `bytemuck` for upload
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn extent(&self) -> Vec2 {
        self.params.extent()
    }

    pub fn force_law(&self) -> ForceLaw {
        self.params.force_law()
    }

    /// Replace every position at once.
    ///
    /// `next` must hold the same particles (same length, same kinds) with
    /// their new positions. The buffers are swapped, so `next` comes back
    /// holding the previous frame and can be reused as scratch space.
    ///
    /// # Panics
    ///
    /// Panics if `next` has a different length than the world or changes the
    /// kind of any particle.
    pub fn commit_positions(&mut self, next: &mut Vec<Particle>) {
        assert_eq!(
            next.len(),
            self.particles.len(),
            "committed buffer must cover every particle"
        );
        assert!(
            next.iter()
                .zip(&self.particles)
                .all(|(a, b)| a.kind == b.kind),
            "particle kinds are immutable"
        );
        std::mem::swap(&mut self.particles, next);
    }
}

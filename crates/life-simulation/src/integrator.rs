//! Force integrator: one full pairwise sweep per frame
//!
//! Every new position is computed from the committed snapshot of the previous
//! frame and written to a scratch buffer; the world only sees the result once
//! the whole sweep is done.

use glam::Vec2;
use life_physics::{wrap, ForceLaw, Particle};
use rayon::prelude::*;

use crate::world::World;

/// How the outer particle loop is scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sweep {
    Sequential,
    /// Outer loop on the rayon pool
    #[default]
    Parallel,
}

/// Per-frame summary of a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Largest displacement applied this frame
    pub max_displacement: f32,
    /// Particles whose summed displacement overflowed and was dropped
    pub dropped: usize,
}

impl StepStats {
    fn merge(self, other: Self) -> Self {
        Self {
            max_displacement: self.max_displacement.max(other.max_displacement),
            dropped: self.dropped + other.dropped,
        }
    }
}

/// New state of `particles[i]` after one frame
fn advance(law: &ForceLaw, particles: &[Particle], extent: Vec2, i: usize) -> (Particle, StepStats) {
    let current = particles[i];
    let delta = law.net_displacement(i, particles, extent);

    if !delta.is_finite() {
        let stats = StepStats {
            max_displacement: 0.0,
            dropped: 1,
        };
        return (current, stats);
    }

    let position = wrap(current.position() + delta, extent);
    let next = Particle {
        position: position.to_array(),
        ..current
    };
    let stats = StepStats {
        max_displacement: delta.length(),
        dropped: 0,
    };
    (next, stats)
}

pub struct ForceIntegrator {
    sweep: Sweep,
    scratch: Vec<Particle>,
}

impl ForceIntegrator {
    pub fn new(sweep: Sweep) -> Self {
        Self {
            sweep,
            scratch: Vec::new(),
        }
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    /// Compute the next frame without committing it
    pub fn compute(&mut self, world: &World) -> StepStats {
        let particles = world.particles();
        let extent = world.extent();
        let law = world.force_law();

        // Sized to the population so every slot is overwritten below
        self.scratch.clear();
        self.scratch.extend_from_slice(particles);

        match self.sweep {
            Sweep::Sequential => self
                .scratch
                .iter_mut()
                .enumerate()
                .map(|(i, out)| {
                    let (next, stats) = advance(&law, particles, extent, i);
                    *out = next;
                    stats
                })
                .fold(StepStats::default(), StepStats::merge),
            Sweep::Parallel => self
                .scratch
                .par_iter_mut()
                .enumerate()
                .map(|(i, out)| {
                    let (next, stats) = advance(&law, particles, extent, i);
                    *out = next;
                    stats
                })
                .reduce(StepStats::default, StepStats::merge),
        }
    }

    /// Frame computed by the last [`ForceIntegrator::compute`], until it is
    /// committed (after a commit this holds the previous frame)
    pub fn pending(&self) -> &[Particle] {
        &self.scratch
    }

    /// Compute the next frame and commit it to `world`
    pub fn step(&mut self, world: &mut World) -> StepStats {
        let stats = self.compute(world);
        world.commit_positions(&mut self.scratch);
        stats
    }
}

impl Default for ForceIntegrator {
    fn default() -> Self {
        Self::new(Sweep::default())
    }
}

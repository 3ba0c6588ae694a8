//! Simulation driver
//!
//! Owns the world and the integrator, counts frames, and runs the headless
//! loop. Windowed front-ends call [`Simulation::step`] themselves and only
//! read the world between steps.

use crate::control::RunFlag;
use crate::error::SimulationError;
use crate::integrator::{ForceIntegrator, StepStats, Sweep};
use crate::pacer::FramePacer;
use crate::params::SimulationParams;
use crate::world::World;

/// Frames between progress lines at debug level
const LOG_EVERY: u64 = 300;

pub struct Simulation {
    world: World,
    integrator: ForceIntegrator,
    frame: u64,
    run_flag: RunFlag,
}

impl Simulation {
    pub fn new(params: SimulationParams, sweep: Sweep) -> Result<Self, SimulationError> {
        let world = World::new(params)?;
        Ok(Self::from_world(world, sweep))
    }

    pub fn from_world(world: World, sweep: Sweep) -> Self {
        log::info!(
            "Initializing simulation: {} particles, {:?} sweep",
            world.len(),
            sweep
        );
        Self {
            world,
            integrator: ForceIntegrator::new(sweep),
            frame: 0,
            run_flag: RunFlag::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Frames committed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Handle for requesting a stop from input handlers
    pub fn run_flag(&self) -> RunFlag {
        self.run_flag.clone()
    }

    pub fn is_running(&self) -> bool {
        self.run_flag.is_running()
    }

    /// Advance one frame: full sweep, then a single commit
    pub fn step(&mut self) -> StepStats {
        let stats = self.integrator.step(&mut self.world);
        self.frame += 1;

        if stats.dropped > 0 {
            log::warn!(
                "Frame {}: dropped {} non-finite displacements",
                self.frame,
                stats.dropped
            );
        }
        if self.frame % LOG_EVERY == 0 {
            log::debug!(
                "Frame {}: max displacement {:.3}",
                self.frame,
                stats.max_displacement
            );
        }
        stats
    }

    /// Headless loop.
    ///
    /// Runs until the run flag is cleared or `max_frames` frames have been
    /// committed. `on_frame` sees the world after every commit. With a pacer
    /// the loop holds the pacer's cadence, without one it runs flat out.
    /// Returns the number of frames run by this call.
    pub fn run<F>(
        &mut self,
        max_frames: Option<u64>,
        mut pacer: Option<&mut FramePacer>,
        mut on_frame: F,
    ) -> u64
    where
        F: FnMut(&World),
    {
        let start = self.frame;
        while self.is_running() {
            if max_frames.is_some_and(|max| self.frame - start >= max) {
                break;
            }
            self.step();
            on_frame(&self.world);
            if let Some(pacer) = pacer.as_deref_mut() {
                pacer.wait();
            }
        }

        let ran = self.frame - start;
        log::info!("Simulation stopped after {} frames", ran);
        ran
    }
}

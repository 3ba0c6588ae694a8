//! Particle Life
//!
//! Three particle kinds drifting on a torus under a kind-by-kind interaction
//! matrix. Runs in a window by default, or headless with `--headless`.

mod gpu;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use gpu::GpuState;
use life_physics::ParticleKind;
use life_simulation::{FramePacer, RunFlag, Simulation, SimulationParams, Sweep, World};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frames between window title refreshes
const TITLE_EVERY: u64 = 15;

#[derive(Parser, Debug)]
#[command(name = "particle-life", version, about = "Particle life on a toroidal domain")]
struct Args {
    /// TOML file with simulation parameters; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run without opening a window.
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Override the placement seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the particle count.
    #[arg(long)]
    particles: Option<usize>,

    /// Sweep on a single thread.
    #[arg(long)]
    sequential: bool,

    /// Headless only: skip frame pacing and run as fast as possible.
    #[arg(long)]
    unpaced: bool,
}

impl Args {
    fn params(&self) -> Result<SimulationParams> {
        let mut params = match &self.config {
            Some(path) => SimulationParams::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => SimulationParams::default(),
        };
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(count) = self.particles {
            params.particle_count = count;
        }
        Ok(params)
    }

    fn sweep(&self) -> Sweep {
        if self.sequential {
            Sweep::Sequential
        } else {
            Sweep::Parallel
        }
    }
}

fn run_headless(args: &Args, mut simulation: Simulation) {
    let started = Instant::now();
    let mut pacer = (!args.unpaced)
        .then(|| FramePacer::new(simulation.world().params().frame_interval()));

    let frames = simulation.run(args.frames, pacer.as_mut(), |_| {});

    let elapsed = started.elapsed().as_secs_f64();
    log::info!(
        "✓ {} frames in {:.2}s ({:.1} frames/s)",
        frames,
        elapsed,
        frames as f64 / elapsed.max(f64::EPSILON)
    );
    log_centroids(simulation.world());
}

/// Mean position per kind, a quick look at where each species ended up
fn log_centroids(world: &World) {
    for kind in ParticleKind::ALL {
        let (sum, count) = world
            .particles()
            .iter()
            .filter(|p| p.kind() == kind)
            .fold((Vec2::ZERO, 0usize), |(sum, n), p| (sum + p.position(), n + 1));
        if count > 0 {
            let mean = sum / count as f32;
            log::info!("  {:?}: {} particles, mean ({:.1}, {:.1})", kind, count, mean.x, mean.y);
        }
    }
}

struct App {
    simulation: Simulation,
    pacer: FramePacer,
    run_flag: RunFlag,
    max_frames: Option<u64>,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(simulation: Simulation, max_frames: Option<u64>) -> Self {
        let pacer = FramePacer::new(simulation.world().params().frame_interval());
        let run_flag = simulation.run_flag();
        Self {
            simulation,
            pacer,
            run_flag,
            max_frames,
            window: None,
            gpu_state: None,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let params = self.simulation.world().params();
        let window_attributes = Window::default_attributes()
            .with_title("Particle Life")
            .with_inner_size(winit::dpi::LogicalSize::new(
                params.domain_width,
                params.domain_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.simulation.world().extent(),
            self.simulation.world().len(),
        ))?;

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    /// Run one sweep if the pacer has a frame due at `now`.
    ///
    /// Returns whether a frame was committed.
    fn advance_if_due(&mut self, now: Instant) -> bool {
        if !self.run_flag.is_running() || !self.pacer.is_due(now) {
            return false;
        }

        self.simulation.step();
        self.pacer.finish_frame(Instant::now());

        if self.max_frames.is_some_and(|max| self.simulation.frame() >= max) {
            self.run_flag.stop();
        }
        true
    }

    /// Advance when due, then draw what was committed.
    ///
    /// Redraws the system asks for between ticks (expose, resize) only
    /// repaint the current frame.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let advanced = self.advance_if_due(Instant::now());

        if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
            match gpu_state.render(self.simulation.world()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    gpu_state.resize(gpu_state.size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    self.run_flag.stop();
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }

            let frame = self.simulation.frame();
            if advanced && frame % TITLE_EVERY == 0 {
                window.set_title(&format!(
                    "Particle Life - {:.0} FPS ({:.2}ms) - {} particles - frame {}",
                    self.pacer.fps(),
                    self.pacer.average_frame_ms(),
                    self.simulation.world().len(),
                    frame
                ));
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match self.create_window(event_loop) {
                // Device setup is not part of the first frame
                Ok(()) => self.pacer.reset(Instant::now()),
                Err(e) => {
                    self.error = Some(e);
                    self.run_flag.stop();
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Quit requested");
                self.run_flag.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.run_flag.is_running() {
            event_loop.exit();
            return;
        }

        // Input for this iteration has been handled; the next tick may start
        if self.pacer.is_due(Instant::now()) {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame()));
    }
}

fn main() -> Result<()> {
    // RUST_LOG=debug for per-frame summaries
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.params()?;
    let simulation = Simulation::new(params, args.sweep())?;

    if args.headless {
        log::info!("Starting headless particle life...");
        run_headless(&args, simulation);
        return Ok(());
    }

    log::info!("Starting particle life...");
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(simulation, args.frames);
    event_loop.run_app(&mut app)?;

    log::info!("Stopped after {} frames", app.simulation.frame());
    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

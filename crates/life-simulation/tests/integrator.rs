use glam::Vec2;
use life_physics::{InteractionMatrix, Particle, ParticleKind};
use life_simulation::{ForceIntegrator, SimulationParams, Sweep, World};

use ParticleKind::*;

/// World with explicitly placed particles and the reference parameters
fn world_with(particles: &[(ParticleKind, f32, f32)]) -> World {
    world_with_params(SimulationParams::default(), particles)
}

fn world_with_params(params: SimulationParams, particles: &[(ParticleKind, f32, f32)]) -> World {
    let particles = particles
        .iter()
        .map(|&(kind, x, y)| Particle::new(kind, Vec2::new(x, y)))
        .collect();
    World::from_particles(params, particles).unwrap()
}

fn step(world: &mut World) {
    ForceIntegrator::new(Sweep::Sequential).step(world);
}

fn position(world: &World, i: usize) -> Vec2 {
    world.particle(i).unwrap().position()
}

fn assert_close(actual: Vec2, expected: Vec2) {
    assert!(
        (actual - expected).abs().max_element() < 1e-4,
        "expected {expected:?}, got {actual:?}"
    );
}

// ==================================================================================
// Reference scenario
// ==================================================================================

#[test]
fn two_particle_scenario_matches_hand_computed_step() {
    // Alpha <- Beta is +1e4, Beta <- Alpha is -1e4; r² = 100 sits exactly on
    // the cutoff so neither pair is skipped.
    //   Alpha: 1e4 * (5e-3 / 100) * (-10 / 10) = -0.5
    //   Beta: -1e4 * (5e-3 / 100) * ( 10 / 10) = -0.5
    let mut world = world_with(&[(Alpha, 10.0, 500.0), (Beta, 20.0, 500.0)]);
    step(&mut world);

    assert_close(position(&world, 0), Vec2::new(9.5, 500.0));
    assert_close(position(&world, 1), Vec2::new(19.5, 500.0));
}

#[test]
fn asymmetric_matrix_breaks_action_reaction() {
    let mut world = world_with(&[(Alpha, 10.0, 500.0), (Beta, 20.0, 500.0)]);
    let before = [position(&world, 0), position(&world, 1)];
    step(&mut world);

    let da = position(&world, 0) - before[0];
    let db = position(&world, 1) - before[1];
    assert!((da + db).length() > 0.5, "displacements cancelled: {da:?} {db:?}");
}

#[test]
fn symmetric_matrix_gives_equal_and_opposite_displacements() {
    let params = SimulationParams {
        interaction_matrix: InteractionMatrix::new([[1.0; 3]; 3]),
        ..Default::default()
    };
    let mut world = world_with_params(params, &[(Alpha, 100.0, 100.0), (Beta, 130.0, 140.0)]);
    let before = [position(&world, 0), position(&world, 1)];
    step(&mut world);

    let da = position(&world, 0) - before[0];
    let db = position(&world, 1) - before[1];
    assert!(da.length() > 0.0);
    assert!((da + db).length() < 1e-4, "{da:?} vs {db:?}");
}

// ==================================================================================
// Edge cases
// ==================================================================================

#[test]
fn lone_particle_never_moves() {
    let mut world = world_with(&[(Gamma, 321.0, 654.0)]);
    for _ in 0..50 {
        step(&mut world);
    }
    assert_eq!(position(&world, 0), Vec2::new(321.0, 654.0));
}

#[test]
fn negative_pair_inside_cutoff_is_suppressed() {
    // Alpha <- Alpha is -1e4, r² = 25 < 100
    let mut world = world_with(&[(Alpha, 100.0, 100.0), (Alpha, 105.0, 100.0)]);
    step(&mut world);
    assert_eq!(position(&world, 0), Vec2::new(100.0, 100.0));
    assert_eq!(position(&world, 1), Vec2::new(105.0, 100.0));
}

#[test]
fn negative_pair_at_or_beyond_cutoff_interacts() {
    let mut world = world_with(&[(Alpha, 100.0, 100.0), (Alpha, 120.0, 100.0)]);
    step(&mut world);
    // -1e4 * (5e-3 / 400) * (-20 / 20) = +0.125: pulled toward the other
    assert_close(position(&world, 0), Vec2::new(100.125, 100.0));
    assert_close(position(&world, 1), Vec2::new(119.875, 100.0));
}

#[test]
fn separation_wraps_across_the_edge() {
    // Direct separation is 998, wrapped separation is 2.
    //   Alpha <- Beta: 1e4 * (5e-3 / 4) * (2 / 2) = +12.5
    //   Beta <- Alpha: negative and r² = 4 < 100, suppressed
    let mut world = world_with(&[(Alpha, 1.0, 500.0), (Beta, 999.0, 500.0)]);
    step(&mut world);
    assert_close(position(&world, 0), Vec2::new(13.5, 500.0));
    assert_eq!(position(&world, 1), Vec2::new(999.0, 500.0));
}

#[test]
fn positions_wrap_past_the_origin() {
    let mut world = world_with(&[(Alpha, 0.25, 500.0), (Beta, 10.25, 500.0)]);
    step(&mut world);
    assert_close(position(&world, 0), Vec2::new(999.75, 500.0));
    assert_close(position(&world, 1), Vec2::new(9.75, 500.0));
}

#[test]
fn coincident_particles_stay_finite() {
    let mut world = world_with(&[(Alpha, 400.0, 400.0), (Beta, 400.0, 400.0)]);
    step(&mut world);
    assert_eq!(position(&world, 0), Vec2::new(400.0, 400.0));
    assert_eq!(position(&world, 1), Vec2::new(400.0, 400.0));
}

#[test]
fn overflowing_displacement_is_dropped() {
    // Alpha <- Beta: 3e38 * (5e-3 / ~1e-6) overflows f32 to infinity.
    // Beta <- Alpha is negative and inside the cutoff, so it is skipped.
    let params = SimulationParams {
        coefficient_scale: 3.0e38,
        ..Default::default()
    };
    let mut world = world_with_params(params, &[(Alpha, 10.0, 500.0), (Beta, 10.001, 500.0)]);
    let stats = ForceIntegrator::new(Sweep::Sequential).step(&mut world);

    assert_eq!(stats.dropped, 1);
    assert_eq!(stats.max_displacement, 0.0);
    assert_eq!(position(&world, 0), Vec2::new(10.0, 500.0));
    assert_eq!(position(&world, 1), Vec2::new(10.001, 500.0));
    assert!(world.particles().iter().all(|p| p.position().is_finite()));
}

#[test]
fn compute_leaves_world_untouched_until_commit() {
    let world = world_with(&[(Alpha, 10.0, 500.0), (Beta, 20.0, 500.0)]);
    let mut integrator = ForceIntegrator::new(Sweep::Parallel);
    let stats = integrator.compute(&world);

    assert_eq!(position(&world, 0), Vec2::new(10.0, 500.0));
    assert_close(integrator.pending()[0].position(), Vec2::new(9.5, 500.0));
    assert!((stats.max_displacement - 0.5).abs() < 1e-4);
    assert_eq!(stats.dropped, 0);
}

// ==================================================================================
// Whole-population properties
// ==================================================================================

#[test]
fn positions_stay_inside_domain() {
    let params = SimulationParams {
        particle_count: 200,
        ..Default::default()
    };
    let (width, height) = (params.domain_width, params.domain_height);
    let mut world = World::new(params).unwrap();
    let mut integrator = ForceIntegrator::default();

    for _ in 0..100 {
        integrator.step(&mut world);
        for p in world.particles() {
            let [x, y] = p.position;
            assert!((0.0..width).contains(&x), "x = {x}");
            assert!((0.0..height).contains(&y), "y = {y}");
        }
    }
}

#[test]
fn kinds_survive_every_commit() {
    let params = SimulationParams {
        particle_count: 30,
        ..Default::default()
    };
    let mut world = World::new(params).unwrap();
    let mut integrator = ForceIntegrator::default();
    for _ in 0..10 {
        integrator.step(&mut world);
    }
    for (i, p) in world.particles().iter().enumerate() {
        assert_eq!(p.kind(), ParticleKind::for_index(i));
    }
}

#[test]
fn parallel_and_sequential_sweeps_agree_bit_for_bit() {
    let params = SimulationParams {
        particle_count: 150,
        ..Default::default()
    };
    let mut sequential = World::new(params.clone()).unwrap();
    let mut parallel = World::new(params).unwrap();
    let mut seq = ForceIntegrator::new(Sweep::Sequential);
    let mut par = ForceIntegrator::new(Sweep::Parallel);

    for _ in 0..25 {
        seq.step(&mut sequential);
        par.step(&mut parallel);
    }

    let bits = |w: &World| -> Vec<[u32; 2]> {
        w.particles()
            .iter()
            .map(|p| [p.position[0].to_bits(), p.position[1].to_bits()])
            .collect()
    };
    assert_eq!(bits(&sequential), bits(&parallel));
}

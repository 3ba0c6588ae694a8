use glam::Vec2;
use life_physics::{Particle, ParticleKind};
use life_simulation::{ForceIntegrator, SimulationError, SimulationParams, World};

fn small_params(particle_count: usize, seed: u64) -> SimulationParams {
    SimulationParams {
        particle_count,
        seed,
        ..Default::default()
    }
}

fn position_bits(world: &World) -> Vec<[u32; 2]> {
    world
        .particles()
        .iter()
        .map(|p| [p.position[0].to_bits(), p.position[1].to_bits()])
        .collect()
}

#[test]
fn seeded_world_assigns_kinds_by_index() {
    let world = World::new(small_params(10, 1)).unwrap();
    assert_eq!(world.len(), 10);
    for (i, p) in world.particles().iter().enumerate() {
        assert_eq!(p.kind(), ParticleKind::for_index(i));
    }
}

#[test]
fn seeded_positions_cover_the_domain() {
    let world = World::new(SimulationParams::default()).unwrap();
    assert_eq!(world.len(), 600);

    let (mut min, mut max) = (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN));
    for p in world.particles() {
        let pos = p.position();
        assert!(pos.x >= 0.0 && pos.x < 1000.0);
        assert!(pos.y >= 0.0 && pos.y < 1000.0);
        min = min.min(pos);
        max = max.max(pos);
    }
    // 600 uniform draws leave no large empty band along either axis
    assert!(min.max_element() < 50.0, "min {min:?}");
    assert!(max.min_element() > 950.0, "max {max:?}");
}

#[test]
fn same_seed_same_population() {
    let a = World::new(small_params(64, 99)).unwrap();
    let b = World::new(small_params(64, 99)).unwrap();
    assert_eq!(position_bits(&a), position_bits(&b));

    let c = World::new(small_params(64, 100)).unwrap();
    assert_ne!(position_bits(&a), position_bits(&c));
}

#[test]
fn same_seed_same_trajectory() {
    let mut a = World::new(small_params(90, 5)).unwrap();
    let mut b = World::new(small_params(90, 5)).unwrap();
    let mut ia = ForceIntegrator::default();
    let mut ib = ForceIntegrator::default();

    for _ in 0..20 {
        ia.step(&mut a);
        ib.step(&mut b);
        assert_eq!(position_bits(&a), position_bits(&b));
    }
}

#[test]
fn explicit_population_overrides_count() {
    let particles = vec![
        Particle::new(ParticleKind::Beta, Vec2::new(1.0, 2.0)),
        Particle::new(ParticleKind::Beta, Vec2::new(3.0, 4.0)),
    ];
    let world = World::from_particles(SimulationParams::default(), particles).unwrap();
    assert_eq!(world.len(), 2);
    assert_eq!(world.params().particle_count, 2);
    assert_eq!(world.particle(1).unwrap().position(), Vec2::new(3.0, 4.0));
    assert!(world.particle(2).is_none());
}

#[test]
fn unknown_kind_tags_are_rejected() {
    let rogue = Particle {
        kind: 7,
        ..Particle::new(ParticleKind::Alpha, Vec2::new(10.0, 500.0))
    };
    let particles = vec![
        Particle::new(ParticleKind::Beta, Vec2::new(20.0, 500.0)),
        rogue,
    ];
    let err = World::from_particles(SimulationParams::default(), particles).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidKind { index: 1, kind: 7 }
    ));
}

#[test]
fn every_particle_in_a_world_has_a_valid_kind() {
    let world = World::new(small_params(30, 8)).unwrap();
    assert!(world.particles().iter().all(|p| p.try_kind().is_some()));
}

#[test]
fn invalid_parameters_fail_before_any_frame() {
    let params = SimulationParams {
        domain_width: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        World::new(params),
        Err(SimulationError::InvalidParams(_))
    ));

    let empty = World::from_particles(SimulationParams::default(), Vec::new());
    assert!(matches!(empty, Err(SimulationError::InvalidParams(_))));
}

#[test]
fn commit_swaps_in_the_whole_frame() {
    let mut world = World::new(small_params(4, 3)).unwrap();
    let previous: Vec<Particle> = world.particles().to_vec();

    let mut next: Vec<Particle> = previous
        .iter()
        .map(|p| Particle::new(p.kind(), Vec2::new(7.0, 8.0)))
        .collect();
    world.commit_positions(&mut next);

    assert!(world
        .particles()
        .iter()
        .all(|p| p.position() == Vec2::new(7.0, 8.0)));
    // The caller gets the previous frame back as scratch space
    assert_eq!(next, previous);
}

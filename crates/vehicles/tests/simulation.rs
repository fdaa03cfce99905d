use engine_core::{BehaviorTag, Category, Vec3};
use vehicles::{RecordingScene, SimConfig, SimError, SimEvent, VehicleSimulation};

fn config() -> SimConfig {
    SimConfig {
        texture_size: 32,
        scale_cell_size: 16,
        ..Default::default()
    }
}

fn populated(seed: u64) -> VehicleSimulation<RecordingScene> {
    let mut sim = VehicleSimulation::with_seed(RecordingScene::default(), config(), seed);
    sim.populate().expect("starting population builds");
    sim
}

#[test]
fn populate_places_creatures_and_ships() {
    let sim = populated(1);
    let registry = sim.registry();
    assert_eq!(registry.creatures().len(), 4);
    assert_eq!(registry.vehicles().len(), 5);
    assert_eq!(sim.scene().len(), 9);

    let roles: Vec<String> = registry
        .creatures()
        .iter()
        .map(|&id| registry.instance(id).unwrap().role.clone())
        .collect();
    assert_eq!(roles, ["T-Rex", "Velociraptor", "Triceratops", "T-Rex"]);

    let first = registry.transform(registry.creatures()[0]).unwrap();
    assert_eq!(first.position, Vec3::new(150.0, 2.0, 100.0));
    let cruiser = registry.transform(registry.vehicles()[2]).unwrap();
    assert_eq!(cruiser.position, Vec3::new(0.0, 60.0, -300.0));

    // The T-Rex uses the detailed build.
    let rex = registry.instance(registry.creatures()[0]).unwrap();
    assert!(rex.node.find("tail_7").is_some());
}

#[test]
fn populate_twice_duplicates() {
    let mut sim = populated(2);
    sim.populate().unwrap();
    assert_eq!(sim.registry().len(), 18);
}

#[test]
fn behavior_is_set_and_permitted_after_interval() {
    let mut sim = populated(3);
    for _ in 0..601 {
        sim.update(1.0 / 60.0);
    }
    let registry = sim.registry();
    for &id in registry.creatures() {
        let instance = registry.instance(id).unwrap();
        let tag = instance.behavior.current.expect("selected after 10 s");
        assert!(instance.descriptor.permits(tag), "{} chose {}", instance.role, tag);
    }
    for &id in registry.vehicles() {
        assert!(registry.instance(id).unwrap().behavior.current.is_none());
    }
    sim.verify().unwrap();

    let changes = sim
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::BehaviorChanged { .. }))
        .count();
    assert_eq!(changes, 4);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn nothing_moves_before_first_selection() {
    let mut sim = populated(4);
    let before: Vec<_> = sim.registry().model_matrices();
    for _ in 0..60 {
        sim.update(0.1);
    }
    let after: Vec<_> = sim.registry().model_matrices();
    assert_eq!(before.len(), after.len());
    for ((_, a), (_, b)) in before.iter().zip(after.iter()) {
        assert_eq!(a.model, b.model);
    }
}

#[test]
fn same_seed_same_trajectories() {
    let run = |seed| {
        let mut sim = populated(seed);
        for _ in 0..1500 {
            sim.update(1.0 / 30.0);
        }
        sim.registry()
            .creatures()
            .iter()
            .map(|&id| sim.registry().transform(id).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn forced_foreign_behavior_is_flagged() {
    let mut sim = populated(5);
    let raptor = sim.registry().creatures()[1];
    sim.registry().instance_mut(raptor).unwrap().behavior.current = Some(BehaviorTag::Hunt);
    match sim.verify() {
        Err(SimError::ForeignBehavior { id, tag, .. }) => {
            assert_eq!(id, raptor);
            assert_eq!(tag, BehaviorTag::Hunt);
        }
        other => panic!("expected a foreign behavior, got {other:?}"),
    }
    assert!(matches!(
        sim.set_behavior(raptor, BehaviorTag::Graze),
        Err(SimError::ForeignBehavior { .. })
    ));
}

#[test]
fn interaction_radius_is_strict() {
    let sim = populated(6);
    // First scout hovers at (200, 40, -200).
    let edge = Vec3::new(220.0, 40.0, -200.0);
    assert!(sim.nearest_vehicle(edge, Category::ScriptedVehicle).is_none());
    let inside = Vec3::new(219.99, 40.0, -200.0);
    let handle = sim.nearest_vehicle(inside, Category::ScriptedVehicle).unwrap();
    assert_eq!(handle.role, "Scout");
    assert_eq!(handle.category, Category::ScriptedVehicle);
}

#[test]
fn caller_steers_the_nearest_ship() {
    let sim = populated(7);
    let handle = sim
        .nearest_vehicle(Vec3::new(0.0, 58.0, -295.0), Category::ScriptedVehicle)
        .unwrap();
    assert_eq!(handle.role, "Cruiser");
    sim.registry().transform_mut(handle.id).unwrap().position.y += 10.0;
    assert_eq!(sim.registry().transform(handle.id).unwrap().position.y, 70.0);
}

#[test]
fn remove_detaches_from_scene() {
    let mut sim = populated(8);
    let rex = sim.registry().creatures()[0];
    sim.remove(rex).unwrap();
    assert!(!sim.scene().contains(rex));
    assert_eq!(sim.scene().removed(), 1);
    assert_eq!(sim.registry().creatures().len(), 3);
    assert!(matches!(sim.remove(rex), Err(SimError::UnknownVehicle(_))));

    // The rest keep running.
    for _ in 0..700 {
        sim.update(1.0 / 60.0);
    }
    sim.verify().unwrap();
}

#[test]
fn hunting_rex_turns_its_head_to_the_prey() {
    let mut sim = VehicleSimulation::with_seed(RecordingScene::default(), config(), 9);
    let rex = sim
        .spawn(engine_core::descriptor("T-Rex").unwrap(), Vec3::ZERO, 1.0)
        .unwrap();
    sim.spawn(
        engine_core::descriptor("Triceratops").unwrap(),
        Vec3::new(50.0, 0.0, 0.0),
        1.0,
    )
    .unwrap();
    sim.set_behavior(rex, BehaviorTag::Hunt).unwrap();

    sim.update(0.1);

    let registry = sim.registry();
    let transform = registry.transform(rex).unwrap();
    let instance = registry.instance(rex).unwrap();
    let head_local = instance.node.find("head").unwrap().transform.position;
    let head_dir = transform.transform_point(head_local) - transform.position;
    assert!(head_dir.x > 0.0, "head offset {head_dir:?}, prey at +X");
    assert!(head_dir.z.abs() < 1e-4);
}

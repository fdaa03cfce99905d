//! dinosim - headless run of the dinosaur and spaceship population.

use anyhow::Result;
use engine_core::{BehaviorTag, Category, Vec3};
use vehicles::{AnimationClip, RecordingScene, SimConfig, SimEvent, VehicleSimulation};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SimConfig::load();
    log::info!(
        "Starting dinosim: {} frames at {:.4}s, seed {:?}",
        config.demo_frames,
        config.demo_delta,
        config.seed
    );

    let mut sim = VehicleSimulation::new(RecordingScene::default(), config.clone());
    sim.populate()?;

    let creatures = sim.registry().creatures().to_vec();
    for id in creatures {
        for tag in BehaviorTag::ALL {
            sim.bind_animation(id, tag, AnimationClip::new(tag.name(), 2.0))?;
        }
    }

    let mut changes = 0;
    let mut sounds = 0;
    for _ in 0..config.demo_frames {
        sim.update(config.demo_delta);
        for event in sim.drain_events() {
            match event {
                SimEvent::BehaviorChanged { .. } => changes += 1,
                SimEvent::SoundTriggered { .. } => sounds += 1,
            }
            log::info!("{}", event);
        }
    }
    sim.verify()?;

    for &id in sim.registry().creatures() {
        if let (Some(transform), Some(instance)) = (sim.registry().transform(id), sim.registry().instance(id)) {
            let p = transform.position;
            log::info!(
                "{} {:<12} at ({:7.1}, {:5.1}, {:7.1}) doing {}",
                id,
                instance.role,
                p.x,
                p.y,
                p.z,
                instance.behavior.current.map_or("nothing", |t| t.name())
            );
        }
    }

    // A player standing next to the first scout takes control of it.
    let player = Vec3::new(195.0, 40.0, -195.0);
    match sim.nearest_vehicle(player, Category::ScriptedVehicle) {
        Some(handle) => {
            log::info!("Player can board {} {} ({:.1} away)", handle.role, handle.id, handle.distance);
            if let Some(mut transform) = sim.registry().transform_mut(handle.id) {
                transform.translate(Vec3::new(0.0, 5.0, 0.0));
            }
        }
        None => log::info!("No vehicle in reach of the player"),
    }

    log::info!(
        "Done after {:.1}s: {} behavior changes, {} sounds, {} nodes in scene",
        sim.clock().elapsed_seconds(),
        changes,
        sounds,
        sim.scene().len()
    );
    Ok(())
}

//! Facade tying the registry, behavior controller and scene together.

use engine_core::{BehaviorTag, Category, SimClock, Transform, TypeDescriptor, Vec3};
use procgen::ModelFactory;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::behavior::{BehaviorController, BehaviorSettings};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::instance::{AnimationClip, SoundCue, VehicleId};
use crate::population::{starting_population, SpawnPlan};
use crate::proximity;
use crate::registry::VehicleRegistry;
use crate::scene::SceneGraph;

/// Instance found by a proximity query.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleHandle {
    pub id: VehicleId,
    pub category: Category,
    pub role: String,
    /// Copy at query time; use `transform_mut` to steer it.
    pub transform: Transform,
    pub distance: f32,
}

/// Creatures and ships living in a host scene.
pub struct VehicleSimulation<S: SceneGraph> {
    scene: S,
    registry: VehicleRegistry,
    controller: BehaviorController,
    factory: ModelFactory,
    clock: SimClock,
    rng: StdRng,
    config: SimConfig,
    events: Vec<SimEvent>,
}

impl<S: SceneGraph> VehicleSimulation<S> {
    /// Seeded from `config.seed`, or from entropy when unset.
    pub fn new(scene: S, config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(scene, config, rng)
    }

    pub fn with_seed(scene: S, config: SimConfig, seed: u64) -> Self {
        Self::with_rng(scene, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scene: S, config: SimConfig, mut rng: StdRng) -> Self {
        let factory = ModelFactory::new(rng.gen(), config.scale_pattern());
        Self {
            scene,
            registry: VehicleRegistry::new(),
            controller: BehaviorController::new(BehaviorSettings::from(&config)),
            factory,
            clock: SimClock::new(),
            rng,
            config,
            events: Vec::new(),
        }
    }

    /// Spawn the starting creatures and ships. Calling it again adds another set.
    pub fn populate(&mut self) -> Result<(), SimError> {
        for plan in starting_population() {
            self.spawn_plan(&plan)?;
        }
        log::info!(
            "Populated {} creatures and {} vehicles",
            self.registry.creatures().len(),
            self.registry.vehicles().len()
        );
        Ok(())
    }

    /// Build the standard model for `descriptor` and place it at `position`.
    pub fn spawn(&mut self, descriptor: TypeDescriptor, position: Vec3, scale: f32) -> Result<VehicleId, SimError> {
        self.spawn_plan(&SpawnPlan {
            descriptor,
            position,
            scale,
            detailed: false,
        })
    }

    pub fn spawn_plan(&mut self, plan: &SpawnPlan) -> Result<VehicleId, SimError> {
        let node = if plan.detailed {
            self.factory.build_detailed(&plan.descriptor, plan.scale)?
        } else {
            self.factory.build(&plan.descriptor, plan.scale)?
        };
        let descriptor = Arc::new(plan.descriptor.clone());
        let category = descriptor.category;
        let id = self
            .registry
            .spawn(descriptor, node, Transform::from_position(plan.position));

        if category == Category::Creature {
            let cue = SoundCue::new(
                format!("{}-call", plan.descriptor.name.to_lowercase()),
                self.config.sound_chance,
            );
            self.registry.set_sound(id, cue)?;
        }
        if let Some(instance) = self.registry.instance(id) {
            self.scene.insert(id, &instance.node);
        }
        Ok(id)
    }

    /// Detach from the scene and drop the instance.
    pub fn remove(&mut self, id: VehicleId) -> Result<(), SimError> {
        let instance = self.registry.remove(id)?;
        self.scene.remove(id);
        log::debug!("Removed {} ({})", id, instance.role);
        Ok(())
    }

    /// Advance the clock by `delta` seconds and run one behavior frame.
    pub fn update(&mut self, delta: f32) {
        self.clock.advance(delta);
        self.controller.update(
            &mut self.registry,
            self.clock.elapsed_seconds(),
            delta,
            &mut self.rng,
            &mut self.events,
        );
    }

    /// Nearest instance of `category` strictly inside the interaction radius.
    pub fn nearest_vehicle(&self, position: Vec3, category: Category) -> Option<VehicleHandle> {
        let (id, distance) = proximity::nearest_within(
            self.registry.positions(category),
            position,
            None,
            self.config.interaction_radius,
        )?;
        let transform = self.registry.transform(id)?;
        let role = self.registry.instance(id)?.role.clone();
        Some(VehicleHandle {
            id,
            category,
            role,
            transform,
            distance,
        })
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn verify(&self) -> Result<(), SimError> {
        self.controller.verify(&self.registry)
    }

    pub fn set_behavior(&mut self, id: VehicleId, tag: BehaviorTag) -> Result<(), SimError> {
        self.controller.set_behavior(&mut self.registry, id, tag)
    }

    pub fn bind_animation(&mut self, id: VehicleId, tag: BehaviorTag, clip: AnimationClip) -> Result<(), SimError> {
        self.registry.bind_animation(id, tag, clip)
    }

    pub fn set_sound(&mut self, id: VehicleId, cue: SoundCue) -> Result<(), SimError> {
        self.registry.set_sound(id, cue)
    }

    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut VehicleRegistry {
        &mut self.registry
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

//! Creature behavior state machine.
//!
//! Every `interval` seconds a creature re-rolls its behavior uniformly from the
//! species' permitted set, then the current behavior drives its movement each frame.

use engine_core::{BehaviorTag, Category, Vec3};
use rand::Rng;
use std::f32::consts::PI;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::instance::{VehicleId, VehicleInstance};
use crate::proximity;
use crate::registry::VehicleRegistry;

/// Tuning for the behavior controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorSettings {
    /// Seconds between re-rolls; a re-roll happens once the timer strictly exceeds it.
    pub interval: f32,
    pub patrol_speed: f32,
    pub patrol_frequency: f32,
    pub graze_turn_chance: f32,
    /// Full width of a graze turn, radians.
    pub graze_turn_range: f32,
    pub graze_speed_factor: f32,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self::from(&SimConfig::default())
    }
}

impl From<&SimConfig> for BehaviorSettings {
    fn from(config: &SimConfig) -> Self {
        Self {
            interval: config.behavior_interval,
            patrol_speed: config.patrol_speed,
            patrol_frequency: config.patrol_frequency,
            graze_turn_chance: config.graze_turn_chance,
            graze_turn_range: PI * 0.25,
            graze_speed_factor: config.graze_speed_factor,
        }
    }
}

/// Drives behavior selection and movement for every creature.
pub struct BehaviorController {
    settings: BehaviorSettings,
}

impl BehaviorController {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self { settings }
    }

    /// Advance every instance by `delta`. `elapsed` is the simulation time after
    /// this frame's delta has been added.
    pub fn update<R: Rng + ?Sized>(
        &self,
        registry: &mut VehicleRegistry,
        elapsed: f32,
        delta: f32,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        let creatures = registry.creatures().to_vec();
        for id in creatures {
            if let Some(tag) = self.tick(registry, id, delta, rng, events) {
                self.execute(registry, id, tag, elapsed, delta, rng);
            }
        }

        // Ships have no state machine; only their clips run.
        for &id in registry.vehicles() {
            if let Some(mut instance) = registry.instance_mut(id) {
                instance.animations.advance(delta);
            }
        }
    }

    /// Advance the re-roll timer and clips. Returns the behavior to run this frame.
    fn tick<R: Rng + ?Sized>(
        &self,
        registry: &mut VehicleRegistry,
        id: VehicleId,
        delta: f32,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) -> Option<BehaviorTag> {
        let (transform, instance) = registry.parts_mut(id)?;
        instance.behavior.time_since_change += delta;
        if instance.behavior.time_since_change > self.settings.interval {
            instance.behavior.time_since_change = 0.0;
            reroll(id, transform.position, instance, rng, events);
        }
        instance.animations.advance(delta);
        instance.behavior.current
    }

    fn execute<R: Rng + ?Sized>(
        &self,
        registry: &mut VehicleRegistry,
        id: VehicleId,
        tag: BehaviorTag,
        elapsed: f32,
        delta: f32,
        rng: &mut R,
    ) {
        match tag {
            BehaviorTag::Patrol => {
                let phase = elapsed * self.settings.patrol_frequency;
                let heading = Vec3::new(phase.cos(), 0.0, phase.sin());
                if let Some(mut transform) = registry.transform_mut(id) {
                    transform.position += heading * delta * self.settings.patrol_speed;
                }
            }
            BehaviorTag::Hunt => {
                let Some(position) = registry.transform(id).map(|t| t.position) else {
                    return;
                };
                let target = proximity::nearest(registry.positions(Category::Creature), position, Some(id))
                    .and_then(|(target, _)| registry.transform(target))
                    .map(|t| t.position);
                let Some(target) = target else {
                    return;
                };
                let Some((transform, instance)) = registry.parts_mut(id) else {
                    return;
                };
                let step = (target - transform.position).normalize_or_zero();
                transform.position += step * delta * instance.motion.speed;
                transform.face_towards(target, Vec3::Y);
            }
            BehaviorTag::Graze => {
                let Some((transform, instance)) = registry.parts_mut(id) else {
                    return;
                };
                if rng.gen::<f32>() < self.settings.graze_turn_chance {
                    let turn = (rng.gen::<f32>() - 0.5) * self.settings.graze_turn_range;
                    transform.rotate_y(turn);
                }
                let forward = transform.forward();
                transform.position +=
                    forward * delta * instance.motion.speed * self.settings.graze_speed_factor;
            }
            BehaviorTag::Pack => {}
            BehaviorTag::Stalk => {}
            BehaviorTag::Defend => {}
        }
    }

    /// First instance whose behavior its species does not permit.
    pub fn verify(&self, registry: &VehicleRegistry) -> Result<(), SimError> {
        for &id in registry.creatures().iter().chain(registry.vehicles()) {
            let Some(instance) = registry.instance(id) else {
                continue;
            };
            if instance.behavior_is_permitted() {
                continue;
            }
            if let Some(tag) = instance.behavior.current {
                return Err(SimError::ForeignBehavior {
                    id,
                    species: instance.descriptor.name.clone(),
                    tag,
                });
            }
        }
        Ok(())
    }

    /// Switch an instance to `tag` now and restart its timer.
    pub fn set_behavior(
        &self,
        registry: &mut VehicleRegistry,
        id: VehicleId,
        tag: BehaviorTag,
    ) -> Result<(), SimError> {
        let mut instance = registry.instance_mut(id).ok_or(SimError::UnknownVehicle(id))?;
        if !instance.descriptor.permits(tag) {
            return Err(SimError::ForeignBehavior {
                id,
                species: instance.descriptor.name.clone(),
                tag,
            });
        }
        instance.behavior.current = Some(tag);
        instance.behavior.time_since_change = 0.0;
        instance.animations.switch_to(tag);
        Ok(())
    }
}

/// Pick a new behavior, swap clips and maybe play the sound cue.
/// Draws: behavior index, then the sound roll.
fn reroll<R: Rng + ?Sized>(
    id: VehicleId,
    position: Vec3,
    instance: &mut VehicleInstance,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) {
    let permitted = &instance.descriptor.behaviors;
    if permitted.is_empty() {
        return;
    }
    let tag = permitted[rng.gen_range(0..permitted.len())];
    let from = instance.behavior.current.replace(tag);
    instance.animations.switch_to(tag);
    log::debug!("{} ({}) {:?} -> {}", id, instance.role, from, tag);
    events.push(SimEvent::BehaviorChanged { id, from, to: tag });

    let roll: f32 = rng.gen();
    if let Some(cue) = &instance.sound {
        if roll < cue.chance {
            log::trace!("{} plays '{}'", id, cue.name);
            events.push(SimEvent::SoundTriggered {
                id,
                cue: cue.name.clone(),
                position,
            });
        }
    }
}

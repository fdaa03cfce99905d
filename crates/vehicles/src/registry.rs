//! Live creatures and vehicles, partitioned by category.

use engine_core::{BehaviorTag, Category, Transform, TransformRaw, TypeDescriptor, World};
use glam::Vec3;
use hecs::{Ref, RefMut};
use procgen::VisualNode;
use std::sync::Arc;

use crate::error::SimError;
use crate::instance::{AnimationClip, SoundCue, VehicleId, VehicleInstance};

/// Owns every instance. Each entity carries `(Transform, VehicleInstance)`;
/// per-category id lists keep insertion order for scans.
#[derive(Default)]
pub struct VehicleRegistry {
    world: World,
    creatures: Vec<VehicleId>,
    vehicles: Vec<VehicleId>,
}

impl VehicleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one instance. The caller attaches `node` to its scene.
    pub fn spawn(
        &mut self,
        descriptor: Arc<TypeDescriptor>,
        node: VisualNode,
        transform: Transform,
    ) -> VehicleId {
        let category = descriptor.category;
        let instance = VehicleInstance::new(descriptor, node);
        let id = VehicleId(self.world.spawn((transform, instance)));
        match category {
            Category::Creature => self.creatures.push(id),
            Category::ScriptedVehicle => self.vehicles.push(id),
        }
        id
    }

    /// Take an instance out of the registry.
    pub fn remove(&mut self, id: VehicleId) -> Result<VehicleInstance, SimError> {
        let instance = self
            .world
            .remove_one::<VehicleInstance>(id.0)
            .map_err(|_| SimError::UnknownVehicle(id))?;
        self.world.despawn(id.0).ok();
        match instance.category() {
            Category::Creature => self.creatures.retain(|&c| c != id),
            Category::ScriptedVehicle => self.vehicles.retain(|&v| v != id),
        }
        Ok(instance)
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.world.contains(id.0)
    }

    pub fn creatures(&self) -> &[VehicleId] {
        &self.creatures
    }

    pub fn vehicles(&self) -> &[VehicleId] {
        &self.vehicles
    }

    pub fn ids(&self, category: Category) -> &[VehicleId] {
        match category {
            Category::Creature => &self.creatures,
            Category::ScriptedVehicle => &self.vehicles,
        }
    }

    pub fn len(&self) -> usize {
        self.creatures.len() + self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the world transform.
    pub fn transform(&self, id: VehicleId) -> Option<Transform> {
        self.world.get::<&Transform>(id.0).ok().map(|t| *t)
    }

    pub fn transform_mut(&self, id: VehicleId) -> Option<RefMut<'_, Transform>> {
        self.world.get::<&mut Transform>(id.0).ok()
    }

    pub fn instance(&self, id: VehicleId) -> Option<Ref<'_, VehicleInstance>> {
        self.world.get::<&VehicleInstance>(id.0).ok()
    }

    pub fn instance_mut(&self, id: VehicleId) -> Option<RefMut<'_, VehicleInstance>> {
        self.world.get::<&mut VehicleInstance>(id.0).ok()
    }

    /// Both components of one instance, borrowed together.
    pub(crate) fn parts_mut(&mut self, id: VehicleId) -> Option<(&mut Transform, &mut VehicleInstance)> {
        self.world
            .query_one_mut::<(&mut Transform, &mut VehicleInstance)>(id.0)
            .ok()
    }

    /// Live positions of one category, in insertion order.
    pub fn positions(&self, category: Category) -> impl Iterator<Item = (VehicleId, Vec3)> + '_ {
        self.ids(category).iter().filter_map(move |&id| {
            self.world
                .get::<&Transform>(id.0)
                .ok()
                .map(|t| (id, t.position))
        })
    }

    /// Model matrices for upload, creatures first.
    pub fn model_matrices(&self) -> Vec<(VehicleId, TransformRaw)> {
        self.creatures
            .iter()
            .chain(self.vehicles.iter())
            .filter_map(|&id| self.transform(id).map(|t| (id, TransformRaw::from(&t))))
            .collect()
    }

    pub fn bind_animation(
        &mut self,
        id: VehicleId,
        tag: BehaviorTag,
        clip: AnimationClip,
    ) -> Result<(), SimError> {
        let mut instance = self.instance_mut(id).ok_or(SimError::UnknownVehicle(id))?;
        instance.animations.bind(tag, clip);
        Ok(())
    }

    pub fn set_sound(&mut self, id: VehicleId, cue: SoundCue) -> Result<(), SimError> {
        let mut instance = self.instance_mut(id).ok_or(SimError::UnknownVehicle(id))?;
        instance.sound = Some(cue);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{list_descriptors, vehicle_descriptors};

    fn spawn_at(registry: &mut VehicleRegistry, descriptor: &TypeDescriptor, x: f32) -> VehicleId {
        registry.spawn(
            Arc::new(descriptor.clone()),
            VisualNode::group(descriptor.name.clone()),
            Transform::from_position(Vec3::new(x, 0.0, 0.0)),
        )
    }

    #[test]
    fn spawn_partitions_by_category() {
        let creatures = list_descriptors();
        let ships = vehicle_descriptors();
        let mut registry = VehicleRegistry::new();
        let a = spawn_at(&mut registry, &creatures[0], 0.0);
        let s = spawn_at(&mut registry, &ships[0], 1.0);
        let b = spawn_at(&mut registry, &creatures[1], 2.0);

        assert_eq!(registry.creatures(), &[a, b]);
        assert_eq!(registry.vehicles(), &[s]);
        assert_eq!(registry.len(), 3);
        let order: Vec<_> = registry.model_matrices().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b, s]);
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let creatures = list_descriptors();
        let mut registry = VehicleRegistry::new();
        let ids: Vec<_> = (0..3)
            .map(|i| spawn_at(&mut registry, &creatures[i], i as f32))
            .collect();

        let removed = registry.remove(ids[1]).unwrap();
        assert_eq!(removed.role, "Velociraptor");
        assert_eq!(registry.creatures(), &[ids[0], ids[2]]);
        assert!(!registry.contains(ids[1]));
        assert!(registry.transform(ids[1]).is_none());
        assert!(matches!(registry.remove(ids[1]), Err(SimError::UnknownVehicle(_))));
    }

    #[test]
    fn transform_mut_is_visible_to_positions() {
        let creatures = list_descriptors();
        let mut registry = VehicleRegistry::new();
        let id = spawn_at(&mut registry, &creatures[0], 0.0);
        registry.transform_mut(id).unwrap().position.z = 7.0;
        let positions: Vec<_> = registry.positions(Category::Creature).collect();
        assert_eq!(positions, vec![(id, Vec3::new(0.0, 0.0, 7.0))]);
    }

    #[test]
    fn bind_and_sound_reject_unknown_ids() {
        let creatures = list_descriptors();
        let mut registry = VehicleRegistry::new();
        let id = spawn_at(&mut registry, &creatures[0], 0.0);
        registry.remove(id).unwrap();
        assert!(registry
            .bind_animation(id, BehaviorTag::Hunt, AnimationClip::new("run", 1.0))
            .is_err());
        assert!(registry.set_sound(id, SoundCue::new("roar", 0.3)).is_err());
    }
}

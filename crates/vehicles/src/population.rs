//! Starting population: creatures on the ground, ships hovering above.

use engine_core::{descriptor, TypeDescriptor};
use glam::Vec3;
use procgen::ModelRecipe;

/// Creature species and ground positions, in spawn order.
pub const CREATURE_SPAWNS: [(&str, Vec3); 4] = [
    ("T-Rex", Vec3::new(150.0, 2.0, 100.0)),
    ("Velociraptor", Vec3::new(-180.0, 2.0, -120.0)),
    ("Triceratops", Vec3::new(200.0, 2.0, -200.0)),
    ("T-Rex", Vec3::new(-150.0, 2.0, 150.0)),
];

/// Instance scale for species built with their detailed recipe.
pub const DETAILED_CREATURE_SCALE: f32 = 1.8;

/// Instance scale on top of the descriptor's own scale factor.
pub const STANDARD_MODEL_SCALE: f32 = 1.0;

/// Ship roles and hover positions, in spawn order.
pub const SHIP_SPAWNS: [(&str, Vec3); 5] = [
    ("Scout", Vec3::new(200.0, 40.0, -200.0)),
    ("Fighter", Vec3::new(-200.0, 50.0, -150.0)),
    ("Cruiser", Vec3::new(0.0, 60.0, -300.0)),
    ("Scout", Vec3::new(-250.0, 45.0, 200.0)),
    ("Fighter", Vec3::new(250.0, 55.0, 150.0)),
];

/// One instance to create.
#[derive(Debug, Clone)]
pub struct SpawnPlan {
    pub descriptor: TypeDescriptor,
    pub position: Vec3,
    pub scale: f32,
    /// Use the detailed recipe where the species has one.
    pub detailed: bool,
}

/// Creatures first, then ships.
pub fn starting_population() -> Vec<SpawnPlan> {
    let creatures = CREATURE_SPAWNS.iter().filter_map(|&(name, position)| {
        let descriptor = descriptor(name)?;
        let detailed = ModelRecipe::for_descriptor(&descriptor).map_or(false, |r| r.has_detailed());
        Some(SpawnPlan {
            descriptor,
            position,
            scale: if detailed {
                DETAILED_CREATURE_SCALE
            } else {
                STANDARD_MODEL_SCALE
            },
            detailed,
        })
    });
    let ships = SHIP_SPAWNS.iter().filter_map(|&(role, position)| {
        Some(SpawnPlan {
            descriptor: descriptor(role)?,
            position,
            scale: STANDARD_MODEL_SCALE,
            detailed: false,
        })
    });
    creatures.chain(ships).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Category;

    #[test]
    fn every_preset_resolves() {
        let plans = starting_population();
        assert_eq!(plans.len(), CREATURE_SPAWNS.len() + SHIP_SPAWNS.len());
        let creatures = plans
            .iter()
            .filter(|p| p.descriptor.category == Category::Creature)
            .count();
        assert_eq!(creatures, 4);
    }

    #[test]
    fn ship_colors_follow_role() {
        let plans = starting_population();
        let colors: Vec<u32> = plans[4..].iter().map(|p| p.descriptor.color).collect();
        assert_eq!(colors, vec![0x808080, 0x4682B4, 0x9370DB, 0x808080, 0x4682B4]);
        assert!(plans[4..]
            .iter()
            .all(|p| p.scale * p.descriptor.scale == 2.0 && p.position.y >= 40.0));
    }

    #[test]
    fn only_the_trex_uses_the_detailed_build() {
        let plans = starting_population();
        let creatures: Vec<(&str, bool, f32)> = plans[..4]
            .iter()
            .map(|p| (p.descriptor.name.as_str(), p.detailed, p.scale))
            .collect();
        assert_eq!(
            creatures,
            vec![
                ("T-Rex", true, 1.8),
                ("Velociraptor", false, 1.0),
                ("Triceratops", false, 1.0),
                ("T-Rex", true, 1.8),
            ]
        );
    }
}

//! Static type catalog: species and vehicle-role descriptors.

use crate::components::{BehaviorTag, Category, Motion};

/// Immutable parametric definition of a species or vehicle class.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Species or role name; also selects the construction recipe.
    pub name: String,
    pub category: Category,
    /// Base color as `0xRRGGBB`.
    pub color: u32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Linear speed in world units per second.
    pub speed: f32,
    /// Angular turn speed.
    pub turn_speed: f32,
    /// Reference height of the model at scale 1.
    pub height: f32,
    /// Behaviors this class may select, in catalog order.
    pub behaviors: Vec<BehaviorTag>,
}

impl TypeDescriptor {
    /// Creature descriptor.
    pub fn creature(
        name: &str,
        color: u32,
        scale: f32,
        speed: f32,
        turn_speed: f32,
        height: f32,
        behaviors: &[BehaviorTag],
    ) -> Self {
        Self {
            name: name.to_string(),
            category: Category::Creature,
            color,
            scale,
            speed,
            turn_speed,
            height,
            behaviors: behaviors.to_vec(),
        }
    }

    /// Scripted vehicle descriptor. Vehicles never select behaviors.
    pub fn vehicle(name: &str, color: u32, scale: f32, speed: f32, turn_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            category: Category::ScriptedVehicle,
            color,
            scale,
            speed,
            turn_speed,
            height: scale,
            behaviors: Vec::new(),
        }
    }

    /// Whether `tag` is in the permitted behavior set.
    pub fn permits(&self, tag: BehaviorTag) -> bool {
        self.behaviors.contains(&tag)
    }

    pub fn motion(&self) -> Motion {
        Motion::new(self.speed, self.turn_speed)
    }

    /// Base color as linear `[r, g, b]` in `0..=1`.
    pub fn color_rgb(&self) -> [f32; 3] {
        hex_to_rgb(self.color)
    }
}

/// Split `0xRRGGBB` into `[r, g, b]` in `0..=1`.
pub fn hex_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

/// The creature species, in catalog order.
pub fn list_descriptors() -> Vec<TypeDescriptor> {
    use BehaviorTag::*;
    vec![
        // Rich brown
        TypeDescriptor::creature("T-Rex", 0x8B4513, 2.0, 30.0, 2.0, 5.0, &[Hunt, Patrol]),
        // Dark olive green
        TypeDescriptor::creature("Velociraptor", 0x556B2F, 1.5, 35.0, 3.0, 2.0, &[Pack, Stalk]),
        // Gray
        TypeDescriptor::creature("Triceratops", 0x8B8B83, 1.8, 25.0, 1.5, 3.0, &[Graze, Defend]),
    ]
}

/// The scripted spaceship roles.
pub fn vehicle_descriptors() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::vehicle("Scout", 0x808080, 2.0, 30.0, 3.0),
        TypeDescriptor::vehicle("Fighter", 0x4682B4, 2.0, 30.0, 3.0),
        TypeDescriptor::vehicle("Cruiser", 0x9370DB, 2.0, 30.0, 3.0),
    ]
}

/// Look up a creature or vehicle descriptor by name.
pub fn descriptor(name: &str) -> Option<TypeDescriptor> {
    list_descriptors()
        .into_iter()
        .chain(vehicle_descriptors())
        .find(|d| d.name == name)
}

//! Procedural dinosaur and spaceship models.
//! Builds T-Rex, Velociraptor and Triceratops bodies from capsules, boxes and
//! cones, plus the hovering spaceship hull. Every dimension is a base value
//! times the descriptor's scale factor times the instance scale. Creature
//! models face local +Z.

use engine_core::{Category, TypeDescriptor};
use rand::prelude::*;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI};
use std::sync::Arc;
use thiserror::Error;

use crate::model::{Material, SurfaceMaps, VisualNode};
use crate::primitive::Primitive;
use crate::textures::{generate_scale_pattern, ScalePatternConfig, WrapMode};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("no construction recipe for type '{name}'")]
    UnsupportedType { name: String },
}

/// Construction recipe, selected from the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRecipe {
    Tyrannosaurus,
    Velociraptor,
    Triceratops,
    /// Muscular T-Rex with articulated head, neck and segmented tail.
    DetailedTyrannosaurus,
    Spaceship,
}

impl ModelRecipe {
    /// Scripted vehicles all share the hull; creatures are picked by species name.
    pub fn for_descriptor(descriptor: &TypeDescriptor) -> Result<Self, ModelError> {
        match descriptor.category {
            Category::ScriptedVehicle => Ok(ModelRecipe::Spaceship),
            Category::Creature => match descriptor.name.as_str() {
                "T-Rex" => Ok(ModelRecipe::Tyrannosaurus),
                "Velociraptor" => Ok(ModelRecipe::Velociraptor),
                "Triceratops" => Ok(ModelRecipe::Triceratops),
                other => Err(ModelError::UnsupportedType {
                    name: other.to_string(),
                }),
            },
        }
    }

    /// Detailed variant if one exists.
    pub fn detailed(self) -> Self {
        match self {
            ModelRecipe::Tyrannosaurus => ModelRecipe::DetailedTyrannosaurus,
            other => other,
        }
    }

    /// Whether `detailed` selects a different recipe.
    pub fn has_detailed(&self) -> bool {
        self.detailed() != *self
    }

    pub fn is_creature(&self) -> bool {
        !matches!(self, ModelRecipe::Spaceship)
    }
}

/// Builds visual hierarchies from type descriptors.
///
/// Geometry is a pure function of descriptor and scale; only the per-cell
/// brightness of creature skins is drawn from the factory's RNG.
pub struct ModelFactory {
    rng: StdRng,
    pattern: ScalePatternConfig,
}

impl ModelFactory {
    pub fn new(seed: u64, pattern: ScalePatternConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pattern,
        }
    }

    /// Build the standard model for `descriptor`, sized by `descriptor.scale * scale`.
    pub fn build(&mut self, descriptor: &TypeDescriptor, scale: f32) -> Result<VisualNode, ModelError> {
        let recipe = ModelRecipe::for_descriptor(descriptor)?;
        Ok(self.assemble(recipe, descriptor, scale))
    }

    /// Build the detailed model when the species has one, else the standard one.
    /// The detailed T-Rex is modelled at full size and takes `scale` alone.
    pub fn build_detailed(&mut self, descriptor: &TypeDescriptor, scale: f32) -> Result<VisualNode, ModelError> {
        let recipe = ModelRecipe::for_descriptor(descriptor)?.detailed();
        Ok(self.assemble(recipe, descriptor, scale))
    }

    fn assemble(&mut self, recipe: ModelRecipe, descriptor: &TypeDescriptor, scale: f32) -> VisualNode {
        let surface = recipe.is_creature().then(|| self.skin());
        let s = match recipe {
            ModelRecipe::DetailedTyrannosaurus => scale,
            _ => descriptor.scale * scale,
        };

        let mut root = VisualNode::group(descriptor.name.clone());
        match recipe {
            ModelRecipe::Tyrannosaurus => tyrannosaurus(&mut root, descriptor, s, surface),
            ModelRecipe::Velociraptor => velociraptor(&mut root, descriptor, s, surface),
            ModelRecipe::Triceratops => triceratops(&mut root, descriptor, s, surface),
            ModelRecipe::DetailedTyrannosaurus => {
                // Laid out head towards +X; turned a quarter so it faces +Z.
                let mut frame = VisualNode::group("frame").rotated(0.0, -FRAC_PI_2, 0.0);
                detailed_tyrannosaurus(&mut frame, descriptor, s, surface);
                root.add(frame);
            }
            ModelRecipe::Spaceship => spaceship(&mut root, descriptor, s),
        }

        root.enable_shadows();
        log::trace!(
            "built {:?} for '{}' at scale {:.2}: {} meshes",
            recipe,
            descriptor.name,
            s,
            root.mesh_count()
        );
        root
    }

    /// One scale texture per instance, bound as colour and bump map.
    fn skin(&mut self) -> SurfaceMaps {
        let texture = generate_scale_pattern(&self.pattern, &mut self.rng);
        SurfaceMaps {
            texture: Arc::new(texture),
            wrap: WrapMode::Repeat,
            repeat: [self.pattern.repeat; 2],
            color_map: true,
            bump_map: true,
            bump_scale: 0.02,
            displacement_scale: 0.1,
        }
    }
}

fn skin_material(descriptor: &TypeDescriptor, surface: &Option<SurfaceMaps>) -> Arc<Material> {
    Arc::new(Material::from_hex(descriptor.color, 0.7, 0.1).with_surface(surface.clone()))
}

fn tyrannosaurus(root: &mut VisualNode, d: &TypeDescriptor, s: f32, surface: Option<SurfaceMaps>) {
    let skin = skin_material(d, &surface);
    let ivory = Arc::new(Material::from_hex(0xFFFFF0, 0.3, 0.2).with_surface(surface));

    root.add(
        VisualNode::mesh("body", Primitive::capsule(2.0 * s, 4.0 * s, 8, 16), &skin)
            .at(0.0, 3.0 * s, 0.0)
            .rotated(FRAC_PI_2, 0.0, 0.0),
    );

    let mut head = VisualNode::mesh("head", Primitive::cuboid(1.5 * s, 2.0 * s, 1.5 * s), &skin)
        .at(0.0, 4.5 * s, 2.0 * s);
    for i in 0..6 {
        let x = ((i % 3) as f32 - 1.0) * 0.3 * s;
        head.add(
            VisualNode::mesh(format!("tooth_{i}"), Primitive::cone(0.1 * s, 0.3 * s, 4), &ivory)
                .at(x, -0.8 * s, 0.7 * s),
        );
    }
    root.add(head);

    root.add(
        VisualNode::mesh("jaw", Primitive::cuboid(1.2 * s, 1.0 * s, 1.5 * s), &skin)
            .at(0.0, 3.8 * s, 2.5 * s),
    );

    let leg = Primitive::capsule(0.5 * s, 3.0 * s, 4, 8);
    root.add(VisualNode::mesh("leg_r", leg, &skin).at(1.0 * s, 2.0 * s, 0.0));
    root.add(VisualNode::mesh("leg_l", leg, &skin).at(-1.0 * s, 2.0 * s, 0.0));

    root.add(
        VisualNode::mesh("tail", Primitive::capsule(0.8 * s, 4.0 * s, 4, 8), &skin)
            .at(0.0, 3.0 * s, -2.5 * s)
            .rotated(-FRAC_PI_4, 0.0, 0.0),
    );
}

fn velociraptor(root: &mut VisualNode, d: &TypeDescriptor, s: f32, surface: Option<SurfaceMaps>) {
    let skin = skin_material(d, &surface);

    root.add(
        VisualNode::mesh("body", Primitive::capsule(1.0 * s, 3.0 * s, 4, 8), &skin)
            .at(0.0, 2.0 * s, 0.0)
            .rotated(FRAC_PI_3, 0.0, 0.0),
    );
    root.add(
        VisualNode::mesh("head", Primitive::cone(0.6 * s, 1.5 * s, 8), &skin)
            .at(0.0, 3.0 * s, 1.5 * s)
            .rotated(-FRAC_PI_3, 0.0, 0.0),
    );

    let leg = Primitive::capsule(0.3 * s, 2.0 * s, 4, 8);
    root.add(VisualNode::mesh("leg_r", leg, &skin).at(0.5 * s, 1.5 * s, 0.0));
    root.add(VisualNode::mesh("leg_l", leg, &skin).at(-0.5 * s, 1.5 * s, 0.0));

    let arm = Primitive::capsule(0.2 * s, 1.0 * s, 4, 8);
    root.add(
        VisualNode::mesh("arm_r", arm, &skin)
            .at(0.8 * s, 2.5 * s, 0.5 * s)
            .rotated(0.0, 0.0, FRAC_PI_4),
    );
    root.add(
        VisualNode::mesh("arm_l", arm, &skin)
            .at(-0.8 * s, 2.5 * s, 0.5 * s)
            .rotated(0.0, 0.0, -FRAC_PI_4),
    );
}

fn triceratops(root: &mut VisualNode, d: &TypeDescriptor, s: f32, surface: Option<SurfaceMaps>) {
    let skin = skin_material(d, &surface);

    root.add(
        VisualNode::mesh("body", Primitive::capsule(2.5 * s, 4.0 * s, 4, 8), &skin)
            .at(0.0, 2.5 * s, 0.0)
            .rotated(FRAC_PI_2, 0.0, 0.0),
    );

    // Head group: skull, half-disc frill, two brow horns and a nose horn.
    let brow_horn = Primitive::cone(0.3 * s, 1.5 * s, 8);
    let head = VisualNode::group("head")
        .at(0.0, 2.5 * s, 2.0 * s)
        .with_child(VisualNode::mesh("skull", Primitive::cuboid(2.0 * s, 1.5 * s, 2.0 * s), &skin))
        .with_child(
            VisualNode::mesh(
                "frill",
                Primitive::cylinder_sector(2.0 * s, 2.0 * s, 0.3 * s, 32, PI),
                &skin,
            )
            .at(0.0, 0.0, -1.0 * s)
            .rotated(FRAC_PI_2, 0.0, 0.0),
        )
        .with_child(
            VisualNode::mesh("horn_r", brow_horn, &skin)
                .at(1.0 * s, 0.5 * s, 1.0 * s)
                .rotated(-FRAC_PI_4, 0.0, 0.0),
        )
        .with_child(
            VisualNode::mesh("horn_l", brow_horn, &skin)
                .at(-1.0 * s, 0.5 * s, 1.0 * s)
                .rotated(-FRAC_PI_4, 0.0, 0.0),
        )
        .with_child(
            VisualNode::mesh("horn_nose", Primitive::cone(0.2 * s, 1.0 * s, 8), &skin)
                .at(0.0, 0.5 * s, 1.5 * s)
                .rotated(-FRAC_PI_4, 0.0, 0.0),
        );
    root.add(head);

    let leg = Primitive::capsule(0.6 * s, 2.5 * s, 4, 8);
    let stance = [(1.5, 1.5, 1.0), (-1.5, 1.5, 1.0), (1.5, 1.5, -1.0), (-1.5, 1.5, -1.0)];
    for (i, (x, y, z)) in stance.into_iter().enumerate() {
        root.add(VisualNode::mesh(format!("leg_{i}"), leg, &skin).at(x * s, y * s, z * s));
    }
}

fn detailed_tyrannosaurus(root: &mut VisualNode, d: &TypeDescriptor, s: f32, surface: Option<SurfaceMaps>) {
    let skin = Arc::new(Material::from_hex(d.color, 0.9, 0.1).with_surface(surface.clone()));
    let ivory = Arc::new(Material::from_hex(0xFFFFF0, 0.5, 0.0).with_surface(surface.clone()));
    let eye = Arc::new(
        Material::from_hex(0x000000, 0.5, 0.0)
            .with_emissive(0x330000, 1.0)
            .with_surface(surface),
    );

    root.add(
        VisualNode::mesh("body", Primitive::capsule(3.0 * s, 8.0 * s, 8, 16), &skin)
            .at(0.0, 6.0 * s, 0.0)
            .rotated(FRAC_PI_2, 0.0, 0.0),
    );

    let thigh = Primitive::capsule(1.2 * s, 4.0 * s, 8, 8);
    let shin = Primitive::capsule(0.8 * s, 3.5 * s, 8, 8);
    for (side, z) in [("l", 2.0 * s), ("r", -2.0 * s)] {
        root.add(
            VisualNode::mesh(format!("thigh_{side}"), thigh, &skin)
                .at(0.0, 4.0 * s, z)
                .rotated(-FRAC_PI_4, 0.0, 0.0),
        );
        root.add(
            VisualNode::mesh(format!("shin_{side}"), shin, &skin)
                .at(0.0, 1.5 * s, z)
                .rotated(FRAC_PI_6, 0.0, 0.0),
        );
    }

    let mut jaw = VisualNode::mesh("jaw", Primitive::cuboid(3.5 * s, 0.8 * s, 1.5 * s), &skin)
        .at(1.8 * s, -1.0 * s, 0.0);
    let tooth = Primitive::cone(0.2 * s, 0.6 * s, 8);
    for i in 0..6 {
        let x = (i as f32 - 3.0) * 0.4 * s;
        for (row, z) in [("outer", 0.6 * s), ("inner", -0.6 * s)] {
            jaw.add(
                VisualNode::mesh(format!("tooth_{row}_{i}"), tooth, &ivory)
                    .at(x, -0.8 * s, z)
                    .rotated(PI, 0.0, 0.0),
            );
        }
    }

    let eye_ball = Primitive::sphere(0.3 * s, 32, 16);
    let head = VisualNode::group("head")
        .at(5.0 * s, 8.0 * s, 0.0)
        .rotated(0.0, PI / 24.0, 0.0)
        .with_child(VisualNode::mesh("skull", Primitive::cuboid(4.0 * s, 2.5 * s, 2.0 * s), &skin))
        .with_child(
            VisualNode::mesh("snout", Primitive::cuboid(3.0 * s, 1.5 * s, 1.8 * s), &skin)
                .at(2.0 * s, -0.2 * s, 0.0),
        )
        .with_child(jaw)
        .with_child(VisualNode::mesh("eye_l", eye_ball, &eye).at(1.0 * s, 0.5 * s, 0.8 * s))
        .with_child(VisualNode::mesh("eye_r", eye_ball, &eye).at(1.0 * s, 0.5 * s, -0.8 * s));
    root.add(head);

    root.add(
        VisualNode::mesh("neck", Primitive::capsule(1.2 * s, 2.0 * s, 8, 8), &skin)
            .at(3.0 * s, 7.0 * s, 0.0)
            .rotated(0.0, 0.0, -FRAC_PI_4),
    );

    // Tail tapers and droops segment by segment.
    const TAIL_SEGMENTS: usize = 8;
    let mut tail = VisualNode::group("tail");
    for i in 0..TAIL_SEGMENTS {
        let f = i as f32;
        let radius = (1.0 - f / TAIL_SEGMENTS as f32) * s;
        tail.add(
            VisualNode::mesh(format!("tail_{i}"), Primitive::capsule(radius, 2.0 * s, 8, 8), &skin)
                .at(-3.0 * s - f * 2.0 * s, 6.0 * s - f * 0.5 * s, 0.0)
                .rotated(0.0, 0.0, FRAC_PI_2 + f * PI / 16.0),
        );
    }
    root.add(tail);

    let arm = Primitive::capsule(0.4 * s, 2.0 * s, 8, 8);
    for (side, z) in [("l", 1.5 * s), ("r", -1.5 * s)] {
        root.add(
            VisualNode::mesh(format!("arm_{side}"), arm, &skin)
                .at(2.0 * s, 6.0 * s, z)
                .rotated(FRAC_PI_6, 0.0, 0.0),
        );
    }
}

fn spaceship(root: &mut VisualNode, d: &TypeDescriptor, s: f32) {
    let hull = Arc::new(Material::from_hex(d.color, 0.3, 0.7));
    let glass = Arc::new(Material::from_hex(0x87CEFA, 0.1, 0.9).with_opacity(0.7));
    let glow = Arc::new(
        Material::from_hex(0x00FFFF, 1.0, 0.0)
            .with_emissive(0x00FFFF, 1.0)
            .with_opacity(0.7),
    );

    root.add(VisualNode::mesh("body", Primitive::cylinder(0.0, 3.0 * s, 2.0 * s, 8), &hull));
    root.add(VisualNode::mesh("cockpit", Primitive::sphere(1.5 * s, 16, 16), &glass).at(0.0, 1.0 * s, 0.0));

    let wing = Primitive::cuboid(6.0 * s, 0.2 * s, 2.0 * s);
    let engine = Primitive::cylinder(0.5 * s, 0.8 * s, 1.0 * s, 8);
    let exhaust = Primitive::cylinder(0.3 * s, 0.5 * s, 0.5 * s, 8);
    for (side, x) in [("l", -1.0), ("r", 1.0)] {
        root.add(VisualNode::mesh(format!("wing_{side}"), wing, &hull).at(x * 3.0 * s, 0.0, 0.0));
        root.add(
            VisualNode::mesh(format!("engine_{side}"), engine, &hull).at(x * 2.0 * s, -0.5 * s, 1.0 * s),
        );
        root.add(
            VisualNode::mesh(format!("engine_glow_{side}"), exhaust, &glow).at(x * 2.0 * s, -1.0 * s, 1.0 * s),
        );
    }
}

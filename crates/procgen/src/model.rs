//! Hierarchical visual nodes produced by the model factory.

use engine_core::{hex_to_rgb, Transform};
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::sync::Arc;

use crate::primitive::Primitive;
use crate::textures::{TextureData, WrapMode};

/// Texture maps bound to a material.
#[derive(Debug, Clone)]
pub struct SurfaceMaps {
    /// Shared by every material of one instance.
    pub texture: Arc<TextureData>,
    pub wrap: WrapMode,
    pub repeat: [f32; 2],
    /// Texture doubles as the colour map.
    pub color_map: bool,
    /// Texture doubles as the bump map.
    pub bump_map: bool,
    pub bump_scale: f32,
    pub displacement_scale: f32,
}

/// PBR material parameters.
#[derive(Debug, Clone)]
pub struct Material {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub surface: Option<SurfaceMaps>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 1.0,
            metalness: 0.0,
            emissive: [0.0, 0.0, 0.0],
            emissive_intensity: 1.0,
            opacity: 1.0,
            transparent: false,
            surface: None,
        }
    }
}

impl Material {
    /// Opaque material from a `0xRRGGBB` colour.
    pub fn from_hex(color: u32, roughness: f32, metalness: f32) -> Self {
        Self {
            color: hex_to_rgb(color),
            roughness,
            metalness,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, color: u32, intensity: f32) -> Self {
        self.emissive = hex_to_rgb(color);
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    pub fn with_surface(mut self, surface: Option<SurfaceMaps>) -> Self {
        self.surface = surface;
        self
    }
}

/// One renderable shape.
#[derive(Debug, Clone)]
pub struct MeshPart {
    pub primitive: Primitive,
    pub material: Arc<Material>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn union(self, other: Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// World bounds of a local box `[-half, half]` under `matrix`.
    fn of_box(matrix: &Mat4, half: Vec3) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -half.x } else { half.x },
                if i & 2 == 0 { -half.y } else { half.y },
                if i & 4 == 0 { -half.z } else { half.z },
            );
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }
}

/// Node of an instance's visual hierarchy.
#[derive(Debug, Clone)]
pub struct VisualNode {
    pub name: String,
    /// Transform relative to the parent.
    pub transform: Transform,
    pub mesh: Option<MeshPart>,
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    /// Empty grouping node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Node carrying one shape. Shadows are off until `enable_shadows`.
    pub fn mesh(name: impl Into<String>, primitive: Primitive, material: &Arc<Material>) -> Self {
        Self {
            mesh: Some(MeshPart {
                primitive,
                material: Arc::clone(material),
                cast_shadow: false,
                receive_shadow: false,
            }),
            ..Self::group(name)
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vec3::new(x, y, z);
        self
    }

    /// Euler rotation applied X, then Y, then Z.
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }

    pub fn with_child(mut self, child: VisualNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add(&mut self, child: VisualNode) {
        self.children.push(child);
    }

    /// Turn on shadow casting and receiving for every mesh in the tree.
    pub fn enable_shadows(&mut self) {
        if let Some(mesh) = &mut self.mesh {
            mesh.cast_shadow = true;
            mesh.receive_shadow = true;
        }
        for child in &mut self.children {
            child.enable_shadows();
        }
    }

    /// Depth-first visit of every mesh with its matrix relative to this node's parent.
    pub fn visit_meshes<F: FnMut(&VisualNode, &MeshPart, &Mat4)>(&self, f: &mut F) {
        self.visit_with(Mat4::IDENTITY, f);
    }

    fn visit_with<F: FnMut(&VisualNode, &MeshPart, &Mat4)>(&self, parent: Mat4, f: &mut F) {
        let world = parent * self.transform.to_matrix();
        if let Some(mesh) = &self.mesh {
            f(self, mesh, &world);
        }
        for child in &self.children {
            child.visit_with(world, f);
        }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(&mut |_, _, _| count += 1);
        count
    }

    /// Bounds of every shape in the tree, in the parent's space.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut bounds: Option<Aabb> = None;
        self.visit_meshes(&mut |_, mesh, matrix| {
            let b = Aabb::of_box(matrix, mesh.primitive.half_extents());
            bounds = Some(match bounds {
                Some(acc) => acc.union(b),
                None => b,
            });
        });
        bounds
    }

    /// First node with the given name, depth-first.
    pub fn find(&self, name: &str) -> Option<&VisualNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat() -> Arc<Material> {
        Arc::new(Material::from_hex(0x808080, 0.5, 0.0))
    }

    #[test]
    fn bounds_follow_child_offsets() {
        let m = mat();
        let node = VisualNode::group("root")
            .with_child(VisualNode::mesh("a", Primitive::cuboid(2.0, 2.0, 2.0), &m).at(10.0, 0.0, 0.0))
            .with_child(
                VisualNode::group("inner")
                    .at(0.0, 5.0, 0.0)
                    .with_child(VisualNode::mesh("b", Primitive::sphere(1.0, 8, 4), &m).at(0.0, 1.0, 0.0)),
            );
        let b = node.bounds().expect("has meshes");
        assert!((b.min - Vec3::new(-1.0, -1.0, -1.0)).length() < 1e-5);
        assert!((b.max - Vec3::new(11.0, 7.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn rotation_swaps_capsule_axis() {
        let m = mat();
        let node = VisualNode::mesh("body", Primitive::capsule(1.0, 4.0, 4, 8), &m)
            .rotated(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        let size = node.bounds().expect("mesh").size();
        assert!((size - Vec3::new(2.0, 2.0, 6.0)).length() < 1e-4, "size {size:?}");
    }

    #[test]
    fn enable_shadows_reaches_nested_meshes() {
        let m = mat();
        let mut node = VisualNode::group("root").with_child(
            VisualNode::mesh("head", Primitive::cuboid(1.0, 1.0, 1.0), &m)
                .with_child(VisualNode::mesh("tooth", Primitive::cone(0.1, 0.3, 4), &m)),
        );
        node.enable_shadows();
        let mut seen = 0;
        node.visit_meshes(&mut |_, mesh, _| {
            assert!(mesh.cast_shadow && mesh.receive_shadow);
            seen += 1;
        });
        assert_eq!(seen, 2);
        assert!(node.find("tooth").is_some());
    }

    #[test]
    fn empty_group_has_no_bounds() {
        assert!(VisualNode::group("nothing").bounds().is_none());
    }
}

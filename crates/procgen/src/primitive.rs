//! Primitive shapes and their triangle tessellation.
//! Every round shape is a lathe: a (radius, height) profile revolved around +Y.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Vertex with position, normal and UV, ready for upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl ModelVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            uv: uv.into(),
        }
    }
}

/// Triangle list for one primitive, in the primitive's local space.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Primitive shape, centred on the local origin with its long axis along +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Cylinder of `length` capped by two hemispheres of `radius`.
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Base at `-height / 2`, tip at `+height / 2`.
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Frustum swept through `theta_length` radians (TAU for a full cylinder).
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        theta_length: f32,
    },
}

impl Primitive {
    pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> Self {
        Primitive::Capsule {
            radius,
            length,
            cap_segments,
            radial_segments,
        }
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Primitive::Box { width, height, depth }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cone {
            radius,
            height,
            radial_segments,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Primitive::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            theta_length: TAU,
        }
    }

    /// Partial sweep, e.g. a half-disc frill.
    pub fn cylinder_sector(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        theta_length: f32,
    ) -> Self {
        Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            theta_length,
        }
    }

    /// Half size of the local axis-aligned bounding box.
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Primitive::Capsule { radius, length, .. } => Vec3::new(radius, length * 0.5 + radius, radius),
            Primitive::Box { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            Primitive::Cone { radius, height, .. } => Vec3::new(radius, height * 0.5, radius),
            Primitive::Sphere { radius, .. } => Vec3::splat(radius),
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(radius_bottom);
                Vec3::new(r, height * 0.5, r)
            }
        }
    }

    /// Same shape with every linear dimension multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = *self;
        match &mut out {
            Primitive::Capsule { radius, length, .. } => {
                *radius *= factor;
                *length *= factor;
            }
            Primitive::Box { width, height, depth } => {
                *width *= factor;
                *height *= factor;
                *depth *= factor;
            }
            Primitive::Cone { radius, height, .. } => {
                *radius *= factor;
                *height *= factor;
            }
            Primitive::Sphere { radius, .. } => *radius *= factor,
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                *radius_top *= factor;
                *radius_bottom *= factor;
                *height *= factor;
            }
        }
        out
    }

    /// Generate the triangle mesh for this shape.
    pub fn tessellate(&self) -> MeshData {
        match *self {
            Primitive::Capsule {
                radius,
                length,
                cap_segments,
                radial_segments,
            } => {
                let caps = cap_segments.max(1);
                let half = length * 0.5;
                let mut profile = Vec::with_capacity(2 * (caps as usize + 1));
                for k in 0..=caps {
                    let phi = -FRAC_PI_2 + (k as f32 / caps as f32) * FRAC_PI_2;
                    profile.push(Vec2::new(radius * phi.cos(), -half + radius * phi.sin()));
                }
                for k in 0..=caps {
                    let phi = (k as f32 / caps as f32) * FRAC_PI_2;
                    profile.push(Vec2::new(radius * phi.cos(), half + radius * phi.sin()));
                }
                lathe(&profile, radial_segments, TAU)
            }
            Primitive::Box { width, height, depth } => cuboid(Vec3::new(width, height, depth) * 0.5),
            Primitive::Cone {
                radius,
                height,
                radial_segments,
            } => frustum(0.0, radius, height, radial_segments, TAU),
            Primitive::Sphere {
                radius,
                width_segments,
                height_segments,
            } => {
                let rings = height_segments.max(2);
                let profile: Vec<Vec2> = (0..=rings)
                    .map(|k| {
                        let phi = -FRAC_PI_2 + (k as f32 / rings as f32) * std::f32::consts::PI;
                        Vec2::new(radius * phi.cos(), radius * phi.sin())
                    })
                    .collect();
                lathe(&profile, width_segments, TAU)
            }
            Primitive::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                theta_length,
            } => frustum(radius_top, radius_bottom, height, radial_segments, theta_length),
        }
    }
}

/// Closed frustum: bottom cap, slanted wall, top cap. Corner points are
/// doubled so the wall and caps keep separate normals.
fn frustum(radius_top: f32, radius_bottom: f32, height: f32, segments: u32, theta_length: f32) -> MeshData {
    let half = height * 0.5;
    let profile = [
        Vec2::new(0.0, -half),
        Vec2::new(radius_bottom, -half),
        Vec2::new(radius_bottom, -half),
        Vec2::new(radius_top, half),
        Vec2::new(radius_top, half),
        Vec2::new(0.0, half),
    ];
    lathe(&profile, segments, theta_length)
}

/// Revolve a bottom-to-top (radius, y) profile around +Y.
fn lathe(profile: &[Vec2], segments: u32, theta_length: f32) -> MeshData {
    let segments = segments.max(3);
    let ring_len = segments + 1;

    // Outward normal of each profile edge; zero for doubled points.
    let edge_normals: Vec<Vec2> = profile
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            Vec2::new(d.y, -d.x).normalize_or_zero()
        })
        .collect();

    let mut mesh = MeshData::default();
    let last = profile.len().saturating_sub(1);

    for (ring, point) in profile.iter().enumerate() {
        let before = if ring > 0 { edge_normals[ring - 1] } else { Vec2::ZERO };
        let after = edge_normals.get(ring).copied().unwrap_or(Vec2::ZERO);
        let n2 = (before + after).normalize_or_zero();
        let v = if last == 0 { 0.0 } else { ring as f32 / last as f32 };

        for seg in 0..ring_len {
            let u = seg as f32 / segments as f32;
            let angle = u * theta_length;
            let (sin, cos) = angle.sin_cos();
            let position = Vec3::new(point.x * sin, point.y, point.x * cos);
            let normal = Vec3::new(n2.x * sin, n2.y, n2.x * cos);
            mesh.vertices.push(ModelVertex::new(position, normal, Vec2::new(u, v)));
        }
    }

    for ring in 0..last as u32 {
        let curr = ring * ring_len;
        let next = curr + ring_len;
        for seg in 0..segments {
            let a = curr + seg;
            let b = next + seg;
            let c = b + 1;
            let d = a + 1;
            mesh.indices.extend_from_slice(&[a, d, b, d, c, b]);
        }
    }

    mesh
}

fn cuboid(half: Vec3) -> MeshData {
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (-Vec3::Z, -Vec3::X, Vec3::Y),
        (Vec3::Y, Vec3::X, -Vec3::Z),
        (-Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::X, -Vec3::Z, Vec3::Y),
        (-Vec3::X, Vec3::Z, Vec3::Y),
    ];

    let mut mesh = MeshData::default();
    for (normal, right, up) in faces {
        let base = mesh.vertices.len() as u32;
        let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (cx, cy) in corners {
            let position = (normal + right * cx + up * cy) * half;
            let uv = Vec2::new((cx + 1.0) * 0.5, 1.0 - (cy + 1.0) * 0.5);
            mesh.vertices.push(ModelVertex::new(position, normal, uv));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs(mesh: &MeshData) -> Vec3 {
        mesh.vertices.iter().fold(Vec3::ZERO, |acc, v| {
            acc.max(Vec3::from(v.position).abs())
        })
    }

    #[test]
    fn box_has_24_vertices_and_12_triangles() {
        let mesh = Primitive::cuboid(2.0, 4.0, 6.0).tessellate();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!((max_abs(&mesh) - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn capsule_mesh_fits_half_extents() {
        let shape = Primitive::capsule(0.5, 3.0, 4, 8);
        let mesh = shape.tessellate();
        let extent = max_abs(&mesh);
        let half = shape.half_extents();
        assert!(extent.x <= half.x + 1e-5 && extent.y <= half.y + 1e-5 && extent.z <= half.z + 1e-5);
        assert!((extent.y - 2.0).abs() < 1e-5);
        assert_eq!(mesh.vertices.len(), 10 * 9);
    }

    #[test]
    fn indices_stay_in_range() {
        let shapes = [
            Primitive::cone(0.3, 1.5, 8),
            Primitive::sphere(1.0, 16, 8),
            Primitive::cylinder_sector(2.0, 2.0, 0.3, 32, std::f32::consts::PI),
            Primitive::cylinder(0.0, 3.0, 2.0, 8),
        ];
        for shape in shapes {
            let mesh = shape.tessellate();
            assert!(!mesh.indices.is_empty());
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        }
    }

    #[test]
    fn sphere_normals_point_outward() {
        let mesh = Primitive::sphere(2.0, 12, 6).tessellate();
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            if p.length() > 1e-3 && n.length() > 1e-3 {
                assert!(p.normalize().dot(n) > 0.9);
            }
        }
    }

    #[test]
    fn scaled_doubles_extents() {
        let shape = Primitive::cylinder(0.5, 0.8, 1.0, 8);
        assert_eq!(shape.scaled(2.0).half_extents(), shape.half_extents() * 2.0);
    }
}

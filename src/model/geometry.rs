use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::utils::{hex_color, Mesh};

/// Primitive shapes the procedural builders are made of.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box centered on the node origin.
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Y-aligned cylinder centered on the node origin, optionally pre-rotated
    /// about X before it is attached (baked into the vertices, not the node).
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
        rotate_x: f32,
    },
}

impl Geometry {
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Geometry::Cuboid { width, height, depth }
    }

    /// Build flat-shaded triangles for this shape in the given color.
    pub fn build_mesh(&self, color: [f32; 4]) -> Mesh {
        match *self {
            Geometry::Cuboid { width, height, depth } => cuboid_mesh(width, height, depth, color),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                radial_segments,
                height_segments,
                rotate_x,
            } => {
                let mut mesh = cylinder_mesh(
                    radius_top,
                    radius_bottom,
                    height,
                    radial_segments.max(3),
                    height_segments.max(1),
                    color,
                );
                if rotate_x != 0.0 {
                    mesh.transform(Mat4::from_rotation_x(rotate_x));
                }
                mesh
            }
        }
    }
}

fn cuboid_mesh(width: f32, height: f32, depth: f32, color: [f32; 4]) -> Mesh {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    let v = Vec3::new;
    let mut mesh = Mesh::empty();
    // +X, -X, +Y, -Y, +Z, -Z
    mesh.push_quad([v(hx, -hy, hz), v(hx, -hy, -hz), v(hx, hy, -hz), v(hx, hy, hz)], color);
    mesh.push_quad([v(-hx, -hy, -hz), v(-hx, -hy, hz), v(-hx, hy, hz), v(-hx, hy, -hz)], color);
    mesh.push_quad([v(-hx, hy, hz), v(hx, hy, hz), v(hx, hy, -hz), v(-hx, hy, -hz)], color);
    mesh.push_quad([v(-hx, -hy, -hz), v(hx, -hy, -hz), v(hx, -hy, hz), v(-hx, -hy, hz)], color);
    mesh.push_quad([v(-hx, -hy, hz), v(hx, -hy, hz), v(hx, hy, hz), v(-hx, hy, hz)], color);
    mesh.push_quad([v(hx, -hy, -hz), v(-hx, -hy, -hz), v(-hx, hy, -hz), v(hx, hy, -hz)], color);
    mesh
}

fn cylinder_mesh(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial: u32,
    rings: u32,
    color: [f32; 4],
) -> Mesh {
    let half = height / 2.0;
    let point = |seg: u32, ring: u32| {
        let theta = seg as f32 / radial as f32 * TAU;
        let t = ring as f32 / rings as f32;
        let radius = radius_bottom + (radius_top - radius_bottom) * t;
        Vec3::new(radius * theta.sin(), -half + height * t, radius * theta.cos())
    };

    let mut mesh = Mesh::empty();
    for ring in 0..rings {
        for seg in 0..radial {
            mesh.push_quad(
                [
                    point(seg, ring),
                    point(seg + 1, ring),
                    point(seg + 1, ring + 1),
                    point(seg, ring + 1),
                ],
                color,
            );
        }
    }

    let top = Vec3::new(0.0, half, 0.0);
    let bottom = Vec3::new(0.0, -half, 0.0);
    for seg in 0..radial {
        if radius_top > 0.0 {
            mesh.push_triangle(top, point(seg, rings), point(seg + 1, rings), color);
        }
        if radius_bottom > 0.0 {
            mesh.push_triangle(bottom, point(seg + 1, 0), point(seg, 0), color);
        }
    }
    mesh
}

/// Flat-shaded, solid color material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: u32,
    pub opacity: f32,
    pub flat_shading: bool,
}

impl Material {
    pub fn flat(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            flat_shading: true,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    pub fn rgba(&self) -> [f32; 4] {
        hex_color(self.color, self.opacity)
    }
}

/// Drawable payload of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub geometry: Geometry,
    pub material: Material,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Renderable {
    /// Shape that both casts and receives shadows, the default for every primitive.
    pub fn shaded(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    pub fn build_mesh(&self) -> Mesh {
        self.geometry.build_mesh(self.material.rgba())
    }
}

/// Line grid on the XZ plane, like a ground reference helper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub y: f32,
    pub center_color: u32,
    pub line_color: u32,
}

impl GridHelper {
    pub fn new(size: f32, divisions: u32) -> Self {
        Self {
            size,
            divisions: divisions.max(1),
            y: 0.0,
            center_color: 0x444444,
            line_color: 0x888888,
        }
    }

    pub fn line_count(&self) -> usize {
        2 * (self.divisions as usize + 1)
    }

    pub fn build_mesh(&self) -> Mesh {
        let half = self.size / 2.0;
        let step = self.size / self.divisions as f32;
        let center = self.divisions / 2;
        let mut mesh = Mesh::empty();
        for i in 0..=self.divisions {
            let k = -half + i as f32 * step;
            let hex = if i == center && self.divisions % 2 == 0 {
                self.center_color
            } else {
                self.line_color
            };
            let color = hex_color(hex, 1.0);
            mesh.push_line(Vec3::new(-half, self.y, k), Vec3::new(half, self.y, k), color);
            mesh.push_line(Vec3::new(k, self.y, -half), Vec3::new(k, self.y, half), color);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_extents() {
        let mesh = Geometry::cuboid(60.0, 50.0, 40.0).build_mesh([1.0; 4]);
        assert_eq!(mesh.triangle_count(), 12);
        let max_x = mesh.vertices.iter().map(|v| v.pos[0]).fold(f32::MIN, f32::max);
        let min_z = mesh.vertices.iter().map(|v| v.pos[2]).fold(f32::MAX, f32::min);
        assert_eq!(max_x, 30.0);
        assert_eq!(min_z, -20.0);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mesh = Geometry::cuboid(2.0, 2.0, 2.0).build_mesh([1.0; 4]);
        for v in &mesh.vertices {
            let p = Vec3::from(v.pos);
            let n = Vec3::from(v.normal);
            assert!(p.dot(n) > 0.0, "normal {n:?} faces inward at {p:?}");
        }
    }

    #[test]
    fn test_cylinder_rotated_onto_z_axis() {
        let geometry = Geometry::Cylinder {
            radius_top: 600.0,
            radius_bottom: 600.0,
            height: 800.0,
            radial_segments: 40,
            height_segments: 10,
            rotate_x: -std::f32::consts::FRAC_PI_2,
        };
        let mesh = geometry.build_mesh([1.0; 4]);
        // 40 * 10 side quads + 2 * 40 cap triangles
        assert_eq!(mesh.triangle_count(), 40 * 10 * 2 + 80);
        let max_z = mesh.vertices.iter().map(|v| v.pos[2]).fold(f32::MIN, f32::max);
        let max_y = mesh.vertices.iter().map(|v| v.pos[1]).fold(f32::MIN, f32::max);
        assert!((max_z - 400.0).abs() < 1e-2);
        assert!((max_y - 600.0).abs() < 1e-2);
    }

    #[test]
    fn test_grid_lines() {
        let grid = GridHelper::new(2000.0, 100);
        let mesh = grid.build_mesh();
        assert_eq!(mesh.indices.len(), grid.line_count() * 2);
    }

    #[test]
    fn test_transparent_material() {
        assert!(Material::flat(0x68c3c0).with_opacity(0.6).is_transparent());
        assert!(!Material::flat(0x68c3c0).is_transparent());
    }
}

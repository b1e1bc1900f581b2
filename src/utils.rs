use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// CPU-side triangle (or line) list, uploaded once per scene node.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Push a flat quad (two triangles) sharing one face normal.
    /// Corners are expected counter-clockwise when seen from the normal side.
    pub fn push_quad(&mut self, corners: [Vec3; 4], color: [f32; 4]) {
        let normal = (corners[1] - corners[0])
            .cross(corners[2] - corners[0])
            .normalize_or_zero();
        let base = self.vertices.len() as u32;
        for c in corners {
            self.vertices.push(Vertex {
                pos: c.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Push a single flat triangle, counter-clockwise winding.
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        let normal = (b - a).cross(c - a).normalize_or_zero();
        let base = self.vertices.len() as u32;
        for p in [a, b, c] {
            self.vertices.push(Vertex {
                pos: p.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    pub fn push_line(&mut self, a: Vec3, b: Vec3, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        for p in [a, b] {
            self.vertices.push(Vertex {
                pos: p.to_array(),
                normal: [0.0, 1.0, 0.0],
                color,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1]);
    }

    /// Bake a transform into the vertices (used for geometry pre-rotation).
    pub fn transform(&mut self, m: Mat4) {
        let normal_m = m.inverse().transpose();
        for v in self.vertices.iter_mut() {
            v.pos = m.transform_point3(Vec3::from(v.pos)).to_array();
            v.normal = normal_m
                .transform_vector3(Vec3::from(v.normal))
                .normalize_or_zero()
                .to_array();
        }
    }

    pub fn upload(&self, device: &wgpu::Device) -> MeshBuffer {
        let vertices = bytemuck::cast_slice(&self.vertices);
        let indices = bytemuck::cast_slice(&self.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: vertices,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: indices,
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

/// Decode one sRGB-encoded channel into linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` (sRGB) to linear RGBA floats, ready for an sRGB render target.
/// Alpha is passed through untouched.
pub fn hex_color(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_color_endpoints() {
        assert_relative_eq!(hex_color(0xff0000, 1.0)[0], 1.0, epsilon = 1e-6);
        assert_eq!(hex_color(0xff0000, 1.0)[1], 0.0);
        assert_eq!(hex_color(0x000000, 0.6), [0.0, 0.0, 0.0, 0.6]);
    }

    #[test]
    fn test_hex_color_decodes_srgb() {
        // green channel of the airplane red: 0x53 encodes ~0.087 linear, and
        // an sRGB target encodes it back to 0x53 instead of brightening it
        let c = hex_color(0xf25346, 1.0);
        assert_relative_eq!(c[1], 0.0865, epsilon = 1e-3);
        assert!(c[1] < 0x53 as f32 / 255.0);

        let mid = hex_color(0x808080, 0.6);
        assert_relative_eq!(mid[0], 0.2158, epsilon = 1e-3);
        assert_eq!(mid[3], 0.6);
    }

    #[test]
    fn test_srgb_linear_segment() {
        assert_relative_eq!(srgb_to_linear(0.04), 0.04 / 12.92);
        assert_relative_eq!(srgb_to_linear(1.0), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quad_has_outward_normal() {
        let mut mesh = Mesh::empty();
        mesh.push_quad(
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            [1.0; 4],
        );
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}

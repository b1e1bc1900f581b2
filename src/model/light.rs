use glam::{Mat4, Vec3};

use crate::utils::hex_color;

/// Ambient light blended between a sky and a ground color by surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: u32,
    pub ground_color: u32,
    pub intensity: f32,
}

/// Orthographic shadow frustum of a directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
    pub shadow: ShadowCamera,
}

impl DirectionalLight {
    /// Direction from the lit surface towards the light (the light targets the origin).
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }

    /// Orthographic light-space projection for the shadow map, looking from
    /// `position` at the origin. Depth lands in [0, 1].
    pub fn shadow_view_proj(&self) -> Mat4 {
        let s = &self.shadow;
        let up = if self.direction().cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, up);
        let proj = Mat4::orthographic_rh(s.left, s.right, s.bottom, s.top, s.near, s.far);
        proj * view
    }
}

/// First directional light that casts shadows.
pub fn shadow_caster(lights: &[Light]) -> Option<&DirectionalLight> {
    lights.iter().find_map(|light| match light {
        Light::Directional(d) if d.cast_shadow => Some(d),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Hemisphere(HemisphereLight),
    Directional(DirectionalLight),
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub sun_dir: [f32; 3],
    pub sun_intensity: f32,
    pub sun_color: [f32; 4],
    pub sky_color: [f32; 4],
    pub ground_color: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog_near: f32,
    pub fog_far: f32,
    pub hemisphere_intensity: f32,
    /// 0 disables shadow lookups, 1 applies them fully.
    pub shadow_strength: f32,
    pub light_view_proj: [[f32; 4]; 4],
}

impl LightingUniform {
    /// Fold the scene's lights into one uniform; later lights of the same kind win.
    pub fn from_lights(lights: &[Light]) -> Self {
        let mut uniform = Self::default();
        for light in lights {
            match light {
                Light::Hemisphere(h) => {
                    uniform.sky_color = hex_color(h.sky_color, 1.0);
                    uniform.ground_color = hex_color(h.ground_color, 1.0);
                    uniform.hemisphere_intensity = h.intensity;
                }
                Light::Directional(d) => {
                    uniform.sun_dir = d.direction().to_array();
                    uniform.sun_color = hex_color(d.color, 1.0);
                    uniform.sun_intensity = d.intensity;
                }
            }
        }
        if let Some(sun) = shadow_caster(lights) {
            uniform.shadow_strength = 1.0;
            uniform.light_view_proj = sun.shadow_view_proj().to_cols_array_2d();
        }
        uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LightRig;
    use approx::assert_relative_eq;

    #[test]
    fn test_shadow_projection_centers_origin() {
        let sun = LightRig::new().sun;
        let ndc = sun.shadow_view_proj().project_point3(Vec3::ZERO);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-4);
        let distance = sun.position.length();
        assert_relative_eq!(ndc.z, (distance - 1.0) / 999.0, epsilon = 1e-4);
    }

    #[test]
    fn test_shadow_frustum_edges() {
        let sun = LightRig::new().sun;
        let m = sun.shadow_view_proj();
        // 400 units sideways in light space reaches the frustum edge
        let right = sun.direction().cross(Vec3::Y).normalize() * -400.0;
        let ndc = m.project_point3(right);
        assert_relative_eq!(ndc.x.abs(), 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_uniform_enables_shadows_only_with_a_caster() {
        let rig = LightRig::new();
        let lit = LightingUniform::from_lights(&rig.lights());
        assert_eq!(lit.shadow_strength, 1.0);
        assert_eq!(lit.light_view_proj, rig.sun.shadow_view_proj().to_cols_array_2d());

        let mut sun = rig.sun;
        sun.cast_shadow = false;
        let unlit = LightingUniform::from_lights(&[Light::Hemisphere(rig.hemisphere), Light::Directional(sun)]);
        assert_eq!(unlit.shadow_strength, 0.0);
        assert!(shadow_caster(&[Light::Hemisphere(rig.hemisphere)]).is_none());
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<LightingUniform>(), 160);
        assert_eq!(std::mem::offset_of!(LightingUniform, light_view_proj), 96);
    }
}

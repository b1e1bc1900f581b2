use glam::Vec3;

use crate::model::light::{DirectionalLight, HemisphereLight, Light, ShadowCamera};

/// Ambient hemisphere fill plus one shadow-casting sun.
pub struct LightRig {
    pub hemisphere: HemisphereLight,
    pub sun: DirectionalLight,
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            hemisphere: HemisphereLight {
                sky_color: 0xaaaaaa,
                ground_color: 0x000000,
                intensity: 0.9,
            },
            sun: DirectionalLight {
                color: 0xffffff,
                intensity: 0.9,
                position: Vec3::new(150.0, 350.0, 350.0),
                cast_shadow: true,
                shadow: ShadowCamera {
                    left: -400.0,
                    right: 400.0,
                    top: 400.0,
                    bottom: -400.0,
                    near: 1.0,
                    far: 1000.0,
                    map_size: 2048,
                },
            },
        }
    }

    pub fn lights(&self) -> [Light; 2] {
        [Light::Hemisphere(self.hemisphere), Light::Directional(self.sun)]
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}

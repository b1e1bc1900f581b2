//! Tunable constants of the scene, grouped the way they are consumed.
//!
//! `AppConfig::default()` reproduces the reference scene; nothing is read
//! from disk.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            z_near: 1.0,
            z_far: 10000.0,
            position: Vec3::new(0.0, 100.0, 200.0),
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogConfig {
    pub color: u32,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: 0xf7d9aa,
            near: 100.0,
            far: 950.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub divisions: u32,
    pub y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 2000.0,
            divisions: 100,
            y: -199.0,
        }
    }
}

/// Post-construction adjustment of the airplane root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirplanePlacement {
    pub scale: f32,
    pub initial_y: f32,
}

impl Default for AirplanePlacement {
    fn default() -> Self {
        Self {
            scale: 0.25,
            initial_y: 100.0,
        }
    }
}

/// Per-frame increments (radians per frame) and pointer-to-world ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub propeller_speed: f32,
    pub sea_speed: f32,
    pub sky_speed: f32,
    pub horizontal_range: (f32, f32),
    pub vertical_range: (f32, f32),
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            propeller_speed: 0.3,
            sea_speed: 0.005,
            sky_speed: 0.01,
            horizontal_range: (-100.0, 100.0),
            vertical_range: (25.0, 175.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub fog: FogConfig,
    /// `None` leaves the reference grid out of the scene.
    pub grid: Option<GridConfig>,
    pub airplane: AirplanePlacement,
    pub animation: AnimationConfig,
}

impl AppConfig {
    pub fn reference() -> Self {
        Self {
            grid: Some(GridConfig::default()),
            ..Self::default()
        }
    }
}

use glam::Vec3;
use plaza_common::Color;

/// Shadow frustum and map settings for a shadow-casting light.
///
/// The orthographic shadow frustum spans `±extent` on each side; the map
/// size is a request the backend may clamp to its texture limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub extent: f32,
    pub far: f32,
    pub map_size: [u32; 2],
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            extent: 5000.0,
            far: 10_000.0,
            map_size: [5000, 5000],
        }
    }
}

/// A light source in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
        /// The light shines from this position toward the origin.
        position: Vec3,
        cast_shadow: bool,
        shadow: ShadowConfig,
    },
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient {
            color: Color::WHITE,
            intensity,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_defaults_match_frustum() {
        let s = ShadowConfig::default();
        assert_eq!(s.extent, 5000.0);
        assert_eq!(s.far, 10_000.0);
        assert_eq!(s.map_size, [5000, 5000]);
    }
}

use plaza_assets::TextureId;
use plaza_common::Color;

/// Texture coordinate wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

/// A texture applied to a surface, with wrap and repeat settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureMap {
    pub texture: TextureId,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub repeat: [f32; 2],
}

impl TextureMap {
    pub fn new(texture: TextureId) -> Self {
        Self {
            texture,
            wrap_s: WrapMode::default(),
            wrap_t: WrapMode::default(),
            repeat: [1.0, 1.0],
        }
    }

    /// Repeat on both axes with the given tiling factor.
    pub fn repeating(texture: TextureId, x: f32, y: f32) -> Self {
        Self {
            texture,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            repeat: [x, y],
        }
    }
}

/// How a surface reacts to lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Flat color/texture, ignores lights.
    Unlit,
    /// Lambert diffuse against the scene lights.
    Lambert,
}

/// Surface appearance: color, optional texture map, face culling, shading.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub map: Option<TextureMap>,
    pub double_sided: bool,
    pub shading: Shading,
}

impl Material {
    pub fn unlit(color: Color) -> Self {
        Self {
            color,
            map: None,
            double_sided: false,
            shading: Shading::Unlit,
        }
    }

    pub fn lit(color: Color) -> Self {
        Self {
            color,
            map: None,
            double_sided: false,
            shading: Shading::Lambert,
        }
    }

    pub fn with_map(mut self, map: Option<TextureMap>) -> Self {
        self.map = map;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

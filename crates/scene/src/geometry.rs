use plaza_assets::FontFace;
use serde::{Deserialize, Serialize};

/// Shape of a mesh. Dimensions are in world units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Text(TextGeometry),
}

/// Extruded text. Glyph metrics are resolved against the typeface at
/// construction time so the geometry is self-contained; outline data stays
/// with the font and is opaque to the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextGeometry {
    pub text: String,
    /// Glyph height in world units.
    pub size: f32,
    /// Extrusion depth in world units.
    pub depth: f32,
    /// Per-character horizontal advance, already scaled to `size`.
    pub glyph_advances: Vec<f32>,
}

impl TextGeometry {
    pub fn new(text: impl Into<String>, size: f32, depth: f32, font: &FontFace) -> Self {
        let text = text.into();
        let glyph_advances = text.chars().map(|ch| font.advance_of(ch, size)).collect();
        Self {
            text,
            size,
            depth,
            glyph_advances,
        }
    }

    /// Total laid-out width.
    pub fn width(&self) -> f32 {
        self.glyph_advances.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_geometry_resolves_advances() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0), ('b', 250.0)]);
        let text = TextGeometry::new("ab", 30.0, 4.0, &font);
        assert_eq!(text.glyph_advances.len(), 2);
        assert!((text.glyph_advances[0] - 15.0).abs() < 1e-5);
        assert!((text.width() - 22.5).abs() < 1e-5);
    }

    #[test]
    fn empty_text_has_zero_width() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0)]);
        let text = TextGeometry::new("", 30.0, 4.0, &font);
        assert_eq!(text.width(), 0.0);
    }
}

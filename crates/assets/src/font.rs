use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// One glyph of a parsed typeface.
///
/// Only the horizontal advance is interpreted; the outline commands are
/// carried as opaque data for the extrusion backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Horizontal advance in font units.
    pub advance: f32,
    /// Raw outline command string, if the typeface provides one.
    pub outline: Option<String>,
}

/// Errors from font parsing.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("typeface has no glyphs")]
    NoGlyphs,
}

#[derive(Deserialize)]
struct RawGlyph {
    ha: f32,
    #[serde(default)]
    o: Option<String>,
}

#[derive(Deserialize)]
struct RawFont {
    #[serde(rename = "familyName", default)]
    family_name: Option<String>,
    #[serde(default = "default_resolution")]
    resolution: f32,
    glyphs: BTreeMap<String, RawGlyph>,
}

fn default_resolution() -> f32 {
    1000.0
}

/// A parsed typeface-JSON glyph set.
///
/// Matches the three.js typeface format: a `glyphs` map keyed by character
/// with per-glyph horizontal advance (`ha`) and outline commands (`o`),
/// plus a `resolution` giving font units per em.
#[derive(Debug, Clone)]
pub struct FontFace {
    pub family: String,
    pub resolution: f32,
    glyphs: BTreeMap<char, Glyph>,
}

impl FontFace {
    /// Parse a typeface-JSON string.
    pub fn parse(json: &str) -> Result<Self, FontError> {
        let raw: RawFont = serde_json::from_str(json)?;
        let mut glyphs = BTreeMap::new();
        for (key, glyph) in raw.glyphs {
            // Typeface keys are single characters; anything longer is noise.
            if let Some(ch) = key.chars().next() {
                glyphs.insert(
                    ch,
                    Glyph {
                        advance: glyph.ha,
                        outline: glyph.o,
                    },
                );
            }
        }
        if glyphs.is_empty() {
            return Err(FontError::NoGlyphs);
        }
        Ok(Self {
            family: raw.family_name.unwrap_or_else(|| "unnamed".into()),
            resolution: raw.resolution,
            glyphs,
        })
    }

    /// Load and parse a typeface-JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let font = Self::parse(&data)?;
        tracing::debug!(
            family = %font.family,
            glyphs = font.glyph_count(),
            "loaded typeface"
        );
        Ok(font)
    }

    /// Build a font directly from glyph advances. Used by tests and demos
    /// that do not ship a full typeface file.
    pub fn from_glyphs<I>(family: impl Into<String>, resolution: f32, glyphs: I) -> Self
    where
        I: IntoIterator<Item = (char, f32)>,
    {
        Self {
            family: family.into(),
            resolution,
            glyphs: glyphs
                .into_iter()
                .map(|(ch, advance)| {
                    (
                        ch,
                        Glyph {
                            advance,
                            outline: None,
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Advance of one character scaled to the given text size. Characters
    /// missing from the typeface fall back to half an em.
    pub fn advance_of(&self, ch: char, size: f32) -> f32 {
        let units = self
            .glyphs
            .get(&ch)
            .map(|g| g.advance)
            .unwrap_or(self.resolution * 0.5);
        units * size / self.resolution
    }

    /// Total width of a string at the given text size.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.advance_of(ch, size)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPEFACE: &str = r#"{
        "familyName": "Test Sans",
        "resolution": 1000,
        "glyphs": {
            "A": {"ha": 600, "o": "m 0 0 l 300 700 l 600 0"},
            "b": {"ha": 500},
            " ": {"ha": 250}
        }
    }"#;

    #[test]
    fn parses_typeface_json() {
        let font = FontFace::parse(TYPEFACE).unwrap();
        assert_eq!(font.family, "Test Sans");
        assert_eq!(font.glyph_count(), 3);
        assert!(font.glyph('A').unwrap().outline.is_some());
        assert!(font.glyph('b').unwrap().outline.is_none());
    }

    #[test]
    fn rejects_empty_glyph_set() {
        let err = FontFace::parse(r#"{"glyphs": {}}"#).unwrap_err();
        assert!(matches!(err, FontError::NoGlyphs));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            FontFace::parse("not json"),
            Err(FontError::Json(_))
        ));
    }

    #[test]
    fn measures_with_resolution_scaling() {
        let font = FontFace::parse(TYPEFACE).unwrap();
        // 600 units at size 30 with resolution 1000 -> 18.0
        assert!((font.advance_of('A', 30.0) - 18.0).abs() < 1e-5);
        assert!((font.measure("A b", 30.0) - (18.0 + 7.5 + 15.0)).abs() < 1e-4);
    }

    #[test]
    fn missing_glyph_falls_back_to_half_em() {
        let font = FontFace::parse(TYPEFACE).unwrap();
        assert!((font.advance_of('Z', 30.0) - 15.0).abs() < 1e-5);
    }

    #[test]
    fn from_glyphs_constructor() {
        let font = FontFace::from_glyphs("mono", 1000.0, [('a', 500.0), ('b', 500.0)]);
        assert_eq!(font.glyph_count(), 2);
        assert!((font.measure("ab", 10.0) - 10.0).abs() < 1e-6);
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), TYPEFACE).unwrap();
        let font = FontFace::load(tmp.path()).unwrap();
        assert_eq!(font.family, "Test Sans");
    }
}

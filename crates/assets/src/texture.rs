use plaza_common::Color;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Content-addressed texture id computed from the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Decoded RGBA8 pixel data.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Errors from texture operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
}

/// Content-addressed registry of decoded textures.
///
/// Identical pixel data registers once and shares one id. The registry is
/// filled during startup and read by the GPU backend at upload time.
#[derive(Debug, Clone, Default)]
pub struct TextureStore {
    textures: BTreeMap<TextureId, TextureData>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file into RGBA8 and register it.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<TextureId, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "texture".into());
        let id = self.register(TextureData {
            name,
            width,
            height,
            pixels: decoded.into_raw(),
        });
        tracing::debug!(?id, width, height, path = %path.display(), "loaded texture");
        Ok(id)
    }

    /// Register a 1x1 solid-color texture. This is the fallback when an
    /// image fails to load: the object keeps rendering, just untextured.
    pub fn solid(&mut self, name: impl Into<String>, color: Color) -> TextureId {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.register(TextureData {
            name: name.into(),
            width: 1,
            height: 1,
            pixels: vec![to_byte(color.r), to_byte(color.g), to_byte(color.b), 255],
        })
    }

    /// Register already-decoded pixel data.
    pub fn register(&mut self, data: TextureData) -> TextureId {
        let id = content_hash(data.width, data.height, &data.pixels);
        self.textures.entry(id).or_insert(data);
        id
    }

    pub fn get(&self, id: TextureId) -> Option<&TextureData> {
        self.textures.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TextureId, &TextureData)> {
        self.textures.iter()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn content_hash(width: u32, height: u32, pixels: &[u8]) -> TextureId {
    let mut hasher = Sha256::new();
    hasher.update(width.to_le_bytes());
    hasher.update(height.to_le_bytes());
    hasher.update(pixels);
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    TextureId(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_texture_is_one_pixel() {
        let mut store = TextureStore::new();
        let id = store.solid("fallback", Color::WHITE);
        let data = store.get(id).unwrap();
        assert_eq!((data.width, data.height), (1, 1));
        assert_eq!(data.pixels, vec![255, 255, 255, 255]);
    }

    #[test]
    fn content_addressed_dedup() {
        let mut store = TextureStore::new();
        let a = store.solid("one", Color::YELLOW);
        let b = store.solid("two", Color::YELLOW);
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn distinct_colors_distinct_ids() {
        let mut store = TextureStore::new();
        let a = store.solid("w", Color::WHITE);
        let b = store.solid("y", Color::YELLOW);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_file_decodes_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.png");
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();

        let mut store = TextureStore::new();
        let id = store.load_file(&path).unwrap();
        let data = store.get(id).unwrap();
        assert_eq!((data.width, data.height), (2, 3));
        assert_eq!(data.pixels.len(), 2 * 3 * 4);
        assert_eq!(&data.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut store = TextureStore::new();
        let err = store.load_file("/nonexistent/nope.png").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}

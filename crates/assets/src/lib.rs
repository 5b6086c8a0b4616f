//! Asset ingestion boundary: phrase records, typeface fonts, textures.
//!
//! Everything entering the scene passes through here and is validated with
//! named errors. The renderer consumes textures by content-addressed handle,
//! never by raw file path.
//!
//! # Invariants
//! - Invalid phrase records never reach geometry construction.
//! - Texture ids are content-addressed; identical pixels share one id.

mod font;
mod phrase;
mod texture;

pub use font::{FontError, FontFace, Glyph};
pub use phrase::{PhraseEntry, PhraseError, load_phrases, parse_phrases, validate_phrases};
pub use texture::{AssetError, TextureData, TextureId, TextureStore};

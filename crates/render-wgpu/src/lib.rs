//! wgpu render backend for the plaza scene.
//!
//! The scene is immutable after construction, so all GPU resources (vertex
//! and index buffers, textures, per-mesh uniforms) are prepared once and
//! only re-read per frame. One depth-only pass renders the directional
//! shadow map; the main pass draws every mesh with ambient + lambert
//! lighting and PCF shadow lookup.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - Resize recreates the window depth target only; the shadow map size is
//!   fixed by the light configuration (clamped to device limits).

mod gpu;
mod shaders;
mod tessellate;

pub use gpu::WgpuRenderer;
pub use tessellate::{MeshData, Vertex, tessellate};

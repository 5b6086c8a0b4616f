//! Scene graph and scene builders.
//!
//! The scene owns every node added to it and is populated once at startup;
//! nodes are never mutated after creation. Builders take the scene
//! explicitly — there is no hidden shared instance state.
//!
//! # Invariants
//! - Node order is insertion order; ring groups keep their input order.
//! - All scene mutation happens on one thread; the graph carries no locks.

pub mod builder;
mod geometry;
mod light;
mod material;
mod scene;

pub use geometry::{Geometry, TextGeometry};
pub use light::{Light, ShadowConfig};
pub use material::{Material, Shading, TextureMap, WrapMode};
pub use scene::{DrawItem, Group, Mesh, NodeKind, Scene, SceneNode, ShadowMapMode};

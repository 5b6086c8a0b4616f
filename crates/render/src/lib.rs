//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - A renderer never mutates the scene; render output derives from scene
//!   and camera alone.
//! - The camera aspect ratio always equals the current viewport width over
//!   height; resize handling re-establishes it before the next frame.

mod camera;
mod renderer;

pub use camera::OrbitCamera;
pub use renderer::{Renderer, SummaryRenderer};

pub fn crate_info() -> &'static str {
    "plaza-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}

//! Shared types used across the plaza workspace.

mod types;

pub use types::{Color, ObjectId, Transform};

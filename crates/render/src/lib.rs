//! Rendering adapter: renderer-agnostic transform pipeline and mesh data.
//!
//! # Invariants
//! - Renderers read scene state; they never advance or mutate it.
//! - Model matrices compose translate, scale, tilt, spin in that order.
//! - The cube mesh is generated, never hand-listed.

mod camera;
mod mesh;
mod renderer;
mod transform;

pub use camera::LookAtCamera;
pub use mesh::{CUBE_VERTEX_COUNT, FACES, Face, MeshVertex, cube_mesh};
pub use renderer::{DebugTextRenderer, Renderer};
pub use transform::{BodyTransforms, frame_transforms, model_matrix};

pub fn crate_info() -> &'static str {
    "orrery-render v0.1.0"
}

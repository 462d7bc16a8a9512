//! wgpu render backend for the orrery.
//!
//! Draws the shared cube once per body with that body's model, view, and
//! projection matrices, unlit, with depth testing and back-face culling.
//! Can read the presented colour buffer back for frame capture.
//!
//! # Invariants
//! - Renderer never advances scene state.
//! - A shader that fails validation aborts pipeline creation; there is no
//!   fallback pipeline.

mod gpu;
mod readback;
mod shaders;

pub use gpu::{CLEAR_COLOR, RenderError, WgpuRenderer};
pub use readback::{ReadbackError, RgbPixels, padded_bytes_per_row, unpad_rows};
pub use shaders::{BODY_FRAGMENT, BODY_VERTEX, ShaderError, ShaderLibrary};

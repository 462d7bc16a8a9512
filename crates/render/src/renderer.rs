use crate::camera::LookAtCamera;
use orrery_kernel::SceneState;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a camera, then produces output.
/// It never advances the scene; the frame loop owns that.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene state and camera.
    fn render(&self, scene: &SceneState, camera: &LookAtCamera) -> Self::Output;
}

/// Human-readable dump of the scene. Used by the CLI and in logs.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &SceneState, camera: &LookAtCamera) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (frame={}, day={:.4}) ===",
            scene.frame(),
            scene.day()
        );
        let target = scene.position(camera.target);
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target={} ({:.2}, {:.2}, {:.2}) fov={:.0}",
            camera.eye.x,
            camera.eye.y,
            camera.eye.z,
            camera.target,
            target.x,
            target.y,
            target.z,
            camera.fov_y_degrees
        );
        for snap in scene.snapshot() {
            let p = snap.position;
            let _ = writeln!(
                out,
                "  {:<5} pos=({:.2}, {:.2}, {:.2}) spin={:.2}",
                snap.body.name(),
                p.x,
                p.y,
                p.z,
                snap.spin_deg
            );
        }
        out
    }
}

use glam::{Mat4, Vec3};
use orrery_kernel::{Body, SceneState};

/// Fixed-eye camera that looks at one body's current position.
#[derive(Debug, Clone, Copy)]
pub struct LookAtCamera {
    pub eye: Vec3,
    pub up: Vec3,
    pub target: Body,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LookAtCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(50.0, 50.0, 100.0),
            up: Vec3::Y,
            target: Body::Moon,
            fov_y_degrees: 30.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl LookAtCamera {
    pub fn looking_at(target: Body) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn view_matrix(&self, scene: &SceneState) -> Mat4 {
        Mat4::look_at_rh(self.eye, scene.position(self.target), self.up)
    }

    /// Perspective projection with a 0..1 depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_matches_reference_view() {
        let cam = LookAtCamera::default();
        assert_eq!(cam.eye, Vec3::new(50.0, 50.0, 100.0));
        assert_eq!(cam.target, Body::Moon);
        assert_eq!(cam.fov_y_degrees, 30.0);
        assert!((cam.aspect - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn target_lands_on_view_axis() {
        let scene = SceneState::default();
        for body in Body::ALL {
            let cam = LookAtCamera::looking_at(body);
            let target = cam.view_matrix(&scene).transform_point3(scene.position(body));
            // Right-handed view space looks down -Z.
            assert!(target.x.abs() < 1e-3);
            assert!(target.y.abs() < 1e-3);
            assert!(target.z < 0.0);
        }
    }

    #[test]
    fn projection_maps_near_and_far_to_depth_range() {
        let cam = LookAtCamera::default();
        let proj = cam.projection_matrix();
        let near = proj.project_point3(Vec3::new(0.0, 0.0, -cam.near));
        let far = proj.project_point3(Vec3::new(0.0, 0.0, -cam.far));
        assert!(near.z.abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}

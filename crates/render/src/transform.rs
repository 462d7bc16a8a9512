use crate::camera::LookAtCamera;
use glam::{Mat4, Vec3};
use orrery_kernel::{Body, SceneState};

/// The three matrices uploaded before one body's draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransforms {
    pub body: Body,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Model matrix for `body` sitting at `position` on `day`.
///
/// Built from identity as translate, then scale, then tilt about Z, then spin
/// about Y; spin is applied to the vertices first.
pub fn model_matrix(body: Body, position: Vec3, day: f64) -> Mat4 {
    let desc = body.descriptor();
    let spin = body.spin_angle(day).to_radians() as f32;
    Mat4::from_translation(position)
        * Mat4::from_scale(desc.scale)
        * Mat4::from_rotation_z(desc.axial_tilt_deg.to_radians())
        * Mat4::from_rotation_y(spin)
}

/// Per-body model, view, projection for the current frame, in body order.
pub fn frame_transforms(scene: &SceneState, camera: &LookAtCamera) -> [BodyTransforms; 3] {
    let view = camera.view_matrix(scene);
    let projection = camera.projection_matrix();
    Body::ALL.map(|body| BodyTransforms {
        body,
        model: model_matrix(body, scene.position(body), scene.day()),
        view,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn model_origin_maps_to_body_position() {
        let pos = Vec3::new(3.0, -2.0, 7.0);
        for body in Body::ALL {
            let m = model_matrix(body, pos, 42.0);
            assert!(approx(m.transform_point3(Vec3::ZERO), pos));
        }
    }

    #[test]
    fn scale_applies_after_translation() {
        // translate-then-scale keeps the translation unscaled
        let pos = Vec3::new(20.0, 0.0, 0.0);
        let m = model_matrix(Body::Sun, pos, 0.0);
        assert!(approx(m.transform_point3(Vec3::X), Vec3::new(24.0, 0.0, 0.0)));
    }

    #[test]
    fn spin_is_applied_before_tilt() {
        let day = 0.25; // earth spin 90 degrees
        let m = model_matrix(Body::Earth, Vec3::ZERO, day);
        let tilt = Body::Earth.descriptor().axial_tilt_deg.to_radians();
        let expected = Mat4::from_scale(Vec3::splat(2.5))
            * Mat4::from_rotation_z(tilt)
            * Mat4::from_rotation_y(90f32.to_radians());
        let swapped = Mat4::from_scale(Vec3::splat(2.5))
            * Mat4::from_rotation_y(90f32.to_radians())
            * Mat4::from_rotation_z(tilt);
        let p = Vec3::new(1.0, 0.0, 0.0);
        assert!(approx(m.transform_point3(p), expected.transform_point3(p)));
        assert!(!approx(m.transform_point3(p), swapped.transform_point3(p)));
    }

    #[test]
    fn tilted_spin_axis_leans_from_vertical() {
        let m = model_matrix(Body::Earth, Vec3::ZERO, 0.0);
        let axis = m.transform_vector3(Vec3::Y).normalize();
        let lean = axis.angle_between(Vec3::Y).to_degrees();
        assert!((lean - 23.4).abs() < 1e-3);
        // tilt about Z keeps the axis in the XY plane
        assert!(axis.z.abs() < 1e-6);
    }

    #[test]
    fn frame_shares_view_and_projection() {
        let mut scene = SceneState::default();
        scene.advance();
        let camera = LookAtCamera::default();
        let frame = frame_transforms(&scene, &camera);
        assert_eq!(frame.map(|t| t.body), Body::ALL);
        for t in &frame {
            assert_eq!(t.view, camera.view_matrix(&scene));
            assert_eq!(t.projection, camera.projection_matrix());
        }
        let moon_origin = frame[2].model.transform_point3(Vec3::ZERO);
        assert!(approx(moon_origin, scene.position(Body::Moon)));
    }
}

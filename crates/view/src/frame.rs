use faultscape_math::{Mat4, Perspective};
use serde::Serialize;

use crate::camera::Camera;

/// The three transforms uploaded per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl FrameMatrices {
    /// Identity model transform, the camera's view and the projection.
    pub fn for_camera(camera: &Camera, perspective: &Perspective) -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: camera.view_matrix(),
            projection: perspective.matrix(),
        }
    }

    pub fn model_view(&self) -> Mat4 {
        self.view * self.model
    }

    pub fn model_view_projection(&self) -> Mat4 {
        self.projection * self.model_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultscape_math::{Vec4, translate};

    fn glam_close(a: Mat4, b: glam::Mat4) -> bool {
        glam::Mat4::from(a).abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn matches_glam_camera() {
        let camera = Camera::default();
        let perspective = Perspective::default();
        let frame = FrameMatrices::for_camera(&camera, &perspective);

        let view = glam::Mat4::look_at_rh(camera.eye.into(), camera.center.into(), camera.up.into());
        let projection = glam::Mat4::perspective_rh_gl(
            perspective.fov_y,
            perspective.aspect(),
            perspective.near,
            perspective.far,
        );
        assert!(glam_close(frame.view, view));
        assert!(glam_close(frame.projection, projection));
        assert!(glam_close(frame.model_view_projection(), projection * view));
    }

    #[test]
    fn model_view_applies_model_first() {
        let camera = Camera::default();
        let mut frame = FrameMatrices::for_camera(&camera, &Perspective::default());
        frame.model = translate(0.0, 0.0, 1.0);

        let p = Vec4::new([0.0, 0.0, 0.0, 1.0]);
        let a = frame.model_view() * p;
        let b = frame.view * (frame.model * p);
        assert!((a - b).mag() < 1e-6);
    }

    #[test]
    fn target_lands_on_screen_center() {
        let camera = Camera::default();
        let frame = FrameMatrices::for_camera(&camera, &Perspective::default());
        let clip = frame.model_view_projection() * camera.center.extend(1.0);
        assert!((clip[0] / clip[3]).abs() < 1e-5);
        assert!((clip[1] / clip[3]).abs() < 1e-5);
        let depth = clip[2] / clip[3];
        assert!((-1.0..=1.0).contains(&depth));
    }

    #[test]
    fn serializes_all_three() {
        let frame = FrameMatrices::for_camera(&Camera::default(), &Perspective::default());
        let json = serde_json::to_value(frame).unwrap();
        for key in ["model", "view", "projection"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}

use faultscape_math::Perspective;
use faultscape_terrain::{Terrain, TerrainConfig, TerrainError};

use crate::action::CameraAction;
use crate::camera::Camera;
use crate::config::{ConfigError, SceneConfig};
use crate::frame::FrameMatrices;

/// A terrain plus the camera looking at it.
///
/// The terrain is immutable once generated; frames only move the camera.
#[derive(Debug, Clone)]
pub struct Scene {
    terrain: Terrain,
    camera: Camera,
    perspective: Perspective,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Result<Self, TerrainError> {
        let terrain = Terrain::generate(&config.terrain)?;
        let mut camera = Camera::new(config.camera);
        camera.settle(&terrain);
        Ok(Self {
            terrain,
            camera,
            perspective: config.projection,
        })
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }

    /// Replace the terrain. The camera keeps its pose.
    pub fn regenerate(&mut self, config: &TerrainConfig) -> Result<(), TerrainError> {
        self.terrain = Terrain::generate(config)?;
        self.camera.settle(&self.terrain);
        Ok(())
    }

    /// Track a new viewport size. A zero-sized viewport (e.g. a minimized
    /// window) is rejected and the last valid projection stays in use.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        let (w, h) = (width as f32, height as f32);
        self.perspective.resize(w, h).map_err(|_| {
            tracing::debug!(width, height, "ignoring empty viewport");
            ConfigError::Viewport { width: w, height: h }
        })?;
        tracing::debug!(width, height, "viewport resized");
        Ok(())
    }

    /// Apply this frame's actions, settle the eye, and return the matrices to draw with.
    pub fn step(&mut self, actions: &[CameraAction]) -> FrameMatrices {
        for &action in actions {
            self.camera.apply(action);
        }
        self.camera.settle(&self.terrain);
        self.frame()
    }

    pub fn frame(&self) -> FrameMatrices {
        FrameMatrices::for_camera(&self.camera, &self.perspective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraConfig, CameraMode};
    use faultscape_math::Vec3;
    use faultscape_terrain::HeightField;

    fn small_config() -> SceneConfig {
        SceneConfig {
            terrain: TerrainConfig {
                resolution: 20,
                faults: 30,
                seed: Some(11),
                ..TerrainConfig::default()
            },
            ..SceneConfig::default()
        }
    }

    #[test]
    fn flight_frame_holds_altitude() {
        let mut scene = Scene::new(&small_config()).unwrap();
        let frame = scene.step(&[CameraAction::Forward, CameraAction::Forward]);
        assert_eq!(scene.camera().eye.z(), 1.5);
        assert_eq!(frame.view, scene.camera().view_matrix());
    }

    #[test]
    fn walk_frame_sits_above_ground() {
        let config = SceneConfig {
            camera: CameraConfig {
                eye: Vec3::new([0.2, 0.3, 5.0]),
                center: Vec3::new([0.2, -0.7, 0.0]),
                mode: CameraMode::Walk,
                ..CameraConfig::default()
            },
            ..small_config()
        };
        let mut scene = Scene::new(&config).unwrap();
        scene.step(&[CameraAction::Forward]);

        let eye = scene.camera().eye;
        let ground = scene.terrain().height_at(eye.x(), eye.y()).unwrap();
        let expected = ground + 2.0 * scene.terrain().cell_size();
        assert!((eye.z() - expected).abs() < 1e-5);
    }

    #[test]
    fn resize_changes_projection_only() {
        let mut scene = Scene::new(&small_config()).unwrap();
        let before = scene.frame();
        scene.resize(800, 800).unwrap();
        let after = scene.frame();
        assert_eq!(before.view, after.view);
        assert_ne!(before.projection, after.projection);
        assert_eq!(after.projection.get(0, 0), after.projection.get(1, 1));
    }

    #[test]
    fn regenerate_keeps_camera() {
        let mut scene = Scene::new(&small_config()).unwrap();
        scene.step(&[CameraAction::StrafeLeft]);
        let eye = scene.camera().eye;
        scene
            .regenerate(&TerrainConfig {
                resolution: 10,
                seed: Some(1),
                ..TerrainConfig::default()
            })
            .unwrap();
        assert_eq!(scene.terrain().resolution(), 10);
        assert_eq!(scene.camera().eye, eye);
    }

    #[test]
    fn bad_terrain_config_fails() {
        let config = SceneConfig {
            terrain: TerrainConfig {
                resolution: 0,
                ..TerrainConfig::default()
            },
            ..SceneConfig::default()
        };
        assert!(Scene::new(&config).is_err());
    }

    #[test]
    fn empty_viewport_keeps_last_projection() {
        let mut scene = Scene::new(&small_config()).unwrap();
        scene.resize(640, 480).unwrap();
        let before = scene.frame().projection;

        for (w, h) in [(0, 0), (0, 480), (640, 0)] {
            let err = scene.resize(w, h).unwrap_err();
            assert!(matches!(err, ConfigError::Viewport { .. }), "{w}x{h}");
        }
        let after = scene.frame().projection;
        assert_eq!(after, before);
        assert!(after.as_array().iter().all(|v| v.is_finite()));
    }
}

use faultscape_math::{Mat4, Vec3, look_at};
use faultscape_terrain::HeightField;
use serde::{Deserialize, Serialize};

use crate::action::CameraAction;

/// How the eye height is chosen each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Eye held at a fixed altitude above the terrain.
    #[default]
    Flight,
    /// Eye follows the ground a couple of cells above the surface.
    Walk,
}

/// Starting pose and motion tuning for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Direction of travel for forward/backward motion.
    pub forward: Vec3,
    pub mode: CameraMode,
    /// Eye z in flight mode.
    pub flight_altitude: f32,
    /// Distance moved per action in flight mode.
    pub flight_step: f32,
    /// Distance moved per action in walk mode.
    pub walk_step: f32,
    /// Eye height above ground in walk mode, in grid cells.
    pub eye_height_cells: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new([0.0, 3.5, 1.5]),
            center: Vec3::ZERO,
            up: Vec3::Z,
            forward: Vec3::new([0.0, -1.0, 0.0]),
            mode: CameraMode::Flight,
            flight_altitude: 1.5,
            flight_step: 0.01,
            walk_step: 0.0025,
            eye_height_cells: 2.0,
        }
    }
}

/// Look-at camera driven by [`CameraAction`]s.
///
/// Camera motion is presentation state; it never touches the terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
    mode: CameraMode,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            eye: config.eye,
            center: config.center,
            up: config.up,
            forward: config.forward,
            mode: config.mode,
            config,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode != self.mode {
            tracing::info!(?mode, "camera mode changed");
        }
        self.mode = mode;
    }

    /// Distance covered by one movement action in the current mode.
    pub fn step(&self) -> f32 {
        match self.mode {
            CameraMode::Flight => self.config.flight_step,
            CameraMode::Walk => self.config.walk_step,
        }
    }

    /// Unit vector to the camera's right, perpendicular to `forward` and `up`.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize()
    }

    pub fn left(&self) -> Vec3 {
        self.up.cross(self.forward).normalize()
    }

    pub fn apply(&mut self, action: CameraAction) {
        let step = self.step();
        match action {
            CameraAction::Forward => self.translate(self.forward * step),
            CameraAction::Backward => self.translate(self.forward * -step),
            CameraAction::StrafeLeft => self.translate(self.left() * step),
            CameraAction::StrafeRight => self.translate(self.right() * step),
            CameraAction::TargetForward => self.center = self.center + self.forward * step,
            CameraAction::TargetBackward => self.center = self.center - self.forward * step,
            CameraAction::TargetLeft => self.center = self.center + self.left() * step,
            CameraAction::TargetRight => self.center = self.center + self.right() * step,
            CameraAction::ToggleMode => self.set_mode(match self.mode {
                CameraMode::Flight => CameraMode::Walk,
                CameraMode::Walk => CameraMode::Flight,
            }),
        }
    }

    fn translate(&mut self, delta: Vec3) {
        self.eye = self.eye + delta;
        self.center = self.center + delta;
    }

    /// Fix the eye height for this frame.
    ///
    /// Flight mode pins the eye at the configured altitude. Walk mode puts it
    /// `eye_height_cells` grid cells above the ground; off the terrain the
    /// height is left as it was.
    pub fn settle<H: HeightField + ?Sized>(&mut self, ground: &H) {
        match self.mode {
            CameraMode::Flight => self.eye[2] = self.config.flight_altitude,
            CameraMode::Walk => match ground.height_at(self.eye.x(), self.eye.y()) {
                Some(h) => {
                    self.eye[2] = h + self.config.eye_height_cells * ground.cell_size();
                }
                None => {
                    tracing::debug!(x = self.eye.x(), y = self.eye.y(), "eye is off the terrain");
                }
            },
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.eye, self.center, self.up)
    }
}

use std::path::Path;

use faultscape_math::Perspective;
use faultscape_terrain::TerrainConfig;
use serde::{Deserialize, Serialize};

use crate::camera::CameraConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid projection: near {near}, far {far}")]
    Projection { near: f32, far: f32 },
    #[error("invalid viewport {width}x{height}")]
    Viewport { width: f32, height: f32 },
    #[error("invalid camera: {0}")]
    Camera(&'static str),
}

/// Shortest cross product still treated as a usable basis direction.
const MIN_AXIS_LENGTH: f32 = 1e-6;

/// Everything needed to build a [`Scene`](crate::Scene).
///
/// Missing sections and fields fall back to their defaults, so `{}` is a
/// complete config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainConfig,
    pub camera: CameraConfig,
    pub projection: Perspective,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading scene config");
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject projections that would produce a singular or inverted depth
    /// range, and camera poses whose basis cannot be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.projection;
        if !(p.near > 0.0 && p.far > p.near) {
            return Err(ConfigError::Projection {
                near: p.near,
                far: p.far,
            });
        }
        if !(p.width > 0.0 && p.height > 0.0) {
            return Err(ConfigError::Viewport {
                width: p.width,
                height: p.height,
            });
        }

        let cam = &self.camera;
        let view_dir = cam.center - cam.eye;
        if view_dir.mag() < MIN_AXIS_LENGTH {
            return Err(ConfigError::Camera("eye and center coincide"));
        }
        if cam.up.mag() < MIN_AXIS_LENGTH {
            return Err(ConfigError::Camera("up is zero"));
        }
        if view_dir.normalize().cross(cam.up.normalize()).mag() < MIN_AXIS_LENGTH {
            return Err(ConfigError::Camera("view direction is parallel to up"));
        }
        if cam.forward.mag() < MIN_AXIS_LENGTH
            || cam.forward.normalize().cross(cam.up.normalize()).mag() < MIN_AXIS_LENGTH
        {
            return Err(ConfigError::Camera("forward is zero or parallel to up"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SceneConfig::from_json_str("{}").unwrap(), SceneConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{"terrain": {"resolution": 40, "seed": 3}, "camera": {"mode": "walk"}}"#,
        )
        .unwrap();
        assert_eq!(config.terrain.resolution, 40);
        assert_eq!(config.terrain.faults, TerrainConfig::default().faults);
        assert_eq!(config.camera.mode, crate::CameraMode::Walk);
        assert_eq!(config.projection, Perspective::default());
    }

    #[test]
    fn rejects_bad_projection() {
        let err = SceneConfig::from_json_str(r#"{"projection": {"near": 2.0, "far": 1.0}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Projection { .. }));

        let err = SceneConfig::from_json_str(r#"{"projection": {"height": 0.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Viewport { .. }));
    }

    #[test]
    fn rejects_degenerate_camera() {
        let cases = [
            (r#"{"camera": {"eye": [0.0, 0.0, 0.0]}}"#, "coincide"),
            (r#"{"camera": {"up": [0.0, 0.0, 0.0]}}"#, "up is zero"),
            (r#"{"camera": {"eye": [0.0, 0.0, 2.0]}}"#, "parallel to up"),
            (r#"{"camera": {"forward": [0.0, 0.0, -1.0]}}"#, "forward"),
            (r#"{"camera": {"forward": [0.0, 0.0, 0.0]}}"#, "forward"),
        ];
        for (json, reason) in cases {
            let err = SceneConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ConfigError::Camera(_)), "{json}");
            assert!(err.to_string().contains(reason), "{json}: {err}");
        }
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = SceneConfig::from_json_str("{terrain").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"terrain": {{"faults": 7}}}}"#).unwrap();
        let config = SceneConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.terrain.faults, 7);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn pretty_json_reloads() {
        let config = SceneConfig::default();
        let text = config.to_json_pretty().unwrap();
        assert_eq!(SceneConfig::from_json_str(&text).unwrap(), config);
    }
}

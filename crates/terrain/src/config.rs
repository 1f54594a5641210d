use serde::{Deserialize, Serialize};

use crate::fault::FaultParams;

/// Terrain generation settings. Every field has a default, so a partial
/// JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertices along each side of the grid.
    pub resolution: usize,
    pub faults: usize,
    pub initial_delta: f32,
    pub attenuation: f32,
    /// Seed for reproducible terrain; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        let faults = FaultParams::default();
        Self {
            resolution: 100,
            faults: faults.faults,
            initial_delta: faults.initial_delta,
            attenuation: faults.attenuation,
            seed: None,
        }
    }
}

impl TerrainConfig {
    pub fn fault_params(&self) -> FaultParams {
        FaultParams {
            faults: self.faults,
            initial_delta: self.initial_delta,
            attenuation: self.attenuation,
        }
    }
}

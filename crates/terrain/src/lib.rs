//! Terrain: fault-displacement heightfield synthesis.
//!
//! # Invariants
//! - Every mesh attribute has one entry per vertex; triangle indices are in range.
//! - Each generation call owns its extent accumulator; nothing is global.
//! - After rescaling, heights span exactly `[-h/2, h/2]`, `h` being half the x-range.
//!
//! # Pipeline
//! `make_grid` → `apply_faults` → `rescale_heights` → `compute_normals`,
//! wrapped by [`Terrain::generate`].

mod config;
mod error;
pub mod fault;
pub mod grid;
pub mod mesh;
pub mod normals;
mod terrain;

pub use config::TerrainConfig;
pub use error::{MeshError, TerrainError};
pub use fault::{Extent, Fault, FaultParams, apply_faults, rescale_heights};
pub use grid::make_grid;
pub use mesh::{Attribute, Mesh};
pub use normals::{compute_normals, vertex_normals};
pub use terrain::{HeightField, Terrain};

pub fn crate_info() -> &'static str {
    "faultscape-terrain v0.1.0"
}

//! Parameter definitions with physical units and documented semantics.
//!
//! All scene literals are collected here with:
//! - Physical units (meters, radians, degrees)
//! - Documented ranges and meanings
//! - Named presets instead of duplicated setup code

mod camera;
mod environment;
mod render;
mod scene;
mod terrain;
mod water;

// Re-export all types
pub use camera::OrbitCameraParams;
pub use environment::{FogParams, LightParams, SkyParams};
pub use render::RenderConfig;
pub use scene::{SceneConfig, ScenePreset, DEFAULT_SEED_PHRASE};
pub use terrain::{ElevationParams, TerrainMaterial, TerrainParams, WindParams};
pub use water::{srgb_hex_to_linear, WaterParams};

//! Shoreline library - procedural sand terrain with depth-composited water foam

pub mod assets;
pub mod camera;
pub mod error;
pub mod frame;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod scene;
pub mod terrain;
pub mod water;

//! Terrain shape and material parameters.

use std::f32::consts::PI;

/// Wind alignment: rotates noise sampling space and stretches features
/// along the rotated axis (dune ridges, ripples)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindParams {
    /// Wind direction in the terrain plane (normalized on use, must be non-zero)
    pub direction: [f32; 2],

    /// Anisotropic stretch applied after rotation (>= 1)
    pub stretch_factor: f32,
}

/// How noise is mapped to elevation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationParams {
    /// Multiplier applied to planar coordinates before sampling noise
    /// (noise cycles per meter, low = long wavelength)
    pub planar_scale: f32,

    /// Multiplier applied to raw noise output (meters)
    pub height_factor: f32,

    /// Optional wind alignment
    pub wind: Option<WindParams>,
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            planar_scale: 0.04,
            height_factor: 1.5,
            wind: Some(WindParams {
                direction: [1.0, -3.0],
                stretch_factor: 2.5,
            }),
        }
    }
}

/// Terrain mesh parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParams {
    /// Extent along X (meters)
    pub width_m: f32,

    /// Extent along the plane's second axis (meters)
    pub height_m: f32,

    /// Quads along X
    pub segments_x: usize,

    /// Quads along the plane's second axis
    pub segments_y: usize,

    pub elevation: ElevationParams,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width_m: 1000.0,
            height_m: 1000.0,
            segments_x: 750,
            segments_y: 750,
            elevation: ElevationParams::default(),
        }
    }
}

/// Sand material: tiling texture darkened into wet sand near the waterline
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMaterial {
    /// Texture file name inside the assets directory
    pub texture_file: String,

    /// Texture repetitions across the whole terrain
    pub texture_repeat: [f32; 2],

    /// UV rotation (radians)
    pub texture_rotation: f32,

    /// Elevation at which sand is fully dry (meters)
    pub dry_height_m: f32,

    /// Elevation at which sand is fully wet (meters)
    pub wet_height_m: f32,
}

impl Default for TerrainMaterial {
    fn default() -> Self {
        Self {
            texture_file: "sand-texture.jpg".to_string(),
            texture_repeat: [300.0, 300.0],
            texture_rotation: PI / 4.0,
            dry_height_m: -0.3,
            wet_height_m: -0.5,
        }
    }
}

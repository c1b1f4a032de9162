//! Water surface parameters.

/// Convert a packed 0xRRGGBB sRGB color to linear RGB
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

/// Water plane and shoreline foam parameters
#[derive(Debug, Clone, PartialEq)]
pub struct WaterParams {
    /// Plane extent along X (meters)
    pub width_m: f32,

    /// Plane extent along Z (meters)
    pub height_m: f32,

    /// Quads per side
    pub segments: usize,

    /// Plane elevation (meters)
    pub elevation_m: f32,

    /// Foam / shoreline edge color (linear RGB)
    pub foam_color: [f32; 3],

    /// Open water color (linear RGB)
    pub water_color: [f32; 3],

    /// Depth difference (meters) below which the foam color shows
    pub threshold_m: f32,

    /// Distortion texture tiling across the plane
    pub foam_scale: f32,

    /// Output alpha of the water surface
    pub thickness: f32,

    /// Distortion texture file name inside the assets directory
    pub distortion_file: String,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            width_m: 1000.0,
            height_m: 1000.0,
            segments: 500,
            elevation_m: -0.5,
            foam_color: srgb_hex_to_linear(0x149f75),
            water_color: srgb_hex_to_linear(0x025b5e),
            threshold_m: 0.4,
            foam_scale: 60.0,
            thickness: 0.75,
            distortion_file: "foam-texture.png".to_string(),
        }
    }
}

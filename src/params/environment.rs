//! Sky, sun light and fog parameters.

use super::water::srgb_hex_to_linear;

/// Atmospheric sky parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParams {
    /// Haze amount
    pub turbidity: f32,

    /// Rayleigh (blue) scattering strength
    pub rayleigh: f32,

    /// Mie scattering coefficient (air particle density)
    pub mie_coefficient: f32,

    /// Mie directional anisotropy (sun glow tightness)
    pub mie_directional_g: f32,

    /// Sun polar angle from +Y (degrees)
    pub sun_phi_degrees: f32,

    /// Sun azimuth around +Y, measured from +Z (degrees)
    pub sun_theta_degrees: f32,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            turbidity: 1.0,
            rayleigh: 0.1,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            sun_phi_degrees: 65.0,
            sun_theta_degrees: 0.0,
        }
    }
}

impl SkyParams {
    /// Unit vector toward the sun
    pub fn sun_direction(&self) -> [f32; 3] {
        let phi = self.sun_phi_degrees.to_radians();
        let theta = self.sun_theta_degrees.to_radians();
        [phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos()]
    }
}

/// Directional light parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LightParams {
    /// Light color (linear RGB)
    pub color: [f32; 3],

    /// Intensity multiplier
    pub intensity: f32,

    /// Light position (meters)
    pub position: [f32; 3],

    /// Point the light is aimed at (meters)
    pub target: [f32; 3],

    /// Ambient term added to every lit surface
    pub ambient: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 5.0,
            position: [0.0, 10.0, 10.0],
            target: [0.0, 2.0, 0.0],
            ambient: 0.15,
        }
    }
}

/// Linear distance fog
#[derive(Debug, Clone, PartialEq)]
pub struct FogParams {
    /// Fog color (linear RGB)
    pub color: [f32; 3],

    /// Distance at which fog starts (meters)
    pub near_m: f32,

    /// Distance at which fog is opaque (meters)
    pub far_m: f32,
}

impl Default for FogParams {
    fn default() -> Self {
        Self {
            color: srgb_hex_to_linear(0x9aabc3),
            near_m: 10.0,
            far_m: 400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_direction_default() {
        let dir = SkyParams::default().sun_direction();
        let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();

        assert!((len - 1.0).abs() < 1e-6);
        assert!(dir[0].abs() < 1e-6); // theta = 0 keeps the sun in the YZ plane
        assert!((dir[1] - 65f32.to_radians().cos()).abs() < 1e-6);
        assert!(dir[2] > 0.0);
    }
}

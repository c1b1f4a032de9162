//! Water surface mesh and its per-frame uniform set.

use crate::error::TerrainError;
use crate::params::WaterParams;
use crate::terrain::{Heightfield, FLAT_ELEVATION};

/// Identifies the depth capture texture the water samples.
///
/// `epoch` changes whenever the capture target is recreated, so
/// renderers know to rebind it. `refreshed` is set once the capture has
/// been rewritten for the current frame and cleared after the composite
/// render consumed it; renderers only draw the water while it is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepthBinding {
    pub epoch: u64,
    pub refreshed: bool,
}

/// Uniform set consumed by the water shader
#[derive(Debug, Clone, PartialEq)]
pub struct WaterSurfaceState {
    /// Seconds since start, never decreasing
    pub elapsed_time: f32,
    pub depth: DepthBinding,
    /// Viewport size (pixels)
    pub resolution: [f32; 2],
    pub camera_near: f32,
    pub camera_far: f32,
    pub foam_color: [f32; 3],
    pub water_color: [f32; 3],
    pub threshold: f32,
    pub foam_scale: f32,
    pub thickness: f32,
}

impl WaterSurfaceState {
    fn new(params: &WaterParams) -> Self {
        Self {
            elapsed_time: 0.0,
            depth: DepthBinding::default(),
            resolution: [0.0, 0.0],
            camera_near: 0.0,
            camera_far: 0.0,
            foam_color: params.foam_color,
            water_color: params.water_color,
            threshold: params.threshold_m,
            foam_scale: params.foam_scale,
            thickness: params.thickness,
        }
    }
}

/// Flat water plane plus its live shading state
#[derive(Debug, Clone)]
pub struct WaterSurface {
    pub mesh: Heightfield,
    pub elevation: f32,
    pub visible: bool,
    pub state: WaterSurfaceState,
}

impl WaterSurface {
    /// Check the plane parameters without building the mesh
    pub fn validate(params: &WaterParams) -> Result<(), TerrainError> {
        if !params.elevation_m.is_finite() {
            return Err(TerrainError::invalid(
                "water.elevation_m",
                format!("{} is not finite", params.elevation_m),
            ));
        }
        Heightfield::validate(
            params.width_m,
            params.height_m,
            params.segments,
            params.segments,
            &FLAT_ELEVATION,
        )
    }

    pub fn new(params: &WaterParams) -> Result<Self, TerrainError> {
        Self::validate(params)?;

        let mesh = Heightfield::flat(
            params.width_m,
            params.height_m,
            params.segments,
            params.segments,
        )?;

        Ok(Self {
            mesh,
            elevation: params.elevation_m,
            visible: true,
            state: WaterSurfaceState::new(params),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_starts_visible_and_flat() {
        let water = WaterSurface::new(&WaterParams::default()).unwrap();

        assert!(water.visible);
        assert_eq!(water.elevation, -0.5);
        assert_eq!(water.mesh.vertices.len(), 501 * 501);
        assert!(water.mesh.elevations().iter().all(|&e| e == 0.0));
        assert_eq!(water.state.elapsed_time, 0.0);
        assert_eq!(water.state.depth, DepthBinding::default());
    }

    #[test]
    fn test_invalid_water_plane_rejected() {
        let mut params = WaterParams::default();
        params.width_m = -1.0;
        assert!(WaterSurface::new(&params).is_err());

        let mut params = WaterParams::default();
        params.elevation_m = f32::NAN;
        assert!(WaterSurface::new(&params).is_err());
    }
}

//! Heightfield mesh generated from a 2D noise field.

use bytemuck::{Pod, Zeroable};

use super::normals::compute_vertex_normals;
use crate::error::TerrainError;
use crate::noise::NoiseSource;
use crate::params::{ElevationParams, TerrainParams};

/// Vertex data for terrain and water meshes (position + normal + UV)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Elevation parameters of a zero-amplitude plane
pub const FLAT_ELEVATION: ElevationParams = ElevationParams {
    planar_scale: 1.0,
    height_factor: 0.0,
    wind: None,
};

/// Regular grid of `(segments_x + 1) * (segments_y + 1)` vertices, Y up.
///
/// Rows run along the plane's second axis: row 0 sits at planar
/// `y = +height / 2` (world `z = -height / 2`). Elevations are fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct Heightfield {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    segments_x: usize,
    segments_y: usize,
}

impl Heightfield {
    /// Generate a heightfield over a `width` x `height` plane.
    ///
    /// Each vertex's planar coordinate is scaled, optionally rotated into
    /// wind-aligned space and stretched, then sampled from `noise`. The
    /// sample times `height_factor` becomes the vertex elevation. Normals
    /// are rebuilt once every elevation is known.
    ///
    /// A zero segment count on either axis yields a flat single quad.
    pub fn generate<N>(
        width: f32,
        height: f32,
        segments_x: usize,
        segments_y: usize,
        noise: &N,
        params: &ElevationParams,
    ) -> Result<Self, TerrainError>
    where
        N: NoiseSource + ?Sized,
    {
        Self::validate(width, height, segments_x, segments_y, params)?;

        if segments_x == 0 || segments_y == 0 {
            return Ok(Self::build(width, height, 1, 1, |_, _| 0.0));
        }

        Ok(Self::build(width, height, segments_x, segments_y, |x, y| {
            let (sx, sy) = sample_coords(x, y, params);
            noise.sample(sx, sy) * params.height_factor
        }))
    }

    /// Check generation inputs without building anything
    pub fn validate(
        width: f32,
        height: f32,
        segments_x: usize,
        segments_y: usize,
        params: &ElevationParams,
    ) -> Result<(), TerrainError> {
        validate(width, height, params)?;
        check_grid_size(segments_x, segments_y)
    }

    /// Check bundled terrain parameters without building anything
    pub fn validate_params(params: &TerrainParams) -> Result<(), TerrainError> {
        Self::validate(
            params.width_m,
            params.height_m,
            params.segments_x,
            params.segments_y,
            &params.elevation,
        )
    }

    /// Generate terrain from bundled parameters
    pub fn from_params<N>(params: &TerrainParams, noise: &N) -> Result<Self, TerrainError>
    where
        N: NoiseSource + ?Sized,
    {
        Self::generate(
            params.width_m,
            params.height_m,
            params.segments_x,
            params.segments_y,
            noise,
            &params.elevation,
        )
    }

    /// Flat plane at elevation zero (water surface)
    pub fn flat(
        width: f32,
        height: f32,
        segments_x: usize,
        segments_y: usize,
    ) -> Result<Self, TerrainError> {
        Self::generate(
            width,
            height,
            segments_x,
            segments_y,
            &|_: f32, _: f32| 0.0,
            &FLAT_ELEVATION,
        )
    }

    fn build(
        width: f32,
        height: f32,
        segments_x: usize,
        segments_y: usize,
        mut elevation_at: impl FnMut(f32, f32) -> f32,
    ) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        let segment_width = width / segments_x as f32;
        let segment_height = height / segments_y as f32;

        let mut vertices = Vec::with_capacity((segments_x + 1) * (segments_y + 1));
        let mut indices = Vec::with_capacity(segments_x * segments_y * 6);

        for iy in 0..=segments_y {
            let y = half_height - iy as f32 * segment_height;
            for ix in 0..=segments_x {
                let x = ix as f32 * segment_width - half_width;
                let elevation = elevation_at(x, y);

                vertices.push(Vertex {
                    // Plane rotated -90 degrees about X: planar y maps to -z
                    position: [x, elevation, -y],
                    normal: [0.0, 1.0, 0.0],
                    uv: [
                        ix as f32 / segments_x as f32,
                        1.0 - iy as f32 / segments_y as f32,
                    ],
                });
            }
        }

        // Triangle indices (counter-clockwise seen from +Y)
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let top_left = (iy * (segments_x + 1) + ix) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((iy + 1) * (segments_x + 1) + ix) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        compute_vertex_normals(&mut vertices, &indices);

        Self {
            vertices,
            indices,
            segments_x,
            segments_y,
        }
    }

    /// Quads along each axis (a degenerate request reports the single quad)
    pub fn segments(&self) -> (usize, usize) {
        (self.segments_x, self.segments_y)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex at column `ix`, row `iy`
    pub fn vertex(&self, ix: usize, iy: usize) -> Option<&Vertex> {
        if ix > self.segments_x || iy > self.segments_y {
            return None;
        }
        self.vertices.get(iy * (self.segments_x + 1) + ix)
    }

    /// Elevations in vertex order
    pub fn elevations(&self) -> Vec<f32> {
        self.vertices.iter().map(|v| v.position[1]).collect()
    }

    /// Lowest and highest elevation
    pub fn elevation_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.position[1])
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e), hi.max(e))
            })
    }
}

/// Map a planar coordinate to noise sampling space.
///
/// Scales by `planar_scale`; with wind, rotates by the normalized wind
/// direction `(cos, sin)` and stretches the second rotated axis.
pub fn sample_coords(x: f32, y: f32, params: &ElevationParams) -> (f32, f32) {
    let x = x * params.planar_scale;
    let y = y * params.planar_scale;

    let Some(wind) = params.wind else {
        return (x, y);
    };

    let [dx, dy] = wind.direction;
    let len = (dx * dx + dy * dy).sqrt();
    let (cos_a, sin_a) = (dx / len, dy / len);

    let x_aligned = x * cos_a - y * sin_a;
    let y_aligned = x * sin_a + y * cos_a;

    (x_aligned, y_aligned * wind.stretch_factor)
}

/// Every vertex index must fit the `u32` index buffer
fn check_grid_size(segments_x: usize, segments_y: usize) -> Result<(), TerrainError> {
    if segments_x == 0 || segments_y == 0 {
        return Ok(());
    }

    let vertex_count = segments_x
        .checked_add(1)
        .zip(segments_y.checked_add(1))
        .and_then(|(columns, rows)| columns.checked_mul(rows));
    let index_count = segments_x
        .checked_mul(segments_y)
        .and_then(|quads| quads.checked_mul(6));

    match (vertex_count, index_count) {
        (Some(vertices), Some(_)) if u32::try_from(vertices - 1).is_ok() => Ok(()),
        _ => Err(TerrainError::invalid(
            "segments",
            format!("{segments_x} x {segments_y} grid exceeds the u32 vertex index range"),
        )),
    }
}

fn validate(width: f32, height: f32, params: &ElevationParams) -> Result<(), TerrainError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(TerrainError::invalid(
            "width",
            format!("{width} is not a positive finite number"),
        ));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(TerrainError::invalid(
            "height",
            format!("{height} is not a positive finite number"),
        ));
    }
    if !params.planar_scale.is_finite() || params.planar_scale <= 0.0 {
        return Err(TerrainError::invalid(
            "planar_scale",
            format!("{} is not a positive finite number", params.planar_scale),
        ));
    }
    if !params.height_factor.is_finite() {
        return Err(TerrainError::invalid(
            "height_factor",
            format!("{} is not finite", params.height_factor),
        ));
    }
    if let Some(wind) = params.wind {
        let [dx, dy] = wind.direction;
        if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
            return Err(TerrainError::invalid(
                "wind.direction",
                format!("({dx}, {dy}) is not a finite non-zero vector"),
            ));
        }
        if !wind.stretch_factor.is_finite() || wind.stretch_factor < 1.0 {
            return Err(TerrainError::invalid(
                "wind.stretch_factor",
                format!("{} is not a finite number >= 1", wind.stretch_factor),
            ));
        }
    }
    Ok(())
}

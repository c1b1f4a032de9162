//! Scene context: everything the renderer draws, built once from a config.

use tracing::info;

use crate::camera::OrbitCamera;
use crate::error::TerrainError;
use crate::noise::NoiseSource;
use crate::params::{FogParams, LightParams, SceneConfig, SkyParams, TerrainMaterial};
use crate::terrain::Heightfield;
use crate::water::WaterSurface;

/// Explicit scene context owned by the app and handed to the orchestrator
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: OrbitCamera,
    pub terrain: Heightfield,
    pub terrain_material: TerrainMaterial,
    pub water: WaterSurface,
    pub sky: SkyParams,
    pub light: LightParams,
    pub fog: FogParams,
}

impl Scene {
    /// Build the scene, generating terrain from the injected noise field.
    ///
    /// Fails before building any mesh if a terrain or water parameter is
    /// invalid.
    pub fn build<N>(config: &SceneConfig, noise: &N) -> Result<Self, TerrainError>
    where
        N: NoiseSource + ?Sized,
    {
        Heightfield::validate_params(&config.terrain)?;
        WaterSurface::validate(&config.water)?;

        let terrain = Heightfield::from_params(&config.terrain, noise)?;
        let water = WaterSurface::new(&config.water)?;

        let (lo, hi) = terrain.elevation_range();
        info!(
            vertices = terrain.vertices.len(),
            triangles = terrain.triangle_count(),
            "terrain generated, elevation {:.2}..{:.2} m",
            lo,
            hi
        );

        Ok(Self {
            camera: OrbitCamera::new(config.camera.clone(), config.render.aspect_ratio()),
            terrain,
            terrain_material: config.terrain_material.clone(),
            water,
            sky: config.sky.clone(),
            light: config.light.clone(),
            fog: config.fog.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseField;

    #[test]
    fn test_lagoon_scene_builds() {
        let config = SceneConfig::lagoon();
        let noise = NoiseField::from_phrase(&config.seed_phrase);
        let scene = Scene::build(&config, &noise).unwrap();

        assert_eq!(scene.terrain.segments(), (256, 256));
        assert!(scene.water.visible);
        assert_eq!(scene.camera.near(), config.camera.near_plane_m);
    }

    #[test]
    fn test_invalid_terrain_fails_before_build() {
        let mut config = SceneConfig::lagoon();
        config.terrain.width_m = f32::INFINITY;
        let noise = |_x: f32, _y: f32| 0.0;

        let err = Scene::build(&config, &noise).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidArgument { name: "width", .. }));
    }

    #[test]
    fn test_invalid_water_fails_before_terrain_is_sampled() {
        use std::cell::Cell;

        let mut config = SceneConfig::lagoon();
        config.water.width_m = 0.0;

        let samples = Cell::new(0usize);
        let noise = |_x: f32, _y: f32| {
            samples.set(samples.get() + 1);
            0.0
        };

        let err = Scene::build(&config, &noise).unwrap_err();
        assert!(matches!(err, TerrainError::InvalidArgument { name: "width", .. }));
        assert_eq!(samples.get(), 0);
    }
}

//! Scene presets bundling every construction-time constant.

use super::camera::OrbitCameraParams;
use super::environment::{FogParams, LightParams, SkyParams};
use super::render::RenderConfig;
use super::terrain::{ElevationParams, TerrainMaterial, TerrainParams};
use super::water::{srgb_hex_to_linear, WaterParams};

/// Seed phrase the noise field is built from
pub const DEFAULT_SEED_PHRASE: &str = "flamengo";

/// Every literal the scene is built from
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub terrain: TerrainParams,
    pub terrain_material: TerrainMaterial,
    pub water: WaterParams,
    pub camera: OrbitCameraParams,
    pub render: RenderConfig,
    pub sky: SkyParams,
    pub light: LightParams,
    pub fog: FogParams,
    pub seed_phrase: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::dunes()
    }
}

impl SceneConfig {
    /// Wide wind-swept dune field with a shallow sea
    pub fn dunes() -> Self {
        Self {
            terrain: TerrainParams::default(),
            terrain_material: TerrainMaterial::default(),
            water: WaterParams::default(),
            camera: OrbitCameraParams::default(),
            render: RenderConfig::default(),
            sky: SkyParams::default(),
            light: LightParams::default(),
            fog: FogParams::default(),
            seed_phrase: DEFAULT_SEED_PHRASE.to_string(),
        }
    }

    /// Small island lagoon: isotropic hills, calm water, lower sun
    pub fn lagoon() -> Self {
        let mut config = Self::dunes();

        config.terrain = TerrainParams {
            width_m: 200.0,
            height_m: 200.0,
            segments_x: 256,
            segments_y: 256,
            elevation: ElevationParams {
                planar_scale: 0.02,
                height_factor: 4.0,
                wind: None,
            },
        };
        config.terrain_material.texture_repeat = [60.0, 60.0];
        config.terrain_material.dry_height_m = 0.3;
        config.terrain_material.wet_height_m = 0.0;

        config.water.width_m = 200.0;
        config.water.height_m = 200.0;
        config.water.segments = 100;
        config.water.elevation_m = 0.0;
        config.water.foam_color = srgb_hex_to_linear(0xd8f3ee);
        config.water.water_color = srgb_hex_to_linear(0x1a7f8c);
        config.water.threshold_m = 0.6;
        config.water.foam_scale = 12.0;

        config.camera.position = [-60.0, 25.0, -20.0];
        config.camera.max_distance_m = 180.0;
        config.sky.sun_phi_degrees = 80.0;
        config.fog.far_m = 250.0;

        config.seed_phrase = "lagoa".to_string();

        config
    }
}

/// Named scene preset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePreset {
    Dunes,
    Lagoon,
}

impl ScenePreset {
    pub fn config(self) -> SceneConfig {
        match self {
            Self::Dunes => SceneConfig::dunes(),
            Self::Lagoon => SceneConfig::lagoon(),
        }
    }
}

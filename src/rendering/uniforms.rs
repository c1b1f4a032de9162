//! GPU uniform layouts (must match the WGSL structs field for field).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::scene::Scene;
use crate::water::WaterSurfaceState;

/// Per-frame values shared by every pipeline (bind group 0)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub inv_view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w = exposure
    pub camera_position: [f32; 4],
    /// xyz = unit vector toward the sun
    pub sun_direction: [f32; 4],
    /// xyz = unit vector toward the light, w = intensity
    pub light_direction: [f32; 4],
    /// rgb = light color, a = ambient
    pub light_color: [f32; 4],
    pub fog_color: [f32; 4],
    /// x = near, y = far
    pub fog_range: [f32; 4],
    /// turbidity, rayleigh, mie coefficient, mie directional g
    pub sky: [f32; 4],
}

impl FrameUniforms {
    pub fn from_scene(scene: &Scene, exposure: f32) -> Self {
        let view_proj = scene.camera.view_proj();
        let eye = scene.camera.position();

        let light = &scene.light;
        let light_direction = (Vec3::from_array(light.position) - Vec3::from_array(light.target))
            .try_normalize()
            .unwrap_or(Vec3::Y);

        let [sx, sy, sz] = scene.sky.sun_direction();
        let [lr, lg, lb] = light.color;
        let [fr, fg, fb] = scene.fog.color;

        Self {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            camera_position: [eye.x, eye.y, eye.z, exposure],
            sun_direction: [sx, sy, sz, 0.0],
            light_direction: light_direction.extend(light.intensity).to_array(),
            light_color: [lr, lg, lb, light.ambient],
            fog_color: [fr, fg, fb, 1.0],
            fog_range: [scene.fog.near_m, scene.fog.far_m, 0.0, 0.0],
            sky: [
                scene.sky.turbidity,
                scene.sky.rayleigh,
                scene.sky.mie_coefficient,
                scene.sky.mie_directional_g,
            ],
        }
    }
}

/// Sand material (terrain bind group)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TerrainUniforms {
    /// repeat.x, repeat.y, rotation (radians), unused
    pub texture_transform: [f32; 4],
    /// dry height, wet height, unused, unused
    pub wet_band: [f32; 4],
}

impl TerrainUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        let m = &scene.terrain_material;
        Self {
            texture_transform: [
                m.texture_repeat[0],
                m.texture_repeat[1],
                m.texture_rotation,
                0.0,
            ],
            wet_band: [m.dry_height_m, m.wet_height_m, 0.0, 0.0],
        }
    }
}

/// Water shading inputs (water bind group)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct WaterUniforms {
    /// rgb = foam color, a = thickness (output alpha)
    pub foam_color: [f32; 4],
    /// rgb = water color, a = plane elevation
    pub water_color: [f32; 4],
    pub resolution: [f32; 2],
    pub camera_near: f32,
    pub camera_far: f32,
    pub time: f32,
    pub threshold: f32,
    pub foam_scale: f32,
    pub _padding: f32,
}

impl WaterUniforms {
    pub fn new(state: &WaterSurfaceState, elevation: f32) -> Self {
        let [fr, fg, fb] = state.foam_color;
        let [wr, wg, wb] = state.water_color;
        Self {
            foam_color: [fr, fg, fb, state.thickness],
            water_color: [wr, wg, wb, elevation],
            resolution: state.resolution,
            camera_near: state.camera_near,
            camera_far: state.camera_far,
            time: state.elapsed_time,
            threshold: state.threshold,
            foam_scale: state.foam_scale,
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SceneConfig;

    fn tiny_scene() -> Scene {
        let mut config = SceneConfig::dunes();
        config.terrain.segments_x = 4;
        config.terrain.segments_y = 4;
        config.water.segments = 2;
        Scene::build(&config, &|_x: f32, _y: f32| 0.5).unwrap()
    }

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 240);
        assert_eq!(std::mem::size_of::<TerrainUniforms>(), 32);
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 64);
    }

    #[test]
    fn test_water_uniforms_pack_state() {
        let mut scene = tiny_scene();
        let state = &mut scene.water.state;
        state.elapsed_time = 3.5;
        state.resolution = [800.0, 600.0];
        state.camera_near = 0.01;
        state.camera_far = 500.0;

        let uniforms = WaterUniforms::new(&scene.water.state, scene.water.elevation);
        assert_eq!(uniforms.time, 3.5);
        assert_eq!(uniforms.resolution, [800.0, 600.0]);
        assert_eq!(uniforms.camera_near, 0.01);
        assert_eq!(uniforms.camera_far, 500.0);
        assert_eq!(uniforms.water_color[3], -0.5);
        assert_eq!(uniforms.foam_color[3], scene.water.state.thickness);
    }

    #[test]
    fn test_frame_uniforms_light_points_toward_light() {
        let scene = tiny_scene();
        let uniforms = FrameUniforms::from_scene(&scene, 0.5);

        let dir = Vec3::new(
            uniforms.light_direction[0],
            uniforms.light_direction[1],
            uniforms.light_direction[2],
        );
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.y > 0.0 && dir.z > 0.0);
        assert_eq!(uniforms.light_direction[3], 5.0);
        assert_eq!(uniforms.camera_position[3], 0.5);
    }
}

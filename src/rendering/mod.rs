//! GPU side of the scene: wgpu renderer, uniform layouts and textures.

mod gpu;
mod textures;
mod uniforms;

pub use gpu::{GpuRenderer, TextureSlot};
pub use textures::{check_texture_size, DepthCaptureTarget, GpuTexture, DEPTH_FORMAT};
pub use uniforms::{FrameUniforms, TerrainUniforms, WaterUniforms};

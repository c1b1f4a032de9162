//! GPU textures: depth targets and uploaded image textures.

use crate::assets::TextureAsset;
use crate::error::LoadError;
use crate::frame::Viewport;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

fn extent(viewport: Viewport) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: viewport.width.max(1),
        height: viewport.height.max(1),
        depth_or_array_layers: 1,
    }
}

/// Create a depth attachment for the main pass
pub fn create_depth_view(device: &wgpu::Device, viewport: Viewport) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("Main Depth Texture"),
            size: extent(viewport),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

/// Off-screen target the scene depth is captured into.
///
/// The color attachment only exists so the capture pass can run the same
/// pipelines as the main pass; only the depth attachment is sampled.
pub struct DepthCaptureTarget {
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
}

impl DepthCaptureTarget {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        viewport: Viewport,
    ) -> Self {
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Capture Color"),
            size: extent(viewport),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: color_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Capture Depth"),
            size: extent(viewport),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        Self {
            color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
        }
    }
}

/// Reject assets the device cannot hold as a single 2D texture
pub fn check_texture_size(asset: &TextureAsset, max_dimension: u32) -> Result<(), LoadError> {
    if asset.width > max_dimension || asset.height > max_dimension {
        return Err(LoadError::TooLarge {
            width: asset.width,
            height: asset.height,
            max: max_dimension,
        });
    }
    Ok(())
}

/// Sampled RGBA8 texture uploaded from a decoded asset
pub struct GpuTexture {
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        asset: &TextureAsset,
        format: wgpu::TextureFormat,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: asset.width,
            height: asset.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &asset.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * asset.width),
                rows_per_image: Some(asset.height),
            },
            size,
        );

        Self {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
        }
    }
}

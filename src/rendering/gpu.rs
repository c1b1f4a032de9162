//! wgpu renderer: sky, terrain and depth-composited water.

use std::sync::Arc;

use tracing::{debug, info};
use wgpu::util::DeviceExt;

use super::textures::{
    check_texture_size, create_depth_view, DepthCaptureTarget, GpuTexture, DEPTH_FORMAT,
};
use super::uniforms::{FrameUniforms, TerrainUniforms, WaterUniforms};
use crate::assets::TextureAsset;
use crate::error::{LoadError, RenderError};
use crate::frame::{RenderTarget, SceneRenderer, Viewport};
use crate::params::RenderConfig;
use crate::scene::Scene;
use crate::terrain::{Heightfield, Vertex};

const SKY_SHADER: &str = concat!(include_str!("common.wgsl"), include_str!("sky.wgsl"));
const TERRAIN_SHADER: &str = concat!(include_str!("common.wgsl"), include_str!("terrain.wgsl"));
const WATER_SHADER: &str = concat!(include_str!("common.wgsl"), include_str!("water.wgsl"));

const SAND_FALLBACK: [u8; 4] = [194, 178, 128, 255];
/// Mid-grey decodes to zero distortion
const DISTORTION_FALLBACK: [u8; 4] = [128, 128, 128, 255];

/// Texture slots that can be replaced once an asset finishes loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    Sand,
    Distortion,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Vertex and index buffers for one mesh
struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn new(device: &wgpu::Device, label: &str, mesh: &Heightfield) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Settings that differ between the three pipelines
struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    layout: &'a wgpu::PipelineLayout,
    vertex_buffers: &'a [wgpu::VertexBufferLayout<'a>],
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
    cull_mode: Option<wgpu::Face>,
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: desc.vertex_buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn texture_entry(binding: u32, sample_type: wgpu::TextureSampleType) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type,
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

/// Rendering system managing the wgpu device, pipelines, and buffers
pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    exposure: f32,
    clear_color: wgpu::Color,

    sky_pipeline: wgpu::RenderPipeline,
    terrain_pipeline: wgpu::RenderPipeline,
    water_pipeline: wgpu::RenderPipeline,

    terrain_mesh: MeshBuffers,
    water_mesh: MeshBuffers,

    frame_uniform_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    terrain_uniform_buffer: wgpu::Buffer,
    terrain_bind_group_layout: wgpu::BindGroupLayout,
    terrain_bind_group: wgpu::BindGroup,

    water_uniform_buffer: wgpu::Buffer,
    water_bind_group_layout: wgpu::BindGroupLayout,
    water_bind_group: wgpu::BindGroup,
    /// Depth epoch the water bind group was built against
    water_depth_epoch: u64,

    sampler: wgpu::Sampler,
    sand_texture: GpuTexture,
    distortion_texture: GpuTexture,

    depth_capture: DepthCaptureTarget,
    main_depth: wgpu::TextureView,
}

impl GpuRenderer {
    /// Create the renderer and upload the scene's meshes
    pub async fn new(
        window: Arc<winit::window::Window>,
        scene: &Scene,
        render_config: &RenderConfig,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let viewport = Viewport::new(size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Window must have 'static lifetime via Arc
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        info!(adapter = %adapter.get_info().name, "GPU adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sky Shader"),
            source: wgpu::ShaderSource::Wgsl(SKY_SHADER.into()),
        });
        let terrain_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Terrain Shader"),
            source: wgpu::ShaderSource::Wgsl(TERRAIN_SHADER.into()),
        });
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(WATER_SHADER.into()),
        });

        // Group 0: per-frame uniforms shared by every pipeline
        let frame_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::cast_slice(&[FrameUniforms::from_scene(
                scene,
                render_config.exposure,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Bind Group Layout"),
                entries: &[uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                )],
            });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_uniform_buffer.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Repeat Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let sand_texture = GpuTexture::upload(
            &device,
            &queue,
            "Sand Texture",
            &TextureAsset::solid(SAND_FALLBACK),
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let distortion_texture = GpuTexture::upload(
            &device,
            &queue,
            "Distortion Texture",
            &TextureAsset::solid(DISTORTION_FALLBACK),
            wgpu::TextureFormat::Rgba8Unorm,
        );

        // Group 1 (terrain): material uniforms + sand texture
        let terrain_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Uniform Buffer"),
            contents: bytemuck::cast_slice(&[TerrainUniforms::from_scene(scene)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let terrain_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Terrain Bind Group Layout"),
                entries: &[
                    uniform_entry(0, wgpu::ShaderStages::FRAGMENT),
                    texture_entry(1, wgpu::TextureSampleType::Float { filterable: true }),
                    sampler_entry(2),
                ],
            });

        // Group 1 (water): water uniforms + captured depth + distortion texture
        let water_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Uniform Buffer"),
            contents: bytemuck::cast_slice(&[WaterUniforms::new(
                &scene.water.state,
                scene.water.elevation,
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let water_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Water Bind Group Layout"),
                entries: &[
                    uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
                    texture_entry(1, wgpu::TextureSampleType::Depth),
                    texture_entry(2, wgpu::TextureSampleType::Float { filterable: true }),
                    sampler_entry(3),
                ],
            });

        let depth_capture = DepthCaptureTarget::new(&device, surface_format, viewport);
        let main_depth = create_depth_view(&device, viewport);

        let terrain_bind_group = Self::create_terrain_bind_group(
            &device,
            &terrain_bind_group_layout,
            &terrain_uniform_buffer,
            &sand_texture,
            &sampler,
        );
        let water_bind_group = Self::create_water_bind_group(
            &device,
            &water_bind_group_layout,
            &water_uniform_buffer,
            &depth_capture,
            &distortion_texture,
            &sampler,
        );

        let sky_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sky Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout],
            push_constant_ranges: &[],
        });
        let terrain_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Terrain Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &terrain_bind_group_layout],
            push_constant_ranges: &[],
        });
        let water_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Water Pipeline Layout"),
            bind_group_layouts: &[&frame_bind_group_layout, &water_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Sky is a fullscreen triangle drawn first, behind everything
        let sky_pipeline = create_pipeline(
            &device,
            surface_format,
            PipelineDesc {
                label: "Sky Pipeline",
                shader: &sky_shader,
                layout: &sky_layout,
                vertex_buffers: &[],
                blend: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
                cull_mode: None,
            },
        );
        let terrain_pipeline = create_pipeline(
            &device,
            surface_format,
            PipelineDesc {
                label: "Terrain Pipeline",
                shader: &terrain_shader,
                layout: &terrain_layout,
                vertex_buffers: &[Vertex::layout()],
                blend: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
                cull_mode: Some(wgpu::Face::Back),
            },
        );
        let water_pipeline = create_pipeline(
            &device,
            surface_format,
            PipelineDesc {
                label: "Water Pipeline",
                shader: &water_shader,
                layout: &water_layout,
                vertex_buffers: &[Vertex::layout()],
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Less,
                cull_mode: None,
            },
        );

        let terrain_mesh = MeshBuffers::new(&device, "Terrain", &scene.terrain);
        let water_mesh = MeshBuffers::new(&device, "Water", &scene.water.mesh);

        let [r, g, b] = render_config.clear_color;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            exposure: render_config.exposure,
            clear_color: wgpu::Color { r, g, b, a: 1.0 },
            sky_pipeline,
            terrain_pipeline,
            water_pipeline,
            terrain_mesh,
            water_mesh,
            frame_uniform_buffer,
            frame_bind_group,
            terrain_uniform_buffer,
            terrain_bind_group_layout,
            terrain_bind_group,
            water_uniform_buffer,
            water_bind_group_layout,
            water_bind_group,
            water_depth_epoch: scene.water.state.depth.epoch,
            sampler,
            sand_texture,
            distortion_texture,
            depth_capture,
            main_depth,
        })
    }

    fn create_terrain_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        sand: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Terrain Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&sand.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_water_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        depth_capture: &DepthCaptureTarget,
        distortion: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Water Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&depth_capture.depth_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&distortion.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn rebuild_water_bind_group(&mut self) {
        self.water_bind_group = Self::create_water_bind_group(
            &self.device,
            &self.water_bind_group_layout,
            &self.water_uniform_buffer,
            &self.depth_capture,
            &self.distortion_texture,
            &self.sampler,
        );
    }

    /// Largest texture side the device accepts
    pub fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Replace a fallback texture with a loaded asset.
    ///
    /// Assets over the device limit are rejected and the current texture
    /// stays bound.
    pub fn set_texture(
        &mut self,
        slot: TextureSlot,
        asset: &TextureAsset,
    ) -> Result<(), LoadError> {
        check_texture_size(asset, self.max_texture_dimension())?;

        match slot {
            TextureSlot::Sand => {
                self.sand_texture = GpuTexture::upload(
                    &self.device,
                    &self.queue,
                    "Sand Texture",
                    asset,
                    wgpu::TextureFormat::Rgba8UnormSrgb,
                );
                self.terrain_bind_group = Self::create_terrain_bind_group(
                    &self.device,
                    &self.terrain_bind_group_layout,
                    &self.terrain_uniform_buffer,
                    &self.sand_texture,
                    &self.sampler,
                );
            }
            TextureSlot::Distortion => {
                self.distortion_texture = GpuTexture::upload(
                    &self.device,
                    &self.queue,
                    "Distortion Texture",
                    asset,
                    wgpu::TextureFormat::Rgba8Unorm,
                );
                self.rebuild_water_bind_group();
            }
        }
        debug!(?slot, width = asset.width, height = asset.height, "texture replaced");
        Ok(())
    }

    /// Reconfigure the surface after it was lost or outdated
    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        pass.set_pipeline(&self.sky_pipeline);
        pass.draw(0..3, 0..1); // Fullscreen triangle

        pass.set_pipeline(&self.terrain_pipeline);
        pass.set_bind_group(1, &self.terrain_bind_group, &[]);
        self.terrain_mesh.draw(&mut pass);

        // The capture pass always runs with the water hidden: its bind group
        // samples the capture depth, which is attached during that pass. A
        // capture that was not refreshed this frame is never sampled.
        if scene.water.visible && scene.water.state.depth.refreshed {
            pass.set_pipeline(&self.water_pipeline);
            pass.set_bind_group(1, &self.water_bind_group, &[]);
            self.water_mesh.draw(&mut pass);
        }
    }
}

impl SceneRenderer for GpuRenderer {
    type Error = RenderError;

    fn resize(&mut self, viewport: Viewport) {
        self.config.width = viewport.width.max(1);
        self.config.height = viewport.height.max(1);
        self.reconfigure();

        self.depth_capture = DepthCaptureTarget::new(&self.device, self.config.format, viewport);
        self.main_depth = create_depth_view(&self.device, viewport);
    }

    fn upload_water(&mut self, scene: &Scene) {
        let state = &scene.water.state;
        if state.depth.epoch != self.water_depth_epoch {
            self.rebuild_water_bind_group();
            self.water_depth_epoch = state.depth.epoch;
        }

        self.queue.write_buffer(
            &self.water_uniform_buffer,
            0,
            bytemuck::cast_slice(&[WaterUniforms::new(state, scene.water.elevation)]),
        );
    }

    fn render(&mut self, scene: &Scene, target: RenderTarget) -> Result<(), RenderError> {
        self.queue.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::cast_slice(&[FrameUniforms::from_scene(scene, self.exposure)]),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        match target {
            RenderTarget::DepthCapture => {
                self.encode_pass(
                    &mut encoder,
                    "Depth Capture Pass",
                    &self.depth_capture.color_view,
                    &self.depth_capture.depth_view,
                    scene,
                );
                self.queue.submit(std::iter::once(encoder.finish()));
            }
            RenderTarget::Surface => {
                let output = match self.surface.get_current_texture() {
                    Ok(output) => output,
                    Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                        self.reconfigure();
                        return Err(e.into());
                    }
                    Err(e) => return Err(e.into()),
                };
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                self.encode_pass(&mut encoder, "Scene Pass", &view, &self.main_depth, scene);
                self.queue.submit(std::iter::once(encoder.finish()));
                output.present();
            }
        }

        Ok(())
    }
}

//! Scene WebGPU render pipeline
//!
//! Draws the snowfield (snow/dirt blend driven by the trail mask) and the
//! snowball with a depth buffer. The trail mask lives on the CPU; its dirty
//! rows are uploaded to an R8 texture before each frame is drawn.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::mesh::{self, Mesh};
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{BallPhysics, GameState, TrailMask};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SPHERE_SEGMENTS: u16 = 32;
const SPHERE_RINGS: u16 = 16;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4], // offset 0
    camera_pos: [f32; 4],     // offset 64
    light: [f32; 4],          // offset 80 - xyz toward light, w ambient
    fog: [f32; 4],            // offset 96 - start, end, half extent, unused
    fog_color: [f32; 4],      // offset 112
    snow: [f32; 4],           // offset 128
    dirt: [f32; 4],           // offset 144
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct BallUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4], // rgb albedo, a emissive
}

/// Vertex and index buffers for one mesh
struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &Mesh) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.index_count(),
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

// ============================================================================
// SCENE RENDER STATE
// ============================================================================

pub struct SceneRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,

    ground_pipeline: wgpu::RenderPipeline,
    ball_pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    ball_buffer: wgpu::Buffer,
    mask_texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,

    depth_view: wgpu::TextureView,
    ground: GpuMesh,
    sphere: GpuMesh,

    pub size: (u32, u32),
}

impl SceneRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("scene-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let width = width.max(1);
        let height = height.max(1);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let ball_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ball"),
            size: std::mem::size_of::<BallUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mask_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("trail_mask"),
            size: wgpu::Extent3d {
                width: MASK_RESOLUTION,
                height: MASK_RESOLUTION,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let mask_view = mask_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mask_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("trail_mask_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                uniform_entry(0),
                uniform_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: ball_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&mask_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&mask_sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let make_pipeline = |label: &str, vs: &str, fs: &str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers: &[Vertex::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };
        let ground_pipeline = make_pipeline("ground_pipeline", "vs_ground", "fs_ground");
        let ball_pipeline = make_pipeline("ball_pipeline", "vs_ball", "fs_ball");

        let depth_view = create_depth_view(&device, width, height);
        let ground = GpuMesh::upload(&device, "ground", &mesh::ground_plane(WORLD_HALF_EXTENT));
        let sphere = GpuMesh::upload(
            &device,
            "sphere",
            &mesh::uv_sphere(SPHERE_SEGMENTS, SPHERE_RINGS),
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            ground_pipeline,
            ball_pipeline,
            globals_buffer,
            ball_buffer,
            mask_texture,
            bind_group,
            depth_view,
            ground,
            sphere,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, new_width, new_height);
        }
    }

    /// Copy the mask rows painted since the last upload into the texture
    fn upload_trail(&self, mask: &mut TrailMask) {
        let Some(dirty) = mask.take_dirty() else {
            return;
        };
        let resolution = mask.resolution();
        if resolution != MASK_RESOLUTION {
            log::warn!("Trail mask is {resolution}px, texture is {MASK_RESOLUTION}px; skipping");
            return;
        }
        // Whole rows keep the source slice contiguous
        let start = (dirty.y0 * resolution) as usize;
        let end = (dirty.y1 * resolution) as usize;
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.mask_texture,
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: 0,
                    y: dirty.y0,
                    z: 0,
                },
                aspect: wgpu::TextureAspect::All,
            },
            &mask.texels()[start..end],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(resolution),
                rows_per_image: Some(dirty.height()),
            },
            wgpu::Extent3d {
                width: resolution,
                height: dirty.height(),
                depth_or_array_layers: 1,
            },
        );
    }

    /// Upload the trail and uniforms from the session, then draw
    pub fn render<P: BallPhysics + ?Sized>(
        &mut self,
        state: &mut GameState,
        physics: &P,
    ) -> Result<(), wgpu::SurfaceError> {
        self.upload_trail(&mut state.trail.mask);

        let aspect = self.size.0 as f32 / self.size.1.max(1) as f32;
        let light_dir = Vec3::from(LIGHT_POSITION).normalize();
        let globals = Globals {
            view_proj: state.camera.view_projection(aspect).to_cols_array_2d(),
            camera_pos: state.camera.eye.extend(1.0).to_array(),
            light: light_dir.extend(AMBIENT_LIGHT).to_array(),
            fog: [FOG_NEAR, FOG_FAR, WORLD_HALF_EXTENT, 0.0],
            fog_color: colors::linear(colors::FOG),
            snow: colors::linear(colors::SNOW),
            dirt: colors::linear(colors::DIRT),
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let ball_pose = physics.ball_translation().zip(physics.ball_rotation());
        if let Some((translation, rotation)) = ball_pose {
            let model = Mat4::from_scale_rotation_translation(
                Vec3::splat(state.ball.visual_radius()),
                rotation,
                translation,
            );
            let [r, g, b, _] = colors::linear(colors::BALL);
            let ball = BallUniform {
                model: model.to_cols_array_2d(),
                color: [r, g, b, BALL_EMISSIVE],
            };
            self.queue
                .write_buffer(&self.ball_buffer, 0, bytemuck::bytes_of(&ball));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let [r, g, b, a] = colors::linear(colors::SKY);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            render_pass.set_pipeline(&self.ground_pipeline);
            self.ground.draw(&mut render_pass);

            if ball_pose.is_some() {
                render_pass.set_pipeline(&self.ball_pipeline);
                self.sphere.draw(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

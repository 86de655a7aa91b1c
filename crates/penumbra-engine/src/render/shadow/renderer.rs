use anyhow::{Context, Result};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::{
    ModelUniform, SceneUniform, ShadowConfig, FRAGMENT_WGSL, LightRig, MAIN_DEPTH_FORMAT,
    SHADOW_MAP_FORMAT, VERTEX_SHADOW_WGSL, VERTEX_WGSL,
};
use crate::mesh::{MeshData, Vertex};
use crate::render::{DepthTarget, RenderCtx, RenderTarget};

/// Mesh resident on the GPU together with its model uniform.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn draw<'p>(&self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_bind_group(1, &self.model_bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Shadow-mapped forward renderer.
pub struct ShadowRenderer {
    config: ShadowConfig,

    shadow_map: DepthTarget,
    depth: DepthTarget,

    uniform_bgl: wgpu::BindGroupLayout,

    shadow_pipeline: wgpu::RenderPipeline,
    render_pipeline: wgpu::RenderPipeline,

    scene_buffer: wgpu::Buffer,
    scene_shadow_bind_group: wgpu::BindGroup,
    scene_render_bind_group: wgpu::BindGroup,
}

impl ShadowRenderer {
    pub fn new(ctx: &RenderCtx<'_>, config: ShadowConfig) -> Result<Self> {
        config
            .validate(ctx.device.limits().max_texture_dimension_2d)
            .context("invalid shadow renderer config")?;

        let shadow_map = DepthTarget::new(
            ctx.device,
            "penumbra shadow map",
            SHADOW_MAP_FORMAT,
            config.map_size,
            config.map_size,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let depth = main_depth(ctx.device, ctx.width, ctx.height);

        let shadow_sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("penumbra shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::Less),
            ..Default::default()
        });

        let uniform_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("penumbra uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let render_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("penumbra render bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let shadow_pipeline = create_shadow_pipeline(ctx.device, &uniform_bgl);
        let render_pipeline =
            create_render_pipeline(ctx.device, &render_bgl, &uniform_bgl, ctx.surface_format, config.map_size);

        let scene = SceneUniform::new(
            config.light.view_proj(),
            Mat4::IDENTITY,
            config.light.position,
        );
        let scene_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("penumbra scene ubo"),
            contents: bytemuck::bytes_of(&scene),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_shadow_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("penumbra scene bind group (shadow)"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let scene_render_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("penumbra scene bind group (render)"),
            layout: &render_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(shadow_map.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });

        log::info!(
            "shadow renderer ready: shadow map {0}x{0}, surface {1:?}",
            config.map_size,
            ctx.surface_format
        );

        Ok(Self {
            config,
            shadow_map,
            depth,
            uniform_bgl,
            shadow_pipeline,
            render_pipeline,
            scene_buffer,
            scene_shadow_bind_group,
            scene_render_bind_group,
        })
    }

    /// Uploads mesh geometry and creates its model uniform (identity).
    pub fn upload_mesh(&self, ctx: &RenderCtx<'_>, label: &str, mesh: &MeshData) -> Result<GpuMesh> {
        mesh.validate_drawable()
            .with_context(|| format!("cannot upload mesh '{label}'"))?;

        let vertices: Vec<Vertex> = mesh.vertices();
        let indices: Vec<u32> = mesh.indices();
        let index_count =
            u32::try_from(indices.len()).with_context(|| format!("mesh '{label}' has too many indices"))?;

        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let model_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} model ubo")),
            contents: bytemuck::bytes_of(&ModelUniform::new(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let model_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} model bind group")),
            layout: &self.uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "uploaded mesh '{label}': {} vertices, {} indices",
            vertices.len(),
            index_count
        );

        Ok(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count,
            model_buffer,
            model_bind_group,
        })
    }

    pub fn set_model_matrix(&self, queue: &wgpu::Queue, mesh: &GpuMesh, model: Mat4) {
        queue.write_buffer(&mesh.model_buffer, 0, bytemuck::bytes_of(&ModelUniform::new(model)));
    }

    /// Replaces the light. Only the light fields of the scene uniform are written.
    pub fn set_light(&mut self, queue: &wgpu::Queue, light: LightRig) {
        let view_proj = light.view_proj().to_cols_array_2d();
        queue.write_buffer(
            &self.scene_buffer,
            SceneUniform::LIGHT_VIEW_PROJ_OFFSET,
            bytemuck::bytes_of(&view_proj),
        );
        queue.write_buffer(
            &self.scene_buffer,
            SceneUniform::LIGHT_POS_OFFSET,
            bytemuck::bytes_of(&light.position.to_array()),
        );
        self.config.light = light;
    }

    /// Writes the camera view-projection; call once per frame.
    pub fn set_camera(&self, queue: &wgpu::Queue, view_proj: Mat4) {
        queue.write_buffer(
            &self.scene_buffer,
            SceneUniform::CAMERA_VIEW_PROJ_OFFSET,
            bytemuck::bytes_of(&view_proj.to_cols_array_2d()),
        );
    }

    /// Recreates the main depth target. Zero sizes are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || self.depth.size() == (width, height) {
            return;
        }
        self.depth = main_depth(device, width, height);
    }

    /// Encodes the shadow pass followed by the shaded pass.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, meshes: &[&GpuMesh]) {
        // The surface may have been resized without a resize callback reaching us.
        self.resize(ctx.device, ctx.width, ctx.height);

        {
            let mut shadow_pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("penumbra shadow pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.shadow_map.view(),
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

            shadow_pass.set_pipeline(&self.shadow_pipeline);
            shadow_pass.set_bind_group(0, &self.scene_shadow_bind_group, &[]);
            for mesh in meshes {
                mesh.draw(&mut shadow_pass);
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("penumbra shaded pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.config.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(0),
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.render_pipeline);
        rpass.set_bind_group(0, &self.scene_render_bind_group, &[]);
        for mesh in meshes {
            mesh.draw(&mut rpass);
        }
    }
}

// ── private helpers ────────────────────────────────────────────────────────

fn main_depth(device: &wgpu::Device, width: u32, height: u32) -> DepthTarget {
    DepthTarget::new(
        device,
        "penumbra main depth",
        MAIN_DEPTH_FORMAT,
        width,
        height,
        wgpu::TextureUsages::RENDER_ATTACHMENT,
    )
}

fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

fn depth_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_shadow_pipeline(
    device: &wgpu::Device,
    uniform_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("penumbra vertex shadow shader"),
        source: wgpu::ShaderSource::Wgsl(VERTEX_SHADOW_WGSL.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("penumbra shadow pipeline layout"),
        bind_group_layouts: &[uniform_bgl, uniform_bgl],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("penumbra shadow pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        fragment: None,
        primitive: primitive_state(),
        depth_stencil: Some(depth_state(SHADOW_MAP_FORMAT)),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_render_pipeline(
    device: &wgpu::Device,
    render_bgl: &wgpu::BindGroupLayout,
    uniform_bgl: &wgpu::BindGroupLayout,
    surface_format: wgpu::TextureFormat,
    map_size: u32,
) -> wgpu::RenderPipeline {
    let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("penumbra vertex shader"),
        source: wgpu::ShaderSource::Wgsl(VERTEX_WGSL.into()),
    });
    let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("penumbra fragment shader"),
        source: wgpu::ShaderSource::Wgsl(FRAGMENT_WGSL.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("penumbra render pipeline layout"),
        bind_group_layouts: &[render_bgl, uniform_bgl],
        immediate_size: 0,
    });

    let constants = [("shadowDepthTextureSize", map_size as f64)];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("penumbra render pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment,
            entry_point: Some("fs_main"),
            compilation_options: wgpu::PipelineCompilationOptions {
                constants: &constants,
                ..Default::default()
            },
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: primitive_state(),
        depth_stencil: Some(depth_state(MAIN_DEPTH_FORMAT)),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

use crate::shaders;
use crate::tessellate::{Vertex, tessellate};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use plaza_assets::{TextureData, TextureId, TextureStore};
use plaza_render::OrbitCamera;
use plaza_scene::{Light, Scene, Shading, ShadowConfig, ShadowMapMode, WrapMode};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    /// xyz: direction toward the light, w: ambient intensity.
    light_dir: [f32; 4],
    /// rgb: directional color, w: directional intensity.
    light_color: [f32; 4],
    /// x: shadows enabled.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MeshUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    /// xy: uv repeat, z: lit, w: receive shadow.
    params: [f32; 4],
}

/// GPU resources for one draw item. Built once in `prepare`.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    bind_group: wgpu::BindGroup,
    double_sided: bool,
    cast_shadow: bool,
}

/// wgpu-based scene renderer.
///
/// `prepare` uploads the immutable scene once; `render` then only writes
/// the per-frame globals (camera and light matrices) and records passes.
pub struct WgpuRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    mesh_pipeline_double_sided: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    shadow_layout: wgpu::BindGroupLayout,
    shadow_bind_group: wgpu::BindGroup,
    shadow_view: wgpu::TextureView,
    shadow_sampler: wgpu::Sampler,
    mesh_layout: wgpu::BindGroupLayout,
    default_texture: wgpu::TextureView,
    meshes: Vec<GpuMesh>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                light_dir: [0.0, 1.0, 0.0, 0.3],
                light_color: [1.0, 1.0, 1.0, 1.0],
                params: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // The shadow map lives in its own group so the shadow pass can bind
        // the globals and mesh groups while rendering into the map itself.
        let shadow_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shadow_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let shadow_view = Self::create_shadow_texture(device, [1024, 1024]);
        let shadow_bind_group =
            Self::create_shadow_bind_group(device, &shadow_layout, &shadow_view, &shadow_sampler);

        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
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
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let mesh_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("mesh_pipeline_layout"),
                bind_group_layouts: &[&globals_layout, &shadow_layout, &mesh_layout],
                push_constant_ranges: &[],
            });
        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("shadow_pipeline_layout"),
                bind_group_layouts: &[&globals_layout, &mesh_layout],
                push_constant_ranges: &[],
            });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MESH_SHADER.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHADOW_SHADER.into()),
        });

        let vertex_attributes = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2,
        ];
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &vertex_attributes,
        };

        let mesh_pipeline = Self::create_mesh_pipeline(
            device,
            &mesh_pipeline_layout,
            &mesh_shader,
            vertex_layout.clone(),
            surface_format,
            Some(wgpu::Face::Back),
            "mesh_pipeline",
        );
        let mesh_pipeline_double_sided = Self::create_mesh_pipeline(
            device,
            &mesh_pipeline_layout,
            &mesh_shader,
            vertex_layout.clone(),
            surface_format,
            None,
            "mesh_pipeline_double_sided",
        );

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        // A plain white pixel; materials without a map multiply by it.
        let default_texture = Self::upload_texture(
            device,
            queue,
            &TextureData {
                name: "default_white".into(),
                width: 1,
                height: 1,
                pixels: vec![255, 255, 255, 255],
            },
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            mesh_pipeline,
            mesh_pipeline_double_sided,
            shadow_pipeline,
            globals_buffer,
            globals_bind_group,
            shadow_layout,
            shadow_bind_group,
            shadow_view,
            shadow_sampler,
            mesh_layout,
            default_texture,
            meshes: Vec::new(),
            depth_texture,
            surface_format,
        }
    }

    /// Upload the scene once: tessellate every draw item, create its
    /// vertex/index/uniform buffers, and upload referenced textures.
    ///
    /// The shadow map is sized from the shadow-casting light, clamped to
    /// the device texture limit.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
        textures: &TextureStore,
    ) {
        if let Some((_, shadow)) = shadow_light(scene) {
            let limit = device.limits().max_texture_dimension_2d;
            let size = [shadow.map_size[0].min(limit), shadow.map_size[1].min(limit)];
            if size != shadow.map_size {
                warn!(
                    requested = ?shadow.map_size,
                    clamped = ?size,
                    "shadow map size exceeds device limit"
                );
            }
            self.shadow_view = Self::create_shadow_texture(device, size);
            self.shadow_bind_group = Self::create_shadow_bind_group(
                device,
                &self.shadow_layout,
                &self.shadow_view,
                &self.shadow_sampler,
            );
        }

        let mut uploaded: BTreeMap<TextureId, wgpu::TextureView> = BTreeMap::new();
        for (id, data) in textures.iter() {
            uploaded.insert(*id, Self::upload_texture(device, queue, data));
        }

        self.meshes.clear();
        for item in scene.draw_list() {
            let data = tessellate(&item.mesh.geometry);
            if data.indices.is_empty() {
                continue;
            }
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertex_buffer"),
                contents: bytemuck::cast_slice(&data.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_index_buffer"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            let material = &item.mesh.material;
            let repeat = material.map.map(|m| m.repeat).unwrap_or([1.0, 1.0]);
            let uniforms = MeshUniforms {
                model: item.model.to_cols_array_2d(),
                color: {
                    let [r, g, b] = material.color.to_array();
                    [r, g, b, 1.0]
                },
                params: [
                    repeat[0],
                    repeat[1],
                    if material.shading == Shading::Lambert { 1.0 } else { 0.0 },
                    if item.mesh.receive_shadow { 1.0 } else { 0.0 },
                ],
            };
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_uniform_buffer"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM,
            });

            let texture_view = material
                .map
                .and_then(|m| uploaded.get(&m.texture))
                .unwrap_or(&self.default_texture);
            let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("mesh_sampler"),
                address_mode_u: address_mode(material.map.map(|m| m.wrap_s).unwrap_or_default()),
                address_mode_v: address_mode(material.map.map(|m| m.wrap_t).unwrap_or_default()),
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::FilterMode::Nearest,
                ..Default::default()
            });

            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("mesh_bind_group"),
                layout: &self.mesh_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(texture_view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });

            self.meshes.push(GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: data.indices.len() as u32,
                bind_group,
                double_sided: material.double_sided,
                cast_shadow: item.mesh.cast_shadow,
            });
        }

        debug!(
            meshes = self.meshes.len(),
            textures = uploaded.len(),
            "scene prepared"
        );
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame: shadow pass, then the main pass.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
        camera: &OrbitCamera,
    ) {
        let ambient = scene
            .lights()
            .iter()
            .find_map(|l| match l {
                Light::Ambient { intensity, .. } => Some(*intensity),
                _ => None,
            })
            .unwrap_or(0.0);
        let directional = scene.lights().iter().find_map(|l| match l {
            Light::Directional {
                color,
                intensity,
                position,
                cast_shadow,
                shadow,
            } => Some((*color, *intensity, *position, *cast_shadow, *shadow)),
            _ => None,
        });

        let shadows_on = scene.shadow_map == ShadowMapMode::PcfSoft
            && directional.map(|(_, _, _, cast, _)| cast).unwrap_or(false);
        let (light_color, light_intensity, light_pos, shadow) = directional
            .map(|(c, i, p, _, s)| (c, i, p, s))
            .unwrap_or((
                plaza_common::Color::WHITE,
                0.0,
                Vec3::Y,
                ShadowConfig::default(),
            ));

        let light_dir = light_pos.normalize_or_zero();
        let light_view_proj = light_matrix(light_pos, &shadow);

        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals {
                view_proj: camera.view_projection().to_cols_array_2d(),
                light_view_proj: light_view_proj.to_cols_array_2d(),
                light_dir: [light_dir.x, light_dir.y, light_dir.z, ambient],
                light_color: {
                    let [r, g, b] = light_color.to_array();
                    [r, g, b, light_intensity]
                },
                params: [if shadows_on { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
            }),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        if shadows_on {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for mesh in self.meshes.iter().filter(|m| m.cast_shadow) {
                pass.set_bind_group(1, &mesh.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        {
            let bg = scene.background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            pass.set_bind_group(1, &self.shadow_bind_group, &[]);
            for mesh in &self.meshes {
                let pipeline = if mesh.double_sided {
                    &self.mesh_pipeline_double_sided
                } else {
                    &self.mesh_pipeline
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(2, &mesh.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    #[allow(clippy::too_many_arguments)]
    fn create_mesh_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        surface_format: wgpu::TextureFormat,
        cull_mode: Option<wgpu::Face>,
        label: &str,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }

    fn create_shadow_texture(device: &wgpu::Device, size: [u32; 2]) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow_map"),
            size: wgpu::Extent3d {
                width: size[0].max(1),
                height: size[1].max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }

    fn create_shadow_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shadow_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn upload_texture(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: data.width,
            height: data.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&data.name),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * data.width),
                rows_per_image: Some(data.height),
            },
            size,
        );
        texture.create_view(&Default::default())
    }
}

fn address_mode(wrap: WrapMode) -> wgpu::AddressMode {
    match wrap {
        WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
        WrapMode::Repeat => wgpu::AddressMode::Repeat,
    }
}

/// View-projection of the directional light's orthographic shadow frustum.
fn light_matrix(position: Vec3, shadow: &ShadowConfig) -> Mat4 {
    let view = Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::orthographic_rh(
        -shadow.extent,
        shadow.extent,
        -shadow.extent,
        shadow.extent,
        0.1,
        shadow.far,
    );
    proj * view
}

/// The first directional light that casts shadows, with its config.
fn shadow_light(scene: &Scene) -> Option<(Vec3, ShadowConfig)> {
    scene.lights().iter().find_map(|l| match l {
        Light::Directional {
            position,
            cast_shadow: true,
            shadow,
            ..
        } => Some((*position, *shadow)),
        _ => None,
    })
}

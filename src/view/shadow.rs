use tracing::debug;
use wgpu::*;

use super::render::{instance_layout, vertex_layout, DEPTH_FORMAT};
use crate::model::{shadow_caster, Light};

/// Depth map rendered from the shadow-casting sun, sampled by receivers.
pub struct ShadowResources {
    pub size: u32,
    pub view: TextureView,
    pub sampler: Sampler,
    pub uniform_buffer: Buffer,
    pub bind_group: BindGroup,
    pub pipeline: RenderPipeline,
}

/// Square shadow map edge for `lights`, clamped to what the device allows.
/// A scene without a caster still gets a 1x1 map so the bind group is valid.
pub fn shadow_map_size(lights: &[Light], max_dimension: u32) -> u32 {
    shadow_caster(lights)
        .map_or(1, |sun| sun.shadow.map_size)
        .clamp(1, max_dimension.max(1))
}

pub fn create_shadow_resources(device: &Device, size: u32) -> ShadowResources {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some("shadow_map"),
        size: Extent3d { width: size, height: size, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&TextureViewDescriptor::default());
    let sampler = device.create_sampler(&SamplerDescriptor {
        label: Some("shadow_sampler"),
        address_mode_u: AddressMode::ClampToEdge,
        address_mode_v: AddressMode::ClampToEdge,
        address_mode_w: AddressMode::ClampToEdge,
        mag_filter: FilterMode::Linear,
        min_filter: FilterMode::Linear,
        mipmap_filter: FilterMode::Nearest,
        compare: Some(CompareFunction::LessEqual),
        ..Default::default()
    });

    let uniform_buffer = device.create_buffer(&BufferDescriptor {
        label: Some("shadow_uniform_buffer"),
        size: std::mem::size_of::<[[f32; 4]; 4]>() as BufferAddress,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("shadow_bind_group_layout"),
        entries: &[BindGroupLayoutEntry {
            binding: 0,
            visibility: ShaderStages::VERTEX,
            ty: BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some("shadow_bind_group"),
        layout: &bind_group_layout,
        entries: &[BindGroupEntry { binding: 0, resource: uniform_buffer.as_entire_binding() }],
    });

    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("shadow_shader"),
        source: ShaderSource::Wgsl(include_str!("shaders/shadow.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("shadow_pipeline_layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("shadow_pipeline"),
        layout: Some(&layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout(), instance_layout()],
            compilation_options: Default::default(),
        },
        fragment: None,
        primitive: PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            // thin parts like the blade need both faces in the map
            cull_mode: None,
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: CompareFunction::LessEqual,
            stencil: StencilState::default(),
            bias: DepthBiasState { constant: 2, slope_scale: 2.0, clamp: 0.0 },
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    debug!(size, "shadow map created");
    ShadowResources { size, view, sampler, uniform_buffer, bind_group, pipeline }
}

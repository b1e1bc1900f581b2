use std::collections::HashMap;

use glam::Mat4;
use tracing::{debug, warn};
use wgpu::*;

use super::gpu_init::GpuContext;
use super::overlay;
use super::shadow::{create_shadow_resources, shadow_map_size, ShadowResources};
use crate::controller::{FrameStats, SceneRenderer};
use crate::model::{Camera, CameraUniform, LightingUniform, NodeId, Renderable, Scene};
use crate::utils::{hex_color, MeshBuffer, Vertex};

pub(crate) const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;
const SAMPLE_COUNT: u32 = 4;

/// One renderable node with its world matrix for this frame.
pub struct DrawItem<'a> {
    pub node: NodeId,
    pub renderable: &'a Renderable,
    pub model: Mat4,
}

/// Opaque nodes are drawn first, translucent ones after with depth writes off.
#[derive(Default)]
pub struct DrawList<'a> {
    pub opaque: Vec<DrawItem<'a>>,
    pub transparent: Vec<DrawItem<'a>>,
}

impl<'a> DrawList<'a> {
    pub fn collect(scene: &'a Scene) -> Self {
        let mut list = DrawList::default();
        for root in scene.roots() {
            collect_node(root, Mat4::IDENTITY, &mut list);
        }
        list
    }

    pub fn len(&self) -> usize {
        self.opaque.len() + self.transparent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem<'a>> {
        self.opaque.iter().chain(self.transparent.iter())
    }

    /// Items that go into the shadow map, with their instance index.
    pub fn casters(&self) -> impl Iterator<Item = (usize, &DrawItem<'a>)> {
        self.iter()
            .enumerate()
            .filter(|(_, item)| item.renderable.cast_shadow)
    }
}

// Borrows payloads out of the tree, so it walks by hand instead of through
// the `visit_world` closure.
fn collect_node<'a>(node: &'a crate::model::SceneNode, parent: Mat4, list: &mut DrawList<'a>) {
    let world = parent * node.local_matrix();
    if let Some(renderable) = &node.renderable {
        let item = DrawItem {
            node: node.id(),
            renderable,
            model: world,
        };
        if renderable.material.is_transparent() {
            list.transparent.push(item);
        } else {
            list.opaque.push(item);
        }
    }
    for child in node.children() {
        collect_node(child, world, list);
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceRaw {
    model: [[f32; 4]; 4],
    /// x: receives shadows (0 or 1)
    flags: [f32; 4],
}

impl InstanceRaw {
    fn from_item(item: &DrawItem) -> Self {
        Self {
            model: item.model.to_cols_array_2d(),
            flags: [item.renderable.receive_shadow as u32 as f32, 0.0, 0.0, 0.0],
        }
    }
}

const VERTEX_ATTRIBUTES: [VertexAttribute; 3] =
    vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];
const INSTANCE_ATTRIBUTES: [VertexAttribute; 5] = vertex_attr_array![
    3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4, 7 => Float32x4
];

pub(crate) fn vertex_layout() -> VertexBufferLayout<'static> {
    VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as BufferAddress,
        step_mode: VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

pub(crate) fn instance_layout() -> VertexBufferLayout<'static> {
    VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRaw>() as BufferAddress,
        step_mode: VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRIBUTES,
    }
}

pub fn create_depth_texture(
    device: &Device,
    width: u32,
    height: u32,
    sample_count: u32,
) -> (Texture, TextureView) {
    let depth_texture = device.create_texture(&TextureDescriptor {
        label: Some("depth_texture"),
        size: Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

/// Multisampled color target resolved into the surface texture each frame.
pub fn create_msaa_target(device: &Device, format: TextureFormat, width: u32, height: u32) -> TextureView {
    device
        .create_texture(&TextureDescriptor {
            label: Some("msaa_color"),
            size: Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: TextureDimension::D2,
            format,
            usage: TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&TextureViewDescriptor::default())
}

// Shared graphics setup used by native and web
pub struct CameraResources {
    pub camera_buffer: Buffer,
    pub lighting_buffer: Buffer,
    pub bind_group_layout: BindGroupLayout,
    pub camera_bind_group: BindGroup,
}

pub fn create_camera_resources(device: &Device, shadow: &ShadowResources) -> CameraResources {
    let camera_buffer = device.create_buffer(&BufferDescriptor {
        label: Some("camera_buffer"),
        size: std::mem::size_of::<CameraUniform>() as BufferAddress,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let lighting_buffer = device.create_buffer(&BufferDescriptor {
        label: Some("lighting_buffer"),
        size: std::mem::size_of::<LightingUniform>() as BufferAddress,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let uniform_entry = |binding, visibility| BindGroupLayoutEntry {
        binding,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("camera_bind_group_layout"),
        entries: &[
            uniform_entry(0, ShaderStages::VERTEX | ShaderStages::FRAGMENT),
            uniform_entry(1, ShaderStages::FRAGMENT),
            BindGroupLayoutEntry {
                binding: 2,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Depth,
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 3,
                visibility: ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Comparison),
                count: None,
            },
        ],
    });

    let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
        label: Some("camera_bind_group"),
        layout: &bind_group_layout,
        entries: &[
            BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() },
            BindGroupEntry { binding: 1, resource: lighting_buffer.as_entire_binding() },
            BindGroupEntry { binding: 2, resource: BindingResource::TextureView(&shadow.view) },
            BindGroupEntry { binding: 3, resource: BindingResource::Sampler(&shadow.sampler) },
        ],
    });

    CameraResources { camera_buffer, lighting_buffer, bind_group_layout, camera_bind_group }
}

pub struct PipelineResources {
    pub opaque: RenderPipeline,
    pub transparent: RenderPipeline,
    pub grid: RenderPipeline,
}

pub fn create_pipelines(
    device: &Device,
    format: TextureFormat,
    bind_group_layout: &BindGroupLayout,
) -> PipelineResources {
    let mesh_shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
    });
    let grid_shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("grid_shader"),
        source: ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("pipeline_layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    let build = |label: &str,
                 shader: &ShaderModule,
                 buffers: &[VertexBufferLayout],
                 topology: PrimitiveTopology,
                 blend: BlendState,
                 depth_write_enabled: bool,
                 cull_mode: Option<Face>| {
        device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState { format, blend: Some(blend), write_mask: ColorWrites::ALL })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: FrontFace::Ccw,
                cull_mode,
                polygon_mode: PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            }),
            multisample: MultisampleState { count: SAMPLE_COUNT, mask: !0, alpha_to_coverage_enabled: false },
            multiview: None,
            cache: None,
        })
    };

    let mesh_buffers = [vertex_layout(), instance_layout()];
    PipelineResources {
        opaque: build(
            "opaque_pipeline",
            &mesh_shader,
            &mesh_buffers,
            PrimitiveTopology::TriangleList,
            BlendState::REPLACE,
            true,
            Some(Face::Back),
        ),
        transparent: build(
            "transparent_pipeline",
            &mesh_shader,
            &mesh_buffers,
            PrimitiveTopology::TriangleList,
            BlendState::ALPHA_BLENDING,
            false,
            Some(Face::Back),
        ),
        grid: build(
            "grid_pipeline",
            &grid_shader,
            &[vertex_layout()],
            PrimitiveTopology::LineList,
            BlendState::REPLACE,
            true,
            None,
        ),
    }
}

///////////////////////////////////////////////////////////////////////////////

/// wgpu implementation of the frame loop's renderer seam.
pub struct RenderState {
    gpu: GpuContext,
    depth_view: TextureView,
    msaa_view: TextureView,
    shadow: ShadowResources,
    camera: CameraResources,
    pipelines: PipelineResources,
    meshes: HashMap<NodeId, MeshBuffer>,
    grid_mesh: Option<MeshBuffer>,
    instance_buffer: Buffer,
    instance_capacity: usize,
    clear_color: Color,

    // UI
    egui_ctx: egui::Context,
    egui_renderer: egui_wgpu::Renderer,
    pixels_per_point: f32,
}

impl RenderState {
    /// The shadow map is sized once from the lights already in `scene`.
    pub fn new(gpu: GpuContext, pixels_per_point: f32, scene: &Scene) -> Self {
        let device = gpu.device.as_ref();
        let (width, height) = (gpu.config.width, gpu.config.height);
        let (_, depth_view) = create_depth_texture(device, width, height, SAMPLE_COUNT);
        let msaa_view = create_msaa_target(device, gpu.format, width, height);
        let shadow_size = shadow_map_size(scene.lights(), device.limits().max_texture_dimension_2d);
        let shadow = create_shadow_resources(device, shadow_size);
        let camera = create_camera_resources(device, &shadow);
        let pipelines = create_pipelines(device, gpu.format, &camera.bind_group_layout);
        let instance_capacity = 64;
        let instance_buffer = create_instance_buffer(device, instance_capacity);
        let egui_renderer =
            egui_wgpu::Renderer::new(device, gpu.format, egui_wgpu::RendererOptions::default());

        Self {
            gpu,
            depth_view,
            msaa_view,
            shadow,
            camera,
            pipelines,
            meshes: HashMap::new(),
            grid_mesh: None,
            instance_buffer,
            instance_capacity,
            clear_color: Color::WHITE,
            egui_ctx: egui::Context::default(),
            egui_renderer,
            pixels_per_point,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.gpu.config.width, self.gpu.config.height)
    }

    fn upload_missing(&mut self, draws: &DrawList, scene: &Scene) {
        let device = self.gpu.device.as_ref();
        for item in draws.iter() {
            self.meshes
                .entry(item.node)
                .or_insert_with(|| item.renderable.build_mesh().upload(device));
        }
        if self.grid_mesh.is_none() {
            if let Some(grid) = scene.grid() {
                self.grid_mesh = Some(grid.build_mesh().upload(device));
            }
        }
        if draws.len() > self.instance_capacity {
            self.instance_capacity = draws.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
            debug!(capacity = self.instance_capacity, "instance buffer grown");
        }
    }

    /// Returns whether a shadow pass is needed this frame.
    fn write_uniforms(&self, scene: &Scene, camera: &Camera) -> bool {
        let queue = self.gpu.queue.as_ref();
        queue.write_buffer(
            &self.camera.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform::from_camera(camera)),
        );

        let mut lighting = LightingUniform::from_lights(scene.lights());
        if let Some(fog) = scene.fog {
            lighting.fog_color = hex_color(fog.color, 1.0);
            lighting.fog_near = fog.near;
            lighting.fog_far = fog.far;
        } else {
            lighting.fog_near = f32::MAX;
            lighting.fog_far = f32::MAX;
        }
        queue.write_buffer(&self.camera.lighting_buffer, 0, bytemuck::bytes_of(&lighting));
        queue.write_buffer(
            &self.shadow.uniform_buffer,
            0,
            bytemuck::bytes_of(&lighting.light_view_proj),
        );
        lighting.shadow_strength > 0.0
    }

    fn acquire_frame(&mut self) -> Option<SurfaceTexture> {
        match self.gpu.surface.get_current_texture() {
            Ok(frame) => Some(frame),
            Err(SurfaceError::Lost | SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);
                None
            }
            Err(e) => {
                warn!("skipping frame: {e:?}");
                None
            }
        }
    }

    fn draw_frame(&mut self, scene: &Scene, camera: &Camera, stats: &FrameStats) {
        let draws = DrawList::collect(scene);
        self.upload_missing(&draws, scene);
        let shadows = self.write_uniforms(scene, camera);

        let instances: Vec<InstanceRaw> = draws.iter().map(InstanceRaw::from_item).collect();
        if !instances.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        if let Some(fog) = scene.fog {
            let [r, g, b, _] = hex_color(fog.color, 1.0);
            self.clear_color = Color { r: r as f64, g: g as f64, b: b as f64, a: 1.0 };
        }

        let Some(frame) = self.acquire_frame() else {
            return;
        };

        // overlay first so its textures are ready before the pass
        let (width, height) = self.size();
        let mut full_output = overlay::build_overlay(
            &self.egui_ctx,
            stats,
            scene,
            width as f32 / self.pixels_per_point,
            height as f32 / self.pixels_per_point,
        );
        let primitives = self
            .egui_ctx
            .tessellate(std::mem::take(&mut full_output.shapes), self.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: self.pixels_per_point,
        };

        let device = self.gpu.device.as_ref();
        let queue = self.gpu.queue.as_ref();
        let view = frame.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("encoder"),
        });

        if shadows {
            let mut sp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.shadow.view,
                    depth_ops: Some(Operations { load: LoadOp::Clear(1.0), store: StoreOp::Store }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            sp.set_pipeline(&self.shadow.pipeline);
            sp.set_bind_group(0, &self.shadow.bind_group, &[]);
            sp.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, item) in draws.casters() {
                let Some(mesh) = self.meshes.get(&item.node) else {
                    continue;
                };
                let instance = i as u32;
                sp.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                sp.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint32);
                sp.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
            }
        }

        {
            let mut rp = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: Operations { load: LoadOp::Clear(self.clear_color), store: StoreOp::Discard },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations { load: LoadOp::Clear(1.0), store: StoreOp::Store }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_bind_group(0, &self.camera.camera_bind_group, &[]);

            if let Some(grid) = &self.grid_mesh {
                rp.set_pipeline(&self.pipelines.grid);
                rp.set_vertex_buffer(0, grid.vertex_buffer.slice(..));
                rp.set_index_buffer(grid.index_buffer.slice(..), IndexFormat::Uint32);
                rp.draw_indexed(0..grid.index_count, 0, 0..1);
            }

            rp.set_vertex_buffer(1, self.instance_buffer.slice(..));
            let passes = [
                (&self.pipelines.opaque, 0..draws.opaque.len()),
                (&self.pipelines.transparent, draws.opaque.len()..draws.len()),
            ];
            for (pipeline, range) in passes {
                if range.is_empty() {
                    continue;
                }
                rp.set_pipeline(pipeline);
                for (i, item) in draws.iter().enumerate().skip(range.start).take(range.len()) {
                    let Some(mesh) = self.meshes.get(&item.node) else {
                        continue;
                    };
                    if mesh.index_count == 0 {
                        continue;
                    }
                    let instance = i as u32;
                    rp.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    rp.set_index_buffer(mesh.index_buffer.slice(..), IndexFormat::Uint32);
                    rp.draw_indexed(0..mesh.index_count, 0, instance..instance + 1);
                }
            }
        }

        // Upload egui textures
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        self.egui_renderer
            .update_buffers(device, queue, &mut encoder, &primitives, &screen_descriptor);

        {
            let egui_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations { load: LoadOp::Load, store: StoreOp::Store },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

impl SceneRenderer for RenderState {
    fn render(&mut self, scene: &Scene, camera: &Camera, stats: &FrameStats) {
        self.draw_frame(scene, camera, stats);
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.config.width = width;
        self.gpu.config.height = height;
        self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);
        let (_, depth_view) = create_depth_texture(&self.gpu.device, width, height, SAMPLE_COUNT);
        self.depth_view = depth_view;
        self.msaa_view = create_msaa_target(&self.gpu.device, self.gpu.format, width, height);
    }
}

fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&BufferDescriptor {
        label: Some("instance_buffer"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as BufferAddress,
        usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::controller::assemble;
    use crate::model::EntityKind;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn test_draw_list_splits_translucent_sea() {
        let (scene, _) = assemble(&AppConfig::reference());
        let draws = DrawList::collect(&scene);
        assert_eq!(draws.transparent.len(), 1);
        let sea_id = scene.root(EntityKind::Sea).unwrap().id();
        assert_eq!(draws.transparent[0].node, sea_id);
        // 6 airplane parts plus every cloud block
        let cloud_blocks: usize = scene
            .root(EntityKind::Sky)
            .unwrap()
            .children()
            .iter()
            .map(|c| c.children().len())
            .sum();
        assert_eq!(draws.opaque.len(), 6 + cloud_blocks);
    }

    #[test]
    fn test_shadow_casters_skip_the_sea() {
        let (scene, _) = assemble(&AppConfig::default());
        let draws = DrawList::collect(&scene);
        let sea_id = scene.root(EntityKind::Sea).unwrap().id();
        let casters: Vec<_> = draws.casters().collect();
        assert_eq!(casters.len(), draws.opaque.len());
        assert!(casters.iter().all(|(_, item)| item.node != sea_id));
        // indices line up with the instance buffer order
        for (i, item) in &casters {
            assert_eq!(draws.iter().nth(*i).map(|d| d.node), Some(item.node));
        }
    }

    #[test]
    fn test_instance_flags_carry_receive_shadow() {
        let (scene, _) = assemble(&AppConfig::default());
        let draws = DrawList::collect(&scene);
        let sea = InstanceRaw::from_item(&draws.transparent[0]);
        assert_eq!(sea.flags[0], 1.0);
        let first = &draws.opaque[0];
        let mut renderable = first.renderable.clone();
        renderable.receive_shadow = false;
        let item = DrawItem { node: first.node, renderable: &renderable, model: first.model };
        assert_eq!(InstanceRaw::from_item(&item).flags[0], 0.0);
    }

    #[test]
    fn test_blade_world_matrix_includes_airplane_scale() {
        let (mut scene, refs) = assemble(&AppConfig::default());
        scene.node_mut(&refs.airplane).unwrap().position = Vec3::new(-100.0, 175.0, 0.0);
        let draws = DrawList::collect(&scene);

        let propeller = scene.node(refs.propeller.as_ref().unwrap()).unwrap();
        let blade_id = propeller.children()[0].id();
        let blade = draws.iter().find(|d| d.node == blade_id).unwrap();
        let origin = blade.model.transform_point3(Vec3::ZERO);
        // (50 + 8) * 0.25 to the right of the airplane root
        assert_relative_eq!(origin.x, -100.0 + 58.0 * 0.25, epsilon = 1e-4);
        assert_relative_eq!(origin.y, 175.0, epsilon = 1e-4);
    }

    #[test]
    fn test_instance_layout_matches_struct() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(std::mem::size_of::<LightingUniform>(), 160);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        // antialiased scene passes resolve into the single-sampled surface
        assert_eq!(SAMPLE_COUNT, 4);
    }
}

use glam::Mat4;

use crate::camera::Camera;
use crate::lighting::{DrawUniform, Light, LightingModel, Material};
use crate::mesh::GpuMesh;
use crate::render::{RenderCtx, RenderTarget};
use crate::vertex::VertexFormat;

/// One mesh draw with its own transform, material and lighting function.
#[derive(Copy, Clone)]
pub struct DrawItem<'m> {
    pub mesh: &'m GpuMesh,
    pub model: Mat4,
    pub material: Material,
    pub lighting: LightingModel,
}

/// Per-draw uniform buffer and its bind group.
struct DrawSlot {
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws meshes through a single pipeline whose lighting function is chosen
/// per draw.
///
/// Every [`DrawItem`] gets its own uniform slot, so switching the lighting
/// model between draws costs a bind group change, never a pipeline change.
#[derive(Default)]
pub struct SubroutineRenderer {
    pipeline_formats: Option<(wgpu::TextureFormat, wgpu::TextureFormat)>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    slots: Vec<DrawSlot>,
}

impl SubroutineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &Camera,
        light: &Light,
        items: &[DrawItem<'_>],
    ) {
        if items.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_slots(ctx, items.len());

        for (item, slot) in items.iter().zip(&self.slots) {
            let uniform = DrawUniform::new(
                item.model,
                camera,
                ctx.aspect,
                light,
                &item.material,
                item.lighting,
            );
            ctx.queue.write_buffer(&slot.ubo, 0, bytemuck::bytes_of(&uniform));
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("subroutines lighting pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);

        for (item, slot) in items.iter().zip(&self.slots) {
            if item.mesh.index_count() == 0 {
                continue;
            }
            rpass.set_bind_group(0, &slot.bind_group, &[]);
            rpass.set_vertex_buffer(0, item.mesh.vertex_buffer().slice(..));
            rpass.set_index_buffer(item.mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..item.mesh.index_count(), 0, 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let formats = (ctx.surface_format, ctx.depth_format);
        if self.pipeline_formats == Some(formats) && self.pipeline.is_some() {
            return;
        }

        log::debug!(
            "building lighting pipeline: color={:?}, depth={:?}",
            ctx.surface_format,
            ctx.depth_format
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("subroutines lighting shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lighting.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("subroutines draw bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<DrawUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("subroutines pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("subroutines lighting pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[VertexFormat::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_formats = Some(formats);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        // Bind groups reference the old layout.
        self.slots.clear();
    }

    fn ensure_slots(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        while self.slots.len() < required {
            let index = self.slots.len();

            let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&format!("subroutines draw ubo #{index}")),
                size: std::mem::size_of::<DrawUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("subroutines draw bind group #{index}")),
                layout: bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                }],
            });

            self.slots.push(DrawSlot { ubo, bind_group });
        }
    }
}

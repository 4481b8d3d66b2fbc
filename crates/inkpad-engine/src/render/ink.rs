use bytemuck::{Pod, Zeroable};

use crate::mesh::{InkVertex, VertexStore};
use crate::pad::SignaturePad;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

/// Ink renderer: draws the pad's line and dot strips.
///
/// Vertices are already NDC, so there is no per-frame uniform beyond the
/// ink color. Both stores draw as triangle strips; degenerate vertex pairs
/// inside a store keep separate strokes disconnected, and the two stores
/// get one draw call each so they stay disconnected from each other.
#[derive(Default)]
pub struct InkRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    color_ubo: Option<wgpu::Buffer>,

    lines_vbo: Option<wgpu::Buffer>,
    lines_capacity: usize,
    dots_vbo: Option<wgpu::Buffer>,
    dots_capacity: usize,
}

impl InkRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the pad's committed ink into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        pad: &SignaturePad,
        ink: Color,
    ) {
        let lines = pad.lines();
        let dots = pad.dots();
        if lines.is_empty() && dots.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_bindings(ctx);

        // Mutating methods must happen before borrowing pipeline/buffers immutably.
        self.write_color_uniform(ctx, ink);
        if !lines.is_empty() {
            ensure_vertex_capacity(
                ctx,
                &mut self.lines_vbo,
                &mut self.lines_capacity,
                lines.len(),
                "inkpad lines vbo",
            );
            upload_vertices(ctx, self.lines_vbo.as_ref(), lines);
        }
        if !dots.is_empty() {
            ensure_vertex_capacity(
                ctx,
                &mut self.dots_vbo,
                &mut self.dots_capacity,
                dots.len(),
                "inkpad dots vbo",
            );
            upload_vertices(ctx, self.dots_vbo.as_ref(), dots);
        }

        // Now take immutable borrows.
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        let Some(bind_group) = self.bind_group.as_ref() else {
            return;
        };

        let mut rpass = target
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("inkpad ink pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);

        if !lines.is_empty() {
            if let Some(vbo) = self.lines_vbo.as_ref() {
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..lines.len() as u32, 0..1);
            }
        }
        if !dots.is_empty() {
            if let Some(vbo) = self.dots_vbo.as_ref() {
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..dots.len() as u32, 0..1);
            }
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader_src = include_str!("shaders/ink.wgsl");
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("inkpad ink shader"),
                source: wgpu::ShaderSource::Wgsl(shader_src.into()),
            });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("inkpad ink bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(ink_ubo_min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("inkpad ink pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                // Newer wgpu uses immediate constants; keep disabled for now.
                immediate_size: 0,
            });

        let pipeline = ctx
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("inkpad ink pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[InkVertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(premul_alpha_blend()),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),

                // Newer wgpu field names:
                multiview_mask: None,
                cache: None,
            });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        self.bind_group = None;
        self.color_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.color_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else {
            return;
        };

        let color_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("inkpad ink color ubo"),
            size: std::mem::size_of::<InkUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("inkpad ink bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_ubo.as_entire_binding(),
            }],
        });

        self.color_ubo = Some(color_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_color_uniform(&mut self, ctx: &RenderCtx<'_>, ink: Color) {
        let Some(ubo) = self.color_ubo.as_ref() else {
            return;
        };
        let u = InkUniform {
            color: [ink.r, ink.g, ink.b, ink.a],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

fn ensure_vertex_capacity(
    ctx: &RenderCtx<'_>,
    vbo: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    label: &'static str,
) {
    if required <= *capacity && vbo.is_some() {
        return;
    }

    let new_cap = required.next_power_of_two().max(1024);
    *vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (new_cap * std::mem::size_of::<InkVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}

fn upload_vertices(ctx: &RenderCtx<'_>, vbo: Option<&wgpu::Buffer>, store: &VertexStore) {
    let Some(vbo) = vbo else {
        return;
    };
    ctx.queue
        .write_buffer(vbo, 0, bytemuck::cast_slice(store.vertices()));
}

fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct InkUniform {
    color: [f32; 4],
}

/// Returns the `wgpu` minimum binding size for the ink color uniform.
///
/// `InkUniform` is one `[f32; 4]` (16 bytes) so its size is always
/// non-zero.
fn ink_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<InkUniform>() as u64)
        .expect("InkUniform has non-zero size by construction")
}

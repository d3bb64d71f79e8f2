use std::path::PathBuf;

use anyhow::{Context, Result};
use gridmesh_mesh::{ColorSource, GridLayout, GridMesh, MAX_GRID_SIZE, default_source};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::layout::{GridUniform, line_vertex_layout, quad_vertex_layout};
use super::refresh::RefreshFlag;
use super::shader::{GRID_WGSL, LINE_WGSL, create_shader};
use super::texture::GridTexture;
use super::transform::GridTransform;

/// Startup parameters for [`GridRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Cells per side.
    pub size: u32,
    /// Image applied to the filled grid. `None` keeps vertex colors.
    pub texture: Option<PathBuf>,
    /// Start with the filled grid drawn as outlines.
    pub wireframe: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10,
            texture: None,
            wireframe: false,
        }
    }
}

/// Vertex and index buffer pair for one draw.
struct MeshBuffers {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn upload<V: bytemuck::Pod>(
        ctx: &RenderCtx<'_>,
        label: &str,
        vertices: &[V],
        indices: &[u32],
    ) -> Result<Self> {
        let index_count = u32::try_from(indices.len())
            .with_context(|| format!("{label}: {} indices exceed u32", indices.len()))?;

        // `create_buffer_init` maps at creation and copies straight into the
        // mapping; no staging upload through the queue.
        let vertices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertices,
            indices,
            index_count,
        })
    }

    fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertices.slice(..));
        rpass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Draws the filled grid and its line overlay.
///
/// Geometry is produced by `gridmesh_mesh` and lives in immutable GPU
/// buffers. A remap throws them away and builds new ones with fresh colors.
pub struct GridRenderer {
    size: u32,

    fill_pipeline: wgpu::RenderPipeline,
    /// Only present when the device supports `POLYGON_MODE_LINE`.
    wire_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: wgpu::RenderPipeline,

    uniform_ubo: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    texture: GridTexture,

    quads: Option<MeshBuffers>,
    lines: Option<MeshBuffers>,

    colors: Box<dyn ColorSource>,
    refresh: RefreshFlag,
    wireframe: bool,
    warned_no_wireframe: bool,
}

impl GridRenderer {
    /// Creates pipelines, bindings and the texture. Vertex data is built
    /// lazily by the first [`render_frame`](Self::render_frame).
    pub fn new(ctx: &RenderCtx<'_>, config: &GridConfig) -> Result<Self> {
        check_size(config.size, ctx.device.limits().max_buffer_size)?;

        let fill_shader = create_shader(ctx, "gridmesh grid shader", GRID_WGSL)?;
        let line_shader = create_shader(ctx, "gridmesh line shader", LINE_WGSL)?;

        let uniform_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gridmesh uniform bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(GridUniform::min_binding_size()),
                    },
                    count: None,
                }],
            });

        let texture_bgl = ctx
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gridmesh texture bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let fill_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("gridmesh grid pipeline layout"),
                bind_group_layouts: &[&uniform_bgl, &texture_bgl],
                immediate_size: 0,
            });
        let line_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("gridmesh line pipeline layout"),
                bind_group_layouts: &[&uniform_bgl],
                immediate_size: 0,
            });

        let fill_pipeline = build_pipeline(
            ctx,
            &PipelineDesc {
                label: "gridmesh grid fill pipeline",
                layout: &fill_layout,
                shader: &fill_shader,
                vertex: quad_vertex_layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                polygon_mode: wgpu::PolygonMode::Fill,
            },
        );

        let wire_pipeline = if ctx.features.contains(wgpu::Features::POLYGON_MODE_LINE) {
            Some(build_pipeline(
                ctx,
                &PipelineDesc {
                    label: "gridmesh grid wireframe pipeline",
                    layout: &fill_layout,
                    shader: &fill_shader,
                    vertex: quad_vertex_layout(),
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    polygon_mode: wgpu::PolygonMode::Line,
                },
            ))
        } else {
            None
        };

        let line_pipeline = build_pipeline(
            ctx,
            &PipelineDesc {
                label: "gridmesh line pipeline",
                layout: &line_layout,
                shader: &line_shader,
                vertex: line_vertex_layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                polygon_mode: wgpu::PolygonMode::Fill,
            },
        );

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridmesh uniform ubo"),
            size: std::mem::size_of::<GridUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gridmesh uniform bind group"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        let texture = GridTexture::load_or_fallback(ctx, config.texture.as_deref());
        let texture_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gridmesh texture bind group"),
            layout: &texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(texture.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(texture.sampler()),
                },
            ],
        });

        log::info!(
            "grid renderer ready: {0}x{0} cells, texture {1}",
            config.size,
            if texture.is_loaded() { "on" } else { "off" }
        );

        let mut renderer = Self {
            size: config.size,
            fill_pipeline,
            wire_pipeline,
            line_pipeline,
            uniform_ubo,
            uniform_bind_group,
            texture_bind_group,
            texture,
            quads: None,
            lines: None,
            colors: Box::new(default_source()),
            refresh: RefreshFlag::new(),
            wireframe: false,
            warned_no_wireframe: false,
        };
        renderer.set_wireframe(config.wireframe);
        Ok(renderer)
    }

    /// Replaces the color source used by subsequent remaps.
    pub fn with_color_source(mut self, colors: Box<dyn ColorSource>) -> Self {
        self.colors = colors;
        self.refresh.request();
        self
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Marks the geometry stale; the next frame rebuilds it.
    pub fn request_remap(&mut self) {
        self.refresh.request();
    }

    /// Switches the filled grid between solid and outlined triangles.
    ///
    /// Without `POLYGON_MODE_LINE` on the device the request is ignored and
    /// a warning is logged once.
    pub fn set_wireframe(&mut self, on: bool) {
        if on && self.wire_pipeline.is_none() {
            if !self.warned_no_wireframe {
                log::warn!("wireframe unavailable: device lacks POLYGON_MODE_LINE");
                self.warned_no_wireframe = true;
            }
            self.wireframe = false;
            return;
        }
        self.wireframe = on;
    }

    /// Rebuilds both meshes at `size` cells per side with fresh colors and
    /// uploads them.
    ///
    /// An invalid size is rejected before the current buffers are touched.
    pub fn remap(&mut self, ctx: &RenderCtx<'_>, size: u32) -> Result<()> {
        check_size(size, ctx.device.limits().max_buffer_size)?;
        log::info!("remapping graphics data");

        if size != self.size {
            log::info!("grid resized from {0}x{0} to {1}x{1}", self.size, size);
            self.size = size;
        }

        self.quads = None;
        self.lines = None;

        let mesh = GridMesh::generate(self.size, &mut *self.colors)
            .with_context(|| format!("failed to build {0}x{0} grid", self.size))?;

        if !mesh.layout.is_empty() {
            self.quads = Some(MeshBuffers::upload(
                ctx,
                "gridmesh quads",
                &mesh.quad_vertices,
                &mesh.quad_indices,
            )?);
            self.lines = Some(MeshBuffers::upload(
                ctx,
                "gridmesh lines",
                &mesh.line_vertices,
                &mesh.line_indices,
            )?);
        }

        self.refresh.take();
        Ok(())
    }

    /// Remaps if stale, then draws the grid and its outline into `target`.
    pub fn render_frame(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        transform: &GridTransform,
    ) -> Result<()> {
        let steps = FrameSteps::plan(&self.refresh, self.size);
        if steps.remap {
            self.remap(ctx, self.size)?;
        }
        if !steps.draw {
            return Ok(());
        }

        let (Some(quads), Some(lines)) = (self.quads.as_ref(), self.lines.as_ref()) else {
            return Ok(());
        };

        let uniform = GridUniform::new(transform.clip_matrix(), self.texture.is_loaded());
        ctx.queue
            .write_buffer(&self.uniform_ubo, 0, bytemuck::bytes_of(&uniform));

        let fill = match (self.wireframe, self.wire_pipeline.as_ref()) {
            (true, Some(wire)) => wire,
            _ => &self.fill_pipeline,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gridmesh grid pass"),
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

        rpass.set_pipeline(fill);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
        rpass.set_bind_group(1, &self.texture_bind_group, &[]);
        quads.draw(&mut rpass);

        rpass.set_pipeline(&self.line_pipeline);
        rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
        lines.draw(&mut rpass);

        Ok(())
    }
}

/// Rejects sizes whose vertex indices overflow `u32` or whose largest buffer
/// exceeds the device limit.
fn check_size(size: u32, max_buffer_size: u64) -> Result<GridLayout> {
    anyhow::ensure!(
        size <= MAX_GRID_SIZE,
        "grid size {size} exceeds maximum of {MAX_GRID_SIZE}"
    );

    let layout = GridLayout::new(size);
    let largest = layout.quad_vertex_bytes().max(layout.quad_index_bytes());
    anyhow::ensure!(
        largest <= max_buffer_size,
        "grid size {size} needs a {largest} byte buffer, device allows {max_buffer_size}"
    );

    Ok(layout)
}

/// Work `render_frame` does for one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct FrameSteps {
    /// Rebuild geometry before drawing.
    remap: bool,
    /// Issue the fill and line draws. False for an empty grid.
    draw: bool,
}

impl FrameSteps {
    fn plan(refresh: &RefreshFlag, size: u32) -> Self {
        Self {
            remap: refresh.is_dirty(),
            draw: !GridLayout::new(size).is_empty(),
        }
    }
}

struct PipelineDesc<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    vertex: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
}

fn build_pipeline(ctx: &RenderCtx<'_>, desc: &PipelineDesc<'_>) -> wgpu::RenderPipeline {
    ctx.device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(desc.layout),

            vertex: wgpu::VertexState {
                module: desc.shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: std::slice::from_ref(&desc.vertex),
            },

            fragment: Some(wgpu::FragmentState {
                module: desc.shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: desc.polygon_mode,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_remaps_before_drawing() {
        let mut refresh = RefreshFlag::new();
        assert_eq!(
            FrameSteps::plan(&refresh, 10),
            FrameSteps { remap: true, draw: true }
        );

        // remap consumes the flag
        refresh.take();
        assert_eq!(
            FrameSteps::plan(&refresh, 10),
            FrameSteps { remap: false, draw: true }
        );

        refresh.request();
        assert!(FrameSteps::plan(&refresh, 10).remap);
    }

    #[test]
    fn empty_grid_skips_draws() {
        let refresh = RefreshFlag::new();
        let steps = FrameSteps::plan(&refresh, 0);
        assert!(steps.remap);
        assert!(!steps.draw);
    }

    #[test]
    fn check_size_accepts_default_grid() {
        let layout = check_size(10, wgpu::Limits::default().max_buffer_size).unwrap();
        assert_eq!(layout.size(), 10);
        assert!(check_size(0, 0).is_ok());
    }

    #[test]
    fn check_size_rejects_index_overflow() {
        let err = check_size(MAX_GRID_SIZE + 1, u64::MAX).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"), "{err}");
    }

    #[test]
    fn check_size_rejects_buffers_over_device_limit() {
        // 4 cells: 64 quad vertices of 32 bytes.
        assert!(check_size(4, 2048).is_ok());
        let err = check_size(4, 2047).unwrap_err();
        assert!(err.to_string().contains("2048 byte buffer"), "{err}");
    }

    #[test]
    fn default_config_is_ten_cells_untextured() {
        let config = GridConfig::default();
        assert_eq!(config.size, 10);
        assert!(config.texture.is_none());
        assert!(!config.wireframe);
    }
}

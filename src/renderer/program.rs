//! Pipeline, uniform and geometry buffers owned by one renderable item.

use wgpu::util::DeviceExt;
use wgpu::{BindGroup, Buffer, BufferUsages, Device, Queue, RenderPass, RenderPipeline};

use super::geometry::{GeometryBuffer, TileVertex, TILE_INDEX_COUNT, TILE_VERTEX_COUNT};

/// Declarations shared by every item shader: the uniform block, vertex IO
/// and the rounded-box SDF.
pub const SHADER_PRELUDE: &str = r#"
struct ItemUniforms {
    viewport: vec2<f32>,
    origin: vec2<f32>,
    size: vec2<f32>,
    scale_factor: f32,
    radius: f32,
    fill: vec4<f32>,
    dim: vec4<f32>,
    shade: f32,
    opacity: f32,
    _pad: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> item: ItemUniforms;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    // Position relative to the item center, logical pixels
    @location(0) local: vec2<f32>,
    @location(1) uv: vec2<f32>,
}

fn rounded_box_sdf(p: vec2<f32>, half_size: vec2<f32>, r: f32) -> f32 {
    let q = abs(p) - half_size + r;
    return min(max(q.x, q.y), 0.0) + length(max(q, vec2<f32>(0.0, 0.0))) - r;
}

fn edge_coverage(dist: f32) -> f32 {
    let aa = max(fwidth(dist), 0.001) * 0.5;
    return 1.0 - smoothstep(-aa, aa, dist);
}
"#;

/// Maps tile vertices from item space to clip space.
pub const DEFAULT_VERTEX_SHADER: &str = r#"
@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let physical = (item.origin + in.position) * item.scale_factor;
    let ndc = vec2<f32>(
        physical.x / item.viewport.x * 2.0 - 1.0,
        1.0 - physical.y / item.viewport.y * 2.0
    );
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.local = in.position - item.size * 0.5;
    out.uv = in.uv;
    return out;
}
"#;

/// Solid rounded fill with anti-aliased edges.
pub const DEFAULT_FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = rounded_box_sdf(in.local, item.size * 0.5, item.radius);
    let alpha = item.fill.a * edge_coverage(dist) * item.opacity;
    return vec4<f32>(item.fill.rgb, alpha);
}
"#;

/// Uniform block written once per frame. Layout matches `ItemUniforms` in
/// [`SHADER_PRELUDE`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ItemUniforms {
    /// Target size in physical pixels
    pub viewport: [f32; 2],
    /// Item top-left in logical pixels
    pub origin: [f32; 2],
    /// Item size in logical pixels
    pub size: [f32; 2],
    pub scale_factor: f32,
    pub radius: f32,
    pub fill: [f32; 4],
    pub dim: [f32; 4],
    pub shade: f32,
    pub opacity: f32,
    pub _pad: [f32; 2],
}

impl Default for ItemUniforms {
    fn default() -> Self {
        Self {
            viewport: [1.0, 1.0],
            origin: [0.0, 0.0],
            size: [0.0, 0.0],
            scale_factor: 1.0,
            radius: 0.0,
            fill: [0.0, 0.0, 0.0, 0.0],
            dim: [0.0, 0.0, 0.0, 0.0],
            shade: 0.0,
            opacity: 1.0,
            _pad: [0.0, 0.0],
        }
    }
}

/// Sources and pipeline options collected before a program is created.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    pub label: String,
    pub vertex_source: String,
    pub fragment_source: String,
    pub blend: wgpu::BlendState,
}

impl ProgramBuilder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            vertex_source: DEFAULT_VERTEX_SHADER.to_string(),
            fragment_source: DEFAULT_FRAGMENT_SHADER.to_string(),
            blend: wgpu::BlendState::ALPHA_BLENDING,
        }
    }

    pub fn vertex(&mut self, source: &str) -> &mut Self {
        self.vertex_source = source.to_string();
        self
    }

    pub fn fragment(&mut self, source: &str) -> &mut Self {
        self.fragment_source = source.to_string();
        self
    }

    /// Full WGSL module: prelude, then vertex stage, then fragment stage.
    pub fn module_source(&self) -> String {
        let mut source = String::with_capacity(
            SHADER_PRELUDE.len() + self.vertex_source.len() + self.fragment_source.len(),
        );
        source.push_str(SHADER_PRELUDE);
        source.push_str(&self.vertex_source);
        source.push_str(&self.fragment_source);
        source
    }
}

pub struct GpuProgram {
    pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    /// Geometry revision currently resident on the GPU
    uploaded_revision: Option<u64>,
}

impl GpuProgram {
    pub fn link(device: &Device, format: wgpu::TextureFormat, builder: &ProgramBuilder) -> Self {
        let label = builder.label.as_str();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(builder.module_source().into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} Bind Group Layout", label)),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", label)),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[TileVertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(builder.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            contents: bytemuck::cast_slice(&[ItemUniforms::default()]),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} Bind Group", label)),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Tile counts are fixed, so both buffers are sized once for the
        // lifetime of the program.
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            size: (TILE_VERTEX_COUNT * std::mem::size_of::<TileVertex>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            size: (TILE_INDEX_COUNT * std::mem::size_of::<u16>()) as u64,
            usage: BufferUsages::INDEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::debug!("Linked item program '{}'", label);

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            index_buffer,
            uploaded_revision: None,
        }
    }

    /// Copy geometry to the GPU unless this revision is already resident.
    pub fn upload_geometry(&mut self, queue: &Queue, geometry: &GeometryBuffer) {
        if self.uploaded_revision == Some(geometry.revision()) {
            return;
        }
        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(geometry.vertices()),
        );
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(geometry.indices()));
        self.uploaded_revision = Some(geometry.revision());
    }

    pub fn write_uniforms(&self, queue: &Queue, uniforms: &ItemUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    pub fn draw(&self, pass: &mut RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..TILE_INDEX_COUNT as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ItemUniforms>(), 80);
        assert_eq!(std::mem::size_of::<ItemUniforms>() % 16, 0);
    }

    #[test]
    fn test_module_source_orders_stages() {
        let mut builder = ProgramBuilder::new("Test");
        builder.fragment("@fragment fn fs_main() {}");
        let source = builder.module_source();
        let prelude_at = source.find("struct ItemUniforms").unwrap();
        let vertex_at = source.find("fn vs_main").unwrap();
        let fragment_at = source.find("@fragment fn fs_main").unwrap();
        assert!(prelude_at < vertex_at && vertex_at < fragment_at);
    }

    #[test]
    fn test_geometry_buffers_are_copy_aligned() {
        let vertex_bytes = TILE_VERTEX_COUNT * std::mem::size_of::<TileVertex>();
        let index_bytes = TILE_INDEX_COUNT * std::mem::size_of::<u16>();
        assert_eq!(vertex_bytes as u64 % wgpu::COPY_BUFFER_ALIGNMENT, 0);
        assert_eq!(index_bytes as u64 % wgpu::COPY_BUFFER_ALIGNMENT, 0);
    }
}

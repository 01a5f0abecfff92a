//! GPU resource lifetime shared by every custom-rendered widget.
//!
//! A widget owns a [`RenderableItem`] and implements [`ItemShader`] to supply
//! its WGSL sources, corner radius and per-frame uniforms. The item owns the
//! program and the tile geometry and decides when either must be rebuilt.

use crate::layout::Size;
use crate::reactive::ChangeFlags;
use crate::widgets::Color;

use super::context::FrameTarget;
use super::geometry::GeometryBuffer;
use super::program::{
    GpuProgram, ItemUniforms, ProgramBuilder, DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER,
};

/// Per-frame placement handed to [`ItemShader::bind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Item top-left in logical pixels
    pub origin: (f32, f32),
    pub opacity: f32,
}

impl RenderState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            origin: (x, y),
            opacity: 1.0,
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

/// Hooks a widget provides to its [`RenderableItem`].
pub trait ItemShader {
    fn label(&self) -> &str;

    fn vertex_shader(&self) -> &str {
        DEFAULT_VERTEX_SHADER
    }

    fn fragment_shader(&self) -> &str {
        DEFAULT_FRAGMENT_SHADER
    }

    /// Adjust the program before it is created.
    fn link(&self, _builder: &mut ProgramBuilder) {}

    /// Fill widget-specific uniforms. Placement fields are already set.
    fn bind(&self, uniforms: &mut ItemUniforms, state: &RenderState);

    fn corner_radius(&self) -> f32 {
        0.0
    }

    fn create_geometry(&self, size: Size) -> GeometryBuffer {
        GeometryBuffer::tiled(size, self.corner_radius())
    }

    /// Returns whether the buffer changed.
    fn update_geometry(&self, buffer: &mut GeometryBuffer, size: Size) -> bool {
        buffer.retile(size, self.corner_radius())
    }
}

/// Plain rounded fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillShader {
    pub color: Color,
    pub radius: f32,
}

impl FillShader {
    pub fn new(color: Color, radius: f32) -> Self {
        Self { color, radius }
    }
}

impl ItemShader for FillShader {
    fn label(&self) -> &str {
        "Fill"
    }

    fn bind(&self, uniforms: &mut ItemUniforms, _state: &RenderState) {
        uniforms.fill = self.color.to_array();
    }

    fn corner_radius(&self) -> f32 {
        self.radius
    }
}

/// Outcome of [`RenderableItem::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Nothing was dirty
    Clean,
    Rendered,
    /// No frame target or no program; dirty state is kept for the next frame
    Skipped,
}

pub struct RenderableItem {
    size: Size,
    geometry: Option<GeometryBuffer>,
    program: Option<GpuProgram>,
    dirty: ChangeFlags,
}

impl RenderableItem {
    pub fn new() -> Self {
        Self {
            size: Size::zero(),
            geometry: None,
            program: None,
            dirty: ChangeFlags::NEEDS_GEOMETRY | ChangeFlags::NEEDS_PAINT,
        }
    }

    /// Create the program for `shader`. A second call while attached is a no-op.
    pub fn initialize_gl(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        shader: &dyn ItemShader,
    ) {
        if self.program.is_some() {
            return;
        }

        let mut builder = ProgramBuilder::new(shader.label());
        builder
            .vertex(shader.vertex_shader())
            .fragment(shader.fragment_shader());
        shader.link(&mut builder);

        self.program = Some(GpuProgram::link(device, format, &builder));
        self.dirty |= ChangeFlags::NEEDS_GEOMETRY | ChangeFlags::NEEDS_PAINT;
    }

    /// Release the program and its buffers. No-op when never initialized.
    pub fn finalize_gl(&mut self) {
        if self.program.take().is_some() {
            log::debug!("Released item program");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.program.is_some()
    }

    /// Whether the next frame has anything to produce.
    pub fn prepare_to_render(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.dirty |= ChangeFlags::NEEDS_GEOMETRY | ChangeFlags::NEEDS_PAINT;
        }
    }

    pub fn mark_uniforms_dirty(&mut self) {
        self.dirty |= ChangeFlags::NEEDS_PAINT;
    }

    pub fn geometry(&self) -> Option<&GeometryBuffer> {
        self.geometry.as_ref()
    }

    /// Bring the CPU geometry in line with the current size.
    /// Returns whether it was created or rebuilt.
    pub fn sync_geometry(&mut self, shader: &dyn ItemShader) -> bool {
        if !self.dirty.contains(ChangeFlags::NEEDS_GEOMETRY) && self.geometry.is_some() {
            return false;
        }
        self.dirty.remove(ChangeFlags::NEEDS_GEOMETRY);
        match &mut self.geometry {
            Some(buffer) => shader.update_geometry(buffer, self.size),
            None => {
                self.geometry = Some(shader.create_geometry(self.size));
                true
            }
        }
    }

    /// Draw into `frame` if anything is dirty.
    pub fn render(
        &mut self,
        frame: Option<&mut FrameTarget<'_>>,
        shader: &dyn ItemShader,
        state: &RenderState,
    ) -> FrameStatus {
        if !self.prepare_to_render() {
            return FrameStatus::Clean;
        }
        let Some(frame) = frame else {
            log::debug!("No frame target for '{}', frame skipped", shader.label());
            return FrameStatus::Skipped;
        };
        if self.program.is_none() {
            log::debug!("'{}' not initialized, frame skipped", shader.label());
            return FrameStatus::Skipped;
        }

        self.sync_geometry(shader);
        let (Some(program), Some(geometry)) = (self.program.as_mut(), self.geometry.as_ref())
        else {
            return FrameStatus::Skipped;
        };

        // One snapshot of the uniforms per frame
        let mut uniforms = ItemUniforms {
            viewport: [frame.viewport.width, frame.viewport.height],
            origin: [state.origin.0, state.origin.1],
            size: [self.size.width, self.size.height],
            scale_factor: frame.scale_factor,
            radius: geometry.effective_radius(),
            opacity: state.opacity,
            ..ItemUniforms::default()
        };
        shader.bind(&mut uniforms, state);
        program.write_uniforms(frame.queue, &uniforms);
        program.upload_geometry(frame.queue, geometry);

        if !self.size.is_empty() {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(shader.label()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: frame.view,
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
            program.draw(&mut pass);
        }

        self.dirty = ChangeFlags::empty();
        FrameStatus::Rendered
    }
}

impl Default for RenderableItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RenderableItem {
    fn drop(&mut self) {
        if self.program.is_some() {
            log::warn!("Renderable item dropped without finalize_gl, releasing program");
        }
    }
}

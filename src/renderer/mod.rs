pub mod commands;
pub mod context;
pub mod geometry;
pub mod item;
mod paint;
pub mod program;
mod text_measurer;

pub use commands::{DrawCommand, Shadow};
pub use context::{FrameTarget, GpuContext, Offscreen};
pub use geometry::{GeometryBuffer, TileVertex};
pub use item::{FillShader, FrameStatus, ItemShader, RenderState, RenderableItem};
pub use paint::PaintContext;
pub use program::{GpuProgram, ItemUniforms, ProgramBuilder};
pub use text_measurer::{measure_text, TextMeasurer};

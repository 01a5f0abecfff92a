//! Custom-rendered widgets on wgpu: a pooled list row and an animated overlay.
//!
//! Both widgets own a [`renderer::RenderableItem`] for their background tile
//! and record text and shapes through [`renderer::PaintContext`]. The hosting
//! scene drives them with geometry, input events, animation ticks and frames.

pub mod animation;
pub mod error;
pub mod jobs;
pub mod layout;
pub mod reactive;
pub mod renderer;
pub mod widgets;

pub use error::{RenderError, Result};

pub mod prelude {
    pub use crate::animation::{TimingFunction, Transition};
    pub use crate::error::{RenderError, Result};
    pub use crate::jobs::{drain_pending_jobs, push_job, take_frame_request, Job, JobType};
    pub use crate::layout::{Axis, Constraints, Size};
    pub use crate::reactive::{focused_widget, has_focus, ChangeFlags, Listeners};
    pub use crate::renderer::{
        DrawCommand, FrameStatus, FrameTarget, GpuContext, ItemShader, PaintContext, RenderState,
        RenderableItem,
    };
    pub use crate::widgets::{
        Action, ActionList, Color, Event, EventResponse, Font, FontFamily, FontWeight,
        HorizontalAlignment, ListRow, ListRowEvent, MouseButton, Overlay, OverlayEvent,
        OverlayState, Padding, Rect, Theme, VerticalAlignment, Widget, WidgetId,
    };
}

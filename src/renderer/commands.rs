//! Draw command definitions handed to the host scene.

use crate::widgets::font::{Font, HorizontalAlignment, VerticalAlignment};
use crate::widgets::{Color, Rect};

/// Drop shadow behind a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow offset in logical pixels (x, y)
    pub offset: (f32, f32),
    /// Blur radius in logical pixels
    pub blur: f32,
    pub color: Color,
}

impl Shadow {
    pub fn new(offset: (f32, f32), blur: f32, color: Color) -> Self {
        Self {
            offset,
            blur,
            color,
        }
    }
}

/// A single draw operation in absolute logical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a rounded rectangle with an optional shadow.
    RoundedRect {
        rect: Rect,
        color: Color,
        /// Corner radius in logical pixels
        radius: f32,
        shadow: Option<Shadow>,
    },

    /// Draw text aligned inside `rect`.
    Text {
        text: String,
        rect: Rect,
        color: Color,
        font: Font,
        halign: HorizontalAlignment,
        valign: VerticalAlignment,
    },

    /// Restrict following commands to `rect` until the matching pop.
    PushClip { rect: Rect, radius: f32 },

    PopClip,
}

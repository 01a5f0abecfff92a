//! Derived on-screen rects of an overlay.

use crate::widgets::Rect;

/// Distance the shadow rect is pulled in from each container edge.
pub const SHADOW_INSET: f32 = 4.0;

/// Effective on-screen rect: the widget geometry clamped into its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Container {
    rect: Rect,
}

impl Container {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Recompute from `geometry`, clamped into `boundary` when there is one.
    /// Returns whether the rect changed.
    pub(crate) fn update(&mut self, geometry: Rect, boundary: Option<Rect>) -> bool {
        let rect = match boundary {
            Some(bounds) => geometry.clamped_to(&bounds),
            None => geometry,
        };
        if rect == self.rect {
            return false;
        }
        self.rect = rect;
        true
    }
}

/// Bounds the drop shadow is cast from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Shadow {
    rect: Rect,
}

impl Shadow {
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn follow(&mut self, container: &Container) {
        self.rect = container.rect().inset(SHADOW_INSET);
    }
}

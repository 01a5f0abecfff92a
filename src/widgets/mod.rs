pub mod action;
pub mod font;
pub mod list_row;
pub mod overlay;
pub mod theme;
pub mod widget;

/// Macro to implement common dirty flag methods for widgets that keep a
/// `dirty_flags: ChangeFlags` field.
macro_rules! impl_dirty_flags {
    () => {
        fn mark_dirty(&mut self, flags: crate::reactive::ChangeFlags) {
            self.dirty_flags |= flags;
        }
        fn needs_layout(&self) -> bool {
            self.dirty_flags
                .contains(crate::reactive::ChangeFlags::NEEDS_LAYOUT)
        }
        fn needs_paint(&self) -> bool {
            self.dirty_flags
                .contains(crate::reactive::ChangeFlags::NEEDS_PAINT)
        }
        fn clear_dirty(&mut self) {
            self.dirty_flags = crate::reactive::ChangeFlags::empty();
        }
    };
}
pub(crate) use impl_dirty_flags;

pub use action::{Action, ActionList};
pub use font::{Font, FontFamily, FontWeight, HorizontalAlignment, VerticalAlignment};
pub use list_row::{Attachment, ListRow, ListRowEvent, SubItemPool, TextSlot};
pub use overlay::{Container, HideReason, Overlay, OverlayEvent, OverlayState, Shadow};
pub use theme::Theme;
pub use widget::{
    Color, Event, EventResponse, Key, Modifiers, MouseButton, Padding, Rect, Widget, WidgetId,
};

pub mod focus;
pub mod notify;

use bitflags::bitflags;

pub use focus::{clear_focus, focused_widget, has_focus, release_focus, request_focus};
pub use notify::{change, Listeners};

bitflags! {
    /// Flags indicating what aspects of rendering need to be updated
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ChangeFlags: u8 {
        /// Widget needs layout recalculation (size/position may change)
        const NEEDS_LAYOUT   = 0b001;
        /// Widget needs repainting (visual appearance changed)
        const NEEDS_PAINT    = 0b010;
        /// Tile geometry must be regenerated (size changed)
        const NEEDS_GEOMETRY = 0b100;
    }
}

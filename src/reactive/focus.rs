//! Keyboard focus tracking.
//!
//! Only one widget can hold focus at a time. Focus changes repaint both the
//! widget losing focus and the one gaining it.

use std::cell::Cell;

use crate::jobs::{push_job, JobType};
use crate::widgets::WidgetId;

thread_local! {
    static FOCUSED_WIDGET: Cell<Option<WidgetId>> = const { Cell::new(None) };
}

/// Request keyboard focus for a widget.
pub fn request_focus(id: WidgetId) {
    let previous = FOCUSED_WIDGET.replace(Some(id));
    match previous {
        Some(old_id) if old_id == id => {}
        Some(old_id) => {
            push_job(old_id, JobType::Paint);
            push_job(id, JobType::Paint);
        }
        None => push_job(id, JobType::Paint),
    }
}

/// Release keyboard focus. Only releases if `id` currently has focus.
pub fn release_focus(id: WidgetId) {
    if FOCUSED_WIDGET.get() == Some(id) {
        FOCUSED_WIDGET.set(None);
        push_job(id, JobType::Paint);
    }
}

pub fn has_focus(id: WidgetId) -> bool {
    FOCUSED_WIDGET.get() == Some(id)
}

pub fn focused_widget() -> Option<WidgetId> {
    FOCUSED_WIDGET.get()
}

pub fn clear_focus() {
    if let Some(old_id) = FOCUSED_WIDGET.take() {
        push_job(old_id, JobType::Paint);
    }
}

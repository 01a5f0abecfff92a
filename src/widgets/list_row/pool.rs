//! Identity-stable storage for the text slots of a list row.
//!
//! Slots are addressed by index and never removed: a shorter text list only
//! takes the tail out of the visible layout. The pool is the sole owner of its
//! slots; a slot's `owner` id is used to route notifications and nothing else.

use crate::jobs::{push_job, JobType};
use crate::widgets::font::{Font, HorizontalAlignment, VerticalAlignment};
use crate::widgets::{Rect, WidgetId};

/// Per-slot layout participation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    /// Whether presses on the slot are reported
    pub interactive: bool,
    /// Main-axis extent; values ≤ 0 fall back to the measured text
    pub thickness: f32,
}

/// Attributes every slot shares with its row.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStyle {
    pub font: Font,
    pub halign: HorizontalAlignment,
    pub valign: VerticalAlignment,
    pub attachment: Attachment,
}

/// Called with the owner id and the new text whenever a slot's content changes.
pub type ContentObserver = Box<dyn FnMut(WidgetId, &str)>;

/// Default observer: the owner lays out again on the next frame.
pub fn relayout_owner() -> ContentObserver {
    Box::new(|owner, _text| push_job(owner, JobType::Layout))
}

pub struct TextSlot {
    owner: WidgetId,
    text: String,
    font: Font,
    halign: HorizontalAlignment,
    valign: VerticalAlignment,
    attachment: Attachment,
    /// Placement from the last layout pass, absolute coordinates
    rect: Rect,
    on_content_changed: ContentObserver,
}

impl TextSlot {
    pub fn new(owner: WidgetId, style: &SlotStyle, on_content_changed: ContentObserver) -> Self {
        Self {
            owner,
            text: String::new(),
            font: style.font.clone(),
            halign: style.halign,
            valign: style.valign,
            attachment: style.attachment,
            rect: Rect::default(),
            on_content_changed,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content; the observer fires only on an actual change.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            return false;
        }
        self.text.clear();
        self.text.push_str(text);
        (self.on_content_changed)(self.owner, &self.text);
        true
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: &Font) {
        self.font = font.clone();
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.halign
    }

    pub fn set_horizontal_alignment(&mut self, halign: HorizontalAlignment) {
        self.halign = halign;
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.valign
    }

    pub fn set_vertical_alignment(&mut self, valign: VerticalAlignment) {
        self.valign = valign;
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment
    }

    pub fn attachment_mut(&mut self) -> &mut Attachment {
        &mut self.attachment
    }

    pub fn owner(&self) -> WidgetId {
        self.owner
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

impl std::fmt::Debug for TextSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSlot")
            .field("owner", &self.owner)
            .field("text", &self.text)
            .field("attachment", &self.attachment)
            .field("rect", &self.rect)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct SubItemPool {
    slots: Vec<TextSlot>,
    /// Indices of slots placed in the visible layout, in order
    visible: Vec<usize>,
}

impl SubItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TextSlot> {
        self.slots.get_mut(index)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TextSlot> {
        self.slots.iter_mut()
    }

    /// Append slots built by `create` until the pool holds `len` of them.
    /// Never shrinks.
    pub fn grow_to<F>(&mut self, len: usize, mut create: F)
    where
        F: FnMut(usize) -> TextSlot,
    {
        if self.slots.len() >= len {
            return;
        }
        self.slots.reserve(len - self.slots.len());
        while self.slots.len() < len {
            let index = self.slots.len();
            self.slots.push(create(index));
        }
    }

    pub fn clear_layout(&mut self) {
        self.visible.clear();
    }

    /// Append slot `index` to the visible layout. Out-of-range or already
    /// placed indices are ignored.
    pub fn place(&mut self, index: usize) {
        if index < self.slots.len() && !self.visible.contains(&index) {
            self.visible.push(index);
        }
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_slots(&self) -> impl Iterator<Item = (usize, &TextSlot)> {
        self.visible.iter().map(move |&i| (i, &self.slots[i]))
    }

    /// Run `f` on each visible slot in layout order.
    pub fn for_each_visible_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(usize, &mut TextSlot),
    {
        for &index in &self.visible {
            f(index, &mut self.slots[index]);
        }
    }
}

//! A row of pooled text slots driven by a text list or an action list.
//!
//! Slots are created lazily and kept for the lifetime of the row. Every
//! structural change goes through [`ListRow::sync_pool`], which grows the pool
//! if needed and rebuilds the visible layout from the current texts.

mod pool;

pub use pool::{relayout_owner, Attachment, ContentObserver, SlotStyle, SubItemPool, TextSlot};

use crate::jobs::{push_job, JobType};
use crate::layout::{Axis, Constraints, Size};
use crate::reactive::{change, ChangeFlags, Listeners};
use crate::renderer::{
    measure_text, FillShader, FrameStatus, FrameTarget, PaintContext, RenderState, RenderableItem,
};
use crate::widgets::action::{Action, ActionList};
use crate::widgets::font::{Font, HorizontalAlignment, VerticalAlignment};
use crate::widgets::impl_dirty_flags;
use crate::widgets::theme::Theme;
use crate::widgets::widget::{Color, Event, EventResponse, Padding, Rect, Widget, WidgetId};

/// Change notifications emitted by a [`ListRow`].
#[derive(Debug, Clone, PartialEq)]
pub enum ListRowEvent {
    TextsChanged,
    ActionsChanged,
    FontChanged,
    VerticalAlignmentChanged,
    HorizontalAlignmentChanged,
    InteractiveChanged,
    TextHeightChanged,
    OrientationChanged,
    /// An interactive visible slot was pressed
    SlotActivated(usize),
}

pub struct ListRow {
    id: WidgetId,
    bounds: Rect,
    dirty_flags: ChangeFlags,
    texts: Vec<String>,
    font: Font,
    valign: VerticalAlignment,
    halign: HorizontalAlignment,
    interactive: bool,
    text_height: f32,
    orientation: Axis,
    padding: Padding,
    text_color: Color,
    background: FillShader,
    item: RenderableItem,
    pool: SubItemPool,
    actions: ActionList,
    listeners: Listeners<ListRowEvent>,
}

impl ListRow {
    pub fn new(theme: &Theme) -> Self {
        Self {
            id: WidgetId::next(),
            bounds: Rect::default(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            texts: Vec::new(),
            font: theme.font.clone(),
            valign: VerticalAlignment::Center,
            halign: HorizontalAlignment::Left,
            interactive: false,
            text_height: theme.text_height(),
            orientation: Axis::Vertical,
            padding: Padding::all(theme.padding),
            text_color: theme.text_color,
            background: FillShader::new(theme.row_background, theme.corner_radius),
            item: RenderableItem::new(),
            pool: SubItemPool::new(),
            actions: ActionList::new(),
            listeners: Listeners::new(),
        }
    }

    /// Register a callback for every change notification of this row.
    pub fn connect<F>(&mut self, callback: F)
    where
        F: FnMut(&ListRowEvent) + 'static,
    {
        self.listeners.connect(callback);
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn set_texts<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts = entries.into_iter().map(Into::into).collect();
        self.resync();
        self.listeners.emit(&ListRowEvent::TextsChanged);
    }

    pub fn actions(&self) -> &ActionList {
        &self.actions
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn action_at(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn push_action(&mut self, action: Action) {
        self.actions.push(action);
        self.resync();
        self.listeners.emit(&ListRowEvent::ActionsChanged);
    }

    pub fn clear_actions(&mut self) {
        if self.actions.clear() {
            self.resync();
            self.listeners.emit(&ListRowEvent::ActionsChanged);
        }
    }

    /// Grow the pool to cover `entries` and rebuild the visible layout.
    ///
    /// New slots take the row's current shared attributes. Slots past the end
    /// of `entries` stay allocated with their old content but are not placed.
    pub fn sync_pool(&mut self, entries: &[String]) {
        let owner = self.id;
        let style = self.slot_style();
        self.pool.grow_to(entries.len(), |_| {
            TextSlot::new(owner, &style, relayout_owner())
        });

        self.pool.clear_layout();
        for (index, text) in entries.iter().enumerate() {
            if let Some(slot) = self.pool.get_mut(index) {
                slot.set_text(text);
            }
            self.pool.place(index);
        }

        self.request_layout();
    }

    fn resync(&mut self) {
        let texts = std::mem::take(&mut self.texts);
        self.sync_pool(&texts);
        self.texts = texts;
    }

    fn slot_style(&self) -> SlotStyle {
        SlotStyle {
            font: self.font.clone(),
            halign: self.halign,
            valign: self.valign,
            attachment: Attachment {
                interactive: self.interactive,
                thickness: self.text_height,
            },
        }
    }

    fn request_layout(&mut self) {
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
        push_job(self.id, JobType::Layout);
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        if change(&mut self.font, font) {
            for slot in self.pool.iter_mut() {
                slot.set_font(&self.font);
            }
            self.request_layout();
            self.listeners.emit(&ListRowEvent::FontChanged);
        }
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.valign
    }

    pub fn set_vertical_alignment(&mut self, valign: VerticalAlignment) {
        if change(&mut self.valign, valign) {
            for slot in self.pool.iter_mut() {
                slot.set_vertical_alignment(valign);
            }
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
            self.listeners.emit(&ListRowEvent::VerticalAlignmentChanged);
        }
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.halign
    }

    pub fn set_horizontal_alignment(&mut self, halign: HorizontalAlignment) {
        if change(&mut self.halign, halign) {
            for slot in self.pool.iter_mut() {
                slot.set_horizontal_alignment(halign);
            }
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
            self.listeners.emit(&ListRowEvent::HorizontalAlignmentChanged);
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        if change(&mut self.interactive, interactive) {
            for slot in self.pool.iter_mut() {
                slot.attachment_mut().interactive = interactive;
            }
            self.listeners.emit(&ListRowEvent::InteractiveChanged);
        }
    }

    pub fn text_height(&self) -> f32 {
        self.text_height
    }

    pub fn set_text_height(&mut self, height: f32) {
        if change(&mut self.text_height, height) {
            for slot in self.pool.iter_mut() {
                slot.attachment_mut().thickness = height;
            }
            self.request_layout();
            self.listeners.emit(&ListRowEvent::TextHeightChanged);
        }
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Axis) {
        if change(&mut self.orientation, orientation) {
            self.request_layout();
            self.listeners.emit(&ListRowEvent::OrientationChanged);
        }
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Padding) {
        if change(&mut self.padding, padding) {
            self.request_layout();
        }
    }

    /// Replace the content of slot `index` in place. Indices past the pool
    /// are ignored.
    pub fn set_text(&mut self, index: usize, text: &str) {
        if let Some(slot) = self.pool.get_mut(index) {
            slot.set_text(text);
        }
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Slot by pool index, placed or not.
    pub fn slot(&self, index: usize) -> Option<&TextSlot> {
        self.pool.get(index)
    }

    /// Pool indices of the visible slots, in layout order.
    pub fn visible_slots(&self) -> &[usize] {
        self.pool.visible()
    }

    pub fn visible_texts(&self) -> Vec<&str> {
        self.pool.visible_slots().map(|(_, slot)| slot.text()).collect()
    }

    pub fn initialize_gl(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        self.item.initialize_gl(device, format, &self.background);
    }

    pub fn finalize_gl(&mut self) {
        self.item.finalize_gl();
    }

    /// Draw the background tile. Text goes through [`Widget::paint`].
    pub fn render(&mut self, frame: Option<&mut FrameTarget<'_>>) -> FrameStatus {
        let state = RenderState::at(self.bounds.x, self.bounds.y);
        self.item.render(frame, &self.background, &state)
    }

    /// Main-axis extent and natural cross extent of one slot.
    fn slot_extent(&self, slot: &TextSlot, measure_cross: bool) -> (f32, f32) {
        let thickness = slot.attachment().thickness;
        if thickness > 0.0 && !measure_cross {
            return (thickness, 0.0);
        }
        let measured = measure_text(slot.text(), slot.font(), None);
        let (main, cross) = match self.orientation {
            Axis::Vertical => (measured.height, measured.width),
            Axis::Horizontal => (measured.width, measured.height),
        };
        if thickness > 0.0 {
            (thickness, cross)
        } else {
            (main, cross)
        }
    }
}

impl Widget for ListRow {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let padding = self.padding;
        let (cross_max, lead_main, lead_cross) = match self.orientation {
            Axis::Vertical => (
                constraints.max_width - padding.horizontal(),
                padding.top,
                padding.left,
            ),
            Axis::Horizontal => (
                constraints.max_height - padding.vertical(),
                padding.left,
                padding.top,
            ),
        };
        let measure_cross = !cross_max.is_finite();

        let mut placements = Vec::with_capacity(self.pool.visible().len());
        let mut cursor = lead_main;
        let mut natural_cross = 0.0f32;
        for (index, slot) in self.pool.visible_slots() {
            let (main, cross) = self.slot_extent(slot, measure_cross);
            placements.push((index, cursor, main));
            cursor += main;
            natural_cross = natural_cross.max(cross);
        }

        let cross = if measure_cross {
            natural_cross
        } else {
            cross_max.max(0.0)
        };
        let main_total = cursor - lead_main;
        let content = match self.orientation {
            Axis::Vertical => Size::new(cross + padding.horizontal(), main_total + padding.vertical()),
            Axis::Horizontal => {
                Size::new(main_total + padding.horizontal(), cross + padding.vertical())
            }
        };
        let size = constraints.constrain(content);
        self.bounds.width = size.width;
        self.bounds.height = size.height;

        let (x0, y0) = (self.bounds.x, self.bounds.y);
        let orientation = self.orientation;
        for (index, offset, main) in placements {
            if let Some(slot) = self.pool.get_mut(index) {
                let rect = match orientation {
                    Axis::Vertical => Rect::new(x0 + lead_cross, y0 + offset, cross, main),
                    Axis::Horizontal => Rect::new(x0 + offset, y0 + lead_cross, main, cross),
                };
                slot.set_rect(rect);
            }
        }

        self.item.set_size(size);
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        ctx.push_clip(self.bounds, self.background.radius);
        for (_, slot) in self.pool.visible_slots() {
            ctx.draw_text(
                slot.text(),
                slot.rect(),
                self.text_color,
                slot.font(),
                slot.horizontal_alignment(),
                slot.vertical_alignment(),
            );
        }
        ctx.pop_clip();
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        let Event::MouseDown { x, y, .. } = *event else {
            return EventResponse::Ignored;
        };
        let hit = self
            .pool
            .visible_slots()
            .find(|(_, slot)| slot.attachment().interactive && slot.rect().contains(x, y))
            .map(|(index, _)| index);
        match hit {
            Some(index) => {
                self.listeners.emit(&ListRowEvent::SlotActivated(index));
                EventResponse::Handled
            }
            None => EventResponse::Ignored,
        }
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        let (dx, dy) = (x - self.bounds.x, y - self.bounds.y);
        self.bounds.x = x;
        self.bounds.y = y;
        self.pool.for_each_visible_mut(|_, slot| {
            let moved = slot.rect().offset(dx, dy);
            slot.set_rect(moved);
        });
        self.item.mark_uniforms_dirty();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.id
    }

    impl_dirty_flags!();
}

//! Floating overlay with an animated show/hide lifecycle.
//!
//! The overlay's geometry is clamped into a boundary (explicit, else the
//! parent rect) to give its [`Container`]; the [`Shadow`] follows the container.
//! While `Hidden` it ignores input and holds no focus.

mod container;
mod shader;
mod state;

pub use container::{Container, Shadow, SHADOW_INSET};
pub use shader::{OverlayShader, OVERLAY_FRAGMENT_SHADER};
pub use state::{Finished, HideReason, Lifecycle, OverlayState};

use std::time::Instant;

use crate::jobs::{push_job, JobType};
use crate::layout::{Constraints, Size};
use crate::reactive::{change, has_focus, release_focus, request_focus, ChangeFlags, Listeners};
use crate::renderer::{self, FrameStatus, FrameTarget, PaintContext, RenderState, RenderableItem};
use crate::widgets::impl_dirty_flags;
use crate::widgets::theme::Theme;
use crate::widgets::widget::{Color, Event, EventResponse, Rect, Widget, WidgetId};

/// Change notifications emitted by an [`Overlay`].
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    ShadeChanged(f32),
    BoundaryChanged(Option<Rect>),
    AutohideChanged(bool),
    /// A hide that was not requested explicitly has completed
    Canceled,
    ContainerChanged(Rect),
    StateChanged(OverlayState),
}

pub struct Overlay {
    id: WidgetId,
    /// Widget geometry in parent coordinates
    bounds: Rect,
    dirty_flags: ChangeFlags,
    lifecycle: Lifecycle,
    boundary: Option<Rect>,
    parent_rect: Option<Rect>,
    autohide: bool,
    container: Container,
    shadow: Shadow,
    shader: OverlayShader,
    drop_shadow: renderer::Shadow,
    item: RenderableItem,
    content: Option<Box<dyn Widget>>,
    listeners: Listeners<OverlayEvent>,
    /// Time source for transitions started without an explicit `now`
    clock: Box<dyn Fn() -> Instant>,
}

impl Overlay {
    pub fn new(theme: &Theme) -> Self {
        Self {
            id: WidgetId::next(),
            bounds: Rect::default(),
            dirty_flags: ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT,
            lifecycle: Lifecycle::new(theme.transition.clone()),
            boundary: None,
            parent_rect: None,
            autohide: false,
            container: Container::default(),
            shadow: Shadow::default(),
            shader: OverlayShader {
                fill: theme.overlay_background,
                dim: theme.dim_color,
                radius: theme.corner_radius,
                shade: 0.0,
            },
            drop_shadow: renderer::Shadow::new(
                theme.shadow_offset,
                theme.shadow_blur,
                theme.shadow_color,
            ),
            item: RenderableItem::new(),
            content: None,
            listeners: Listeners::new(),
            clock: Box::new(Instant::now),
        }
    }

    /// Replace the time source used by `show`, `hide`, autohide and
    /// boundary hides.
    pub fn set_clock<F>(&mut self, clock: F)
    where
        F: Fn() -> Instant + 'static,
    {
        self.clock = Box::new(clock);
    }

    fn now(&self) -> Instant {
        (self.clock)()
    }

    pub fn connect<F>(&mut self, callback: F)
    where
        F: FnMut(&OverlayEvent) + 'static,
    {
        self.listeners.connect(callback);
    }

    pub fn set_content(&mut self, content: impl Widget + 'static) {
        self.content = Some(Box::new(content));
        self.dirty_flags |= ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT;
    }

    pub fn content(&self) -> Option<&dyn Widget> {
        self.content.as_deref()
    }

    pub fn state(&self) -> OverlayState {
        self.lifecycle.state()
    }

    /// Transition progress, 0 when hidden and 1 when visible.
    pub fn progress(&self) -> f32 {
        self.lifecycle.progress()
    }

    pub fn is_visible(&self) -> bool {
        self.state() != OverlayState::Hidden
    }

    pub fn show(&mut self) {
        self.show_at(self.now());
    }

    pub fn show_at(&mut self, now: Instant) {
        if let Some(state) = self.lifecycle.show(now) {
            self.state_changed(state);
            self.hide_if_collapsed(now);
        }
    }

    pub fn hide(&mut self) {
        self.hide_at(self.now());
    }

    pub fn hide_at(&mut self, now: Instant) {
        self.hide_with(HideReason::Explicit, now);
    }

    fn hide_with(&mut self, reason: HideReason, now: Instant) {
        if let Some(state) = self.lifecycle.hide(reason, now) {
            log::debug!("Overlay {:?} hiding ({:?})", self.id, reason);
            self.state_changed(state);
        }
    }

    /// Complete the in-flight transition at its endpoint.
    pub fn handle_animation_finished(&mut self) {
        let Some(finished) = self.lifecycle.finish() else {
            return;
        };
        self.state_changed(finished.state);
        if finished.canceled {
            self.listeners.emit(&OverlayEvent::Canceled);
        }
    }

    /// A shown overlay whose container was clamped to nothing hides itself.
    fn hide_if_collapsed(&mut self, now: Instant) {
        if self.state().is_shown()
            && self.effective_boundary().is_some()
            && self.container.rect().size().is_empty()
        {
            self.hide_with(HideReason::Boundary, now);
        }
    }

    fn state_changed(&mut self, state: OverlayState) {
        self.item.mark_uniforms_dirty();
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        self.update_focus_state();
        if state.is_transitioning() {
            push_job(self.id, JobType::Animation);
        }
        self.listeners.emit(&OverlayEvent::StateChanged(state));
    }

    /// Hold focus exactly while Showing or Visible.
    pub fn update_focus_state(&mut self) {
        let focused = has_focus(self.id);
        if self.state().is_shown() {
            if !focused {
                request_focus(self.id);
            }
        } else if focused {
            release_focus(self.id);
        }
    }

    pub fn shade(&self) -> f32 {
        self.shader.shade
    }

    pub fn set_shade(&mut self, shade: f32) {
        let shade = shade.clamp(0.0, 1.0);
        if change(&mut self.shader.shade, shade) {
            self.item.mark_uniforms_dirty();
            self.listeners.emit(&OverlayEvent::ShadeChanged(shade));
        }
    }

    pub fn boundary(&self) -> Option<Rect> {
        self.boundary
    }

    pub fn set_boundary(&mut self, boundary: Option<Rect>) {
        if change(&mut self.boundary, boundary) {
            self.listeners.emit(&OverlayEvent::BoundaryChanged(boundary));
            self.update_container_rect();
        }
    }

    pub fn autohide(&self) -> bool {
        self.autohide
    }

    pub fn set_autohide(&mut self, autohide: bool) {
        if change(&mut self.autohide, autohide) {
            self.listeners.emit(&OverlayEvent::AutohideChanged(autohide));
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    /// The rect the container is clamped into, if any.
    pub fn effective_boundary(&self) -> Option<Rect> {
        self.boundary.or(self.parent_rect)
    }

    pub fn update_container_rect(&mut self) {
        let boundary = self.effective_boundary();
        if !self.container.update(self.bounds, boundary) {
            return;
        }
        self.shadow.follow(&self.container);
        let rect = self.container.rect();
        self.item.set_size(rect.size());
        self.item.mark_uniforms_dirty();
        if let Some(content) = &mut self.content {
            content.set_origin(rect.x, rect.y);
        }
        self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        self.listeners.emit(&OverlayEvent::ContainerChanged(rect));
        self.hide_if_collapsed(self.now());
    }

    /// The overlay moved to a new parent; `parent` is its rect in the
    /// overlay's parent coordinates.
    pub fn update_parent_item(&mut self, parent: Option<Rect>) {
        self.parent_rect = parent;
        self.update_container_rect();
    }

    pub fn geometry_changed(&mut self, new: Rect, old: Rect) {
        if new == old && new == self.bounds {
            return;
        }
        self.bounds = new;
        self.update_container_rect();
    }

    pub fn initialize_gl(&mut self, device: &wgpu::Device, format: wgpu::TextureFormat) {
        self.item.initialize_gl(device, format, &self.shader);
    }

    pub fn finalize_gl(&mut self) {
        self.item.finalize_gl();
    }

    /// Draw the container tile, dimmed by the shade. Nothing is drawn while
    /// Hidden. [`Widget::paint`] records only the shadow and the content.
    pub fn render(&mut self, frame: Option<&mut FrameTarget<'_>>) -> FrameStatus {
        if self.state() == OverlayState::Hidden && !self.item.prepare_to_render() {
            return FrameStatus::Clean;
        }
        let rect = self.container.rect();
        let state = RenderState {
            origin: (rect.x, rect.y),
            opacity: self.progress(),
        };
        self.item.render(frame, &self.shader, &state)
    }

    fn forward(&mut self, event: &Event) -> EventResponse {
        match &mut self.content {
            Some(content) => content.event(event),
            None => EventResponse::Ignored,
        }
    }
}

impl Widget for Overlay {
    fn layout(&mut self, constraints: Constraints) -> Size {
        let size = match &mut self.content {
            Some(content) => content.layout(constraints),
            None => constraints.constrain(self.bounds.size()),
        };
        let old = self.bounds;
        let new = Rect::new(old.x, old.y, size.width, size.height);
        self.geometry_changed(new, old);
        if let Some(content) = &mut self.content {
            let rect = self.container.rect();
            content.set_origin(rect.x, rect.y);
        }
        self.dirty_flags.remove(ChangeFlags::NEEDS_LAYOUT);
        size
    }

    fn paint(&self, ctx: &mut PaintContext) {
        if self.state() == OverlayState::Hidden {
            return;
        }
        let progress = self.progress();
        let mut drop_shadow = self.drop_shadow;
        drop_shadow.color = drop_shadow.color.with_alpha(drop_shadow.color.a * progress);
        ctx.draw_rounded_rect_with_shadow(
            self.shadow.rect(),
            Color::TRANSPARENT,
            self.shader.radius,
            drop_shadow,
        );
        if let Some(content) = &self.content {
            ctx.push_clip(self.container.rect(), self.shader.radius);
            content.paint(ctx);
            ctx.pop_clip();
        }
    }

    fn event(&mut self, event: &Event) -> EventResponse {
        if self.state() == OverlayState::Hidden {
            return EventResponse::Ignored;
        }
        match event {
            Event::FocusOut => {
                if self.autohide {
                    self.hide_with(HideReason::Autohide, self.now());
                }
                EventResponse::Ignored
            }
            Event::FocusIn => EventResponse::Ignored,
            Event::MouseDown { x, y, .. } if !self.container.rect().contains(*x, *y) => {
                if self.autohide {
                    self.hide_with(HideReason::Autohide, self.now());
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            _ => self.forward(event),
        }
    }

    fn advance_animations(&mut self, now: Instant) -> bool {
        let (changed, complete) = self.lifecycle.advance(now);
        if changed {
            self.item.mark_uniforms_dirty();
            self.dirty_flags |= ChangeFlags::NEEDS_PAINT;
        }
        if complete {
            self.handle_animation_finished();
        }
        let content_animating = match &mut self.content {
            Some(content) => content.advance_animations(now),
            None => false,
        };
        self.lifecycle.is_animating() || content_animating
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        let old = self.bounds;
        self.geometry_changed(Rect::new(x, y, old.width, old.height), old);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.id
    }

    impl_dirty_flags!();
}

impl Drop for Overlay {
    fn drop(&mut self) {
        if has_focus(self.id) {
            release_focus(self.id);
        }
    }
}

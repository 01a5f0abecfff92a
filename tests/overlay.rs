use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tessella::prelude::*;
use tessella::widgets::overlay::SHADOW_INSET;
use tessella::widgets::{Key, Modifiers};

fn overlay() -> Overlay {
    let theme = Theme::default().transition(Transition::new(100.0, TimingFunction::Linear));
    let mut overlay = Overlay::new(&theme);
    overlay.geometry_changed(Rect::new(20.0, 20.0, 60.0, 40.0), Rect::default());
    overlay
}

fn recorded(overlay: &mut Overlay) -> Rc<RefCell<Vec<OverlayEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    overlay.connect(move |e| sink.borrow_mut().push(e.clone()));
    events
}

fn run_to_rest(overlay: &mut Overlay, from: Instant) {
    let mut now = from;
    while overlay.advance_animations(now) {
        now += Duration::from_millis(16);
    }
}

/// Deterministic rect stream covering in-bounds, straddling and oversized cases.
fn rects(seed: u32, count: usize) -> Vec<Rect> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        ((state >> 8) % 4000) as f32 / 10.0 - 100.0
    };
    (0..count)
        .map(|_| {
            let x = next();
            let y = next();
            Rect::new(x, y, next().abs(), next().abs())
        })
        .collect()
}

/// Content widget that logs the kind of every event it receives.
struct Recorder {
    id: WidgetId,
    bounds: Rect,
    seen: Rc<RefCell<Vec<&'static str>>>,
}

impl Recorder {
    fn new() -> (Self, Rc<RefCell<Vec<&'static str>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let recorder = Self {
            id: WidgetId::next(),
            bounds: Rect::new(0.0, 0.0, 40.0, 30.0),
            seen: seen.clone(),
        };
        (recorder, seen)
    }
}

impl Widget for Recorder {
    fn layout(&mut self, constraints: Constraints) -> Size {
        constraints.constrain(self.bounds.size())
    }

    fn paint(&self, _ctx: &mut PaintContext) {}

    fn event(&mut self, event: &Event) -> EventResponse {
        let kind = match event {
            Event::MouseMove { .. } => "move",
            Event::MouseDown { .. } => "down",
            Event::MouseUp { .. } => "up",
            Event::KeyDown { .. } => "key_down",
            Event::KeyUp { .. } => "key_up",
            Event::FocusIn => "focus_in",
            Event::FocusOut => "focus_out",
        };
        self.seen.borrow_mut().push(kind);
        EventResponse::Handled
    }

    fn set_origin(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn id(&self) -> WidgetId {
        self.id
    }

    fn mark_dirty(&mut self, _flags: ChangeFlags) {}

    fn needs_layout(&self) -> bool {
        false
    }

    fn needs_paint(&self) -> bool {
        false
    }

    fn clear_dirty(&mut self) {}
}

fn key_and_release_events(container: Rect) -> Vec<Event> {
    vec![
        Event::KeyDown {
            key: Key::Enter,
            modifiers: Modifiers::default(),
        },
        Event::KeyUp {
            key: Key::Enter,
            modifiers: Modifiers::default(),
        },
        Event::MouseUp {
            x: container.x + 5.0,
            y: container.y + 5.0,
            button: MouseButton::Left,
        },
    ]
}

#[test]
fn test_show_then_hide_never_reports_visible() {
    let start = Instant::now();
    let mut overlay = overlay();
    let events = recorded(&mut overlay);

    overlay.show_at(start);
    overlay.advance_animations(start + Duration::from_millis(40));
    overlay.hide_at(start + Duration::from_millis(40));
    run_to_rest(&mut overlay, start + Duration::from_millis(40));

    assert_eq!(overlay.state(), OverlayState::Hidden);
    assert_eq!(overlay.progress(), 0.0);
    let states: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            OverlayEvent::StateChanged(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![
            OverlayState::Showing,
            OverlayState::Hiding,
            OverlayState::Hidden
        ]
    );
}

#[test]
fn test_show_while_hiding_reverses() {
    let start = Instant::now();
    let mut overlay = overlay();
    overlay.show_at(start);
    run_to_rest(&mut overlay, start);
    assert_eq!(overlay.state(), OverlayState::Visible);

    let t = start + Duration::from_secs(1);
    overlay.hide_at(t);
    overlay.advance_animations(t + Duration::from_millis(30));
    let mid = overlay.progress();
    assert!(mid < 1.0 && mid > 0.0);

    overlay.show_at(t + Duration::from_millis(30));
    assert_eq!(overlay.state(), OverlayState::Showing);
    overlay.show_at(t + Duration::from_millis(30));
    run_to_rest(&mut overlay, t + Duration::from_millis(30));
    assert_eq!(overlay.state(), OverlayState::Visible);
    assert_eq!(overlay.progress(), 1.0);
}

#[test]
fn test_container_always_inside_boundary() {
    let mut overlay = overlay();
    for (boundary, geometry) in rects(7, 2000).into_iter().zip(rects(99, 2000)) {
        overlay.set_boundary(Some(boundary));
        let old = overlay.bounds();
        overlay.geometry_changed(geometry, old);
        let container = overlay.container().rect();
        assert!(
            boundary.contains_rect(&container),
            "{:?} escapes {:?}",
            container,
            boundary
        );
        assert_eq!(overlay.shadow().rect(), container.inset(SHADOW_INSET));
    }
}

#[test]
fn test_canceled_only_after_autohide() {
    let start = Instant::now();
    let mut overlay = overlay();
    let events = recorded(&mut overlay);

    overlay.show_at(start);
    run_to_rest(&mut overlay, start);
    overlay.hide_at(start + Duration::from_secs(1));
    run_to_rest(&mut overlay, start + Duration::from_secs(1));
    assert!(!events.borrow().contains(&OverlayEvent::Canceled));

    overlay.set_autohide(true);
    overlay.show();
    overlay.handle_animation_finished();
    assert_eq!(overlay.event(&Event::FocusOut), EventResponse::Ignored);
    assert_eq!(overlay.state(), OverlayState::Hiding);
    overlay.handle_animation_finished();
    assert_eq!(overlay.state(), OverlayState::Hidden);
    assert_eq!(
        events
            .borrow()
            .iter()
            .filter(|e| **e == OverlayEvent::Canceled)
            .count(),
        1
    );
}

#[test]
fn test_outside_press_with_autohide_hides() {
    let mut overlay = overlay();
    overlay.show();
    overlay.handle_animation_finished();

    let outside = Event::MouseDown {
        x: 500.0,
        y: 500.0,
        button: MouseButton::Left,
    };
    assert_eq!(overlay.event(&outside), EventResponse::Ignored);
    assert_eq!(overlay.state(), OverlayState::Visible);

    overlay.set_autohide(true);
    assert_eq!(overlay.event(&outside), EventResponse::Handled);
    assert_eq!(overlay.state(), OverlayState::Hiding);
}

#[test]
fn test_input_ignored_while_hidden() {
    let mut overlay = overlay();
    let mut content = ListRow::new(&Theme::default());
    content.set_interactive(true);
    content.set_texts(["Copy"]);
    overlay.set_content(content);
    overlay.layout(Constraints::loose(Size::new(200.0, 200.0)));
    overlay.set_autohide(true);

    let container = overlay.container().rect();
    let press = Event::MouseDown {
        x: container.x + 10.0,
        y: container.y + 10.0,
        button: MouseButton::Left,
    };
    assert_eq!(overlay.event(&press), EventResponse::Ignored);
    assert_eq!(overlay.event(&Event::FocusOut), EventResponse::Ignored);
    assert_eq!(overlay.state(), OverlayState::Hidden);

    overlay.show();
    assert_eq!(overlay.event(&press), EventResponse::Handled);
}

#[test]
fn test_keys_and_release_reach_content_only_while_shown() {
    let start = Instant::now();
    let mut overlay = overlay();
    let (content, seen) = Recorder::new();
    overlay.set_content(content);
    let events = key_and_release_events(overlay.container().rect());

    for event in &events {
        assert_eq!(overlay.event(event), EventResponse::Ignored);
    }
    assert!(seen.borrow().is_empty());

    overlay.show_at(start);
    assert_eq!(overlay.state(), OverlayState::Showing);
    for event in &events {
        assert_eq!(overlay.event(event), EventResponse::Handled);
    }
    assert_eq!(*seen.borrow(), vec!["key_down", "key_up", "up"]);

    run_to_rest(&mut overlay, start);
    assert_eq!(overlay.state(), OverlayState::Visible);
    for event in &events {
        assert_eq!(overlay.event(event), EventResponse::Handled);
    }
    assert_eq!(seen.borrow().len(), 6);

    overlay.hide_at(start + Duration::from_secs(1));
    run_to_rest(&mut overlay, start + Duration::from_secs(1));
    assert_eq!(overlay.state(), OverlayState::Hidden);
    seen.borrow_mut().clear();
    for event in &events {
        assert_eq!(overlay.event(event), EventResponse::Ignored);
    }
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_show_into_empty_boundary_cancels() {
    let start = Instant::now();
    let mut overlay = Overlay::new(
        &Theme::default().transition(Transition::new(100.0, TimingFunction::Linear)),
    );
    overlay.geometry_changed(Rect::new(10.0, 10.0, 50.0, 40.0), Rect::default());
    overlay.set_boundary(Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    let events = recorded(&mut overlay);

    overlay.show_at(start);
    run_to_rest(&mut overlay, start);

    assert_eq!(overlay.state(), OverlayState::Hidden);
    let events = events.borrow();
    assert!(!events.contains(&OverlayEvent::StateChanged(OverlayState::Visible)));
    assert_eq!(events.last(), Some(&OverlayEvent::Canceled));
}

#[test]
fn test_focus_held_only_while_shown() {
    let start = Instant::now();
    let mut overlay = overlay();
    assert!(!has_focus(overlay.id()));

    overlay.show_at(start);
    assert!(has_focus(overlay.id()));
    run_to_rest(&mut overlay, start);
    assert!(has_focus(overlay.id()));

    overlay.hide_at(start + Duration::from_secs(1));
    assert!(!has_focus(overlay.id()));
    run_to_rest(&mut overlay, start + Duration::from_secs(1));
    assert!(!has_focus(overlay.id()));
    assert_eq!(focused_widget(), None);
}

#[test]
fn test_boundary_and_autohide_notify_once() {
    let mut overlay = overlay();
    let events = recorded(&mut overlay);
    let boundary = Some(Rect::new(0.0, 0.0, 50.0, 50.0));

    overlay.set_boundary(boundary);
    overlay.set_boundary(boundary);
    overlay.set_autohide(true);
    overlay.set_autohide(true);

    assert_eq!(
        *events.borrow(),
        vec![
            OverlayEvent::BoundaryChanged(boundary),
            OverlayEvent::ContainerChanged(Rect::new(0.0, 10.0, 50.0, 40.0)),
            OverlayEvent::AutohideChanged(true),
        ]
    );
}

#[test]
fn test_render_without_frame_keeps_overlay_dirty() {
    let mut overlay = overlay();
    overlay.show();
    assert_eq!(overlay.render(None), FrameStatus::Skipped);
    assert_eq!(overlay.render(None), FrameStatus::Skipped);
}

#[test]
fn test_gpu_attach_detach_pairs() {
    let Ok(gpu) = GpuContext::new() else {
        return;
    };
    let format = wgpu::TextureFormat::Rgba8Unorm;
    let target = gpu.create_offscreen(128, 128, format);

    let mut overlay = overlay();
    overlay.set_shade(0.5);
    overlay.initialize_gl(&gpu.device, format);
    overlay.initialize_gl(&gpu.device, format);
    overlay.show();
    overlay.handle_animation_finished();

    let mut status = FrameStatus::Clean;
    gpu.render_to(&target.view, Size::new(128.0, 128.0), 1.0, |frame| {
        status = overlay.render(Some(frame));
    });
    assert_eq!(status, FrameStatus::Rendered);

    overlay.finalize_gl();
    overlay.finalize_gl();
}

//! Renders a list row under an overlay into an offscreen texture and logs
//! what each widget produced.

use std::time::{Duration, Instant};

use tessella::prelude::*;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let theme = Theme::default();

    let mut row = ListRow::new(&theme);
    row.connect(|event| log::info!("row: {:?}", event));
    row.set_interactive(true);
    row.push_action(Action::new("Open"));
    row.set_texts(["Open", "Rename", "Delete"]);
    row.set_origin(16.0, 16.0);
    row.layout(Constraints::loose(Size::new(200.0, 160.0)));

    let mut menu = ListRow::new(&theme);
    menu.set_texts(["Copy", "Paste"]);

    let mut overlay = Overlay::new(&theme);
    overlay.connect(|event| log::info!("overlay: {:?}", event));
    overlay.set_content(menu);
    overlay.set_autohide(true);
    overlay.set_shade(0.3);
    overlay.update_parent_item(Some(Rect::new(0.0, 0.0, WIDTH as f32, HEIGHT as f32)));
    overlay.set_origin(240.0, 120.0);
    overlay.layout(Constraints::loose(Size::new(160.0, 120.0)));

    let start = Instant::now();
    overlay.show_at(start);
    let mut frame_time = start;
    while overlay.advance_animations(frame_time) {
        frame_time += Duration::from_millis(16);
    }
    log::info!(
        "overlay {:?} at {:?}, shadow {:?}",
        overlay.state(),
        overlay.container().rect(),
        overlay.shadow().rect()
    );

    let mut ctx = PaintContext::new();
    row.paint(&mut ctx);
    overlay.paint(&mut ctx);
    log::info!("recorded {} draw commands", ctx.commands().len());
    for job in drain_pending_jobs() {
        log::debug!("pending {:?}", job);
    }

    let gpu = match GpuContext::new() {
        Ok(gpu) => gpu,
        Err(err) => {
            log::error!("GPU unavailable, skipping render: {}", err);
            return;
        }
    };

    let format = wgpu::TextureFormat::Rgba8Unorm;
    let target = gpu.create_offscreen(WIDTH, HEIGHT, format);
    row.initialize_gl(&gpu.device, format);
    overlay.initialize_gl(&gpu.device, format);

    let viewport = Size::new(WIDTH as f32, HEIGHT as f32);
    gpu.render_to(&target.view, viewport, 1.0, |frame| {
        log::info!("row frame: {:?}", row.render(Some(&mut *frame)));
        log::info!("overlay frame: {:?}", overlay.render(Some(&mut *frame)));
    });

    row.finalize_gl();
    overlay.finalize_gl();
}

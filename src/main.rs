use anyhow::anyhow;
use bongo_overlay::config::OverlayConfig;
use bongo_overlay::gui::OverlayApp;
use bongo_overlay::logging;
use bongo_overlay::overlay::sprites::SpriteSet;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    logging::init(cfg!(debug_assertions), None);

    let config = OverlayConfig::default();
    let sprites = SpriteSet::load(&config).map_err(|err| {
        tracing::error!("cannot start overlay: {err:#}");
        err
    })?;
    tracing::info!(
        idle = ?sprites.idle_size(),
        hit = ?sprites.hit_size(),
        "sprites loaded"
    );

    let (width, height) = config.window_size;
    let (x, y) = config.window_pos;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_position([x as f32, y as f32])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_taskbar(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "Bongo Cat",
        native_options,
        Box::new(move |cc| Box::new(OverlayApp::new(&cc.egui_ctx, config, sprites))),
    )
    .map_err(|err| anyhow!("overlay window failed: {err}"))
}

use crate::config::OverlayConfig;
use crate::overlay::clock::FrameClock;
use crate::overlay::keyboard::{KeyCode, KeyEvent, KeyModifiers, ModifierTracker};
use crate::overlay::layout::generate_keys;
use crate::overlay::model::{Color, KeyRect};
use crate::overlay::render::{
    paint_frame, plan_frame, FrameBackend, KeyCap, SpriteKind, SpritePlacement,
};
use crate::overlay::sprites::SpriteSet;
use crate::overlay::state::{OverlayState, PointerButton};
use eframe::egui;
use image::RgbaImage;

/// The overlay window: owns the UI state and the uploaded sprite textures.
pub struct OverlayApp {
    config: OverlayConfig,
    state: OverlayState,
    clock: FrameClock,
    modifiers: ModifierTracker,
    /// Window origin in screen points. While dragging this is the last
    /// position we asked for, since the reported one lags behind.
    window_pos: (i32, i32),
    idle: SpriteTexture,
    hit: SpriteTexture,
}

struct SpriteTexture {
    handle: egui::TextureHandle,
    size: (u32, u32),
}

impl SpriteTexture {
    fn upload(ctx: &egui::Context, name: &str, image: &RgbaImage) -> Self {
        let size = [image.width() as usize, image.height() as usize];
        let handle = ctx.load_texture(
            name,
            egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()),
            egui::TextureOptions::LINEAR,
        );
        Self {
            handle,
            size: image.dimensions(),
        }
    }
}

impl OverlayApp {
    pub fn new(ctx: &egui::Context, config: OverlayConfig, sprites: SpriteSet) -> Self {
        let state = OverlayState::new(generate_keys(&config.layout), config.hit_duration_ms);
        tracing::debug!(keys = state.keys().len(), "keyboard layout generated");
        Self {
            window_pos: config.window_pos,
            idle: SpriteTexture::upload(ctx, "bongo_idle", &sprites.idle),
            hit: SpriteTexture::upload(ctx, "bongo_hit", &sprites.hit),
            clock: FrameClock::new(),
            modifiers: ModifierTracker::default(),
            state,
            config,
        }
    }

    /// Applies this frame's input to the overlay state.
    ///
    /// Pointer positions are local to the window as it was when the frame
    /// began; a requested move only takes effect after the frame ends, so the
    /// origin stays fixed for the whole batch.
    pub fn handle_input(&mut self, ctx: &egui::Context) {
        let (events, modifiers, outer_min) = ctx.input(|i| {
            (
                i.events.clone(),
                i.modifiers,
                i.viewport().outer_rect.map(|rect| rect.min),
            )
        });

        if !self.state.drag().is_dragging() {
            if let Some(min) = outer_min {
                self.window_pos = (min.x.round() as i32, min.y.round() as i32);
            }
        }
        let frame_origin = self.window_pos;
        let mut move_to = None;

        for event in self.modifiers.update(key_modifiers(modifiers)) {
            self.state.handle_key_event(event);
        }

        for event in events {
            match event {
                egui::Event::Key { key, pressed, .. } => {
                    let key = key_code(key);
                    self.state.handle_key_event(if pressed {
                        KeyEvent::press(key)
                    } else {
                        KeyEvent::release(key)
                    });
                }
                // The clipboard shortcuts arrive instead of their key press;
                // the release still comes through as a key event.
                egui::Event::Copy => self.state.key_press(KeyCode::Char('C')),
                egui::Event::Cut => self.state.key_press(KeyCode::Char('X')),
                egui::Event::Paste(_) => self.state.key_press(KeyCode::Char('V')),
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let button = match button {
                        egui::PointerButton::Primary => PointerButton::Left,
                        _ => PointerButton::Other,
                    };
                    if pressed {
                        let global = to_global(frame_origin, pos);
                        self.state.pointer_down(button, global, frame_origin);
                    } else {
                        self.state.pointer_up(button);
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    let global = to_global(frame_origin, pos);
                    if let Some(target) = self.state.pointer_moved(global) {
                        move_to = Some(target);
                    }
                }
                _ => {}
            }
        }

        if let Some((x, y)) = move_to {
            self.window_pos = (x, y);
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                x as f32, y as f32,
            )));
        }
    }

    pub fn window_pos(&self) -> (i32, i32) {
        self.window_pos
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }
}

fn to_global(origin: (i32, i32), local: egui::Pos2) -> (i32, i32) {
    (
        origin.0 + local.x.round() as i32,
        origin.1 + local.y.round() as i32,
    )
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        ctx.request_repaint_after(self.config.frame_interval());

        // Minimised or not yet mapped: skip this frame, the next tick charges
        // the elapsed time.
        if ctx.screen_rect().area() <= 0.0 {
            return;
        }

        let elapsed = self.clock.tick();
        let plan = plan_frame(
            &mut self.state,
            elapsed,
            &self.config,
            self.idle.size,
            self.hit.size,
        );

        let mut backend = EguiBackend {
            painter: ctx.layer_painter(egui::LayerId::background()),
            idle: &self.idle.handle,
            hit: &self.hit.handle,
        };
        paint_frame(&plan, &self.config, &mut backend);
    }
}

struct EguiBackend<'a> {
    painter: egui::Painter,
    idle: &'a egui::TextureHandle,
    hit: &'a egui::TextureHandle,
}

impl FrameBackend for EguiBackend<'_> {
    fn clear(&mut self) {
        // eframe clears the surface to `clear_color` before every frame.
    }

    fn draw_key(&mut self, key: &KeyCap, config: &OverlayConfig) {
        let palette = &config.palette;
        let rect = to_egui_rect(key.rect);
        self.painter.rect(
            rect,
            palette.corner_radius,
            to_color32(key.fill),
            egui::Stroke::new(palette.border_width, to_color32(palette.border)),
        );
        self.painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            &key.label,
            egui::FontId::proportional(palette.label_size),
            to_color32(palette.label),
        );
    }

    fn draw_sprite(&mut self, sprite: &SpritePlacement) {
        let texture = match sprite.kind {
            SpriteKind::Idle => self.idle,
            SpriteKind::Hit => self.hit,
        };
        let rect = egui::Rect::from_min_size(
            egui::pos2(sprite.origin.0 as f32, sprite.origin.1 as f32),
            egui::vec2(sprite.size.0 as f32, sprite.size.1 as f32),
        );
        self.painter.image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
}

fn to_egui_rect(rect: KeyRect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn key_modifiers(modifiers: egui::Modifiers) -> KeyModifiers {
    KeyModifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

/// Maps the toolkit's logical key to the overlay's vocabulary. Keys the
/// layout has no cap for become `KeyCode::Other`.
pub fn key_code(key: egui::Key) -> KeyCode {
    use egui::Key;

    match key {
        Key::Space => KeyCode::Space,
        Key::Backspace => KeyCode::Backspace,
        Key::Enter => KeyCode::Enter,
        Key::Tab => KeyCode::Tab,
        Key::Escape => KeyCode::Escape,

        Key::Minus => KeyCode::Char('-'),
        Key::Equals => KeyCode::Char('='),
        Key::OpenBracket => KeyCode::Char('['),
        Key::CloseBracket => KeyCode::Char(']'),
        Key::Backslash => KeyCode::Char('\\'),
        Key::Semicolon => KeyCode::Char(';'),
        Key::Comma => KeyCode::Char(','),
        Key::Period => KeyCode::Char('.'),
        Key::Slash => KeyCode::Char('/'),

        Key::Num0 => KeyCode::Char('0'),
        Key::Num1 => KeyCode::Char('1'),
        Key::Num2 => KeyCode::Char('2'),
        Key::Num3 => KeyCode::Char('3'),
        Key::Num4 => KeyCode::Char('4'),
        Key::Num5 => KeyCode::Char('5'),
        Key::Num6 => KeyCode::Char('6'),
        Key::Num7 => KeyCode::Char('7'),
        Key::Num8 => KeyCode::Char('8'),
        Key::Num9 => KeyCode::Char('9'),

        Key::A => KeyCode::Char('A'),
        Key::B => KeyCode::Char('B'),
        Key::C => KeyCode::Char('C'),
        Key::D => KeyCode::Char('D'),
        Key::E => KeyCode::Char('E'),
        Key::F => KeyCode::Char('F'),
        Key::G => KeyCode::Char('G'),
        Key::H => KeyCode::Char('H'),
        Key::I => KeyCode::Char('I'),
        Key::J => KeyCode::Char('J'),
        Key::K => KeyCode::Char('K'),
        Key::L => KeyCode::Char('L'),
        Key::M => KeyCode::Char('M'),
        Key::N => KeyCode::Char('N'),
        Key::O => KeyCode::Char('O'),
        Key::P => KeyCode::Char('P'),
        Key::Q => KeyCode::Char('Q'),
        Key::R => KeyCode::Char('R'),
        Key::S => KeyCode::Char('S'),
        Key::T => KeyCode::Char('T'),
        Key::U => KeyCode::Char('U'),
        Key::V => KeyCode::Char('V'),
        Key::W => KeyCode::Char('W'),
        Key::X => KeyCode::Char('X'),
        Key::Y => KeyCode::Char('Y'),
        Key::Z => KeyCode::Char('Z'),

        _ => KeyCode::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::normalize_key;

    #[test]
    fn mapped_keys_normalize_to_layout_labels() {
        let keys = generate_keys(&OverlayConfig::default().layout);
        for key in [
            egui::Key::A,
            egui::Key::Num5,
            egui::Key::Slash,
            egui::Key::Backslash,
            egui::Key::Space,
            egui::Key::Escape,
            egui::Key::Enter,
        ] {
            let label = normalize_key(key_code(key)).unwrap();
            assert!(
                keys.iter().any(|k| k.label == label),
                "{key:?} -> {label} has no keycap"
            );
        }
    }

    #[test]
    fn function_keys_are_dropped() {
        assert_eq!(key_code(egui::Key::F5), KeyCode::Other);
        assert_eq!(key_code(egui::Key::ArrowUp), KeyCode::Other);
    }

    #[test]
    fn command_modifier_reports_as_meta() {
        let mods = egui::Modifiers {
            mac_cmd: true,
            ..Default::default()
        };
        assert!(key_modifiers(mods).meta);
        assert!(!key_modifiers(mods).shift);
    }
}

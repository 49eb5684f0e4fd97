use crate::config::OverlayConfig;
use crate::overlay::model::{Color, KeyRect};
use crate::overlay::state::{OverlayState, Pose};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Idle,
    Hit,
}

/// One keycap as it should appear this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCap {
    pub label: String,
    pub rect: KeyRect,
    pub fill: Color,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpritePlacement {
    pub kind: SpriteKind,
    /// Top-left corner in window pixels. May be negative when the cat hangs
    /// over the window edge.
    pub origin: (i32, i32),
    pub size: (u32, u32),
}

/// Everything drawn in one frame, in paint order: keys, then the cat.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub keys: Vec<KeyCap>,
    pub sprite: SpritePlacement,
}

/// Surface a frame is painted onto.
pub trait FrameBackend {
    /// Resets the whole surface to fully transparent.
    fn clear(&mut self);
    fn draw_key(&mut self, key: &KeyCap, config: &OverlayConfig);
    fn draw_sprite(&mut self, sprite: &SpritePlacement);
}

/// Builds the frame and advances the hit timer by `elapsed_ms`.
pub fn plan_frame(
    state: &mut OverlayState,
    elapsed_ms: i64,
    config: &OverlayConfig,
    idle_size: (u32, u32),
    hit_size: (u32, u32),
) -> FramePlan {
    let palette = &config.palette;
    let keys = state
        .keys()
        .iter()
        .map(|key| {
            let pressed = state.is_pressed(&key.label);
            KeyCap {
                label: key.label.clone(),
                rect: key.rect,
                fill: if pressed {
                    palette.key_pressed
                } else {
                    palette.key_idle
                },
                pressed,
            }
        })
        .collect();

    let sprite = match state.tick(elapsed_ms) {
        Pose::Hit(rect) => SpritePlacement {
            kind: SpriteKind::Hit,
            origin: hit_origin(rect, hit_size, config.hit_overlap),
            size: hit_size,
        },
        Pose::Idle => SpritePlacement {
            kind: SpriteKind::Idle,
            origin: idle_origin(config.window_size.0, idle_size, config.idle_top),
            size: idle_size,
        },
    };

    FramePlan { keys, sprite }
}

/// Hit pose sits on top of the key, horizontally centred over it.
pub fn hit_origin(rect: KeyRect, size: (u32, u32), overlap: i32) -> (i32, i32) {
    (
        rect.center_x() - size.0 as i32 / 2,
        rect.top() - size.1 as i32 + overlap,
    )
}

pub fn idle_origin(window_width: u32, size: (u32, u32), top: i32) -> (i32, i32) {
    (window_width as i32 / 2 - size.0 as i32 / 2, top)
}

pub fn paint_frame<B: FrameBackend + ?Sized>(
    plan: &FramePlan,
    config: &OverlayConfig,
    backend: &mut B,
) {
    backend.clear();
    for key in &plan.keys {
        backend.draw_key(key, config);
    }
    backend.draw_sprite(&plan.sprite);
}

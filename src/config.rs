use crate::overlay::model::Color;
use std::path::PathBuf;

/// Every constant the overlay uses, gathered in one place.
///
/// Nothing here is read from disk; `OverlayConfig::default()` is the only
/// configuration the application ever runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Inner size of the overlay window in pixels.
    pub window_size: (u32, u32),
    /// Initial screen position of the window's top-left corner.
    pub window_pos: (i32, i32),
    pub idle_sprite_path: PathBuf,
    pub hit_sprite_path: PathBuf,
    /// Both sprites are scaled to this size before any rotation.
    pub sprite_size: (u32, u32),
    /// Counter-clockwise tilt applied to the idle sprite, in degrees.
    pub idle_tilt_degrees: f32,
    /// Vertical offset of the idle sprite from the top of the window.
    pub idle_top: i32,
    /// How far the hit sprite's bottom edge overlaps the pressed key's top.
    pub hit_overlap: i32,
    /// Time the hit pose stays up after a press.
    pub hit_duration_ms: i64,
    /// Target interval between render ticks.
    pub frame_interval_ms: u64,
    pub layout: LayoutMetrics,
    pub palette: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub key_width: i32,
    pub key_height: i32,
    pub spacing: i32,
    pub margin_left: i32,
    pub start_y: i32,
    /// Pixels trimmed from each key's width so neighbours don't touch.
    pub inset: i32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            key_width: 60,
            key_height: 40,
            spacing: 5,
            margin_left: 30,
            start_y: 180,
            inset: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub key_pressed: Color,
    pub key_idle: Color,
    pub border: Color,
    pub border_width: f32,
    pub corner_radius: f32,
    pub label: Color,
    pub label_size: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            key_pressed: Color::rgba(200, 100, 100, 180),
            key_idle: Color::rgba(255, 255, 255, 180),
            border: Color::rgba(0, 0, 0, 255),
            border_width: 2.0,
            corner_radius: 5.0,
            label: Color::rgba(0, 0, 0, 255),
            label_size: 16.0,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            window_size: (1200, 400),
            window_pos: (200, 200),
            idle_sprite_path: PathBuf::from("bongo_idle.png"),
            hit_sprite_path: PathBuf::from("bongo_hit.png"),
            sprite_size: (300, 200),
            idle_tilt_degrees: 10.0,
            idle_top: 10,
            hit_overlap: 10,
            hit_duration_ms: 150,
            frame_interval_ms: 16,
            layout: LayoutMetrics::default(),
            palette: Palette::default(),
        }
    }
}

impl OverlayConfig {
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.frame_interval_ms)
    }
}

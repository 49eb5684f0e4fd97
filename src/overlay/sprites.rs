use crate::config::OverlayConfig;
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// The two cat poses, already scaled and tilted for drawing.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    pub idle: RgbaImage,
    pub hit: RgbaImage,
}

impl SpriteSet {
    /// Loads both sprites from the configured paths.
    ///
    /// Either file missing or undecodable is an error; the caller treats it
    /// as fatal.
    pub fn load(config: &OverlayConfig) -> Result<Self> {
        let idle = load_sprite(&config.idle_sprite_path)?;
        let hit = load_sprite(&config.hit_sprite_path)?;
        Ok(Self::prepare(idle, hit, config))
    }

    /// Scales both poses to the sprite size and tilts the idle pose.
    pub fn prepare(idle: DynamicImage, hit: DynamicImage, config: &OverlayConfig) -> Self {
        let (w, h) = config.sprite_size;
        let idle = idle.resize_exact(w, h, FilterType::Triangle).to_rgba8();
        let hit = hit.resize_exact(w, h, FilterType::Triangle).to_rgba8();
        Self {
            idle: rotate_expand(&idle, config.idle_tilt_degrees),
            hit,
        }
    }

    pub fn idle_size(&self) -> (u32, u32) {
        self.idle.dimensions()
    }

    pub fn hit_size(&self) -> (u32, u32) {
        self.hit.dimensions()
    }
}

fn load_sprite(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("failed to load sprite {}", path.display()))
}

/// Size of the canvas that holds a `width`x`height` image rotated by
/// `degrees` without clipping.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let w = width as f32 * cos + height as f32 * sin;
    let h = width as f32 * sin + height as f32 * cos;
    // Trig noise at right angles must not grow the canvas by a pixel.
    let fit = |v: f32| (v - 1e-3).ceil().max(1.0) as u32;
    (fit(w), fit(h))
}

/// Rotates `src` counter-clockwise by `degrees`, growing the canvas to fit.
/// Uncovered corners are fully transparent.
pub fn rotate_expand(src: &RgbaImage, degrees: f32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    let (dw, dh) = rotated_bounds(sw, sh, degrees);
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());

    let src_cx = sw as f32 / 2.0;
    let src_cy = sh as f32 / 2.0;
    let dst_cx = dw as f32 / 2.0;
    let dst_cy = dh as f32 / 2.0;

    RgbaImage::from_fn(dw, dh, |x, y| {
        let dx = x as f32 + 0.5 - dst_cx;
        let dy = y as f32 + 0.5 - dst_cy;
        let u = dx * cos - dy * sin;
        let v = dx * sin + dy * cos;
        sample_bilinear(src, u + src_cx - 0.5, v + src_cy - 0.5)
    })
}

fn sample_bilinear(src: &RgbaImage, sx: f32, sy: f32) -> Rgba<u8> {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    // Interpolate premultiplied so transparent neighbours don't darken edges.
    let mut acc = [0.0f32; 4];
    for (px, py, weight) in taps {
        if weight <= 0.0 || px < 0 || py < 0 || px >= src.width() as i64 || py >= src.height() as i64
        {
            continue;
        }
        let p = src.get_pixel(px as u32, py as u32).0;
        let a = p[3] as f32 / 255.0;
        acc[0] += p[0] as f32 * a * weight;
        acc[1] += p[1] as f32 * a * weight;
        acc[2] += p[2] as f32 * a * weight;
        acc[3] += a * weight;
    }

    if acc[3] <= f32::EPSILON {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |v: f32| (v / acc[3]).round().clamp(0.0, 255.0) as u8;
    Rgba([
        channel(acc[0]),
        channel(acc[1]),
        channel(acc[2]),
        (acc[3] * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

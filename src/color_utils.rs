// File: src/color_utils.rs
use std::hash::{Hash, Hasher};

/// Deterministic (r, g, b) in [0, 255] for an event id, so an event keeps its colour across recomputes.
pub fn event_color(id: u64) -> (u8, u8, u8) {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let h = (hash % 360) as f32;
    // Saturation: 40% - 70%, Lightness: 35% - 55% (readable under white text)
    let s = 0.40 + ((hash >> 16) % 31) as f32 / 100.0;
    let l = 0.35 + ((hash >> 32) % 21) as f32 / 100.0;

    let (r, g, b) = hsl_to_rgb(h, s, l);
    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Helper: HSL to RGB conversion
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// Determines if text on top of this color should be black or white.
pub fn is_dark(r: u8, g: u8, b: u8) -> bool {
    let brightness = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
    brightness < 128.0
}

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart palette
// ---------------------------------------------------------------------------

/// Hue of the first series, so the largest category starts on a blue.
const BASE_HUE: f32 = 210.0;

/// `n` visually distinct colours, one per value-count entry.
///
/// Hues are evenly spaced around the wheel starting at [`BASE_HUE`];
/// bars, pie wedges and legend swatches all index into the same list.
pub fn series_colors(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let lightness = if i % 2 == 0 { 0.55 } else { 0.45 };
            to_color32(Hsl::new(hue, 0.70, lightness))
        })
        .collect()
}

/// Readable label colour for text drawn on top of `fill`.
pub fn contrast_text(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

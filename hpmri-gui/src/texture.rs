//! Proton image decoding for display.

use anyhow::Context;
use eframe::egui;

/// Decode the backend's PNG bytes into an egui color image.
pub fn color_image_from_png(bytes: &[u8]) -> anyhow::Result<egui::ColorImage> {
    let decoded = image::load_from_memory(bytes)
        .context("decoding proton image")?
        .to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        decoded.as_raw(),
    ))
}

//! Screenshot export of the full view.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use eframe::egui;

/// Default export filename, written to the working directory.
pub const SCREENSHOT_FILE: &str = "screenshot.png";

/// Ask the viewport for a capture of the next frame.
pub fn request(ctx: &egui::Context) {
    ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
}

/// Pick up a capture delivered this frame, if any, and write it out.
pub fn poll_and_save(ctx: &egui::Context) -> Option<anyhow::Result<PathBuf>> {
    let image: Arc<egui::ColorImage> = ctx.input(|input| {
        input.events.iter().find_map(|event| match event {
            egui::Event::Screenshot { image, .. } => Some(image.clone()),
            _ => None,
        })
    })?;
    let path = PathBuf::from(SCREENSHOT_FILE);
    Some(save_png(&image, &path).map(|()| path))
}

fn save_png(image: &egui::ColorImage, path: &Path) -> anyhow::Result<()> {
    let [width, height] = image.size;
    #[allow(clippy::cast_possible_truncation)]
    let buffer =
        image::RgbaImage::from_raw(width as u32, height as u32, image.as_raw().to_vec())
            .context("screenshot buffer size mismatch")?;
    buffer
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

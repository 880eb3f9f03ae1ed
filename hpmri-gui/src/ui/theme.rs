//! Style configuration applied at startup.

use eframe::egui;

/// Tighten spacing and widen sliders for the control sidebar.
pub fn configure_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.slider_width = 170.0;
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    ctx.set_style(style);
}

//! HP-MRI viewer application entry point.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod client;
mod message;
mod screenshot;
mod texture;
mod ui;

use app::HpMriApp;
use client::ServiceConfig;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let service = ServiceConfig::from_env();
    log::info!("imaging service at {}", service.base_url);

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "HP-MRI Viewer",
        opts,
        Box::new(|cc| {
            ui::theme::configure_style(&cc.egui_ctx);
            Ok(Box::new(HpMriApp::new(service)))
        }),
    )
}

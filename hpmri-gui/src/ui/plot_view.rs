//! Central panel: proton image with the EPSI overlay.
//!
//! The plot is non-interactive; all movement happens through the pan
//! buttons, which recompute the domain and trigger a full redraw. The
//! proton image fills the unit square and the overlay geometry arrives
//! from hpmri-core already mapped into normalized coordinates.

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotImage, PlotPoint, PlotPoints, Points};

use hpmri_core::{pick_voxel, ContainerRect, Overlay};

use crate::app::HpMriApp;

const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(255, 255, 255, 140);
const TRACE_COLOR: egui::Color32 = egui::Color32::from_rgb(64, 224, 120);

impl HpMriApp {
    /// Render the central panel.
    pub(crate) fn render_plot_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot = Plot::new("epsi_overlay")
                .data_aspect(1.0)
                .show_axes([false, false])
                .show_grid(false)
                .show_x(false)
                .show_y(false)
                .allow_zoom(false)
                .allow_drag(false)
                .allow_scroll(false)
                .allow_boxed_zoom(false)
                .allow_double_click_reset(false);

            let response = plot.show(ui, |plot_ui| {
                // The axes never move; only the overlay domain does.
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

                if let Some(tex) = &self.proton_texture {
                    plot_ui.image(PlotImage::new(
                        tex,
                        PlotPoint::new(0.5, 0.5),
                        [1.0, 1.0],
                    ));
                }

                if let Some(overlay) = &self.overlay {
                    draw_overlay(plot_ui, overlay);
                }
            });

            // Container rect feeds the picker; tracked every frame so
            // resizes are picked up immediately.
            let rect = response.response.rect;
            self.plot_rect = Some(rect);

            if self.view.selecting && response.response.clicked() {
                if let Some(pos) = response.response.interact_pointer_pos() {
                    self.handle_pick(pos, rect);
                }
            }
        });
    }

    fn handle_pick(&mut self, pos: egui::Pos2, rect: egui::Rect) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let container = ContainerRect {
            left: f64::from(rect.left()),
            top: f64::from(rect.top()),
            width: f64::from(rect.width()),
            height: f64::from(rect.height()),
        };
        let picked = pick_voxel(
            f64::from(pos.x),
            f64::from(pos.y),
            &container,
            &self.calibration,
            dataset.columns,
            dataset.rows,
        );
        match picked {
            Some(voxel) => {
                let group = self.view.active_group;
                self.selections.record(group, voxel);
                self.status = format!(
                    "Voxel ({}, {}) -> group {}",
                    voxel.row,
                    voxel.column,
                    group.label()
                );
            }
            // Clicks outside the calibrated rectangle are ignored.
            None => log::debug!("click at {pos:?} outside grid rectangle"),
        }
    }
}

fn draw_overlay(plot_ui: &mut egui_plot::PlotUi, overlay: &Overlay) {
    for line in &overlay.grid {
        plot_ui.line(
            Line::new(PlotPoints::from(vec![line.start, line.end]))
                .color(GRID_COLOR)
                .width(1.0),
        );
    }
    if let Some(trace) = &overlay.trace {
        for run in &trace.runs {
            if run.len() == 1 {
                plot_ui.points(Points::new(PlotPoints::from(run.clone())).color(TRACE_COLOR));
            } else {
                plot_ui.line(
                    Line::new(PlotPoints::from(run.clone()))
                        .color(TRACE_COLOR)
                        .width(1.2),
                );
            }
        }
    }
}

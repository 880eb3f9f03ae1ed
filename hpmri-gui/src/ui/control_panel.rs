//! Control panel (left sidebar) rendering.

use eframe::egui;
use rfd::FileDialog;

use hpmri_core::{Action, MagnetType, SelectionGroup};

use crate::app::HpMriApp;

const SLICE_MAX: u32 = 20;
const DATASET_MAX: u32 = 30;

impl HpMriApp {
    /// Render the left sidebar with all viewer controls.
    pub(crate) fn render_control_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("controls")
            .min_width(270.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading("HP-MRI Viewer");
                ui.separator();

                self.render_acquisition_section(ui);
                ui.separator();
                self.render_overlay_section(ui);
                ui.separator();
                self.render_selection_section(ui);
                ui.separator();
                self.render_io_section(ui, ctx);

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&self.status).weak());
                });
            });
    }

    fn render_acquisition_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Acquisition").strong());

        let mut slice = self.view.slice;
        if ui
            .add(egui::Slider::new(&mut slice, 1..=SLICE_MAX).text("Slice"))
            .changed()
        {
            self.apply(Action::SetSlice(slice));
        }

        let mut contrast = self.view.contrast;
        if ui
            .add(egui::Slider::new(&mut contrast, 0.1..=3.0).text("Contrast"))
            .changed()
        {
            self.apply(Action::SetContrast(contrast));
        }

        let mut dataset_index = self.view.dataset_index;
        if ui
            .add(egui::Slider::new(&mut dataset_index, 1..=DATASET_MAX).text("Dataset"))
            .changed()
        {
            self.apply(Action::SetDatasetIndex(dataset_index));
        }

        let mut threshold = self.view.threshold;
        if ui
            .add(egui::Slider::new(&mut threshold, 0.0..=1.0).text("Threshold"))
            .changed()
        {
            self.apply(Action::SetThreshold(threshold));
        }

        let current = self.view.magnet_type;
        egui::ComboBox::from_label("Magnet")
            .selected_text(current.as_str())
            .show_ui(ui, |ui| {
                for magnet in MagnetType::ALL {
                    if ui
                        .selectable_label(magnet == current, magnet.as_str())
                        .clicked()
                        && magnet != current
                    {
                        self.apply(Action::SetMagnetType(magnet));
                    }
                }
            });
    }

    fn render_overlay_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("EPSI overlay").strong());

        let mut visible = self.view.overlay_visible;
        if ui.checkbox(&mut visible, "Show spectra").changed() {
            self.apply(Action::SetOverlayVisible(visible));
        }

        ui.horizontal(|ui| {
            ui.label("Pan:");
            if ui.button("\u{2b05}").clicked() {
                self.apply(Action::PanLeft);
            }
            if ui.button("\u{27a1}").clicked() {
                self.apply(Action::PanRight);
            }
            if ui.button("\u{2b06}").clicked() {
                self.apply(Action::PanUp);
            }
            if ui.button("\u{2b07}").clicked() {
                self.apply(Action::PanDown);
            }
            if ui.button("Reset").clicked() {
                self.apply(Action::ResetPlotShift);
            }
        });
        ui.label(format!(
            "Offset: ({}, {})",
            self.view.plot_shift.x, self.view.plot_shift.y
        ));
    }

    fn render_selection_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Voxel selection").strong());

        let mut selecting = self.view.selecting;
        if ui.checkbox(&mut selecting, "Select on click").changed() {
            self.apply(Action::SetSelecting(selecting));
        }

        ui.horizontal(|ui| {
            ui.label("Group:");
            for group in [SelectionGroup::A, SelectionGroup::B] {
                if ui
                    .selectable_label(self.view.active_group == group, group.label())
                    .clicked()
                {
                    self.apply(Action::SetActiveGroup(group));
                }
            }
            if ui.button("Clear").clicked() {
                self.selections.clear();
            }
        });

        for group in [SelectionGroup::A, SelectionGroup::B] {
            let voxels = self.selections.group(group);
            if voxels.is_empty() {
                continue;
            }
            ui.label(format!("Group {} ({} voxels):", group.label(), voxels.len()));
            for voxel in voxels {
                ui.monospace(format!("  row {}, col {}", voxel.row, voxel.column));
            }
        }
    }

    fn render_io_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.label(egui::RichText::new("Data").strong());
        ui.horizontal(|ui| {
            if ui.button("Upload files\u{2026}").clicked() {
                if let Some(paths) = FileDialog::new().pick_files() {
                    self.upload_files(paths);
                }
            }
            if ui.button("Screenshot").clicked() {
                self.request_screenshot(ctx);
            }
        });
    }
}

//! Main application state and logic.
//!
//! `HpMriApp` owns the view state, the current dataset, and the derived
//! overlay geometry, and drives the fetch workers. All mutation goes
//! through the core reducer; fetch responses are filtered through
//! per-stream request ledgers so a slow superseded response never
//! overwrites a newer one.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use eframe::egui;

use hpmri_core::{
    build_overlay, compute_domain, Action, Dataset, Domain, DomainParams, Effect, Overlay,
    PickCalibration, RequestLedger, SelectionState, ViewState,
};

use crate::client::{self, ServiceConfig};
use crate::message::AppMessage;
use crate::{screenshot, texture};

/// Main application state.
pub struct HpMriApp {
    /// Current control values; replaced, never mutated in place.
    pub(crate) view: ViewState,
    /// Last successfully fetched dataset.
    pub(crate) dataset: Option<Dataset>,
    /// Normalized overlay placement derived from the dataset and pan.
    pub(crate) domain: Domain,
    /// Grid and trace geometry for the current frame.
    pub(crate) overlay: Option<Overlay>,
    /// Picked voxels, grouped A/B.
    pub(crate) selections: SelectionState,
    /// Picker calibration (injected, tunable).
    pub(crate) calibration: PickCalibration,

    /// Proton image texture.
    pub(crate) proton_texture: Option<egui::TextureHandle>,
    /// Plot container rect from the last frame, for the picker.
    pub(crate) plot_rect: Option<egui::Rect>,

    /// Imaging service address.
    pub(crate) service: ServiceConfig,
    /// Sequencing for proton image responses.
    proton_ledger: RequestLedger,
    /// Sequencing for dataset responses.
    dataset_ledger: RequestLedger,

    /// Message receiver for fetch workers.
    rx: Receiver<AppMessage>,
    /// Message sender handed to fetch workers.
    tx: Sender<AppMessage>,

    /// User-facing status line.
    pub(crate) status: String,
    /// A screenshot was requested and is pending delivery.
    screenshot_pending: bool,
}

impl HpMriApp {
    /// Build the app and kick off the initial fetches.
    pub fn new(service: ServiceConfig) -> Self {
        let (tx, rx) = channel();
        let mut app = Self {
            view: ViewState::default(),
            dataset: None,
            domain: Domain::FULL,
            overlay: None,
            selections: SelectionState::default(),
            calibration: PickCalibration::default(),
            proton_texture: None,
            plot_rect: None,
            service,
            proton_ledger: RequestLedger::default(),
            dataset_ledger: RequestLedger::default(),
            rx,
            tx,
            status: "Connecting...".to_string(),
            screenshot_pending: false,
        };
        app.fetch_proton();
        app.fetch_dataset();
        app
    }

    /// Apply a user action through the reducer and run its effect.
    pub fn apply(&mut self, action: Action) {
        let (next, effect) = hpmri_core::reduce(&self.view, action);
        self.view = next;
        match effect {
            Effect::FetchProton => self.fetch_proton(),
            Effect::FetchDataset => self.fetch_dataset(),
            Effect::None => {}
        }
        // Pan and visibility changes reposition the overlay locally.
        self.rebuild_overlay();
    }

    fn fetch_proton(&mut self) {
        let seq = self.proton_ledger.issue();
        let config = self.service.clone();
        let tx = self.tx.clone();
        let (slice, contrast, magnet) =
            (self.view.slice, self.view.contrast, self.view.magnet_type);
        thread::spawn(move || {
            client::fetch_proton_worker(&config, slice, contrast, magnet, seq, &tx);
        });
    }

    fn fetch_dataset(&mut self) {
        let seq = self.dataset_ledger.issue();
        let config = self.service.clone();
        let tx = self.tx.clone();
        let (index, threshold, magnet) = (
            self.view.dataset_index,
            self.view.threshold,
            self.view.magnet_type,
        );
        thread::spawn(move || {
            client::fetch_dataset_worker(&config, index, threshold, magnet, seq, &tx);
        });
    }

    /// Start a background upload of the given files.
    pub fn upload_files(&mut self, paths: Vec<std::path::PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.status = format!("Uploading {} file(s)...", paths.len());
        let config = self.service.clone();
        let tx = self.tx.clone();
        thread::spawn(move || client::upload_worker(&config, paths, &tx));
    }

    /// Request a capture of the next frame.
    pub fn request_screenshot(&mut self, ctx: &egui::Context) {
        self.screenshot_pending = true;
        screenshot::request(ctx);
    }

    /// Recompute the domain and overlay from the current dataset and pan.
    ///
    /// Malformed spectral data is logged and leaves the previous overlay
    /// geometry blank for this frame; it never aborts the app.
    pub(crate) fn rebuild_overlay(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.overlay = None;
            return;
        };
        self.domain = compute_domain(&DomainParams::from_dataset(
            dataset,
            self.view.plot_shift,
        ));
        match build_overlay(dataset, &self.domain, self.view.overlay_visible) {
            Ok(overlay) => self.overlay = Some(overlay),
            Err(e) => {
                log::warn!("skipping overlay render: {e}");
                self.overlay = None;
            }
        }
    }

    /// Handle pending messages from fetch workers.
    pub fn handle_messages(&mut self, ctx: &egui::Context) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                AppMessage::ProtonLoaded { seq, bytes } => {
                    if !self.proton_ledger.accept(seq) {
                        log::debug!("discarding stale proton response (seq {seq})");
                        continue;
                    }
                    match texture::color_image_from_png(&bytes) {
                        Ok(img) => {
                            self.proton_texture = Some(ctx.load_texture(
                                "proton",
                                img,
                                egui::TextureOptions::LINEAR,
                            ));
                            self.status = format!("Slice {}", self.view.slice);
                        }
                        Err(e) => log::warn!("proton image decode failed: {e:#}"),
                    }
                }
                AppMessage::ProtonFailed { seq, error } => {
                    if self.proton_ledger.accept(seq) {
                        log::warn!("proton fetch failed: {error}");
                        self.status = "Proton fetch failed; showing last image".to_string();
                    }
                }
                AppMessage::DatasetLoaded { seq, dataset } => {
                    if !self.dataset_ledger.accept(seq) {
                        log::debug!("discarding stale dataset response (seq {seq})");
                        continue;
                    }
                    if let Err(e) = dataset.validate() {
                        log::warn!("rejecting malformed dataset: {e}");
                        self.status = "Malformed dataset; keeping previous".to_string();
                        continue;
                    }
                    self.dataset = Some(*dataset);
                    self.rebuild_overlay();
                    self.status = format!("Dataset {}", self.view.dataset_index);
                }
                AppMessage::DatasetFailed { seq, error } => {
                    if self.dataset_ledger.accept(seq) {
                        log::warn!("dataset fetch failed: {error}");
                        self.status = "Dataset fetch failed; showing last data".to_string();
                    }
                }
                AppMessage::UploadFinished { ok, detail } => {
                    if ok {
                        self.status = detail;
                    } else {
                        log::warn!("upload failed: {detail}");
                        self.status = format!("Upload failed: {detail}");
                    }
                }
            }
        }
    }

    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.screenshot_pending {
            return;
        }
        if let Some(result) = screenshot::poll_and_save(ctx) {
            self.screenshot_pending = false;
            match result {
                Ok(path) => self.status = format!("Saved {}", path.display()),
                Err(e) => {
                    log::warn!("screenshot save failed: {e:#}");
                    self.status = "Screenshot failed".to_string();
                }
            }
        }
    }
}

impl eframe::App for HpMriApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_messages(ctx);
        self.handle_screenshot(ctx);
        self.render_control_panel(ctx);
        self.render_plot_view(ctx);
    }
}

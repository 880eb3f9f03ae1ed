//! HTTP workers for the external imaging service.
//!
//! Each fetch runs on its own background thread with a blocking reqwest
//! client and reports back over the app channel. Failures become
//! messages, never panics; the UI keeps its last known good state.

use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::{anyhow, Context};
use hpmri_core::{Dataset, MagnetType};
use serde_json::json;

use crate::message::AppMessage;

/// Where the imaging service lives.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
}

impl ServiceConfig {
    /// Read the service address from `HPMRI_SERVER`, defaulting to the
    /// local development backend.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("HPMRI_SERVER")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        Self { base_url }
    }
}

fn http_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
}

/// Fetch the proton image for one slice in a background thread.
pub fn fetch_proton_worker(
    config: &ServiceConfig,
    slice: u32,
    contrast: f64,
    magnet_type: MagnetType,
    seq: u64,
    tx: &Sender<AppMessage>,
) {
    match fetch_proton(config, slice, contrast, magnet_type) {
        Ok(bytes) => {
            let _ = tx.send(AppMessage::ProtonLoaded { seq, bytes });
        }
        Err(e) => {
            let _ = tx.send(AppMessage::ProtonFailed {
                seq,
                error: format!("{e:#}"),
            });
        }
    }
}

fn fetch_proton(
    config: &ServiceConfig,
    slice: u32,
    contrast: f64,
    magnet_type: MagnetType,
) -> anyhow::Result<Vec<u8>> {
    let url = format!("{}/api/get_proton_picture/{slice}", config.base_url);
    let response = http_client()?
        .post(&url)
        .json(&json!({
            "contrast": contrast,
            "magnetType": magnet_type.as_str(),
        }))
        .send()
        .with_context(|| format!("POST {url}"))?;
    if !response.status().is_success() {
        return Err(anyhow!("{url} returned {}", response.status()));
    }
    Ok(response.bytes()?.to_vec())
}

/// Fetch one EPSI dataset in a background thread.
pub fn fetch_dataset_worker(
    config: &ServiceConfig,
    dataset_index: u32,
    threshold: f64,
    magnet_type: MagnetType,
    seq: u64,
    tx: &Sender<AppMessage>,
) {
    match fetch_dataset(config, dataset_index, threshold, magnet_type) {
        Ok(dataset) => {
            let _ = tx.send(AppMessage::DatasetLoaded {
                seq,
                dataset: Box::new(dataset),
            });
        }
        Err(e) => {
            let _ = tx.send(AppMessage::DatasetFailed {
                seq,
                error: format!("{e:#}"),
            });
        }
    }
}

fn fetch_dataset(
    config: &ServiceConfig,
    dataset_index: u32,
    threshold: f64,
    magnet_type: MagnetType,
) -> anyhow::Result<Dataset> {
    let url = format!("{}/api/get_hp_mri_data/{dataset_index}", config.base_url);
    let response = http_client()?
        .post(&url)
        .query(&[
            ("threshold", threshold.to_string()),
            ("magnetType", magnet_type.as_str().to_string()),
        ])
        .send()
        .with_context(|| format!("POST {url}"))?;
    if !response.status().is_success() {
        return Err(anyhow!("{url} returned {}", response.status()));
    }
    let dataset: Dataset = response.json().context("decoding dataset JSON")?;
    Ok(dataset)
}

/// Upload one or more files as the multipart `files` field.
pub fn upload_worker(config: &ServiceConfig, paths: Vec<PathBuf>, tx: &Sender<AppMessage>) {
    match upload(config, &paths) {
        Ok(()) => {
            let _ = tx.send(AppMessage::UploadFinished {
                ok: true,
                detail: format!("uploaded {} file(s)", paths.len()),
            });
        }
        Err(e) => {
            let _ = tx.send(AppMessage::UploadFinished {
                ok: false,
                detail: format!("{e:#}"),
            });
        }
    }
}

fn upload(config: &ServiceConfig, paths: &[PathBuf]) -> anyhow::Result<()> {
    let url = format!("{}/api/upload", config.base_url);
    let mut form = reqwest::blocking::multipart::Form::new();
    for path in paths {
        form = form
            .file("files", path)
            .with_context(|| format!("reading {}", path.display()))?;
    }
    let response = http_client()?
        .post(&url)
        .multipart(form)
        .send()
        .with_context(|| format!("POST {url}"))?;
    if !response.status().is_success() {
        return Err(anyhow!("{url} returned {}", response.status()));
    }
    Ok(())
}

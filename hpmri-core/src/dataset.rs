//! EPSI dataset model and wire format.
//!
//! Mirrors the JSON payload served by the imaging backend's
//! `get_hp_mri_data` endpoint. Field names on the wire follow the
//! backend's camelCase vocabulary (`xEpsi`, `lroFid`, ...); the Rust
//! names describe what the values mean.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Amplitude the backend substitutes for NaN before serializing.
///
/// Falls below the trace epsilon, so sentinel samples always render as
/// gaps (see [`crate::grid::build_trace`]).
pub const NAN_SENTINEL: f64 = -1.0;

/// One fetched EPSI dataset: flattened trace, grid geometry, and the
/// per-voxel spectra.
///
/// Replaced wholesale on every successful fetch; never mutated in place.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    /// X positions for the flattened trace, one per sample.
    #[serde(rename = "xEpsi")]
    pub x_values: Vec<f64>,

    /// Flattened trace amplitudes; may contain [`NAN_SENTINEL`].
    #[serde(rename = "epsi")]
    pub samples: Vec<f64>,

    /// Grid columns (longitudinal voxel count).
    pub columns: u32,

    /// Grid rows (perpendicular voxel count).
    pub rows: u32,

    /// Per-voxel spectra, indexed `[row][column] -> samples`.
    #[serde(rename = "spectralData")]
    pub spectral_data: Vec<Vec<Vec<f64>>>,

    /// Fiducial (full field-of-view) length, longitudinal axis, mm.
    #[serde(rename = "lroFid")]
    pub longitudinal_scale: f64,

    /// Fiducial length, perpendicular axis, mm.
    #[serde(rename = "lpeFid")]
    pub perpendicular_scale: f64,

    /// Acquired EPSI extent, longitudinal axis, mm.
    #[serde(rename = "lroEpsi")]
    pub longitudinal_measurement: f64,

    /// Acquired EPSI extent, perpendicular axis, mm.
    #[serde(rename = "lpeEpsi")]
    pub perpendicular_measurement: f64,

    /// Backend-suggested initial pan. Parsed for compatibility; the
    /// viewer's own pan state is authoritative.
    #[serde(rename = "plotShift", default)]
    pub plot_shift_hint: Option<[f64; 2]>,
}

impl Dataset {
    /// Check the structural invariants of a freshly decoded dataset.
    pub fn validate(&self) -> Result<()> {
        if self.samples.len() != self.x_values.len() {
            return Err(Error::SampleCountMismatch {
                samples: self.samples.len(),
                x_values: self.x_values.len(),
            });
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(Error::InvalidGridDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (scale, measurement) in [
            (self.longitudinal_scale, self.longitudinal_measurement),
            (self.perpendicular_scale, self.perpendicular_measurement),
        ] {
            if !(scale > 0.0) {
                return Err(Error::InvalidFiducialLength(scale));
            }
            if !(measurement > 0.0) || measurement > scale {
                return Err(Error::InvalidMeasurement {
                    measurement,
                    fiducial: scale,
                });
            }
        }
        if self.spectral_data.len() != self.rows as usize {
            return Err(Error::MalformedSpectralData(format!(
                "expected {} rows, found {}",
                self.rows,
                self.spectral_data.len()
            )));
        }
        for (i, row) in self.spectral_data.iter().enumerate() {
            if row.len() != self.columns as usize {
                return Err(Error::MalformedSpectralData(format!(
                    "row {i}: expected {} columns, found {}",
                    self.columns,
                    row.len()
                )));
            }
        }
        Ok(())
    }

    /// Number of spectral samples per voxel, taken from the first voxel.
    ///
    /// Fails when the first row or column is missing; callers log and
    /// skip the frame rather than propagating (best-effort display).
    pub fn samples_per_voxel(&self) -> Result<usize> {
        self.spectral_data
            .first()
            .and_then(|row| row.first())
            .map(Vec::len)
            .ok_or_else(|| {
                Error::MalformedSpectralData("first spectral voxel missing".to_string())
            })
    }

    /// Total trace width in plot units: one unit per raw sample across
    /// one grid row.
    pub fn total_sample_width(&self) -> Result<usize> {
        Ok(self.samples_per_voxel()? * self.columns as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        r#"{
            "xEpsi": [0.0, 1.0, 2.0, 3.0],
            "epsi": [0.5, -1.0, 0.7, 0.2],
            "columns": 2,
            "rows": 1,
            "spectralData": [[[0.1, 0.2], [0.3, 0.4]]],
            "lroFid": 40.0,
            "lpeFid": 40.0,
            "lroEpsi": 20.0,
            "lpeEpsi": 20.0,
            "plotShift": [-0.3, -0.4]
        }"#
        .to_string()
    }

    #[test]
    fn decodes_wire_format() {
        let ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        assert_eq!(ds.x_values.len(), 4);
        assert_eq!(ds.samples[1], NAN_SENTINEL);
        assert_eq!(ds.columns, 2);
        assert_eq!(ds.rows, 1);
        assert_eq!(ds.plot_shift_hint, Some([-0.3, -0.4]));
        ds.validate().unwrap();
    }

    #[test]
    fn decodes_without_plot_shift_hint() {
        let json = sample_json().replace(",\n            \"plotShift\": [-0.3, -0.4]", "");
        let ds: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(ds.plot_shift_hint, None);
    }

    #[test]
    fn rejects_sample_count_mismatch() {
        let mut ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        ds.samples.pop();
        assert!(matches!(
            ds.validate(),
            Err(Error::SampleCountMismatch { .. })
        ));
    }

    #[test]
    fn rejects_measurement_beyond_fiducial() {
        let mut ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        ds.longitudinal_measurement = 41.0;
        assert!(matches!(ds.validate(), Err(Error::InvalidMeasurement { .. })));
    }

    #[test]
    fn rejects_ragged_spectral_rows() {
        let mut ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        ds.spectral_data[0].pop();
        assert!(matches!(
            ds.validate(),
            Err(Error::MalformedSpectralData(_))
        ));
    }

    #[test]
    fn sample_width_from_first_voxel() {
        let ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        assert_eq!(ds.samples_per_voxel().unwrap(), 2);
        assert_eq!(ds.total_sample_width().unwrap(), 4);
    }

    #[test]
    fn sample_width_fails_on_empty_grid() {
        let mut ds: Dataset = serde_json::from_str(&sample_json()).unwrap();
        ds.spectral_data.clear();
        assert!(ds.samples_per_voxel().is_err());
    }
}

//! Error types for hpmri-core.

use thiserror::Error;

/// Result type alias for hpmri operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dataset handling and overlay construction.
#[derive(Error, Debug)]
pub enum Error {
    /// The trace and x-axis sequences disagree in length.
    #[error("sample count mismatch: {samples} samples for {x_values} x values")]
    SampleCountMismatch { samples: usize, x_values: usize },

    /// Grid dimensions must be at least 1x1.
    #[error("invalid grid dimensions: {rows} rows x {columns} columns")]
    InvalidGridDimensions { rows: u32, columns: u32 },

    /// A fiducial length (field-of-view scale) must be strictly positive.
    #[error("invalid fiducial length: {0}")]
    InvalidFiducialLength(f64),

    /// The acquired measurement must lie in (0, fiducial length].
    #[error("measurement {measurement} outside (0, {fiducial}]")]
    InvalidMeasurement { measurement: f64, fiducial: f64 },

    /// The spectral grid is missing rows, columns, or the first voxel.
    #[error("malformed spectral data: {0}")]
    MalformedSpectralData(String),
}

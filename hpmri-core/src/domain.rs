//! Mapping from scanner field-of-view geometry to the normalized plot
//! domain.
//!
//! The acquired EPSI region is centered within the fiducial field of
//! view, then translated by the user's pixel pan expressed in grid-cell
//! units. The mapping is pure: identical inputs produce bit-identical
//! domains, which is what lets the plot surface redraw idempotently.

use crate::dataset::Dataset;
use crate::state::PlotShift;

/// Normalized sub-rectangle of the plot area holding the EPSI overlay.
///
/// Fractions are unbounded in principle but stay within roughly
/// `[-1, 2]` under normal pan ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    /// Fractional interval along the longitudinal axis, `(low, high)`.
    pub x: (f64, f64),
    /// Fractional interval along the perpendicular axis, `(low, high)`.
    pub y: (f64, f64),
}

impl Domain {
    /// Fallback domain used when geometry is degenerate: the full unit
    /// square, never NaN.
    pub const FULL: Self = Self {
        x: (0.0, 1.0),
        y: (0.0, 1.0),
    };

    /// Interval width along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x.1 - self.x.0
    }

    /// Interval width along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y.1 - self.y.0
    }
}

/// Inputs to [`compute_domain`], one scale/measurement pair per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainParams {
    /// Fiducial length, longitudinal axis.
    pub longitudinal_scale: f64,
    /// Acquired measurement, longitudinal axis.
    pub longitudinal_measurement: f64,
    /// Fiducial length, perpendicular axis.
    pub perpendicular_scale: f64,
    /// Acquired measurement, perpendicular axis.
    pub perpendicular_measurement: f64,
    /// Grid columns.
    pub columns: u32,
    /// Grid rows.
    pub rows: u32,
    /// Pixel-space pan offset.
    pub shift: PlotShift,
}

impl DomainParams {
    /// Geometry and grid shape from a dataset plus the current pan.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset, shift: PlotShift) -> Self {
        Self {
            longitudinal_scale: dataset.longitudinal_scale,
            longitudinal_measurement: dataset.longitudinal_measurement,
            perpendicular_scale: dataset.perpendicular_scale,
            perpendicular_measurement: dataset.perpendicular_measurement,
            columns: dataset.columns,
            rows: dataset.rows,
            shift,
        }
    }
}

/// Map field-of-view geometry and pan into the normalized plot domain.
///
/// Per axis: `low = ((scale - measure)/2 + shift * measure / count) /
/// scale`, `high = low + measure / scale`. The interval is always
/// exactly `measure / scale` wide; pan translates the overlay without
/// resizing it.
///
/// Degenerate geometry (zero count or non-positive scale) yields
/// [`Domain::FULL`] instead of propagating NaN into rendering.
#[must_use]
pub fn compute_domain(params: &DomainParams) -> Domain {
    let Some(x) = axis_interval(
        params.longitudinal_scale,
        params.longitudinal_measurement,
        f64::from(params.shift.x),
        params.columns,
    ) else {
        return Domain::FULL;
    };
    let Some(y) = axis_interval(
        params.perpendicular_scale,
        params.perpendicular_measurement,
        f64::from(params.shift.y),
        params.rows,
    ) else {
        return Domain::FULL;
    };
    Domain { x, y }
}

fn axis_interval(scale: f64, measure: f64, shift: f64, count: u32) -> Option<(f64, f64)> {
    if count == 0 || !(scale > 0.0) {
        return None;
    }
    let low = ((scale - measure) / 2.0 + shift * measure / f64::from(count)) / scale;
    let high = low + measure / scale;
    Some((low, high))
}

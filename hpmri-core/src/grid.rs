//! Overlay geometry: grid lines and the spectral trace.
//!
//! All coordinates are normalized figure fractions. The plot surface
//! shows the proton image across the unit square and draws this geometry
//! on top; only the [`Domain`] moves when the user pans.

use crate::dataset::Dataset;
use crate::domain::Domain;
use crate::error::Result;

/// Lower validity bound for trace samples. Values below this (including
/// the backend's `-1.0` NaN sentinel) are acquisition gaps.
pub const TRACE_EPSILON_LOW: f64 = 0.01;

/// Upper validity bound for trace samples; anything above is an
/// out-of-range artifact.
pub const TRACE_EPSILON_HIGH: f64 = 9.99;

/// One grid line segment in normalized figure coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: [f64; 2],
    pub end: [f64; 2],
}

/// The spectral trace, split into runs of consecutive valid samples.
///
/// Runs are never bridged across a gap; a run may be a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub runs: Vec<Vec<[f64; 2]>>,
}

/// Everything the plot surface draws on top of the proton image.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub grid: Vec<GridLine>,
    pub trace: Option<Trace>,
}

/// Whether a raw sample participates in the trace.
///
/// The rule is inclusive at both bounds: exactly `0.01` and exactly
/// `9.99` are valid. NaN fails both comparisons and is a gap.
#[must_use]
pub fn sample_is_valid(value: f64) -> bool {
    (TRACE_EPSILON_LOW..=TRACE_EPSILON_HIGH).contains(&value)
}

/// Build the `(columns + 1) + (rows + 1)` grid segments spanning the
/// domain exactly.
///
/// Positions interpolate as `low + (high - low) * i / count`, so the
/// lines at index 0 and index `count` sit exactly on the domain bounds.
#[must_use]
pub fn build_grid(domain: &Domain, columns: u32, rows: u32) -> Vec<GridLine> {
    let mut lines = Vec::with_capacity((columns + rows + 2) as usize);
    for i in 0..=columns {
        let x = lerp(domain.x, f64::from(i) / f64::from(columns.max(1)));
        lines.push(GridLine {
            start: [x, domain.y.0],
            end: [x, domain.y.1],
        });
    }
    for j in 0..=rows {
        let y = lerp(domain.y, f64::from(j) / f64::from(rows.max(1)));
        lines.push(GridLine {
            start: [domain.x.0, y],
            end: [domain.x.1, y],
        });
    }
    lines
}

/// Build the trace polyline mapped into the domain rectangle.
///
/// `x_values` span `[0, total_width)` in raw sample units and amplitudes
/// span `[0, rows]` in grid-row units; both are mapped affinely into the
/// domain. Invalid samples split the polyline. Returns `None` when no
/// valid sample exists.
#[must_use]
pub fn build_trace(
    x_values: &[f64],
    samples: &[f64],
    domain: &Domain,
    total_width: usize,
    rows: u32,
) -> Option<Trace> {
    if total_width == 0 || rows == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let width = total_width as f64;
    let height = f64::from(rows);

    let mut runs: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (&x, &v) in x_values.iter().zip(samples) {
        if sample_is_valid(v) {
            let fx = lerp(domain.x, x / width);
            let fy = lerp(domain.y, v / height);
            current.push([fx, fy]);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    if runs.is_empty() {
        None
    } else {
        Some(Trace { runs })
    }
}

/// Build the full overlay for one frame.
///
/// The grid is always emitted once a dataset is loaded; the trace is
/// omitted when the overlay is toggled hidden.
pub fn build_overlay(dataset: &Dataset, domain: &Domain, visible: bool) -> Result<Overlay> {
    let grid = build_grid(domain, dataset.columns, dataset.rows);
    let trace = if visible {
        let total_width = dataset.total_sample_width()?;
        build_trace(
            &dataset.x_values,
            &dataset.samples,
            domain,
            total_width,
            dataset.rows,
        )
    } else {
        None
    };
    Ok(Overlay { grid, trace })
}

// Endpoints are returned exactly so boundary grid lines never drift
// off the domain bounds.
fn lerp(interval: (f64, f64), t: f64) -> f64 {
    if t == 0.0 {
        interval.0
    } else if t == 1.0 {
        interval.1
    } else {
        interval.0 + (interval.1 - interval.0) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn half_domain() -> Domain {
        Domain {
            x: (0.25, 0.75),
            y: (0.25, 0.75),
        }
    }

    #[test]
    fn grid_segment_count() {
        let lines = build_grid(&half_domain(), 16, 12);
        assert_eq!(lines.len(), 17 + 13);
    }

    #[test]
    fn boundary_lines_sit_exactly_on_domain_bounds() {
        let domain = half_domain();
        let lines = build_grid(&domain, 16, 12);
        // First and last vertical line.
        assert_eq!(lines[0].start[0], domain.x.0);
        assert_eq!(lines[16].start[0], domain.x.1);
        // First and last horizontal line.
        assert_eq!(lines[17].start[1], domain.y.0);
        assert_eq!(lines[17 + 12].start[1], domain.y.1);
    }

    #[test]
    fn epsilon_bounds_are_inclusive() {
        assert!(sample_is_valid(TRACE_EPSILON_LOW));
        assert!(sample_is_valid(TRACE_EPSILON_HIGH));
        assert!(!sample_is_valid(TRACE_EPSILON_LOW - 1e-9));
        assert!(!sample_is_valid(TRACE_EPSILON_HIGH + 1e-9));
        assert!(!sample_is_valid(f64::NAN));
        assert!(!sample_is_valid(crate::dataset::NAN_SENTINEL));
    }

    #[test]
    fn gaps_split_runs_without_bridging() {
        let domain = Domain::FULL;
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let v = [0.5, 0.6, -1.0, 0.7, 0.8];
        let trace = build_trace(&x, &v, &domain, 5, 1).unwrap();
        assert_eq!(trace.runs.len(), 2);
        assert_eq!(trace.runs[0].len(), 2);
        assert_eq!(trace.runs[1].len(), 2);
        // No point is emitted for the sentinel sample.
        let total: usize = trace.runs.iter().map(Vec::len).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn trace_maps_into_domain_rectangle() {
        let domain = half_domain();
        let trace = build_trace(&[0.0, 4.0], &[0.0, 2.0], &domain, 4, 2);
        // 0.0 amplitude is below the epsilon; only x=4.0, v=2.0 survives.
        let trace = trace.unwrap();
        assert_eq!(trace.runs.len(), 1);
        let point = trace.runs[0][0];
        assert_relative_eq!(point[0], 0.75); // x = 4/4 mapped to domain high
        assert_relative_eq!(point[1], 0.75); // v = 2/2 mapped to domain high
    }

    #[test]
    fn all_invalid_samples_yield_no_trace() {
        let x = [0.0, 1.0];
        let v = [-1.0, 0.0];
        assert!(build_trace(&x, &v, &Domain::FULL, 2, 1).is_none());
    }

    #[test]
    fn hidden_overlay_keeps_grid_drops_trace() {
        let ds: crate::dataset::Dataset = serde_json::from_str(
            r#"{
                "xEpsi": [0.0, 1.0, 2.0, 3.0],
                "epsi": [0.5, 0.6, 0.7, 0.8],
                "columns": 2,
                "rows": 1,
                "spectralData": [[[0.1, 0.2], [0.3, 0.4]]],
                "lroFid": 40.0, "lpeFid": 40.0,
                "lroEpsi": 20.0, "lpeEpsi": 20.0
            }"#,
        )
        .unwrap();
        let domain = half_domain();
        let shown = build_overlay(&ds, &domain, true).unwrap();
        let hidden = build_overlay(&ds, &domain, false).unwrap();
        assert!(shown.trace.is_some());
        assert!(hidden.trace.is_none());
        assert_eq!(shown.grid.len(), hidden.grid.len());
    }
}

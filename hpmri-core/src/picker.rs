//! Click-to-voxel inverse mapping.
//!
//! Converts a raw pointer position inside the plot container into a
//! `(row, column)` grid cell. The calibration constants compensate for
//! chrome and padding between the container's reported bounding box and
//! the plotted grid; they are configuration, not physics.

use serde::{Deserialize, Serialize};

/// Rectangle of the plot container in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// One selected grid cell, with the container-relative click position
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    /// Click x within the plot container, after calibration offsets.
    pub x: f64,
    /// Click y within the plot container, after calibration offsets.
    pub y: f64,
    /// Grid column index. Not clamped to dataset bounds.
    pub column: i64,
    /// Grid row index. Not clamped to dataset bounds.
    pub row: i64,
}

/// Empirical calibration for the picker, injected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickCalibration {
    /// Constant x offset between container origin and the data region.
    pub offset_select_x: f64,
    /// Constant y offset between container origin and the data region.
    pub offset_select_y: f64,
    /// Correction factor on the column scale.
    pub scale_offset_x: f64,
    /// Correction factor on the row scale.
    pub scale_offset_y: f64,
    /// Horizontal margin past the offset that is outside the grid.
    pub margin_right: f64,
    /// Vertical margin past the offset that is outside the grid.
    pub margin_bottom: f64,
}

impl Default for PickCalibration {
    fn default() -> Self {
        // Tuned against the reference layout; see DESIGN.md.
        Self {
            offset_select_x: 30.0,
            offset_select_y: 50.0,
            scale_offset_x: 1.6,
            scale_offset_y: 1.6,
            margin_right: 450.0,
            margin_bottom: 370.0,
        }
    }
}

/// Map a raw click to a grid cell, or `None` when the click falls
/// outside the calibrated grid rectangle.
///
/// The derivation is `scale_x = columns / width * scale_offset_x`,
/// `column = floor(x * scale_x)`, and analogously for rows. Out-of-range
/// indices past the last row or column are possible and recorded as-is.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn pick_voxel(
    click_x: f64,
    click_y: f64,
    container: &ContainerRect,
    calibration: &PickCalibration,
    columns: u32,
    rows: u32,
) -> Option<Voxel> {
    if columns == 0 || rows == 0 || container.width <= 0.0 || container.height <= 0.0 {
        return None;
    }

    let x = click_x - container.left - calibration.offset_select_x;
    let y = click_y - container.top - calibration.offset_select_y;

    let max_x = container.width - calibration.margin_right;
    let max_y = container.height - calibration.margin_bottom;
    if x < 0.0 || y < 0.0 || x > max_x || y > max_y {
        return None;
    }

    let scale_x = f64::from(columns) / container.width * calibration.scale_offset_x;
    let scale_y = f64::from(rows) / container.height * calibration.scale_offset_y;
    let column = (x * scale_x).floor() as i64;
    let row = (y * scale_y).floor() as i64;

    Some(Voxel { x, y, column, row })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container() -> ContainerRect {
        ContainerRect {
            left: 100.0,
            top: 200.0,
            width: 800.0,
            height: 600.0,
        }
    }

    #[test]
    fn click_before_calibration_offset_is_rejected() {
        // Container-relative (0, 0) lands left of and above the data
        // region once the offsets are subtracted.
        let voxel = pick_voxel(
            100.0,
            200.0,
            &container(),
            &PickCalibration::default(),
            16,
            12,
        );
        assert_eq!(voxel, None);
    }

    #[test]
    fn click_past_margins_is_rejected() {
        let calib = PickCalibration::default();
        // Just past width - margin_right = 350 inside the data region.
        let voxel = pick_voxel(
            100.0 + calib.offset_select_x + 351.0,
            200.0 + calib.offset_select_y + 10.0,
            &container(),
            &calib,
            16,
            12,
        );
        assert_eq!(voxel, None);
    }

    #[test]
    fn click_inside_grid_maps_to_cell() {
        let calib = PickCalibration::default();
        let voxel = pick_voxel(
            100.0 + calib.offset_select_x + 100.0,
            200.0 + calib.offset_select_y + 100.0,
            &container(),
            &calib,
            16,
            12,
        )
        .unwrap();
        // scale_x = 16 / 800 * 1.6 = 0.032 -> column = floor(100 * 0.032) = 3
        assert_eq!(voxel.column, 3);
        // scale_y = 12 / 600 * 1.6 = 0.032 -> row = floor(100 * 0.032) = 3
        assert_eq!(voxel.row, 3);
        assert_eq!(voxel.x, 100.0);
        assert_eq!(voxel.y, 100.0);
    }

    #[test]
    fn indices_are_not_clamped_to_grid_bounds() {
        let calib = PickCalibration {
            offset_select_x: 0.0,
            offset_select_y: 0.0,
            scale_offset_x: 4.0,
            scale_offset_y: 4.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
        };
        let voxel = pick_voxel(899.0, 799.0, &container(), &calib, 16, 12).unwrap();
        assert!(voxel.column >= 16);
        assert!(voxel.row >= 12);
    }

    #[test]
    fn degenerate_container_is_rejected() {
        let rect = ContainerRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(
            pick_voxel(10.0, 10.0, &rect, &PickCalibration::default(), 16, 12),
            None
        );
    }
}

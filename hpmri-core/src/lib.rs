//! hpmri-core: Dataset model and mapping logic for the HP-MRI EPSI viewer.
//!
//! This crate holds everything with algorithmic content and nothing that
//! touches a window: the wire-format dataset, the field-of-view to plot
//! domain mapping, overlay geometry, click-to-voxel picking, selection
//! groups, the view-state reducer, and fetch sequencing.

pub mod dataset;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod picker;
pub mod selection;
pub mod state;

pub use dataset::Dataset;
pub use domain::{compute_domain, Domain, DomainParams};
pub use error::{Error, Result};
pub use fetch::RequestLedger;
pub use grid::{build_grid, build_overlay, build_trace, GridLine, Overlay, Trace};
pub use picker::{pick_voxel, ContainerRect, PickCalibration, Voxel};
pub use selection::{SelectionGroup, SelectionState};
pub use state::{reduce, Action, Effect, MagnetType, PlotShift, ViewState, PAN_STEP};

//! View state and its reducer.
//!
//! The controller state is a single immutable record; every user action
//! goes through [`reduce`], which returns the next state plus the fetch
//! effect (if any) the caller must run. This keeps fetch triggering
//! testable and leaves no scattered ad-hoc mutation.

use serde::{Deserialize, Serialize};

use crate::selection::SelectionGroup;

/// Pixel step applied by one pan action.
pub const PAN_STEP: i32 = 10;

/// Pixel-space pan offset. Mutated only in [`PAN_STEP`] increments or
/// reset to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlotShift {
    pub x: i32,
    pub y: i32,
}

/// Scanner magnet families the backend can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagnetType {
    #[default]
    Hupc,
    Clinical,
    MrSolutions,
}

impl MagnetType {
    /// All variants, for UI selectors.
    pub const ALL: [Self; 3] = [Self::Hupc, Self::Clinical, Self::MrSolutions];

    /// Label used on the wire and in the UI.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hupc => "HUPC",
            Self::Clinical => "Clinical",
            Self::MrSolutions => "MR Solutions",
        }
    }
}

/// Immutable snapshot of the viewer's controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Anatomical slice index.
    pub slice: u32,
    /// Contrast factor forwarded to the proton endpoint.
    pub contrast: f64,
    /// EPSI dataset index.
    pub dataset_index: u32,
    /// Display threshold forwarded to the dataset endpoint.
    pub threshold: f64,
    /// Which magnet's processing chain the backend should use.
    pub magnet_type: MagnetType,
    /// Current pan offset.
    pub plot_shift: PlotShift,
    /// Whether the spectral trace is drawn.
    pub overlay_visible: bool,
    /// Whether clicks are routed to the voxel picker.
    pub selecting: bool,
    /// Group receiving newly picked voxels.
    pub active_group: SelectionGroup,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            slice: 1,
            contrast: 1.0,
            dataset_index: 1,
            threshold: 0.2,
            magnet_type: MagnetType::default(),
            plot_shift: PlotShift::default(),
            overlay_visible: true,
            selecting: false,
            active_group: SelectionGroup::default(),
        }
    }
}

/// Discrete user actions on the view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SetSlice(u32),
    SetContrast(f64),
    SetDatasetIndex(u32),
    SetThreshold(f64),
    SetMagnetType(MagnetType),
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ResetPlotShift,
    SetOverlayVisible(bool),
    SetSelecting(bool),
    SetActiveGroup(SelectionGroup),
}

/// What the caller must do after applying an action.
///
/// Pan and selection actions never fetch; they only re-run the domain
/// mapper locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchProton,
    FetchDataset,
}

/// Apply one action, returning the next state and the required effect.
#[must_use]
pub fn reduce(state: &ViewState, action: Action) -> (ViewState, Effect) {
    let mut next = state.clone();
    let effect = match action {
        Action::SetSlice(slice) => {
            next.slice = slice;
            Effect::FetchProton
        }
        Action::SetContrast(contrast) => {
            next.contrast = contrast;
            Effect::FetchProton
        }
        Action::SetDatasetIndex(index) => {
            next.dataset_index = index;
            Effect::FetchDataset
        }
        Action::SetThreshold(threshold) => {
            next.threshold = threshold;
            Effect::FetchDataset
        }
        Action::SetMagnetType(magnet_type) => {
            next.magnet_type = magnet_type;
            Effect::FetchDataset
        }
        Action::PanLeft => {
            next.plot_shift.x -= PAN_STEP;
            Effect::None
        }
        Action::PanRight => {
            next.plot_shift.x += PAN_STEP;
            Effect::None
        }
        Action::PanUp => {
            next.plot_shift.y -= PAN_STEP;
            Effect::None
        }
        Action::PanDown => {
            next.plot_shift.y += PAN_STEP;
            Effect::None
        }
        Action::ResetPlotShift => {
            next.plot_shift = PlotShift::default();
            Effect::None
        }
        Action::SetOverlayVisible(visible) => {
            next.overlay_visible = visible;
            Effect::FetchDataset
        }
        Action::SetSelecting(selecting) => {
            next.selecting = selecting;
            Effect::None
        }
        Action::SetActiveGroup(group) => {
            next.active_group = group;
            Effect::None
        }
    };
    (next, effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_and_contrast_refetch_proton() {
        let state = ViewState::default();
        let (next, effect) = reduce(&state, Action::SetSlice(7));
        assert_eq!(next.slice, 7);
        assert_eq!(effect, Effect::FetchProton);

        let (next, effect) = reduce(&state, Action::SetContrast(2.5));
        assert_eq!(next.contrast, 2.5);
        assert_eq!(effect, Effect::FetchProton);
    }

    #[test]
    fn dataset_parameters_refetch_dataset() {
        let state = ViewState::default();
        for action in [
            Action::SetDatasetIndex(3),
            Action::SetThreshold(0.4),
            Action::SetMagnetType(MagnetType::Clinical),
            Action::SetOverlayVisible(false),
        ] {
            let (_, effect) = reduce(&state, action);
            assert_eq!(effect, Effect::FetchDataset);
        }
    }

    #[test]
    fn pan_steps_move_by_ten_without_fetching() {
        let state = ViewState::default();
        let (next, effect) = reduce(&state, Action::PanRight);
        assert_eq!(next.plot_shift, PlotShift { x: 10, y: 0 });
        assert_eq!(effect, Effect::None);

        let (next, effect) = reduce(&next, Action::PanDown);
        assert_eq!(next.plot_shift, PlotShift { x: 10, y: 10 });
        assert_eq!(effect, Effect::None);

        let (next, _) = reduce(&next, Action::PanLeft);
        let (next, _) = reduce(&next, Action::PanUp);
        assert_eq!(next.plot_shift, PlotShift::default());
    }

    #[test]
    fn reset_restores_origin() {
        let mut state = ViewState::default();
        state.plot_shift = PlotShift { x: 50, y: -30 };
        let (next, effect) = reduce(&state, Action::ResetPlotShift);
        assert_eq!(next.plot_shift, PlotShift::default());
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn selection_toggles_do_not_fetch() {
        let state = ViewState::default();
        let (next, effect) = reduce(&state, Action::SetSelecting(true));
        assert!(next.selecting);
        assert_eq!(effect, Effect::None);

        let (next, effect) = reduce(&next, Action::SetActiveGroup(SelectionGroup::B));
        assert_eq!(next.active_group, SelectionGroup::B);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn reducer_leaves_input_untouched() {
        let state = ViewState::default();
        let before = state.clone();
        let _ = reduce(&state, Action::PanRight);
        assert_eq!(state, before);
    }
}

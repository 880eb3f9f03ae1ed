//! Voxel selection groups.

use crate::picker::Voxel;

/// Which selection bucket a picked voxel lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionGroup {
    #[default]
    A,
    B,
}

impl SelectionGroup {
    /// User-facing label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// The two voxel groups, in click order.
///
/// Selections deliberately survive dataset replacement; recorded indices
/// may refer to a grid that has since changed (see DESIGN.md).
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    group_a: Vec<Voxel>,
    group_b: Vec<Voxel>,
}

impl SelectionState {
    /// Append a voxel to the given group. No deduplication.
    pub fn record(&mut self, group: SelectionGroup, voxel: Voxel) {
        match group {
            SelectionGroup::A => self.group_a.push(voxel),
            SelectionGroup::B => self.group_b.push(voxel),
        }
    }

    /// Voxels in a group, insertion-ordered.
    #[must_use]
    pub fn group(&self, group: SelectionGroup) -> &[Voxel] {
        match group {
            SelectionGroup::A => &self.group_a,
            SelectionGroup::B => &self.group_b,
        }
    }

    /// Drop all recorded voxels in both groups.
    pub fn clear(&mut self) {
        self.group_a.clear();
        self.group_b.clear();
    }

    /// Total voxels across both groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.group_a.len() + self.group_b.len()
    }

    /// Whether no voxel has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group_a.is_empty() && self.group_b.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voxel(column: i64, row: i64) -> Voxel {
        Voxel {
            x: 0.0,
            y: 0.0,
            column,
            row,
        }
    }

    #[test]
    fn records_preserve_click_order_per_group() {
        let mut state = SelectionState::default();
        state.record(SelectionGroup::A, voxel(1, 1));
        state.record(SelectionGroup::B, voxel(2, 2));
        state.record(SelectionGroup::A, voxel(3, 3));

        let a: Vec<_> = state.group(SelectionGroup::A).iter().map(|v| v.column).collect();
        assert_eq!(a, vec![1, 3]);
        assert_eq!(state.group(SelectionGroup::B).len(), 1);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut state = SelectionState::default();
        state.record(SelectionGroup::A, voxel(4, 4));
        state.record(SelectionGroup::A, voxel(4, 4));
        assert_eq!(state.group(SelectionGroup::A).len(), 2);
    }

    #[test]
    fn clear_empties_both_groups() {
        let mut state = SelectionState::default();
        state.record(SelectionGroup::A, voxel(1, 1));
        state.record(SelectionGroup::B, voxel(2, 2));
        state.clear();
        assert!(state.is_empty());
    }
}

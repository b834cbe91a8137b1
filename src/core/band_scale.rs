use indexmap::IndexMap;

use crate::core::row_model::{RowKey, RowModel};
use crate::error::{GanttError, GanttResult};

/// Maps row keys to vertical band offsets, one fixed-height band per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBandScale {
    positions: IndexMap<RowKey, usize>,
    row_height: f64,
}

impl RowBandScale {
    pub fn new(rows: &RowModel, row_height: f64) -> GanttResult<Self> {
        if !row_height.is_finite() || row_height <= 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "row height must be finite and > 0 (got {row_height})"
            )));
        }
        let positions = rows
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (row.key().clone(), index))
            .collect();
        Ok(Self {
            positions,
            row_height,
        })
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.row_height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.len() as f64 * self.row_height
    }

    #[must_use]
    pub fn index_of(&self, key: &RowKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    #[must_use]
    pub fn band_top(&self, index: usize) -> f64 {
        index as f64 * self.row_height
    }
}

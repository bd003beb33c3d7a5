use super::constants::{GRID_PADDING_PX, GRID_SPACING_PX, SENTINEL_HEIGHT_PX};
use gallery_core::intersection::TargetRect;

/// Auto-fit grid geometry for a given slot count and viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(in crate::app) struct GridLayout {
    pub(in crate::app) columns: usize,
    pub(in crate::app) rows: usize,
    pub(in crate::app) tile_height: f32,
}

impl GridLayout {
    pub(in crate::app) fn measure(
        slot_count: usize,
        viewport_width: f32,
        tile_min_width: f32,
        tile_height: f32,
    ) -> Self {
        let available = (viewport_width - 2.0 * GRID_PADDING_PX).max(0.0);
        let columns = if available.is_finite() && tile_min_width > 0.0 {
            ((available / tile_min_width).floor() as usize).max(1)
        } else {
            1
        };
        GridLayout {
            columns,
            rows: slot_count.div_ceil(columns),
            tile_height,
        }
    }

    /// Sentinel placement in content coordinates, directly after the last row.
    pub(in crate::app) fn sentinel_rect(&self) -> TargetRect {
        let rows = self.rows as f32;
        TargetRect {
            top: GRID_PADDING_PX + rows * (self.tile_height + GRID_SPACING_PX),
            height: SENTINEL_HEIGHT_PX,
        }
    }
}

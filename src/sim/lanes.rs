//! Lane layout
//!
//! The playfield is split into equal-width vertical lanes, each wide enough
//! for one digit plus padding. Layout is cached and only rebuilt when a
//! resize would change the lane count, so sub-pixel resizes don't thrash
//! in-flight spawn columns.

use crate::consts::{DIGIT_SIZE, LANE_PADDING};

/// Spawn-column geometry for the current playfield width
#[derive(Debug, Clone, Default)]
pub struct LaneLayout {
    /// Center x of each lane. Empty when the playfield is too narrow.
    lanes: Vec<f32>,
    /// Zero until the first computation
    lane_width: f32,
}

impl LaneLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lane centers, leftmost first
    pub fn centers(&self) -> &[f32] {
        &self.lanes
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Recompute the layout if `width` would change the lane count
    pub fn reconcile(&mut self, width: f32) {
        if self.lane_width == 0.0 {
            self.rebuild(width);
            return;
        }
        let expected = (width / self.lane_width).floor().max(0.0) as usize;
        if self.lanes.len() != expected {
            self.rebuild(width);
        }
    }

    fn rebuild(&mut self, width: f32) {
        self.lane_width = DIGIT_SIZE + LANE_PADDING;
        let count = (width / self.lane_width).floor().max(0.0) as usize;

        self.lanes.clear();
        for i in 0..count {
            self.lanes.push(i as f32 * self.lane_width + self.lane_width / 2.0);
        }
        log::debug!("lane layout rebuilt: {} lanes for width {}", count, width);
    }
}

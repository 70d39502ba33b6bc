//! Motion metric extraction: one roll angle per (category, side) per timestep.

use contracts::{BodySide, MovementCategory, RecordingSlot};
use sync_engine::AlignedTimestep;

/// Scalar feature of a category on one side: the roll angle of the
/// category's source role.
///
/// Paired categories (flexion/extension, abduction/adduction, the two
/// rotations) read the same role.
#[inline]
pub fn extract(category: MovementCategory, side: BodySide, step: &AlignedTimestep<'_>) -> f64 {
    step.roll(category.source_role(side))
}

/// Twelve append-only angle lists, one per (category, side)
#[derive(Debug, Clone, Default)]
pub struct AngleAccumulators {
    lists: [[Vec<f64>; 2]; 6],
}

impl AngleAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value per (category, side) fed by `slot`
    pub fn record_timestep(&mut self, slot: RecordingSlot, step: &AlignedTimestep<'_>) {
        for &category in slot.categories() {
            for side in BodySide::ALL {
                self.push(category, side, extract(category, side, step));
            }
        }
    }

    pub fn push(&mut self, category: MovementCategory, side: BodySide, value: f64) {
        self.lists[category.index()][side.index()].push(value);
    }

    pub fn get(&self, category: MovementCategory, side: BodySide) -> &[f64] {
        &self.lists[category.index()][side.index()]
    }

    /// Mutable view for in-place sorting during aggregation
    pub fn get_mut(&mut self, category: MovementCategory, side: BodySide) -> &mut [f64] {
        &mut self.lists[category.index()][side.index()]
    }

    pub fn len(&self, category: MovementCategory, side: BodySide) -> usize {
        self.get(category, side).len()
    }

    /// True when every list is empty
    pub fn is_empty(&self) -> bool {
        self.lists.iter().flatten().all(Vec::is_empty)
    }
}

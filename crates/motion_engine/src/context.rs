//! Invocation-scoped analysis state.

use contracts::{
    AlignmentPolicy, BodySide, ContractError, MetricKey, MovementCategory, RangeOfMotionReport,
    RecordingSlot, SensorSample,
};
use observability::{record_accumulator_len, RunningStats, StatsSummary};
use serde::Serialize;
use sync_engine::StreamAligner;
use tracing::debug;

use crate::aggregator::aggregate;
use crate::extractor::AngleAccumulators;

/// Owns everything one analysis call accumulates.
///
/// Built fresh for each call and consumed by [`AnalysisContext::into_report`],
/// so nothing survives between calls.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    aligner: StreamAligner,
    accumulators: AngleAccumulators,
    timesteps: [usize; 4],
}

/// Distribution of one accumulator before trimming
#[derive(Debug, Clone, Serialize)]
pub struct AccumulatorSummary {
    pub key: MetricKey,
    pub label: String,
    pub stats: StatsSummary,
}

impl AnalysisContext {
    pub fn new(policy: AlignmentPolicy) -> Self {
        Self {
            aligner: StreamAligner::new(policy),
            accumulators: AngleAccumulators::new(),
            timesteps: [0; 4],
        }
    }

    /// Align one recording and feed its timesteps into the slot's categories.
    ///
    /// Returns the number of aligned timesteps.
    pub fn process_slot(
        &mut self,
        slot: RecordingSlot,
        samples: &[SensorSample],
    ) -> Result<usize, ContractError> {
        let stream = self.aligner.align(slot, samples)?;

        let mut count = 0;
        for step in stream.timesteps() {
            self.accumulators.record_timestep(slot, &step);
            count += 1;
        }

        self.timesteps[slot.number() as usize - 1] += count;
        debug!(slot = %slot, timesteps = count, "recording accumulated");
        Ok(count)
    }

    pub fn accumulators(&self) -> &AngleAccumulators {
        &self.accumulators
    }

    /// Timesteps accumulated from a slot
    pub fn timesteps(&self, slot: RecordingSlot) -> usize {
        self.timesteps[slot.number() as usize - 1]
    }

    /// Per-accumulator statistics in report order
    pub fn summaries(&self) -> Vec<AccumulatorSummary> {
        MovementCategory::ALL
            .into_iter()
            .flat_map(|category| BodySide::ALL.map(|side| (category, side)))
            .map(|(category, side)| {
                let key = MetricKey::absolute(category, side);
                let stats: RunningStats =
                    self.accumulators.get(category, side).iter().copied().collect();
                AccumulatorSummary {
                    label: key.label(),
                    key,
                    stats: stats.summary(),
                }
            })
            .collect()
    }

    /// Reduce the accumulators into the final report
    pub fn into_report(mut self) -> Result<RangeOfMotionReport, ContractError> {
        for category in MovementCategory::ALL {
            for side in BodySide::ALL {
                record_accumulator_len(
                    MetricKey::absolute(category, side),
                    self.accumulators.len(category, side),
                );
            }
        }
        aggregate(&mut self.accumulators)
    }
}

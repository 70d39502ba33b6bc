//! Aligned view over a parsed recording.

use contracts::{RecordingSlot, SensorRole, SensorSample};

use crate::aligner::RoleOffsets;

/// One six-tuple of samples, one per role, at the same position in each block
#[derive(Debug, Clone, Copy)]
pub struct AlignedTimestep<'a> {
    samples: [&'a SensorSample; 6],
}

impl<'a> AlignedTimestep<'a> {
    /// Sample of a role
    #[inline]
    pub fn sample(&self, role: SensorRole) -> &'a SensorSample {
        self.samples[role.index()]
    }

    /// Roll angle of a role
    #[inline]
    pub fn roll(&self, role: SensorRole) -> f64 {
        self.sample(role).orientation.roll
    }

    /// Samples in `SensorRole::ALL` order
    pub fn samples(&self) -> &[&'a SensorSample; 6] {
        &self.samples
    }
}

/// Recording split into `rem` aligned timesteps.
///
/// Bounds were checked by the aligner, so indexing cannot fail.
#[derive(Debug, Clone)]
pub struct AlignedStream<'a> {
    slot: RecordingSlot,
    samples: &'a [SensorSample],
    offsets: RoleOffsets,
}

impl<'a> AlignedStream<'a> {
    pub(crate) fn new(slot: RecordingSlot, samples: &'a [SensorSample], offsets: RoleOffsets) -> Self {
        Self {
            slot,
            samples,
            offsets,
        }
    }

    pub fn slot(&self) -> RecordingSlot {
        self.slot
    }

    /// Number of aligned timesteps
    pub fn rem(&self) -> usize {
        self.offsets.rem
    }

    pub fn offsets(&self) -> &RoleOffsets {
        &self.offsets
    }

    pub fn missing_roles(&self) -> Vec<SensorRole> {
        self.offsets.missing_roles()
    }

    /// Timestep `t`, or None past `rem`
    pub fn timestep(&self, t: usize) -> Option<AlignedTimestep<'a>> {
        if t >= self.offsets.rem {
            return None;
        }
        let all = self.samples;
        let samples = SensorRole::ALL.map(|role| &all[self.offsets.offset(role) + t]);
        Some(AlignedTimestep { samples })
    }

    /// All timesteps in order
    pub fn timesteps(&self) -> impl Iterator<Item = AlignedTimestep<'a>> + '_ {
        (0..self.offsets.rem).filter_map(move |t| self.timestep(t))
    }
}

//! Role offset detection and stream alignment.

use contracts::{AlignmentPolicy, ContractError, RecordingSlot, SensorRole, SensorSample};
use metrics::counter;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::stream::AlignedStream;

/// Block start index of each role plus the aligned length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleOffsets {
    /// Number of aligned timesteps (index of the first name change)
    pub rem: usize,
    offsets: [usize; 6],
    observed: [bool; 6],
}

impl RoleOffsets {
    /// Scan a recording for name changes.
    ///
    /// Every index `i >= 1` whose name differs from the previous row is a
    /// block boundary. The first boundary fixes `rem`; a boundary whose name
    /// carries a role sets that role's offset, later boundaries overwriting
    /// earlier ones. The first block's role starts at offset 0. Roles never
    /// seen keep offset 0.
    pub fn scan(samples: &[SensorSample]) -> Self {
        let mut scan = Self::default();

        if let Some(role) = samples.first().and_then(|s| s.role) {
            scan.observed[role.index()] = true;
        }

        let mut first_boundary = None;
        for (i, pair) in samples.windows(2).enumerate() {
            let (prev, cur) = (&pair[0], &pair[1]);
            if cur.name == prev.name {
                continue;
            }
            let index = i + 1;
            first_boundary.get_or_insert(index);
            if let Some(role) = cur.role {
                scan.offsets[role.index()] = index;
                scan.observed[role.index()] = true;
            }
        }

        scan.rem = first_boundary.unwrap_or(0);
        scan
    }

    /// Start index of a role's block
    pub fn offset(&self, role: SensorRole) -> usize {
        self.offsets[role.index()]
    }

    /// Whether the role's block was located
    pub fn is_observed(&self, role: SensorRole) -> bool {
        self.observed[role.index()]
    }

    /// Roles that kept the default offset
    pub fn missing_roles(&self) -> Vec<SensorRole> {
        SensorRole::ALL
            .into_iter()
            .filter(|role| !self.is_observed(*role))
            .collect()
    }
}

/// Splits a flat recording into role-aligned timesteps
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamAligner {
    policy: AlignmentPolicy,
}

impl StreamAligner {
    pub fn new(policy: AlignmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AlignmentPolicy {
        self.policy
    }

    /// Align one recording.
    ///
    /// # Errors
    /// - `MissingRoles` under `AlignmentPolicy::Strict` when a role was never located
    /// - `AlignmentOutOfRange` when a role's block is shorter than `rem`
    #[instrument(
        level = "debug",
        name = "stream_align",
        skip(self, slot, samples),
        fields(slot = %slot, samples = samples.len())
    )]
    pub fn align<'a>(
        &self,
        slot: RecordingSlot,
        samples: &'a [SensorSample],
    ) -> Result<AlignedStream<'a>, ContractError> {
        let offsets = RoleOffsets::scan(samples);
        let missing = offsets.missing_roles();

        if !missing.is_empty() {
            match self.policy {
                AlignmentPolicy::Strict => {
                    return Err(ContractError::MissingRoles {
                        slot: slot.number(),
                        missing,
                    });
                }
                AlignmentPolicy::Lenient => {
                    warn!(
                        slot = %slot,
                        missing = ?missing,
                        "sensor roles not found, using offset 0"
                    );
                }
            }
        }

        check_bounds(slot, &offsets, samples.len())?;

        debug!(
            slot = %slot,
            rem = offsets.rem,
            offsets = ?offsets.offsets,
            "recording aligned"
        );
        counter!("rom_timesteps_aligned_total", "slot" => slot.number().to_string())
            .increment(offsets.rem as u64);

        Ok(AlignedStream::new(slot, samples, offsets))
    }
}

/// Every role must have `rem` samples from its offset
fn check_bounds(
    slot: RecordingSlot,
    offsets: &RoleOffsets,
    len: usize,
) -> Result<(), ContractError> {
    if offsets.rem == 0 {
        return Ok(());
    }
    for role in SensorRole::ALL {
        let offset = offsets.offset(role);
        let last = offset + offsets.rem - 1;
        if last >= len {
            let timestep = len.saturating_sub(offset);
            return Err(ContractError::AlignmentOutOfRange {
                slot: slot.number(),
                role,
                timestep,
                index: offset + timestep,
                len,
            });
        }
    }
    Ok(())
}

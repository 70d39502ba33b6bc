//! `inspect` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{AlignmentPolicy, MovementCategory, SensorRole, SensorSample};
use observability::{RunningStats, StatsSummary};
use sync_engine::{AlignedStream, StreamAligner};

use super::read_recording;
use crate::cli::InspectArgs;
use crate::error::CliError;

/// Recording layout for JSON output
#[derive(Serialize)]
struct RecordingInfo {
    file: String,
    slot: u8,
    samples: usize,
    unrecognised_rows: usize,
    rem: usize,
    categories: Vec<MovementCategory>,
    roles: Vec<RoleInfo>,
}

#[derive(Serialize)]
struct RoleInfo {
    role: String,
    observed: bool,
    offset: usize,
    roll: StatsSummary,
}

/// Execute the `inspect` command
pub async fn run_inspect(args: &InspectArgs) -> Result<()> {
    info!(file = %args.file.display(), slot = %args.slot, "Inspecting recording");

    let text = read_recording(args.slot, &args.file).await?;
    let samples = ingestion::parse_recording(args.slot, &text).map_err(CliError::from)?;

    let policy = if args.strict {
        AlignmentPolicy::Strict
    } else {
        AlignmentPolicy::Lenient
    };
    let stream = StreamAligner::new(policy)
        .align(args.slot, &samples)
        .map_err(CliError::from)?;

    let info = build_recording_info(args, &samples, &stream);

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize recording info")?;
        println!("{}", json);
    } else {
        print_recording_info(&info);
    }

    Ok(())
}

fn build_recording_info(
    args: &InspectArgs,
    samples: &[SensorSample],
    stream: &AlignedStream<'_>,
) -> RecordingInfo {
    let offsets = stream.offsets();

    let roles = SensorRole::ALL
        .iter()
        .map(|&role| {
            let roll: RunningStats = stream.timesteps().map(|step| step.roll(role)).collect();
            RoleInfo {
                role: role.to_string(),
                observed: offsets.is_observed(role),
                offset: offsets.offset(role),
                roll: roll.summary(),
            }
        })
        .collect();

    RecordingInfo {
        file: args.file.display().to_string(),
        slot: args.slot.number(),
        samples: samples.len(),
        unrecognised_rows: samples.iter().filter(|s| s.role.is_none()).count(),
        rem: stream.rem(),
        categories: args.slot.categories().to_vec(),
        roles,
    }
}

fn print_recording_info(info: &RecordingInfo) {
    println!("\n=== Recording {} ===\n", info.slot);
    println!("  File: {}", info.file);
    println!("  Samples: {}", info.samples);
    if info.unrecognised_rows > 0 {
        println!("  Unrecognised rows: {}", info.unrecognised_rows);
    }
    println!("  Aligned timesteps: {}", info.rem);

    let categories: Vec<String> = info.categories.iter().map(|c| c.to_string()).collect();
    println!("  Categories: {}", categories.join(", "));

    println!("\nRoles:");
    for role in &info.roles {
        let marker = if role.observed { " " } else { "!" };
        println!(
            "  {}{} offset={:<6} roll: {}",
            marker, role.role, role.offset, role.roll
        );
    }
    println!();
}

//! `analyze` command implementation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use config_loader::ConfigLoader;
use contracts::{
    AlignmentPolicy, AnalysisConfig, ConfigVersion, MetricKey, MetricKind, OutputConfig,
    OutputFormat, RangeOfMotionReport, RecordingSlot, ReportData, SessionBlueprint, SessionInputs,
};
use motion_engine::{AccumulatorSummary, MotionEngine};

use super::read_recording;
use crate::cli::AnalyzeArgs;
use crate::error::CliError;

/// Report for JSON output
#[derive(Serialize)]
struct AnalysisOutput<'a> {
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<String>,
    inputs: Vec<String>,
    alignment_policy: AlignmentPolicy,
    metrics: &'a RangeOfMotionReport,
    report_data: ReportData,
    #[serde(skip_serializing_if = "Option::is_none")]
    accumulators: Option<Vec<AccumulatorSummary>>,
}

/// Execute the `analyze` command
pub async fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let blueprint = resolve_session(args)?;
    info!(
        policy = ?blueprint.analysis.alignment_policy,
        flexion = %blueprint.inputs.flexion.display(),
        extension = %blueprint.inputs.extension.display(),
        abduction = %blueprint.inputs.abduction.display(),
        rotation = %blueprint.inputs.rotation.display(),
        "Session resolved"
    );

    let inputs = &blueprint.inputs;
    // 并发读取，按槽位顺序报告第一个失败
    let (flexion, extension, abduction, rotation) = tokio::join!(
        read_recording(RecordingSlot::Flexion, &inputs.flexion),
        read_recording(RecordingSlot::Extension, &inputs.extension),
        read_recording(RecordingSlot::Abduction, &inputs.abduction),
        read_recording(RecordingSlot::Rotation, &inputs.rotation),
    );
    let texts = [flexion?, extension?, abduction?, rotation?];
    let blobs = texts.each_ref().map(String::as_str);

    let engine = MotionEngine::new(blueprint.analysis.clone());
    let (report, accumulators) = if args.stats {
        let (report, summaries) = engine
            .analyze_with_summaries(blobs)
            .map_err(CliError::from)?;
        (report, Some(summaries))
    } else {
        (engine.analyze(blobs).map_err(CliError::from)?, None)
    };

    let as_json = args.json || blueprint.output.format == OutputFormat::Json;
    if as_json {
        let output = AnalysisOutput {
            generated_at: Utc::now(),
            session: args.config.as_ref().map(|p| p.display().to_string()),
            inputs: inputs
                .paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            alignment_policy: blueprint.analysis.alignment_policy,
            metrics: &report,
            report_data: report.to_report_data(),
            accumulators,
        };
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        let precision = args.precision.unwrap_or(blueprint.output.precision);
        print_report(&report, precision);
        if let Some(summaries) = accumulators {
            print_accumulators(&summaries);
        }
    }

    Ok(())
}

/// Build the session from `--config` or the four recording flags
fn resolve_session(args: &AnalyzeArgs) -> Result<SessionBlueprint, CliError> {
    let mut blueprint = match (&args.config, &args.flexion, &args.extension, &args.abduction, &args.rotation) {
        (Some(path), ..) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path));
            }
            ConfigLoader::load_from_path(path)?
        }
        (None, Some(flexion), Some(extension), Some(abduction), Some(rotation)) => {
            let blueprint = SessionBlueprint {
                version: ConfigVersion::V1,
                inputs: SessionInputs {
                    flexion: flexion.clone(),
                    extension: extension.clone(),
                    abduction: abduction.clone(),
                    rotation: rotation.clone(),
                },
                analysis: AnalysisConfig::default(),
                output: OutputConfig::default(),
            };
            ConfigLoader::validate(&blueprint)?;
            blueprint
        }
        _ => return Err(CliError::MissingInputs),
    };

    if args.strict {
        blueprint.analysis.alignment_policy = AlignmentPolicy::Strict;
    }
    Ok(blueprint)
}

fn print_report(report: &RangeOfMotionReport, precision: usize) {
    println!("\n=== Range of Motion Report ===\n");
    println!(
        "  {:<6}  {:>10}  {:>10}  {:>10}",
        "metric", "measured", "standard", "deviation"
    );

    for key in MetricKey::ordered(MetricKind::Absolute) {
        let measured = report.get_key(key).unwrap_or(0.0);
        let deviation = report
            .get_key(MetricKey::deviation(key.category, key.side))
            .unwrap_or(0.0);
        println!(
            "  {}  {:>10.prec$}  {:>10.prec$}  {:>10.prec$}",
            key.label(),
            measured,
            key.category.clinical_standard(),
            deviation,
            prec = precision
        );
    }
    println!();
}

fn print_accumulators(summaries: &[AccumulatorSummary]) {
    println!("=== Accumulated Angles ===\n");
    for summary in summaries {
        println!("  {}: {}", summary.label, summary.stats);
    }
    println!();
}

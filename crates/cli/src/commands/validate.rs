//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::{AlignmentPolicy, RecordingSlot, SessionBlueprint};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SessionSummary>,
}

#[derive(Serialize)]
struct SessionSummary {
    version: String,
    inputs: Vec<String>,
    alignment_policy: AlignmentPolicy,
    output_format: String,
    precision: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating session");

    let result = validate_session(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Session validation failed")
    }
}

fn validate_session(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    // Check file exists
    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    // Try to load and validate
    let blueprint = match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => blueprint,
        Err(e) => {
            return ValidationResult {
                valid: false,
                config_path,
                error: Some(e.to_string()),
                warnings: None,
                summary: None,
            }
        }
    };

    let missing = missing_inputs(&blueprint);
    let mut warnings = collect_warnings(&blueprint);
    let error = if args.check_inputs && !missing.is_empty() {
        Some(missing.join("; "))
    } else {
        warnings.extend(missing);
        None
    };

    ValidationResult {
        valid: error.is_none(),
        config_path,
        error,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
        summary: Some(SessionSummary {
            version: format!("{:?}", blueprint.version),
            inputs: blueprint
                .inputs
                .paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            alignment_policy: blueprint.analysis.alignment_policy,
            output_format: format!("{:?}", blueprint.output.format),
            precision: blueprint.output.precision,
        }),
    }
}

/// Recordings named by the session that do not exist
fn missing_inputs(blueprint: &SessionBlueprint) -> Vec<String> {
    RecordingSlot::ALL
        .into_iter()
        .filter(|slot| !blueprint.inputs.path(*slot).exists())
        .map(|slot| {
            format!(
                "Recording {} not found: {}",
                slot,
                blueprint.inputs.path(slot).display()
            )
        })
        .collect()
}

/// Collect session warnings (non-fatal issues)
fn collect_warnings(blueprint: &SessionBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.analysis.alignment_policy == AlignmentPolicy::Lenient {
        warnings.push(
            "analysis.alignment_policy is lenient - recordings missing a sensor role use offset 0"
                .to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Session is valid: {}", result.config_path);
    } else {
        println!("✗ Session is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }

    if let Some(ref summary) = result.summary {
        println!("\n  Version: {}", summary.version);
        for (slot, input) in RecordingSlot::ALL.iter().zip(&summary.inputs) {
            println!("  Recording {}: {}", slot, input);
        }
        println!("  Alignment policy: {:?}", summary.alignment_policy);
        println!(
            "  Output: {} ({} decimals)",
            summary.output_format, summary.precision
        );
    }

    if let Some(ref warnings) = result.warnings {
        println!("\n⚠ Warnings:");
        for warning in warnings {
            println!("  - {}", warning);
        }
    }
}

//! # Config Loader
//!
//! Session file loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON session files
//! - Validate session legality
//! - Resolve input paths relative to the session file
//! - Generate `SessionBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("session.toml")).unwrap();
//! println!("Flexion: {}", blueprint.inputs.flexion.display());
//! ```

mod parser;
mod validator;

pub use contracts::SessionBlueprint;
pub use parser::ConfigFormat;
pub use validator::MAX_PRECISION;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Session file loader
///
/// Provides static methods to load a session from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a session from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// Relative input paths are resolved against the session file's directory.
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SessionBlueprint, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let mut blueprint = Self::load_from_str(&content, format)?;

        if let Some(base) = path.parent() {
            blueprint.inputs.resolve_relative_to(base);
        }

        debug!(
            path = %path.display(),
            format = ?format,
            policy = ?blueprint.analysis.alignment_policy,
            "session loaded"
        );
        Ok(blueprint)
    }

    /// Load a session from string
    ///
    /// Input paths are kept as written.
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<SessionBlueprint, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Validate a blueprint built elsewhere (e.g. from command-line flags)
    pub fn validate(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
        validator::validate(blueprint)
    }

    /// Serialize SessionBlueprint to TOML string
    pub fn to_toml(blueprint: &SessionBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize SessionBlueprint to JSON string
    pub fn to_json(blueprint: &SessionBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer session file format from extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read session file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate session content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<SessionBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::AlignmentPolicy;
    use std::path::PathBuf;

    const MINIMAL_TOML: &str = r#"
[inputs]
flexion = "flexion.csv"
extension = "extension.csv"
abduction = "abduction.csv"
rotation = "/archive/rotation.csv"

[analysis]
alignment_policy = "strict"
"#;

    #[test]
    fn test_load_from_str_toml() {
        let result = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.inputs.flexion, PathBuf::from("flexion.csv"));
        assert_eq!(bp.analysis.alignment_policy, AlignmentPolicy::Strict);
    }

    #[test]
    fn test_round_trip_toml() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let serialized = ConfigLoader::to_toml(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&serialized, ConfigFormat::Toml).unwrap();
        assert_eq!(bp.inputs.paths(), bp2.inputs.paths());
        assert_eq!(bp.analysis, bp2.analysis);
    }

    #[test]
    fn test_round_trip_json() {
        let bp = ConfigLoader::load_from_str(MINIMAL_TOML, ConfigFormat::Toml).unwrap();
        let json = ConfigLoader::to_json(&bp).unwrap();
        let bp2 = ConfigLoader::load_from_str(&json, ConfigFormat::Json).unwrap();
        assert_eq!(bp.inputs.paths(), bp2.inputs.paths());
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
[inputs]
flexion = "same.csv"
extension = "same.csv"
abduction = "c.csv"
rotation = "d.csv"
"#;
        let result = ConfigLoader::load_from_str(content, ConfigFormat::Toml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_load_from_path_resolves_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, MINIMAL_TOML).unwrap();

        let bp = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(bp.inputs.flexion, dir.path().join("flexion.csv"));
        assert_eq!(bp.inputs.rotation, PathBuf::from("/archive/rotation.csv"));
    }

    #[test]
    fn test_load_from_path_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, MINIMAL_TOML).unwrap();

        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains(".yaml"), "got: {err}");
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let err = ConfigLoader::load_from_path(Path::new("/nonexistent/session.toml")).unwrap_err();
        assert!(matches!(err, ContractError::Io(_)));
    }
}

//! Configuration file support for ferro-interface.
//!
//! This module provides loading of `.ferro-interface.toml` configuration
//! files which can tune the aligner's scoring and structure-mapping
//! diagnostics.
//!
//! # Example Configuration
//!
//! ```toml
//! [alignment]
//! matrix = "identity"
//! match = 2
//! mismatch = -1
//! gap-open = 3
//! gap-extend = 1
//!
//! [structure]
//! warn-unaligned = false
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-interface.toml` in current directory
//! 2. `~/.config/ferro/interface.toml`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::align::{ScoringScheme, SubstitutionMatrix};
use crate::error::InterfaceError;

/// Parsed configuration from a .ferro-interface.toml file.
///
/// Unknown sections and keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterfaceConfig {
    /// Alignment scoring.
    #[serde(default)]
    pub alignment: AlignmentConfig,
    /// Structure mapping.
    #[serde(default)]
    pub structure: StructureConfig,
}

/// Alignment section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AlignmentConfig {
    /// Substitution matrix name ("blosum62" or "identity").
    pub matrix: Option<String>,
    /// Identity-matrix match score.
    #[serde(rename = "match")]
    pub match_score: Option<i32>,
    /// Identity-matrix mismatch score.
    #[serde(rename = "mismatch")]
    pub mismatch_score: Option<i32>,
    /// Gap opening penalty (positive).
    pub gap_open: Option<i32>,
    /// Gap extension penalty (positive).
    pub gap_extend: Option<i32>,
}

/// Structure section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StructureConfig {
    /// Log chain residues missing from the canonical protein.
    pub warn_unaligned: Option<bool>,
}

impl InterfaceConfig {
    /// Load configuration from the default locations.
    ///
    /// Searches for config in:
    /// 1. `.ferro-interface.toml` in current directory
    /// 2. `~/.config/ferro/interface.toml`
    pub fn load() -> Option<Self> {
        let cwd_config = PathBuf::from(".ferro-interface.toml");
        if cwd_config.exists() {
            match Self::load_from_path(&cwd_config) {
                Ok(config) => return Some(config),
                Err(e) => log::warn!("ignoring {}: {}", cwd_config.display(), e),
            }
        }

        if let Some(home) = dirs_home() {
            let home_config = home.join(".config").join("ferro").join("interface.toml");
            if home_config.exists() {
                match Self::load_from_path(&home_config) {
                    Ok(config) => return Some(config),
                    Err(e) => log::warn!("ignoring {}: {}", home_config.display(), e),
                }
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: InterfaceConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Normalize the matrix name and reject values the aligner cannot use.
    fn validate(&mut self) -> Result<(), ConfigError> {
        if let Some(matrix) = self.alignment.matrix.as_mut() {
            *matrix = matrix.to_lowercase();
            if matrix != "blosum62" && matrix != "identity" {
                return Err(ConfigError::Parse(format!("unknown matrix '{}'", matrix)));
            }
        }
        for (key, penalty) in [
            ("gap-open", self.alignment.gap_open),
            ("gap-extend", self.alignment.gap_extend),
        ] {
            if let Some(penalty) = penalty.filter(|p| *p < 0) {
                return Err(ConfigError::Parse(format!(
                    "{}: gap penalties are positive costs, found {}",
                    key, penalty
                )));
            }
        }
        Ok(())
    }

    /// Convert this config to the aligner's scoring scheme.
    pub fn to_scoring_scheme(&self) -> ScoringScheme {
        let defaults = ScoringScheme::default();
        let matrix = match self.alignment.matrix.as_deref() {
            Some("identity") => SubstitutionMatrix::Identity {
                match_score: self.alignment.match_score.unwrap_or(1),
                mismatch_score: self.alignment.mismatch_score.unwrap_or(-1),
            },
            _ => SubstitutionMatrix::Blosum62,
        };

        ScoringScheme {
            matrix,
            gap_open: self.alignment.gap_open.unwrap_or(defaults.gap_open),
            gap_extend: self.alignment.gap_extend.unwrap_or(defaults.gap_extend),
        }
    }

    /// Whether unaligned chain residues are logged (default: true).
    pub fn warn_unaligned(&self) -> bool {
        self.structure.warn_unaligned.unwrap_or(true)
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String),
    /// Parse error in config file.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for InterfaceError {
    fn from(err: ConfigError) -> Self {
        InterfaceError::Config {
            msg: err.to_string(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = InterfaceConfig::parse("").unwrap();
        assert_eq!(config, InterfaceConfig::default());
        assert_eq!(config.to_scoring_scheme(), ScoringScheme::default());
        assert!(config.warn_unaligned());
    }

    #[test]
    fn test_parse_identity_matrix() {
        let content = r#"
[alignment]
matrix = "identity"
match = 2
mismatch = -1
gap-open = 3
gap-extend = 1
"#;
        let config = InterfaceConfig::parse(content).unwrap();
        assert_eq!(
            config.to_scoring_scheme(),
            ScoringScheme::identity(2, -1, 3, 1)
        );
    }

    #[test]
    fn test_parse_gap_penalties_only() {
        let content = r#"
[alignment]
gap-open = 11
"#;
        let scheme = InterfaceConfig::parse(content).unwrap().to_scoring_scheme();
        assert_eq!(scheme.matrix, SubstitutionMatrix::Blosum62);
        assert_eq!(scheme.gap_open, 11);
        assert_eq!(scheme.gap_extend, 1);
    }

    #[test]
    fn test_parse_structure_section() {
        let content = r#"
[structure]
warn-unaligned = false
"#;
        let config = InterfaceConfig::parse(content).unwrap();
        assert!(!config.warn_unaligned());
    }

    #[test]
    fn test_comments_ignored() {
        let content = r#"
# This is a comment
[alignment]
# Another comment
matrix = "blosum62"  # inline comment
gap-extend = 2 # two
"#;
        let config = InterfaceConfig::parse(content).unwrap();
        assert_eq!(config.alignment.matrix.as_deref(), Some("blosum62"));
        assert_eq!(config.alignment.gap_extend, Some(2));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let content = r#"
[other]
matrix = "whatever"
[alignment]
colour = "blue"
"#;
        let config = InterfaceConfig::parse(content).unwrap();
        assert_eq!(config, InterfaceConfig::default());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            InterfaceConfig::parse("[alignment]\nmatrix = \"pam250\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(InterfaceConfig::parse("[alignment]\ngap-open = ten").is_err());
        assert!(InterfaceConfig::parse("[alignment]\ngap-open = -3").is_err());
        assert!(InterfaceConfig::parse("[structure]\nwarn-unaligned = maybe").is_err());
        assert!(InterfaceConfig::parse("[alignment]\njust a line").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = InterfaceConfig::load_from_path(Path::new("/nonexistent/interface.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        let err: InterfaceError = err.into();
        assert!(matches!(err, InterfaceError::Config { .. }));
    }

    #[test]
    fn test_matrix_name_is_case_insensitive() {
        let config = InterfaceConfig::parse("[alignment]\nmatrix = \"BLOSUM62\"").unwrap();
        assert_eq!(config.alignment.matrix.as_deref(), Some("blosum62"));
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let err = InterfaceConfig::parse("[alignment]\nmatrix = \"#identity\"").unwrap_err();
        assert!(err.to_string().contains("#identity"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = InterfaceConfig::parse("[alignment]\ngap-open = 12\n[structure]\nwarn-unaligned = false").unwrap();
        let text = config.to_toml().unwrap();
        assert!(text.contains("gap-open = 12"));
        assert_eq!(InterfaceConfig::parse(&text).unwrap(), config);
    }
}

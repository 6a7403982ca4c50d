//! Pipeline configuration.
//!
//! Defaults reproduce the classic demonstration (n up to 5, the curated distractors, two-space
//! indentation). A YAML or JSON file can override any field; CLI flags override the file.
//!
//! ```yaml
//! max_n: 3
//! epsilon: "<e>"
//! distractors:
//!   count: 4
//!   seed: 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{unspanned, AnbnError, ErrorKind, ErrorReporting, PhaseContext, SourceContext};
use crate::tree::render::{DEFAULT_INDENT, EPSILON};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Largest n for generated members, at most [`MAX_GENERATED_N`].
    ///
    /// Every member up to `max_n` gets a rendered tree, and the tree for n pairs indents
    /// about 3n² bytes, so the whole run grows with the cube of `max_n`.
    pub max_n: usize,
    /// Largest n the pipeline will build a boxed derivation tree for.
    pub max_pairs: usize,
    /// Largest n `tree --arena` will build and render.
    pub max_arena_pairs: usize,
    pub indent_unit: String,
    pub epsilon: String,
    pub distractors: DistractorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistractorConfig {
    /// Random distractors appended after the curated ones.
    pub count: usize,
    pub max_len: usize,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Upper bound for `max_n`.
pub const MAX_GENERATED_N: usize = 512;

impl Default for Config {
    fn default() -> Self {
        Self {
            max_n: 5,
            max_pairs: 4096,
            max_arena_pairs: 10_000,
            indent_unit: DEFAULT_INDENT.to_string(),
            epsilon: EPSILON.to_string(),
            distractors: DistractorConfig::default(),
        }
    }
}

impl Default for DistractorConfig {
    fn default() -> Self {
        Self {
            count: 0,
            max_len: 8,
            seed: None,
        }
    }
}

/// Accepted configuration file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

impl Config {
    /// Loads and validates a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, AnbnError> {
        let display = path.display().to_string();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => {
                return Err(PhaseContext::detached("config").report(
                    ErrorKind::InvalidPath {
                        path: display,
                        reason: "expected a .yaml, .yml or .json file".into(),
                    },
                    unspanned(),
                ))
            }
        };

        let content = std::fs::read_to_string(path).map_err(|error| {
            PhaseContext::detached("config").report(
                ErrorKind::InvalidPath {
                    path: display.clone(),
                    reason: error.to_string(),
                },
                unspanned(),
            )
        })?;

        match format {
            FileFormat::Yaml => Self::from_yaml_str(&display, &content),
            FileFormat::Json => Self::from_json_str(&display, &content),
        }
    }

    pub fn from_yaml_str(name: &str, content: &str) -> Result<Self, AnbnError> {
        let context = PhaseContext::new(SourceContext::from_input(name, content), "config");
        let config: Config = serde_yaml::from_str(content).map_err(|error| {
            let span = error
                .location()
                .map(|loc| miette::SourceSpan::from(loc.index()..loc.index()))
                .unwrap_or_else(unspanned);
            context.invalid_config(&error.to_string(), span)
        })?;
        config.validate_in(&context)?;
        Ok(config)
    }

    pub fn from_json_str(name: &str, content: &str) -> Result<Self, AnbnError> {
        let context = PhaseContext::new(SourceContext::from_input(name, content), "config");
        let config: Config = serde_json::from_str(content).map_err(|error| {
            let span = line_column_offset(content, error.line(), error.column())
                .map(|offset| miette::SourceSpan::from(offset..offset))
                .unwrap_or_else(unspanned);
            context.invalid_config(&error.to_string(), span)
        })?;
        config.validate_in(&context)?;
        Ok(config)
    }

    /// Checks cross-field constraints.
    pub fn validate(&self) -> Result<(), AnbnError> {
        self.validate_in(&PhaseContext::detached("config"))
    }

    fn validate_in(&self, context: &PhaseContext) -> Result<(), AnbnError> {
        if self.max_n > MAX_GENERATED_N {
            return Err(context.invalid_config(
                &format!("max_n ({}) exceeds {MAX_GENERATED_N}", self.max_n),
                unspanned(),
            ));
        }
        if self.max_n > self.max_pairs {
            return Err(context.invalid_config(
                &format!(
                    "max_n ({}) exceeds max_pairs ({})",
                    self.max_n, self.max_pairs
                ),
                unspanned(),
            ));
        }
        if self.epsilon.is_empty() {
            return Err(context.invalid_config("epsilon must not be empty", unspanned()));
        }
        if self.distractors.count > 0 && self.distractors.max_len == 0 {
            return Err(context.invalid_config(
                "distractors.max_len must be at least 1 when distractors.count > 0",
                unspanned(),
            ));
        }
        Ok(())
    }
}

/// serde_json reports 1-based line/column; miette wants a byte offset.
fn line_column_offset(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, text) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return Some((offset + column.saturating_sub(1)).min(content.len()));
        }
        offset += text.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.max_n, 5);
        assert_eq!(config.indent_unit, "  ");
        assert_eq!(config.epsilon, "ε");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_overrides_only_given_fields() {
        let config = Config::from_yaml_str(
            "test.yaml",
            "max_n: 3\ndistractors:\n  count: 4\n  seed: 7\n",
        )
        .unwrap();
        assert_eq!(config.max_n, 3);
        assert_eq!(config.max_pairs, 4096);
        assert_eq!(config.distractors.count, 4);
        assert_eq!(config.distractors.max_len, 8);
        assert_eq!(config.distractors.seed, Some(7));
    }

    #[test]
    fn test_json_config() {
        let config = Config::from_json_str("test.json", r#"{"epsilon": "<e>"}"#).unwrap();
        assert_eq!(config.epsilon, "<e>");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = Config::from_yaml_str("test.yaml", "maxn: 3\n").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidConfig { .. }));
    }

    #[test]
    fn test_cross_field_validation() {
        let err = Config::from_yaml_str("test.yaml", "max_n: 10\nmax_pairs: 4\n").unwrap_err();
        assert!(err.to_string().contains("exceeds max_pairs"));

        let err =
            Config::from_yaml_str("test.yaml", "distractors:\n  count: 1\n  max_len: 0\n")
                .unwrap_err();
        assert!(err.to_string().contains("max_len"));
    }

    #[test]
    fn test_max_n_is_capped_below_max_pairs() {
        let err = Config::from_yaml_str("test.yaml", "max_n: 513\n").unwrap_err();
        assert!(err.to_string().contains("exceeds 512"));
        assert!(Config::from_yaml_str("test.yaml", "max_n: 512\n").is_ok());
    }

    #[test]
    fn test_line_column_offset() {
        assert_eq!(line_column_offset("ab\ncd", 2, 2), Some(4));
        assert_eq!(line_column_offset("ab", 0, 1), None);
    }
}

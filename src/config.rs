//! Project configuration (pxsvg.yaml).
//!
//! Supplies defaults for the CLI: output format, SVG strategy, layer
//! grouping, frame, and extra recognized colours for CSS class names.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PxSvgError, Result};
use crate::export::{ExportOptions, Strategy};
use crate::types::Colour;
use crate::vector::NamedColours;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "pxsvg.yaml";

/// Kind of document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One SVG document for the whole frame.
    #[default]
    Svg,
    /// JSON document with one SVG per layer.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Svg => write!(f, "svg"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PxSvgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "svg" => Ok(OutputFormat::Svg),
            "json" => Ok(OutputFormat::Json),
            other => Err(PxSvgError::Parse {
                message: format!("Unknown output format: {}", other),
                help: Some("Use one of: svg, json".to_string()),
            }),
        }
    }
}

/// Project configuration loaded from pxsvg.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output document kind.
    pub format: OutputFormat,

    /// SVG encoding strategy.
    pub strategy: Strategy,

    /// Wrap each layer in its own group.
    pub layer_groups: bool,

    /// Default 1-based frame to export.
    pub frame: u32,

    /// Extra recognized colours: hex colour -> class name.
    pub named_colours: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            strategy: Strategy::Optimized,
            layer_groups: true,
            frame: 1,
            named_colours: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PxSvgError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content).map_err(|e| match e {
            PxSvgError::Parse { message, .. } => PxSvgError::Parse {
                message,
                help: Some(format!("Check {} syntax", path.display())),
            },
            other => other,
        })
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| PxSvgError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })
    }

    /// Find pxsvg.yaml in `dir`.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load an explicit config file, or pxsvg.yaml from `dir` if present,
    /// or fall back to defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::find(dir) {
                Some(path) => Self::load(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Build the recognized-colour table: the builtin names plus configured ones.
    pub fn named_colours(&self) -> Result<NamedColours> {
        let mut named = NamedColours::default();
        for (hex, name) in &self.named_colours {
            let colour = Colour::from_hex(hex).map_err(|_| PxSvgError::Parse {
                message: format!("Invalid colour '{}' in named_colours", hex),
                help: Some("Keys must be hex colours such as \"#ff0000\"".to_string()),
            })?;
            named.insert(colour, name);
        }
        Ok(named)
    }

    /// Export options described by this config.
    pub fn export_options(&self) -> Result<ExportOptions> {
        Ok(ExportOptions::new(self.strategy)
            .with_layer_groups(self.layer_groups)
            .with_named_colours(self.named_colours()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full() {
        let yaml = r##"
format: json
strategy: css
layer_groups: false
frame: 3
named_colours:
  "#ff0000": red
"##;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.strategy, Strategy::CssClasses);
        assert!(!config.layer_groups);
        assert_eq!(config.frame, 3);
        assert_eq!(config.named_colours.get("#ff0000").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_parse_partial_uses_defaults() {
        let config = Config::parse("strategy: flat\n").unwrap();
        assert_eq!(config.strategy, Strategy::Flat);
        assert_eq!(config.format, OutputFormat::Svg);
        assert!(config.layer_groups);
        assert_eq!(config.frame, 1);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("colour_depth: 8\n").is_err());
        assert!(Config::parse("strategy: bezier\n").is_err());
    }

    #[test]
    fn test_named_colours_normalized() {
        let config = Config::parse("named_colours:\n  \"#F00\": danger zone\n").unwrap();
        let named = config.named_colours().unwrap();
        assert_eq!(named.get("#ff0000"), Some("danger_zone"));
        assert_eq!(named.get("#ffffff"), Some("white"));
    }

    #[test]
    fn test_named_colours_invalid_hex() {
        let config = Config::parse("named_colours:\n  nope: x\n").unwrap();
        assert!(config.named_colours().is_err());
    }

    #[test]
    fn test_resolve_finds_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "frame: 2\n").unwrap();

        let config = Config::resolve(None, dir.path()).unwrap();
        assert_eq!(config.frame, 2);
    }

    #[test]
    fn test_resolve_defaults_without_file() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::resolve(None, dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("png".parse::<OutputFormat>().is_err());
    }
}

//! Configuration file support for `.papermap.toml`
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.papermap.toml` (user defaults)
//! - Project directory: `./.papermap.toml` (project defaults)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments (`--format`, `--excerpt-chars`, ...)
//! 2. Project config (`./.papermap.toml`)
//! 3. User config (`~/.papermap.toml`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use colored::Colorize;
use papermap_backend::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home and working directories.
pub const CONFIG_FILE_NAME: &str = ".papermap.toml";

/// Template written by `papermap config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# papermap configuration file

# Defaults for `papermap parse`
[parse]
# Output format: json, yaml, or outline
# output = "json"

# Characters kept in each section excerpt before "..."
# excerpt_chars = 150

# Raw characters scanned after a LaTeX heading / HTML closing tag
# latex_window = 400
# html_window = 400

# Defaults for `papermap connections`
[connections]
# Output format: json, yaml, or table
# output = "json"
"#;

/// Configuration file structure for `.papermap.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for the parse command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<ParseConfig>,

    /// Defaults for the connections command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionsConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Default output format (json, yaml, outline)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt_chars: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex_window: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_window: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionsConfig {
    /// Default output format (json, yaml, table)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// `~/.papermap.toml`, if a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// `./.papermap.toml`
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    pub fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user = Self::user_config_path().and_then(|path| Self::load_if_present(&path, "user"));
        let project = Self::load_if_present(&Self::project_config_path(), "project");
        (user, project)
    }

    /// Discover and merge in one step.
    pub fn load() -> Self {
        let (user, project) = Self::discover_configs();
        Self::merge(user, project)
    }

    fn load_if_present(path: &Path, scope: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load {scope} config from {}: {e:#}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Merge configs field by field: project values override user values.
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let mut merged = user_config.unwrap_or_default();
        let Some(project) = project_config else {
            return merged;
        };

        if let Some(parse) = project.parse {
            let mut merged_parse = merged.parse.unwrap_or_default();
            if parse.output.is_some() {
                merged_parse.output = parse.output;
            }
            if parse.excerpt_chars.is_some() {
                merged_parse.excerpt_chars = parse.excerpt_chars;
            }
            if parse.latex_window.is_some() {
                merged_parse.latex_window = parse.latex_window;
            }
            if parse.html_window.is_some() {
                merged_parse.html_window = parse.html_window;
            }
            merged.parse = Some(merged_parse);
        }

        if let Some(connections) = project.connections {
            let mut merged_connections = merged.connections.unwrap_or_default();
            if connections.output.is_some() {
                merged_connections.output = connections.output;
            }
            merged.connections = Some(merged_connections);
        }

        merged
    }

    /// Configured `[parse] output`, if any
    pub fn parse_output(&self) -> Option<&str> {
        self.parse.as_ref().and_then(|p| p.output.as_deref())
    }

    /// Configured `[connections] output`, if any
    pub fn connections_output(&self) -> Option<&str> {
        self.connections.as_ref().and_then(|c| c.output.as_deref())
    }

    /// Parser options from config, overridden by any CLI values.
    pub fn parse_options(
        &self,
        excerpt_chars: Option<usize>,
        latex_window: Option<usize>,
        html_window: Option<usize>,
    ) -> ParseOptions {
        let parse = self.parse.clone().unwrap_or_default();
        let mut options = ParseOptions::default();
        if let Some(chars) = excerpt_chars.or(parse.excerpt_chars) {
            options = options.with_excerpt_chars(chars);
        }
        if let Some(window) = latex_window.or(parse.latex_window) {
            options = options.with_latex_window(window);
        }
        if let Some(window) = html_window.or(parse.html_window) {
            options = options.with_html_window(window);
        }
        options
    }

    /// Look up a dotted key such as `parse.output`.
    ///
    /// Returns `Ok(None)` for a known key without a value.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let parse = self.parse.as_ref();
        let value = match key.split('.').collect::<Vec<_>>().as_slice() {
            ["parse", "output"] => parse.and_then(|p| p.output.clone()),
            ["parse", "excerpt_chars"] => {
                parse.and_then(|p| p.excerpt_chars).map(|v| v.to_string())
            }
            ["parse", "latex_window"] => parse.and_then(|p| p.latex_window).map(|v| v.to_string()),
            ["parse", "html_window"] => parse.and_then(|p| p.html_window).map(|v| v.to_string()),
            ["connections", "output"] => self.connections_output().map(String::from),
            _ => anyhow::bail!(
                "Unknown configuration key '{key}' (expected parse.output, parse.excerpt_chars, \
                 parse.latex_window, parse.html_window or connections.output)"
            ),
        };
        Ok(value)
    }
}

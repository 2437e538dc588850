//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use crate::reports::SummaryPosition;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".swc-port-tools.yaml",
    ".swc-port-tools.yml",
    "swc-port-tools.yaml",
    "swc-port-tools.yml",
];

/// Directory name under the user config directory
const CONFIG_DIR_NAME: &str = "swc-port-tools";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/swc-port-tools/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    search_paths()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(git_root) = find_git_root() {
        if !dirs.contains(&git_root) {
            dirs.push(git_root);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs.push(config_dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs.push(home);
    }
    dirs
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI arguments
    /// left at their defaults keep the file settings.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.report.summary_position != defaults.report.summary_position {
            self.report.summary_position = other.report.summary_position;
        }
        if other.report.only_changes {
            self.report.only_changes = true;
        }

        if !other.diff.compare_source_id {
            self.diff.compare_source_id = false;
        }
        if !other.diff.consistency_check {
            self.diff.consistency_check = false;
        }

        if other.parsing.lenient {
            self.parsing.lenient = true;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.fail_on_conflict {
            self.behavior.fail_on_conflict = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }
}

/// Command-line values layered over a loaded config.
///
/// `settings` follows the non-default rule of [`AppConfig::merge`]. The
/// optional fields were given explicitly and always win, even when they
/// equal the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub settings: AppConfig,
    pub summary_position: Option<SummaryPosition>,
}

impl From<AppConfig> for ConfigOverrides {
    fn from(settings: AppConfig) -> Self {
        Self {
            settings,
            summary_position: None,
        }
    }
}

impl AppConfig {
    /// Apply command-line overrides on top of this config.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        self.merge(&overrides.settings);
        if let Some(position) = overrides.summary_position {
            self.report.summary_position = position;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# swc-port-tools configuration
# Place this file at .swc-port-tools.yaml in your project root or ~/.config/swc-port-tools/

{}",
        serde_yaml_ng::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# swc-port-tools configuration file
# =================================
#
# Place it at:
#   - .swc-port-tools.yaml in your project root
#   - ~/.config/swc-port-tools/swc-port-tools.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Format: auto, summary, table, json, csv
  format: auto
  # Output file path (omit for stdout)
  # file: port-diff.csv
  # Disable colored output
  no_color: false

# Report layout
report:
  # Summary rows: top or bottom
  summary_position: top
  # Hide unchanged ports
  only_changes: false

# Diff engine
diff:
  # A changed item ID counts as a modification
  compare_source_id: true
  # Refuse to compare inputs with mismatched identity schemes
  consistency_check: true

# Port source parsing
parsing:
  # Skip malformed PORT entries instead of failing the file
  lenient: false

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Exit with code 1 if merging produced conflicts
  fail_on_conflict: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{ReportFormat, SummaryPosition};
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".swc-port-tools.yaml");
        std::fs::write(&config_path, "parsing:\n  lenient: true\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
output:
  format: csv
report:
  summary_position: bottom
diff:
  compare_source_id: false
behavior:
  fail_on_change: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.output.format, ReportFormat::Csv);
        assert_eq!(config.report.summary_position, SummaryPosition::Bottom);
        assert!(!config.diff.compare_source_id);
        assert!(config.diff.consistency_check);
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "output: [unclosed").unwrap();

        let result = load_config_file(&config_path);
        assert!(matches!(result, Err(ConfigFileError::Parse(_))));
    }

    #[test]
    fn test_config_merge() {
        let mut file_config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .lenient(true)
            .build();
        let cli = AppConfig::builder()
            .summary_position(SummaryPosition::Bottom)
            .compare_source_id(false)
            .fail_on_change(true)
            .build();

        file_config.merge(&cli);

        // CLI left the format at auto, so the file value stays
        assert_eq!(file_config.output.format, ReportFormat::Json);
        assert!(file_config.parsing.lenient);
        assert_eq!(file_config.report.summary_position, SummaryPosition::Bottom);
        assert!(!file_config.diff.compare_source_id);
        assert!(file_config.behavior.fail_on_change);
    }

    #[test]
    fn test_explicit_summary_position_beats_file() {
        let mut file_config = AppConfig::builder()
            .summary_position(SummaryPosition::Bottom)
            .build();

        // Explicitly asking for the default still overrides the file
        let overrides = ConfigOverrides {
            settings: AppConfig::builder().only_changes(true).build(),
            summary_position: Some(SummaryPosition::Top),
        };
        file_config.apply_overrides(&overrides);
        assert_eq!(file_config.report.summary_position, SummaryPosition::Top);
        assert!(file_config.report.only_changes);

        // Not given at all keeps the file value
        let mut file_config = AppConfig::builder()
            .summary_position(SummaryPosition::Bottom)
            .build();
        file_config.apply_overrides(&ConfigOverrides::from(AppConfig::default()));
        assert_eq!(file_config.report.summary_position, SummaryPosition::Bottom);
    }

    #[test]
    fn test_generate_example_config_round_trips() {
        let example = generate_example_config();
        assert!(example.contains("output:"));
        let parsed: AppConfig = serde_yaml_ng::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());

        let full: AppConfig = serde_yaml_ng::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "parsing:\n  lenient: true\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }
}

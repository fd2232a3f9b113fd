//! Project-level configuration loaded from `debtscope.toml`
//!
//! Example:
//!
//! ```toml
//! [scan]
//! exclude = ["vendor", "generated"]
//!
//! [report]
//! format = "html"
//! largest_files = 15
//! top_languages = 5
//! seed = 7
//! open = false
//! output_dir = "reports"
//! ```
//!
//! Every key is optional. A missing or unparseable file yields the defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "debtscope.toml";

/// Written by `debtscope init`
pub const EXAMPLE_CONFIG: &str = r#"# debtscope configuration

[scan]
# Directory names to skip in addition to the built-in list
# (.git, node_modules, __pycache__, venv, build, dist, ...)
exclude = []

[report]
# Output format: text, html or json
format = "text"

# Rows in the "largest files" table
largest_files = 10

# Languages shown in the language chart
top_languages = 5

# Fix the verdict line for reproducible output
# seed = 42

# Open HTML reports in the default viewer
open = false

# Where HTML reports are written (defaults to the system temp dir)
# output_dir = "reports"
"#;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// `[scan]` section
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Directory names to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// `[report]` section; `None` means "use the built-in default"
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub largest_files: Option<usize>,

    #[serde(default)]
    pub top_languages: Option<usize>,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub open: Option<bool>,

    /// Relative paths resolve against the project root
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ProjectConfig {
    /// Output directory for auto-named reports
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        match &self.report.output_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_root.join(dir),
            None => std::env::temp_dir(),
        }
    }
}

/// Load project configuration from `debtscope.toml` in `project_root`
///
/// Returns default config if the file is absent or malformed.
pub fn load_project_config(project_root: &Path) -> ProjectConfig {
    let path = project_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No project config found, using defaults");
        return ProjectConfig::default();
    }

    match load_toml_config(&path) {
        Ok(config) => {
            debug!("Loaded project config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            ProjectConfig::default()
        }
    }
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert!(config.scan.exclude.is_empty());
        assert!(config.report.format.is_none());
        assert_eq!(config.output_dir(Path::new("/proj")), std::env::temp_dir());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_str = r#"
[scan]
exclude = ["vendor"]

[report]
format = "html"
largest_files = 15
seed = 7
output_dir = "reports"
"#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.scan.exclude, vec!["vendor"]);
        assert_eq!(config.report.format.as_deref(), Some("html"));
        assert_eq!(config.report.largest_files, Some(15));
        assert_eq!(config.report.seed, Some(7));
        assert!(config.report.open.is_none());
        assert_eq!(
            config.output_dir(Path::new("/proj")),
            PathBuf::from("/proj/reports")
        );
    }

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.report.format.as_deref(), Some("text"));
        assert_eq!(config.report.largest_files, Some(10));
        assert_eq!(config.report.open, Some(false));
        assert!(config.report.seed.is_none());
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[report\nformat = ").unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[scan]\nexclude = [\"third_party\"]\n",
        )
        .unwrap();
        assert_eq!(load_project_config(dir.path()).scan.exclude, vec!["third_party"]);
    }
}
